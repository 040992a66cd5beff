use async_trait::async_trait;
use sea_orm::sea_query::{Condition, Expr, ExprTrait, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{CreateUser, UpdateUser, User, UserFilter},
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository using SeaORM
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// One `LOWER(col) LIKE '%value%'` predicate per present, non-empty filter
/// field, ANDed together. An empty filter yields an always-true condition.
fn filter_condition(filter: &UserFilter) -> Condition {
    let mut condition = Condition::all();
    if filter.is_empty() {
        return condition;
    }

    let fields = [
        (entity::Column::FirstName, &filter.first_name),
        (entity::Column::LastName, &filter.last_name),
        (entity::Column::Email, &filter.email),
        (entity::Column::Phone, &filter.phone),
    ];

    for (column, value) in fields {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            let pattern = format!("%{}%", value.to_lowercase());
            condition = condition.add(Expr::expr(Func::lower(Expr::col(column))).like(pattern));
        }
    }
    condition
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let active_model: entity::ActiveModel = input.into();

        let model = active_model.insert(&self.db).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to insert user");
            UserError::Internal("user not created".to_string())
        })?;

        tracing::info!(user_id = %model.id, "Created user");
        Ok(model.into())
    }

    async fn get(&self, id: Uuid) -> UserResult<User> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %id, error = %e, "Failed to fetch user");
                UserError::Internal("user not retrieved".to_string())
            })?
            .ok_or(UserError::NotFound(id))?;

        Ok(model.into())
    }

    async fn get_all(&self, filter: UserFilter, offset: u64, limit: u64) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .filter(filter_condition(&filter))
            .order_by_desc(entity::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to list users");
                UserError::Internal("user not retrieved".to_string())
            })?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: UserFilter) -> UserResult<u64> {
        entity::Entity::find()
            .filter(filter_condition(&filter))
            .count(&self.db)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to count users");
                UserError::Internal("user not counted".to_string())
            })
    }

    async fn update(&self, id: Uuid, update: UpdateUser) -> UserResult<User> {
        if update.is_empty() {
            // Nothing to write; behaves as a read so NotFound still surfaces
            return self.get(id).await;
        }

        let mut active_model = entity::ActiveModel {
            ..Default::default()
        };
        if let Some(first_name) = update.first_name {
            active_model.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            active_model.last_name = Set(last_name);
        }
        if let Some(email) = update.email {
            active_model.email = Set(email);
        }
        if let Some(phone) = update.phone {
            active_model.phone = Set(phone);
        }

        let result = entity::Entity::update_many()
            .set(active_model)
            .filter(entity::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %id, error = %e, "Failed to update user");
                UserError::Internal("user not updated".to_string())
            })?;

        if result.rows_affected == 0 {
            return Err(UserError::NotFound(id));
        }

        tracing::info!(user_id = %id, "Updated user");

        // Re-read so the trigger-touched updated_at is visible
        self.get(id).await
    }

    async fn delete(&self, id: Uuid) -> UserResult<()> {
        let result = entity::Entity::delete_many()
            .filter(entity::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %id, error = %e, "Failed to delete user");
                UserError::Internal("user not deleted".to_string())
            })?;

        if result.rows_affected == 0 {
            return Err(UserError::NotFound(id));
        }

        tracing::info!(user_id = %id, "Deleted user");
        Ok(())
    }
}
