use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the users table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone: model.phone,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

// The storage adapter assigns the id and both timestamps at creation time;
// updated_at is additionally touched by a database trigger on UPDATE.
impl From<crate::models::CreateUser> for ActiveModel {
    fn from(input: crate::models::CreateUser) -> Self {
        let now = chrono::Utc::now();
        ActiveModel {
            id: Set(Uuid::now_v7()),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            email: Set(input.email),
            phone: Set(input.phone),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}
