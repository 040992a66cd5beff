use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User, UserFilter};

/// Repository trait for User persistence
///
/// Implementations must keep the same error contract: a missing record is
/// `NotFound` carrying that id, any storage failure is an opaque `Internal`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user; the storage assigns the id and timestamps
    async fn create(&self, input: CreateUser) -> UserResult<User>;

    /// Get a user by ID
    async fn get(&self, id: Uuid) -> UserResult<User>;

    /// List users matching the filters, newest first, windowed by offset/limit
    async fn get_all(&self, filter: UserFilter, offset: u64, limit: u64) -> UserResult<Vec<User>>;

    /// Count users matching the filters (ignores the window)
    async fn count(&self, filter: UserFilter) -> UserResult<u64>;

    /// Apply the present fields of a partial update, returning the refreshed user
    async fn update(&self, id: Uuid, update: UpdateUser) -> UserResult<User>;

    /// Delete a user by ID
    async fn delete(&self, id: Uuid) -> UserResult<()>;
}

fn matches_filter(user: &User, filter: &UserFilter) -> bool {
    fn contains(haystack: &str, needle: &Option<String>) -> bool {
        match needle.as_deref() {
            Some(needle) if !needle.is_empty() => haystack
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            _ => true,
        }
    }

    contains(&user.first_name, &filter.first_name)
        && contains(&user.last_name, &filter.last_name)
        && contains(&user.email, &filter.email)
        && contains(&user.phone, &filter.phone)
}

/// In-memory implementation of UserRepository (for handler tests/development)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Filtered records ordered by creation time descending
    async fn matching(&self, filter: &UserFilter) -> Vec<User> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users
            .values()
            .filter(|u| matches_filter(u, filter))
            .cloned()
            .collect();

        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            phone: input.phone,
            created_at: now,
            updated_at: now,
        };

        let mut users = self.users.write().await;
        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn get(&self, id: Uuid) -> UserResult<User> {
        let users = self.users.read().await;
        users.get(&id).cloned().ok_or(UserError::NotFound(id))
    }

    async fn get_all(&self, filter: UserFilter, offset: u64, limit: u64) -> UserResult<Vec<User>> {
        let result = self
            .matching(&filter)
            .await
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();

        Ok(result)
    }

    async fn count(&self, filter: UserFilter) -> UserResult<u64> {
        Ok(self.matching(&filter).await.len() as u64)
    }

    async fn update(&self, id: Uuid, update: UpdateUser) -> UserResult<User> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(UserError::NotFound(id))?;

        user.apply_update(update);
        let updated = user.clone();

        tracing::info!(user_id = %id, "Updated user");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> UserResult<()> {
        let mut users = self.users.write().await;

        if users.remove(&id).is_none() {
            return Err(UserError::NotFound(id));
        }

        tracing::info!(user_id = %id, "Deleted user");
        Ok(())
    }
}
