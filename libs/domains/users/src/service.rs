use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User, UserFilter};
use crate::repository::UserRepository;

/// Service layer for user operations.
///
/// Validates inputs before any repository call and logs each operation with
/// ids and counts only; contact field values stay out of the logs.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user; all four fields must be non-empty
    pub async fn create(&self, input: CreateUser) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        tracing::debug!("Creating user");
        let user = self.repository.create(input).await?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Get a user by ID
    pub async fn get(&self, id: Uuid) -> UserResult<User> {
        tracing::debug!(user_id = %id, "Fetching user");
        self.repository.get(id).await
    }

    /// List users matching the filters, windowed by offset/limit
    pub async fn get_all(
        &self,
        filter: UserFilter,
        offset: u64,
        limit: u64,
    ) -> UserResult<Vec<User>> {
        tracing::debug!(offset, limit, "Listing users");
        let users = self.repository.get_all(filter, offset, limit).await?;

        tracing::info!(count = users.len(), "Users listed");
        Ok(users)
    }

    /// Count users matching the filters
    pub async fn count(&self, filter: UserFilter) -> UserResult<u64> {
        self.repository.count(filter).await
    }

    /// Partially update a user; at least one field must be present and
    /// present fields must be non-empty. Returns the refreshed record.
    pub async fn update(&self, id: Uuid, update: UpdateUser) -> UserResult<User> {
        update
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        tracing::debug!(user_id = %id, "Updating user");
        let user = self.repository.update(id, update).await?;

        tracing::info!(user_id = %id, "User updated");
        Ok(user)
    }

    /// Delete a user by ID
    pub async fn delete(&self, id: Uuid) -> UserResult<()> {
        tracing::debug!(user_id = %id, "Deleting user");
        self.repository.delete(id).await?;

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
