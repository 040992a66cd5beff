use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// User entity - represents a stored user record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier (generated, never supplied by callers)
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Contact email (no uniqueness enforced)
    pub email: String,
    pub phone: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp, touched on every write
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
}

/// DTO for partially updating an existing user.
///
/// An absent field is left unchanged; a present field must be non-empty, so
/// "omit the field" and "set it to empty" stay distinguishable.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = at_least_one_field, message = "at least one field is required"))]
pub struct UpdateUser {
    #[validate(length(min = 1, message = "first name cannot be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "last name cannot be empty"))]
    pub last_name: Option<String>,
    #[validate(length(min = 1, message = "email cannot be empty"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "phone cannot be empty"))]
    pub phone: Option<String>,
}

fn at_least_one_field(update: &UpdateUser) -> Result<(), validator::ValidationError> {
    if update.is_empty() {
        return Err(validator::ValidationError::new("at_least_one_field"));
    }
    Ok(())
}

impl UpdateUser {
    /// True when no field is present
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
    }
}

/// Query filters for listing users.
///
/// Each present, non-empty value matches as a case-insensitive substring;
/// predicates are ANDed together.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct UserFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl UserFilter {
    /// True when no filter contributes a predicate
    pub fn is_empty(&self) -> bool {
        fn blank(value: &Option<String>) -> bool {
            value.as_deref().is_none_or(str::is_empty)
        }

        blank(&self.first_name) && blank(&self.last_name) && blank(&self.email) && blank(&self.phone)
    }
}

/// Success message payload for operations without entity data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl User {
    /// Apply a partial update, refreshing `updated_at`
    pub fn apply_update(&mut self, update: UpdateUser) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_requires_all_fields() {
        let input = CreateUser {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
        };
        assert!(input.validate().is_ok());

        let input = CreateUser {
            first_name: String::new(),
            ..input
        };
        let err = input.validate().unwrap_err();
        assert!(err.field_errors().contains_key("first_name"));
    }

    #[test]
    fn test_update_user_rejects_empty_payload() {
        let update = UpdateUser::default();
        assert!(update.is_empty());
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_update_user_rejects_present_but_empty_field() {
        let update = UpdateUser {
            email: Some(String::new()),
            ..Default::default()
        };
        assert!(!update.is_empty());
        let err = update.validate().unwrap_err();
        assert!(err.field_errors().contains_key("email"));
    }

    #[test]
    fn test_update_user_accepts_single_field() {
        let update = UpdateUser {
            phone: Some("555-0199".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_filter_is_empty_treats_blank_values_as_absent() {
        assert!(UserFilter::default().is_empty());

        let filter = UserFilter {
            first_name: Some(String::new()),
            ..Default::default()
        };
        assert!(filter.is_empty());

        let filter = UserFilter {
            email: Some("ann".to_string()),
            ..Default::default()
        };
        assert!(!filter.is_empty());
    }
}
