use axum::{
    Router,
    extract::{Query, State},
    routing::get,
};
use axum_helpers::{ApiResponse, UuidPath, ValidatedJson};
use pagination::{Meta, parse_default_limit};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::error::UserResult;
use crate::models::{CreateUser, MessageResponse, UpdateUser, User, UserFilter};
use crate::repository::UserRepository;
use crate::service::UserService;

const TAG: &str = "Users";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, delete_user),
    components(schemas(User, CreateUser, UpdateUser, MessageResponse, pagination::Meta)),
    tags(
        (name = TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// Handler state: the service plus the configured default page size,
/// kept as a string and parsed only when a request needs the fallback.
struct UsersState<R: UserRepository> {
    service: UserService<R>,
    default_limit: String,
}

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(
    service: UserService<R>,
    default_limit: String,
) -> Router {
    let state = Arc::new(UsersState {
        service,
        default_limit,
    });

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .with_state(state)
}

/// Query parameters for listing users
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// Case-insensitive substring match on first name
    pub first_name: Option<String>,
    /// Case-insensitive substring match on last name
    pub last_name: Option<String>,
    /// Case-insensitive substring match on email
    pub email: Option<String>,
    /// Case-insensitive substring match on phone
    pub phone: Option<String>,
    /// Page size; non-positive or absent falls back to the configured default
    pub limit: Option<i64>,
    /// 1-based page number; non-positive or absent is treated as 1
    pub page: Option<i64>,
}

impl ListUsersQuery {
    fn into_parts(self) -> (UserFilter, i64, i64) {
        let filter = UserFilter {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
        };
        (filter, self.limit.unwrap_or(0), self.page.unwrap_or(0))
    }
}

/// List users with filters and pagination metadata
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Paginated list of users", body = Vec<User>),
        (status = 500, description = "Storage or configuration error")
    )
)]
async fn list_users<R: UserRepository>(
    State(state): State<Arc<UsersState<R>>>,
    Query(query): Query<ListUsersQuery>,
) -> UserResult<ApiResponse<Vec<User>>> {
    let (filter, mut limit, page) = query.into_parts();

    if limit <= 0 {
        limit = parse_default_limit(&state.default_limit)? as i64;
    }

    let total_count = state.service.count(filter.clone()).await?;
    let meta = Meta::new(page, limit, total_count, &state.default_limit)?;

    let users = state
        .service
        .get_all(filter, meta.offset(), meta.limit())
        .await?;

    Ok(ApiResponse::ok_with_meta(users, meta))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Missing or empty field"),
        (status = 500, description = "Storage error")
    )
)]
async fn create_user<R: UserRepository>(
    State(state): State<Arc<UsersState<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<ApiResponse<User>> {
    let user = state.service.create(input).await?;
    Ok(ApiResponse::created(user))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, description = "Malformed UUID"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Storage error")
    )
)]
async fn get_user<R: UserRepository>(
    State(state): State<Arc<UsersState<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<ApiResponse<User>> {
    let user = state.service.get(id).await?;
    Ok(ApiResponse::ok(user))
}

/// Partially update a user
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "No fields, or a present field is empty"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Storage error")
    )
)]
async fn update_user<R: UserRepository>(
    State(state): State<Arc<UsersState<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(update): ValidatedJson<UpdateUser>,
) -> UserResult<ApiResponse<User>> {
    let user = state.service.update(id, update).await?;
    Ok(ApiResponse::ok(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Malformed UUID"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Storage error")
    )
)]
async fn delete_user<R: UserRepository>(
    State(state): State<Arc<UsersState<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<ApiResponse<MessageResponse>> {
    state.service.delete(id).await?;
    Ok(ApiResponse::ok(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}
