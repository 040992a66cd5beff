//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the users service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        version = "0.1.0",
        description = "REST API for managing user records",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/users", api = domain_users::ApiDoc)
    ),
    tags(
        (name = "Users", description = "User management endpoints")
    )
)]
pub struct ApiDoc;
