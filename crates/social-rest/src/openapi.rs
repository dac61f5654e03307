//! OpenAPI documentation for the REST API.

use crate::controllers::{ComponentHealth, HealthResponse, ReadinessResponse};
use social_core::{ErrorResponse, FieldError};
use social_service::{UserRequest, UserResponse};
use utoipa::OpenApi;

/// OpenAPI documentation for the Social user API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Social Users API",
        version = "1.0.0",
        description = "Create, list, update and delete user records",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::controllers::user_controller::list_users,
        crate::controllers::user_controller::create_user,
        crate::controllers::user_controller::update_user,
        crate::controllers::user_controller::delete_user,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ErrorResponse,
            FieldError,
            UserRequest,
            UserResponse,
            HealthResponse,
            ReadinessResponse,
            ComponentHealth,
        )
    ),
    tags(
        (name = "users", description = "User management endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
