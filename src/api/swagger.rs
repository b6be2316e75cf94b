use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Registration Service API",
        version = "0.1.0",
        description = "Account registration backed by MongoDB. One account per email.",
    ),
    paths(
        crate::api::root::index,
        crate::api::auth::register,
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::services::registration_service::RegisterRequest,
            crate::services::registration_service::RegisterResponse,
            crate::utils::ErrorResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Account registration."),
        (name = "Health", description = "Greeting, health check and metrics endpoints."),
    )
)]
pub struct ApiDoc;
