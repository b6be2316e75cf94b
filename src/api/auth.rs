use actix_web::{web, HttpResponse, ResponseError};
use crate::api::metrics;
use crate::database::UserStore;
use crate::services::registration_service::{self, RegisterRequest, RegisterResponse};
use crate::utils::{AppError, ErrorResponse};

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Malformed body or missing email", body = ErrorResponse),
        (status = 409, description = "User already exists", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
pub async fn register(
    store: web::Data<dyn UserStore>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse {
    metrics::increment_request_count();

    let request = request.into_inner();
    let email = request.email.clone().unwrap_or_else(|| "N/A".to_string());
    log::info!("📝 POST /auth/register - email: {}", email);

    match registration_service::register(store.get_ref(), request).await {
        Ok(user) => {
            log::info!(
                "✅ Registration successful: {} ({})",
                email,
                user.user_id().unwrap_or_default()
            );
            HttpResponse::Created().json(RegisterResponse::created())
        }
        Err(e) => {
            metrics::increment_error_count();
            match e {
                AppError::DuplicateAccount | AppError::ValidationFailure(_) => {
                    log::warn!("❌ Registration rejected: {} - {}", email, e);
                }
                _ => log::error!("❌ Registration failed: {} - {}", email, e),
            }
            e.error_response()
        }
    }
}
