pub mod root;
pub mod auth;
pub mod health;
pub mod metrics;
pub mod swagger;

use actix_web::{error::JsonPayloadError, web, HttpRequest};
use crate::utils::AppError;

/// Registers every route. Callers provide the `web::Data<dyn UserStore>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(root::index))
        .route("/health", web::get().to(health::health_check))
        .route("/metrics", web::get().to(metrics::get_metrics))
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(auth::register))
        );
}

/// Body parse failures answer 400 `{ "error": ... }` like every other error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error)
}

fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("❌ Invalid JSON body on {}: {}", req.path(), err);
    metrics::increment_request_count();
    metrics::increment_error_count();
    AppError::ValidationFailure(format!("Invalid request body: {}", err)).into()
}
