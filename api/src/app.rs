//! Application factory
//!
//! Builds the Actix-web application around a shared verification flow.

use actix_web::{web, App, HttpRequest, HttpResponse};
use tracing_actix_web::TracingLogger;

use nv_core::repositories::SessionStore;
use nv_core::services::IdentityProviderTrait;
use nv_shared::{error_codes, ErrorResponse};

use crate::handlers::error::extract_language;
use crate::routes::health::health_check;
use crate::routes::verification::{prep_step1, step2, verify_number};
use crate::routes::AppState;

/// Create and configure the application with all dependencies
pub fn create_app<S, P>(
    app_state: web::Data<AppState<S, P>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            impl actix_web::body::MessageBody,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: SessionStore + 'static,
    P: IdentityProviderTrait + 'static,
{
    App::new()
        .app_data(app_state)
        // Per-request spans
        .wrap(TracingLogger::default())
        .route("/_/health", web::get().to(health_check))
        .route("/prepStep1", web::get().to(prep_step1::<S, P>))
        .route("/step2", web::get().to(step2::<S, P>))
        .route("/verify-number", web::post().to(verify_number::<S, P>))
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found(req: HttpRequest) -> HttpResponse {
    let lang = extract_language(&req);
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        lang.pick(
            "The requested resource was not found",
            "请求的资源不存在",
        ),
    ))
}
