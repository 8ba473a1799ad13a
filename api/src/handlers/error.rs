//! Conversion of domain failures into HTTP responses
//!
//! Every handler funnels its errors through here so the status mapping lives
//! in one place. Messages are localized from `Accept-Language`.

use actix_web::http::{header, StatusCode};
use actix_web::{HttpRequest, HttpResponse};
use validator::ValidationErrors;

use nv_core::errors::DomainError;
use nv_shared::{error_codes, ErrorResponse, Language};

/// Extension trait for ErrorResponse to add actix-web specific methods
pub trait ErrorResponseExt {
    fn to_response(&self, status: StatusCode) -> HttpResponse;
}

impl ErrorResponseExt for ErrorResponse {
    fn to_response(&self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}

/// Detect language preference from the Accept-Language header
pub fn extract_language(req: &HttpRequest) -> Language {
    req.headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(Language::from_accept_language)
        .unwrap_or_default()
}

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::NotFound | DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
        DomainError::StateMismatch => StatusCode::FORBIDDEN,
        DomainError::DuplicateToken | DomainError::AlreadyAuthorized => StatusCode::CONFLICT,
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::Provider { .. } => StatusCode::BAD_GATEWAY,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Handle domain errors with language support
pub fn handle_domain_error_with_lang(error: DomainError, lang: Language) -> HttpResponse {
    let status = status_for(&error);
    if status.is_server_error() {
        tracing::error!(error = %error, status = status.as_u16(), "Request failed");
    } else {
        tracing::warn!(error = %error, status = status.as_u16(), "Request rejected");
    }

    let response = match error {
        DomainError::DuplicateToken => ErrorResponse::new(
            error_codes::DUPLICATE_STATE,
            lang.pick(
                "A verification request with this state already exists",
                "该状态的验证请求已存在",
            ),
        ),
        DomainError::NotFound => ErrorResponse::new(
            error_codes::SESSION_NOT_FOUND,
            lang.pick("Verification request doesn't exist", "验证请求不存在"),
        ),
        DomainError::StateMismatch => ErrorResponse::new(
            error_codes::STATE_MISMATCH,
            lang.pick("State is incorrect", "状态不正确"),
        ),
        DomainError::Unauthorized => ErrorResponse::new(
            error_codes::UNAUTHORIZED,
            lang.pick(
                "Verification request has not been authorized",
                "验证请求尚未授权",
            ),
        ),
        DomainError::AlreadyAuthorized => ErrorResponse::new(
            error_codes::ALREADY_AUTHORIZED,
            lang.pick(
                "Verification request has already been authorized",
                "验证请求已完成授权",
            ),
        ),
        DomainError::Validation { message } => {
            let localized = match lang {
                Language::English => message,
                Language::Chinese => format!("请求参数无效：{}", message),
            };
            ErrorResponse::new(error_codes::VALIDATION_ERROR, localized)
        }
        DomainError::Provider { message } => ErrorResponse::new(
            error_codes::PROVIDER_ERROR,
            lang.pick("Identity provider request failed", "身份提供方请求失败"),
        )
        .add_detail("reason", message),
        DomainError::Internal { .. } => ErrorResponse::new(
            error_codes::INTERNAL_ERROR,
            lang.pick("An internal error occurred", "发生内部错误"),
        ),
    };

    response.to_response(status)
}

/// Reject a request whose DTO failed validation
pub fn handle_validation_errors(errors: &ValidationErrors, lang: Language) -> HttpResponse {
    let mut response = ErrorResponse::new(
        error_codes::VALIDATION_ERROR,
        lang.pick("Invalid request parameters", "请求参数无效"),
    );

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field, messages);
    }

    tracing::warn!(errors = ?errors, "Request validation failed");
    response.to_response(StatusCode::BAD_REQUEST)
}
