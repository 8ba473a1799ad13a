use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use nv_core::errors::DomainError;
use nv_core::repositories::SessionStore;
use nv_core::services::IdentityProviderTrait;

use super::STATE_COOKIE;
use crate::dto::verification::VerifyNumberRequest;
use crate::handlers::error::{extract_language, handle_domain_error_with_lang, handle_validation_errors};
use crate::routes::AppState;

/// Handler for POST /verify-number
///
/// Reads the correlation token from the `state` cookie. The body may carry
/// `{ "number": "+14155550100" }`; without it the number given to
/// `/prepStep1` is checked. The provider result is returned unmodified.
pub async fn verify_number<S, P>(
    req: HttpRequest,
    state: web::Data<AppState<S, P>>,
    body: Option<web::Json<VerifyNumberRequest>>,
) -> HttpResponse
where
    S: SessionStore + 'static,
    P: IdentityProviderTrait + 'static,
{
    let lang = extract_language(&req);

    let Some(cookie) = req.cookie(STATE_COOKIE) else {
        return handle_domain_error_with_lang(DomainError::NotFound, lang);
    };

    let request = body.map(web::Json::into_inner).unwrap_or_default();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors, lang);
    }

    match state
        .flow
        .verify(cookie.value(), request.number.as_deref())
        .await
    {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}
