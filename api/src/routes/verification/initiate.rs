use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use nv_core::domain::RequestMetadata;
use nv_core::repositories::SessionStore;
use nv_core::services::IdentityProviderTrait;

use crate::dto::verification::{InitiateQuery, InitiateResponse};
use crate::handlers::error::{extract_language, handle_domain_error_with_lang, handle_validation_errors};
use crate::routes::AppState;

/// Handler for GET /prepStep1
///
/// Starts a verification session and returns the provider authorization URL.
///
/// # Query
///
/// * `number` - optional phone number to verify later
/// * `state` - optional client-chosen correlation token; generated when absent
///
/// # Response
///
/// ```json
/// { "redirectUrl": "https://oidc.idp.vonage.com/oauth2/auth?...&state=..." }
/// ```
///
/// 409 when `state` is already in use, 502 when the provider URL cannot be built.
pub async fn prep_step1<S, P>(
    req: HttpRequest,
    state: web::Data<AppState<S, P>>,
    query: web::Query<InitiateQuery>,
) -> HttpResponse
where
    S: SessionStore + 'static,
    P: IdentityProviderTrait + 'static,
{
    let lang = extract_language(&req);

    if let Err(errors) = query.validate() {
        return handle_validation_errors(&errors, lang);
    }

    let query = query.into_inner();
    match state
        .flow
        .initiate(
            query.state.as_deref(),
            query.number.as_deref(),
            request_metadata(&req),
        )
        .await
    {
        Ok(result) => HttpResponse::Ok().json(InitiateResponse {
            redirect_url: result.redirect_url,
        }),
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}

/// Request headers kept alongside the session
fn request_metadata(req: &HttpRequest) -> RequestMetadata {
    req.headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect()
}
