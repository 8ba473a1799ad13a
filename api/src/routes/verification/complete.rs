use actix_web::cookie::{time::Duration as CookieDuration, Cookie};
use actix_web::{web, HttpRequest, HttpResponse};

use nv_core::repositories::SessionStore;
use nv_core::services::IdentityProviderTrait;

use super::STATE_COOKIE;
use crate::dto::verification::{CallbackQuery, CallbackResponse};
use crate::handlers::error::{extract_language, handle_domain_error_with_lang};
use crate::routes::AppState;

/// Handler for GET /step2
///
/// Provider redirect target. Exchanges `code` for an access token and hands the
/// correlation token back in a `state` cookie living as long as the token.
///
/// # Response
///
/// ```json
/// { "access_token": "...", "expires_at": 300000, "state": "..." }
/// ```
///
/// `expires_at` is the token lifetime in milliseconds.
pub async fn step2<S, P>(
    req: HttpRequest,
    state: web::Data<AppState<S, P>>,
    query: web::Query<CallbackQuery>,
) -> HttpResponse
where
    S: SessionStore + 'static,
    P: IdentityProviderTrait + 'static,
{
    let lang = extract_language(&req);

    match state.flow.complete(&query.code, &query.state).await {
        Ok(result) => {
            let max_age = cookie_max_age(result.expires_in_ms);
            let cookie = Cookie::build(STATE_COOKIE, result.correlation_token.clone())
                .path("/")
                .http_only(true)
                .max_age(max_age)
                .finish();

            HttpResponse::Ok().cookie(cookie).json(CallbackResponse {
                access_token: result.access_token,
                expires_at: result.expires_in_ms,
                state: result.correlation_token,
            })
        }
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}

/// `Max-Age` is whole seconds; round up so a live session keeps its cookie
pub(crate) fn cookie_max_age(expires_in_ms: u64) -> CookieDuration {
    let seconds = expires_in_ms.div_ceil(1000);
    CookieDuration::seconds(i64::try_from(seconds).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_max_age_rounds_up() {
        assert_eq!(cookie_max_age(300_000), CookieDuration::seconds(300));
        assert_eq!(cookie_max_age(500), CookieDuration::seconds(1));
        assert_eq!(cookie_max_age(1_001), CookieDuration::seconds(2));
        assert_eq!(cookie_max_age(0), CookieDuration::seconds(0));
    }
}
