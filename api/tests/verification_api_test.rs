//! Integration tests for the number verification endpoints
//!
//! The app is wired with the in-memory store and the mock identity provider,
//! whose authorization URL loops straight back to `/step2`.

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::cookie::{time::Duration as CookieDuration, Cookie};
use actix_web::http::{header, StatusCode};
use actix_web::{test, web};
use reqwest::Url;
use serde_json::{json, Value};

use nv_api::{create_app, AppState};
use nv_core::repositories::InMemorySessionStore;
use nv_core::services::{SessionLifecycleConfig, VerificationFlowController};
use nv_infra::MockIdentityProvider;

const CALLBACK: &str = "http://localhost:3000/step2";

fn app_state() -> web::Data<AppState<InMemorySessionStore, MockIdentityProvider>> {
    app_state_with(MockIdentityProvider::new(CALLBACK))
}

fn app_state_with(
    provider: MockIdentityProvider,
) -> web::Data<AppState<InMemorySessionStore, MockIdentityProvider>> {
    let flow = VerificationFlowController::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(provider),
        SessionLifecycleConfig::default(),
    );
    web::Data::new(AppState::new(flow))
}

fn query_of(url: &str) -> HashMap<String, String> {
    Url::parse(url).unwrap().query_pairs().into_owned().collect()
}

/// Path and query of the mock redirect, ready to call against the test app
fn callback_uri(redirect_url: &str) -> String {
    let url = Url::parse(redirect_url).unwrap();
    format!("{}?{}", url.path(), url.query().unwrap_or_default())
}

#[actix_web::test]
async fn test_health_check() {
    let app = test::init_service(create_app(app_state())).await;

    let req = test::TestRequest::get().uri("/_/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_prep_step1_generates_state() {
    let app = test::init_service(create_app(app_state())).await;

    let req = test::TestRequest::get()
        .uri("/prepStep1?number=%2B14155550100")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let redirect_url = body["redirectUrl"].as_str().expect("redirectUrl");
    assert!(redirect_url.starts_with(CALLBACK));
    let state = &query_of(redirect_url)["state"];
    assert_eq!(state.len(), 36, "generated state should be a UUID");
}

#[actix_web::test]
async fn test_prep_step1_duplicate_state_conflicts() {
    let app = test::init_service(create_app(app_state())).await;

    let req = test::TestRequest::get().uri("/prepStep1?state=abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/prepStep1?state=abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "DUPLICATE_STATE");
}

#[actix_web::test]
async fn test_prep_step1_rejects_oversized_number() {
    let app = test::init_service(create_app(app_state())).await;

    let req = test::TestRequest::get()
        .uri("/prepStep1?number=123456789012345678901234567890")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["number"].is_array());
}

#[actix_web::test]
async fn test_step2_unknown_state() {
    let app = test::init_service(create_app(app_state())).await;

    let req = test::TestRequest::get()
        .uri("/step2?code=mock-code-1&state=nope")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "SESSION_NOT_FOUND");
    assert_eq!(body["message"], "Verification request doesn't exist");
}

#[actix_web::test]
async fn test_step2_requires_code() {
    let app = test::init_service(create_app(app_state())).await;

    let req = test::TestRequest::get().uri("/prepStep1?state=s1").to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/step2?state=s1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_complete_verification_flow() {
    let app = test::init_service(create_app(app_state())).await;

    // Step 1
    let req = test::TestRequest::get()
        .uri("/prepStep1?number=%2B14155550100&state=flow-1")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let redirect_url = body["redirectUrl"].as_str().unwrap().to_string();

    // Step 2: follow the provider redirect
    let req = test::TestRequest::get()
        .uri(&callback_uri(&redirect_url))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "state")
        .expect("state cookie")
        .into_owned();
    assert_eq!(cookie.value(), "flow-1");
    assert_eq!(cookie.max_age(), Some(CookieDuration::seconds(300)));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["state"], "flow-1");
    assert_eq!(body["expires_at"], 300_000);
    assert!(body["access_token"].as_str().unwrap().starts_with("mock-token-"));

    // Step 3: verify the number recorded at step 1
    let req = test::TestRequest::post()
        .uri("/verify-number")
        .cookie(Cookie::new("state", "flow-1"))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "devicePhoneNumberVerified": true }));

    // The callback cannot be replayed
    let req = test::TestRequest::get()
        .uri(&callback_uri(&redirect_url))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_short_lived_token_keeps_cookie() {
    let provider = MockIdentityProvider::new(CALLBACK).with_token_lifetime_ms(500);
    let app = test::init_service(create_app(app_state_with(provider))).await;

    let req = test::TestRequest::get().uri("/prepStep1?state=short").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let redirect_url = body["redirectUrl"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&callback_uri(&redirect_url))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "state")
        .expect("state cookie")
        .into_owned();
    assert_eq!(cookie.max_age(), Some(CookieDuration::seconds(1)));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["expires_at"], 500);
}

#[actix_web::test]
async fn test_verify_number_with_explicit_number_and_no_body() {
    let app = test::init_service(create_app(app_state())).await;

    let req = test::TestRequest::get().uri("/prepStep1?state=s2").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let redirect_url = body["redirectUrl"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&callback_uri(&redirect_url))
        .to_request();
    test::call_service(&app, req).await;

    // No number anywhere
    let req = test::TestRequest::post()
        .uri("/verify-number")
        .cookie(Cookie::new("state", "s2"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/verify-number")
        .cookie(Cookie::new("state", "s2"))
        .set_json(json!({ "number": "+447700900000" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["devicePhoneNumberVerified"], true);
}

#[actix_web::test]
async fn test_verify_number_without_cookie() {
    let app = test::init_service(create_app(app_state())).await;

    let req = test::TestRequest::post()
        .uri("/verify-number")
        .set_json(json!({ "number": "+14155550100" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_verify_number_before_callback() {
    let app = test::init_service(create_app(app_state())).await;

    let req = test::TestRequest::get()
        .uri("/prepStep1?state=early&number=%2B14155550100")
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/verify-number")
        .cookie(Cookie::new("state", "early"))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[actix_web::test]
async fn test_chinese_error_messages() {
    let app = test::init_service(create_app(app_state())).await;

    let req = test::TestRequest::get()
        .uri("/step2?code=x&state=missing")
        .insert_header((header::ACCEPT_LANGUAGE, "zh-CN,zh;q=0.9"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "验证请求不存在");
}

#[actix_web::test]
async fn test_unknown_route() {
    let app = test::init_service(create_app(app_state())).await;

    let req = test::TestRequest::get().uri("/nope").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
