use std::sync::atomic::Ordering;

use axum::http::StatusCode;

use super::*;
use crate::api::types::ApiError;
use crate::state::test_helpers::{MockApi, test_state};

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn header<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

// =============================================================================
// env_bool — unique env var names to avoid races with parallel tests
// =============================================================================

#[test]
fn env_bool_true_variants() {
    for (i, val) in ["1", "true", "yes", "on"].iter().enumerate() {
        let key = format!("__TEST_WB_EB_TRUE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(true), "expected true for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_false_variants() {
    for (i, val) in ["0", "false", "no", "off"].iter().enumerate() {
        let key = format!("__TEST_WB_EB_FALSE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(false), "expected false for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_invalid_or_unset_returns_none() {
    let key = "__TEST_WB_EB_INVALID__";
    unsafe { std::env::set_var(key, "maybe") };
    assert_eq!(env_bool(key), None);
    unsafe { std::env::remove_var(key) };
    assert_eq!(env_bool("__TEST_WB_EB_SURELY_UNSET__"), None);
}

// =============================================================================
// cookie shapes
// =============================================================================

#[test]
fn session_cookie_is_site_wide_http_only_lax() {
    let cookie = session_cookie("abc".into());
    assert_eq!(cookie.name(), COOKIE_NAME);
    assert_eq!(cookie.value(), "abc");
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    // Session-lifetime: no explicit expiry.
    assert_eq!(cookie.max_age(), None);
}

#[test]
fn cookie_secure_defaults_to_false() {
    // Relies on no test in this binary setting COOKIE_SECURE or an https
    // API_BASE_URL.
    assert!(!cookie_secure());
    assert_eq!(session_cookie("abc".into()).secure(), Some(false));
    assert_eq!(removal_cookie().secure(), Some(false));
}

#[test]
fn removal_cookie_expires_immediately() {
    let cookie = removal_cookie();
    assert_eq!(cookie.name(), COOKIE_NAME);
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.max_age(), Some(Duration::ZERO));
}

// =============================================================================
// GET /login page data
// =============================================================================

#[tokio::test]
async fn login_page_without_reason_has_no_message() {
    let Json(page) = login_page(Query(LoginPageQuery { reason: None })).await;
    assert!(page.message.is_none());
}

#[tokio::test]
async fn login_page_unauthorized_reason_gets_a_message() {
    let Json(page) = login_page(Query(LoginPageQuery { reason: Some("unauthorized".into()) })).await;
    assert!(page.message.is_some());
}

#[tokio::test]
async fn login_page_unknown_reason_is_ignored() {
    let Json(page) = login_page(Query(LoginPageQuery { reason: Some("teapot".into()) })).await;
    assert!(page.message.is_none());
}

// =============================================================================
// POST /login
// =============================================================================

#[tokio::test]
async fn successful_login_sets_cookie_and_redirects_home() {
    let state = test_state(MockApi::new().with_login(Ok("abc".into())));
    let form = LoginForm { email: "pat@taller.test".into(), password: "hunter2".into() };

    let response = login(State(state), CookieJar::new(), axum::Form(form)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(header(&response, "location"), Some("/"));

    let set_cookie = header(&response, "set-cookie").expect("cookie must be set");
    assert!(set_cookie.starts_with("access_token=abc"));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));
}

#[tokio::test]
async fn empty_password_fails_400_echoes_email_and_skips_network() {
    let api = std::sync::Arc::new(MockApi::new());
    let state = crate::state::AppState::new(api.clone());
    let form = LoginForm { email: "pat@taller.test".into(), password: String::new() };

    let response = login(State(state), CookieJar::new(), axum::Form(form)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(header(&response, "set-cookie").is_none());
    assert_eq!(api.login_calls.load(Ordering::SeqCst), 0);

    let body = body_json(response).await;
    assert_eq!(body["values"]["email"], "pat@taller.test");
    assert!(body["error"].as_str().unwrap().contains("required"));
}

#[tokio::test]
async fn rejected_login_propagates_status_and_echoes_email() {
    let state = test_state(MockApi::new().with_login(Err(ApiError::Unauthorized)));
    let form = LoginForm { email: "pat@taller.test".into(), password: "wrong".into() };

    let response = login(State(state), CookieJar::new(), axum::Form(form)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(header(&response, "set-cookie").is_none());

    let body = body_json(response).await;
    assert_eq!(body["values"]["email"], "pat@taller.test");
    assert!(body["error"].as_str().unwrap().contains("Invalid credentials"));
}

#[tokio::test]
async fn unreachable_backend_fails_500_with_server_message() {
    let state = test_state(MockApi::new().with_login(Err(ApiError::Transport("refused".into()))));
    let form = LoginForm { email: "pat@taller.test".into(), password: "hunter2".into() };

    let response = login(State(state), CookieJar::new(), axum::Form(form)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("reach the server"));
    assert!(body["values"]["email"].as_str().unwrap().contains("pat"));
}

#[tokio::test]
async fn failed_login_never_touches_an_existing_session_cookie() {
    let state = test_state(MockApi::new().with_login(Err(ApiError::Unauthorized)));
    let jar = CookieJar::new().add(Cookie::new(COOKIE_NAME, "existing"));
    let form = LoginForm { email: "pat@taller.test".into(), password: "wrong".into() };

    let response = login(State(state), jar, axum::Form(form)).await;
    // No Set-Cookie at all: the stored credential is left as it was.
    assert!(header(&response, "set-cookie").is_none());
}

// =============================================================================
// POST /logout
// =============================================================================

#[tokio::test]
async fn logout_clears_cookie_and_redirects_to_login() {
    let jar = CookieJar::new().add(Cookie::new(COOKIE_NAME, "abc"));
    let response = logout(jar).await.into_response();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(header(&response, "location"), Some("/login"));

    let set_cookie = header(&response, "set-cookie").expect("removal cookie expected");
    assert!(set_cookie.starts_with("access_token="));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn logout_without_a_session_still_redirects() {
    let response = logout(CookieJar::new()).await.into_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(header(&response, "location"), Some("/login"));
}

// =============================================================================
// failure_message
// =============================================================================

#[test]
fn failure_messages_cover_the_taxonomy() {
    assert!(failure_message(&LoginError::MissingFields).contains("required"));
    assert!(failure_message(&LoginError::Rejected(StatusCode::UNAUTHORIZED)).contains("Invalid credentials"));
    assert!(failure_message(&LoginError::Unreachable("x".into())).contains("server"));
}
