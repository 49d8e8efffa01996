//! Auth routes — login form data, credential exchange, logout.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::services::auth::{self as auth_svc, LoginError};
use crate::services::gate::{HOME_PATH, LOGIN_PATH, RedirectReason};
use crate::state::AppState;

pub const COOKIE_NAME: &str = "access_token";

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn cookie_secure() -> bool {
    if let Some(value) = env_bool("COOKIE_SECURE") {
        return value;
    }

    // Deployment note: set COOKIE_SECURE=true behind HTTPS.
    std::env::var("API_BASE_URL")
        .map(|url| url.starts_with("https://"))
        .unwrap_or(false)
}

// =============================================================================
// COOKIES
// =============================================================================

/// Session-lifetime credential cookie: site-wide, script-inaccessible, no
/// explicit expiry.
pub(crate) fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .build()
}

/// Overwrite the credential with an already-expired empty cookie.
pub(crate) fn removal_cookie() -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct LoginPageQuery {
    reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginPage {
    pub message: Option<&'static str>,
}

/// `GET /login` — page data for the login form. The gate has already turned
/// away logged-in visitors, so only the redirect reason needs translating.
pub async fn login_page(Query(query): Query<LoginPageQuery>) -> Json<LoginPage> {
    let message = match query.reason.as_deref() {
        Some(reason) if reason == RedirectReason::Unauthorized.query_value() => {
            Some("You do not have permission to access that section.")
        }
        _ => None,
    };
    Json(LoginPage { message })
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Failure payload the form redisplays with. Echoes the email, never the
/// password.
#[derive(Debug, Serialize)]
pub struct LoginFailure {
    pub error: &'static str,
    pub values: LoginEcho,
}

#[derive(Debug, Serialize)]
pub struct LoginEcho {
    pub email: String,
}

pub(crate) fn failure_message(err: &LoginError) -> &'static str {
    match err {
        LoginError::MissingFields => "Email and password are required.",
        LoginError::Rejected(_) => "Invalid credentials or sign-in error.",
        LoginError::Unreachable(_) => "Could not reach the server.",
    }
}

/// `POST /login` — exchange credentials, set the cookie, 303 to home.
///
/// The redirect is built outside the failure branch so it can never be
/// mistaken for an error, and no failure path touches the jar: a failed login
/// leaves an existing session alone.
pub async fn login(State(state): State<AppState>, jar: CookieJar, axum::Form(form): axum::Form<LoginForm>) -> Response {
    let token = match auth_svc::exchange_credentials(state.api.as_ref(), &form.email, &form.password).await {
        Ok(token) => token,
        Err(err) => {
            let failure = LoginFailure {
                error: failure_message(&err),
                values: LoginEcho { email: form.email },
            };
            return (err.status(), Json(failure)).into_response();
        }
    };

    let jar = jar.add(session_cookie(token));
    (jar, Redirect::to(HOME_PATH)).into_response()
}

/// `POST /logout` — drop the credential unconditionally, 303 to login.
/// Idempotent: with no existing cookie this still just redirects.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (jar.add(removal_cookie()), Redirect::to(LOGIN_PATH))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
