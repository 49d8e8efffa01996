//! Per-request session guard.
//!
//! ARCHITECTURE
//! ============
//! Every page request flows through here before its handler: read the
//! credential cookie, resolve it against the backend, run the access gate,
//! then either attach the request context and continue or answer with a 303.
//! The decision core lives in [`resolve_and_admit`] so tests can drive it
//! without building an HTTP pipeline.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use super::auth::{COOKIE_NAME, removal_cookie};
use crate::services::gate::{self, GateDecision};
use crate::services::session::{self, RequestContext, TokenStatus};
use crate::state::AppState;

/// What the guard decided for one request.
#[derive(Debug)]
pub enum Admission {
    /// Run the page with this context; the jar may carry a cookie removal.
    Proceed { jar: CookieJar, ctx: RequestContext },
    /// Answer with a 303 to `target` instead.
    Redirect { jar: CookieJar, target: String },
}

/// Resolve the credential and evaluate the gate for `path`.
///
/// The cookie is deleted only when the backend proved the token invalid; a
/// lookup that merely failed leaves the jar untouched.
pub async fn resolve_and_admit(state: &AppState, jar: CookieJar, path: &str) -> Admission {
    // Logout deletes the credential no matter who holds it, so it must stay
    // reachable even when the backend cannot vouch for the token. Skip the
    // lookup and the gate entirely.
    if path == gate::LOGOUT_PATH {
        return Admission::Proceed { jar, ctx: RequestContext::anonymous() };
    }

    let token = jar
        .get(COOKIE_NAME)
        .map(Cookie::value)
        .filter(|t| !t.is_empty())
        .map(str::to_owned);

    let (ctx, jar) = match token {
        None => (RequestContext::anonymous(), jar),
        Some(token) => match session::resolve_token(state.api.as_ref(), &token).await {
            TokenStatus::Valid(user) => (RequestContext::authenticated(user, token), jar),
            TokenStatus::Invalid => (RequestContext::anonymous(), jar.add(removal_cookie())),
            TokenStatus::Unverified => (RequestContext::anonymous(), jar),
        },
    };

    match gate::admit(ctx, path) {
        GateDecision::Allow(ctx) => Admission::Proceed { jar, ctx },
        GateDecision::Redirect { target, reason } => Admission::Redirect {
            jar,
            target: gate::location(target, reason),
        },
    }
}

/// Axum middleware wrapper around [`resolve_and_admit`].
pub async fn session_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    match resolve_and_admit(&state, jar, &path).await {
        Admission::Proceed { jar, ctx } => {
            request.extensions_mut().insert(ctx);
            (jar, next.run(request).await).into_response()
        }
        Admission::Redirect { jar, target } => (jar, Redirect::to(&target)).into_response(),
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
