//! Access gate — the per-request authorization decision.
//!
//! DESIGN
//! ======
//! A pure decision table over (identity, path). The gate returns an explicit
//! [`GateDecision`] that the routing layer turns into either the page run or
//! a 303 redirect; no control flow happens via errors or panics. The policy
//! is fixed at compile time and evaluated first-match-wins:
//!
//! 1. anonymous + non-public path        -> redirect to /login
//! 2. logged in + /login                 -> redirect to /
//! 3. role worker, any path              -> redirect to /login?reason=unauthorized
//! 4. non-admin under /admin             -> redirect to /
//! 5. otherwise                          -> allow, context flows downstream

use crate::api::types::Role;
use crate::services::session::RequestContext;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const LOGOUT_PATH: &str = "/logout";
pub const SIGNUP_PATH: &str = "/signup";
pub const ADMIN_PREFIX: &str = "/admin";

/// Paths reachable without an identity.
const PUBLIC_PATHS: &[&str] = &[LOGIN_PATH, SIGNUP_PATH];

/// Why a redirect carries a `?reason=` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// The account's role bars it from the system entirely.
    Unauthorized,
}

impl RedirectReason {
    #[must_use]
    pub const fn query_value(self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
        }
    }
}

/// The gate's verdict for one request.
#[derive(Debug)]
pub enum GateDecision {
    /// Let the request through; the context travels with it.
    Allow(RequestContext),
    /// Send a 303 to `target` instead of running the page.
    Redirect {
        target: &'static str,
        reason: Option<RedirectReason>,
    },
}

impl GateDecision {
    const fn redirect(target: &'static str) -> Self {
        Self::Redirect { target, reason: None }
    }
}

#[must_use]
pub fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

/// Render a redirect target plus optional reason as a Location value.
#[must_use]
pub fn location(target: &str, reason: Option<RedirectReason>) -> String {
    match reason {
        Some(reason) => format!("{target}?reason={}", reason.query_value()),
        None => target.to_owned(),
    }
}

/// Evaluate the decision table. Consumes the context and hands it back inside
/// `Allow` so the routing layer can attach it to the request.
#[must_use]
pub fn admit(ctx: RequestContext, path: &str) -> GateDecision {
    let Some(user) = ctx.user.as_ref() else {
        if is_public(path) {
            return GateDecision::Allow(ctx);
        }
        return GateDecision::redirect(LOGIN_PATH);
    };

    if path == LOGIN_PATH {
        return GateDecision::redirect(HOME_PATH);
    }

    match user.role {
        Role::Worker => GateDecision::Redirect {
            target: LOGIN_PATH,
            reason: Some(RedirectReason::Unauthorized),
        },
        Role::Manager if path.starts_with(ADMIN_PREFIX) => GateDecision::redirect(HOME_PATH),
        Role::Admin | Role::Manager => GateDecision::Allow(ctx),
    }
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
