//! Session resolution — credential to identity, fresh on every request.
//!
//! ARCHITECTURE
//! ============
//! The identity is never trusted across requests: each request re-derives it
//! from the `access_token` cookie by asking the backend who the token belongs
//! to. Failure always degrades to "no identity" — this module never surfaces
//! an error to the request.

use serde::Serialize;

use crate::api::types::{ApiError, Identity, WorkshopApi};

/// Outcome of validating a stored credential against the backend.
#[derive(Debug)]
pub enum TokenStatus {
    /// The backend recognized the token.
    Valid(Identity),
    /// The backend answered 401 — the token is proven bad and the stored
    /// credential must be cleared.
    Invalid,
    /// The lookup failed for any other reason (backend down, odd status,
    /// malformed body). The token may still be good; keep the credential and
    /// treat this one request as anonymous.
    Unverified,
}

/// Request-scoped context attached by the guard and consumed by page
/// handlers. Replaces the original's per-request `locals` object.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub user: Option<Identity>,
    pub token: Option<String>,
}

impl RequestContext {
    #[must_use]
    pub fn anonymous() -> Self {
        Self { user: None, token: None }
    }

    #[must_use]
    pub fn authenticated(user: Identity, token: String) -> Self {
        Self { user: Some(user), token: Some(token) }
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }
}

/// Shared page-data envelope: the user record plus the `isLoggedIn` flag
/// every page receives.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    pub user: Option<Identity>,
    pub is_logged_in: bool,
}

impl PageData {
    #[must_use]
    pub fn from_context(ctx: &RequestContext) -> Self {
        Self { user: ctx.user.clone(), is_logged_in: ctx.is_logged_in() }
    }
}

/// Resolve a present credential to a [`TokenStatus`].
///
/// Only a confirmed 401 condemns the token; transient failures are logged
/// here and absorbed.
pub async fn resolve_token(api: &dyn WorkshopApi, token: &str) -> TokenStatus {
    match api.fetch_identity(token).await {
        Ok(user) => TokenStatus::Valid(user),
        Err(ApiError::Unauthorized) => TokenStatus::Invalid,
        Err(err) => {
            tracing::warn!(error = %err, "identity lookup failed, continuing as anonymous");
            TokenStatus::Unverified
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
