//! Login exchange — credentials in, bearer token out.
//!
//! Validation happens before any network call; the three failure shapes map
//! one-to-one onto what the login form redisplays.

use axum::http::StatusCode;

use crate::api::types::{ApiError, WorkshopApi};

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// A required form field was empty. No network call was made.
    #[error("email and password are required")]
    MissingFields,

    /// The token endpoint rejected the credentials with this status.
    #[error("login rejected with status {0}")]
    Rejected(StatusCode),

    /// The token endpoint could not be reached or returned garbage.
    #[error("token endpoint unreachable: {0}")]
    Unreachable(String),
}

impl LoginError {
    /// HTTP status the login form replies with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields => StatusCode::BAD_REQUEST,
            Self::Rejected(status) => *status,
            Self::Unreachable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Validate the submitted fields and exchange them for an access token.
///
/// # Errors
///
/// Never touches the stored credential on failure — that is the caller's
/// cookie jar, and a failed login must leave an existing session intact.
pub async fn exchange_credentials(api: &dyn WorkshopApi, email: &str, password: &str) -> Result<String, LoginError> {
    if email.is_empty() || password.is_empty() {
        return Err(LoginError::MissingFields);
    }

    match api.password_login(email, password).await {
        Ok(token) => Ok(token),
        Err(ApiError::Unauthorized) => Err(LoginError::Rejected(StatusCode::UNAUTHORIZED)),
        Err(ApiError::Status(status)) => Err(LoginError::Rejected(status)),
        Err(err) => {
            tracing::error!(error = %err, "login token exchange failed");
            Err(LoginError::Unreachable(err.to_string()))
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
