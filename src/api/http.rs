//! reqwest-backed implementation of [`WorkshopApi`].
//!
//! Thin HTTP wrapper: every method is an endpoint path, a bearer header, and
//! a JSON body. Status mapping lives in `check_status` so all callers agree
//! on what 401 means.

use std::time::Duration;

use axum::http::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::config::ApiConfig;
use super::types::{ApiError, Car, Customer, CustomerCar, Identity, TokenResponse, Worker, WorkshopApi};

const ME_PATH: &str = "/api/v1/me/";
const LOGIN_PATH: &str = "/api/v1/auth/login";
const CUSTOMERS_PATH: &str = "/api/v1/customers/";
const WORKERS_PATH: &str = "/api/v1/workers/";
const CARS_PATH: &str = "/api/v1/cars/";
const CUSTOMER_CARS_PATH: &str = "/api/v1/customer_car/";

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Build the client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, token: &str, path: &str) -> Result<T, ApiError> {
        let response = self
            .http
            .get(self.endpoint(path))
            .header("Authorization", format!("Bearer {token}"))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        check_status(response.status())?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn post_json<B, T>(&self, token: &str, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.endpoint(path))
            .header("Authorization", format!("Bearer {token}"))
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        check_status(response.status())?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// 401 is proof the token is bad; every other non-success status is just an
/// unexpected answer.
fn check_status(status: StatusCode) -> Result<(), ApiError> {
    if status.is_success() {
        Ok(())
    } else if status == StatusCode::UNAUTHORIZED {
        Err(ApiError::Unauthorized)
    } else {
        Err(ApiError::Status(status))
    }
}

/// Form-encoded password-grant body. The backend expects the email in the
/// `username` field and fixed placeholder client identification.
pub(crate) fn login_form(email: &str, password: &str) -> [(&'static str, String); 6] {
    [
        ("grant_type", "password".to_owned()),
        ("username", email.to_owned()),
        ("password", password.to_owned()),
        ("scope", String::new()),
        ("client_id", "string".to_owned()),
        ("client_secret", "string".to_owned()),
    ]
}

#[async_trait::async_trait]
impl WorkshopApi for HttpApi {
    async fn fetch_identity(&self, token: &str) -> Result<Identity, ApiError> {
        self.get_json(token, ME_PATH).await
    }

    async fn password_login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.endpoint(LOGIN_PATH))
            .form(&login_form(email, password))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        check_status(response.status())?;
        let tokens = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(tokens.access_token)
    }

    async fn list_customers(&self, token: &str) -> Result<Vec<Customer>, ApiError> {
        self.get_json(token, CUSTOMERS_PATH).await
    }

    async fn create_customer(&self, token: &str, customer: &Customer) -> Result<Customer, ApiError> {
        self.post_json(token, CUSTOMERS_PATH, customer).await
    }

    async fn list_workers(&self, token: &str) -> Result<Vec<Worker>, ApiError> {
        self.get_json(token, WORKERS_PATH).await
    }

    async fn create_worker(&self, token: &str, worker: &Worker) -> Result<Worker, ApiError> {
        self.post_json(token, WORKERS_PATH, worker).await
    }

    async fn list_cars(&self, token: &str) -> Result<Vec<Car>, ApiError> {
        self.get_json(token, CARS_PATH).await
    }

    async fn list_customer_cars(&self, token: &str) -> Result<Vec<CustomerCar>, ApiError> {
        self.get_json(token, CUSTOMER_CARS_PATH).await
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
