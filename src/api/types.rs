//! Wire types and the client trait for the remote workshop API.
//!
//! Everything here mirrors the backend's JSON shapes. Records the portal only
//! creates carry optional ids so the same type serializes cleanly in both
//! directions.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by workshop API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The API answered 401 — the bearer token is invalid or expired.
    #[error("token rejected by the api")]
    Unauthorized,

    /// The API answered with an unexpected non-success status.
    #[error("unexpected api status: {0}")]
    Status(StatusCode),

    /// The request never produced an HTTP response.
    #[error("api transport error: {0}")]
    Transport(String),

    /// The response body could not be deserialized.
    #[error("malformed api response: {0}")]
    Decode(String),
}

// =============================================================================
// IDENTITY
// =============================================================================

/// Account role as reported by `/api/v1/me/`. Closed set — an unknown role
/// string is a deserialization error, not a silent fall-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Worker,
}

/// The authenticated user record, re-derived from the credential on every
/// request and never persisted locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub workshop_id: i64,
}

/// Success body of the password-grant token endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

// =============================================================================
// DOMAIN RECORDS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workshop_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workshop_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car_id: Option<i64>,
    pub year: i32,
    pub brand: String,
    pub model: String,
}

/// Link row between a customer and a car.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerCar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_car_id: Option<i64>,
    pub customer_id: i64,
    pub car_id: i64,
    pub license_plate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Car joined with its registration and owner, as the cars page consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarWithOwner {
    #[serde(flatten)]
    pub car: Car,
    pub license_plate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub owner_name: String,
    pub customer_id: i64,
}

// =============================================================================
// CLIENT TRAIT
// =============================================================================

/// Client seam for the remote workshop API. Route and service code depends on
/// this trait; tests substitute a scripted mock.
#[async_trait::async_trait]
pub trait WorkshopApi: Send + Sync {
    /// `GET /api/v1/me/` with a bearer token.
    async fn fetch_identity(&self, token: &str) -> Result<Identity, ApiError>;

    /// `POST /api/v1/auth/login` password grant. Returns the access token.
    async fn password_login(&self, email: &str, password: &str) -> Result<String, ApiError>;

    async fn list_customers(&self, token: &str) -> Result<Vec<Customer>, ApiError>;

    async fn create_customer(&self, token: &str, customer: &Customer) -> Result<Customer, ApiError>;

    async fn list_workers(&self, token: &str) -> Result<Vec<Worker>, ApiError>;

    async fn create_worker(&self, token: &str, worker: &Worker) -> Result<Worker, ApiError>;

    async fn list_cars(&self, token: &str) -> Result<Vec<Car>, ApiError>;

    async fn list_customer_cars(&self, token: &str) -> Result<Vec<CustomerCar>, ApiError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
