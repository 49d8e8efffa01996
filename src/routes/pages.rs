//! Guarded page-data handlers.
//!
//! Rendering is someone else's job — each page answers with the JSON it
//! would hand a template: the request context plus whatever records the
//! remote API returned for it.

use axum::Extension;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;

use crate::api::types::{ApiError, Car, CarWithOwner, Customer, CustomerCar, Identity, Worker};
use crate::services::session::{PageData, RequestContext};
use crate::state::AppState;

/// Page envelope for record listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsPage<T> {
    pub user: Option<Identity>,
    pub is_logged_in: bool,
    pub records: Vec<T>,
}

impl<T> RecordsPage<T> {
    fn new(ctx: &RequestContext, records: Vec<T>) -> Self {
        Self {
            user: ctx.user.clone(),
            is_logged_in: ctx.is_logged_in(),
            records,
        }
    }
}

pub(crate) fn api_error_to_status(err: &ApiError) -> StatusCode {
    match err {
        ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
        ApiError::Status(_) | ApiError::Transport(_) | ApiError::Decode(_) => StatusCode::BAD_GATEWAY,
    }
}

/// The guard only admits authenticated requests to these pages, so a missing
/// token here is a pipeline bug, answered as 401 rather than a panic.
fn bearer(ctx: &RequestContext) -> Result<&str, StatusCode> {
    ctx.token.as_deref().ok_or(StatusCode::UNAUTHORIZED)
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /` — dashboard page data.
pub async fn home(Extension(ctx): Extension<RequestContext>) -> Json<PageData> {
    Json(PageData::from_context(&ctx))
}

/// `GET /signup` — public placeholder page data.
pub async fn signup(Extension(ctx): Extension<RequestContext>) -> Json<PageData> {
    Json(PageData::from_context(&ctx))
}

/// `GET /admin` — admin landing page data.
pub async fn admin_home(Extension(ctx): Extension<RequestContext>) -> Json<PageData> {
    Json(PageData::from_context(&ctx))
}

/// `GET /customers` — customer listing.
pub async fn customers(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<RecordsPage<Customer>>, StatusCode> {
    let token = bearer(&ctx)?;
    let records = state.api.list_customers(token).await.map_err(|err| {
        tracing::warn!(error = %err, "customer list fetch failed");
        api_error_to_status(&err)
    })?;
    Ok(Json(RecordsPage::new(&ctx, records)))
}

/// `POST /customers` — create a customer via the remote API.
pub async fn create_customer(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(customer): Json<Customer>,
) -> Result<Json<Customer>, StatusCode> {
    let token = bearer(&ctx)?;
    let created = state.api.create_customer(token, &customer).await.map_err(|err| {
        tracing::warn!(error = %err, "customer create failed");
        api_error_to_status(&err)
    })?;
    Ok(Json(created))
}

/// `GET /admin/workers` — worker listing.
pub async fn workers(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<RecordsPage<Worker>>, StatusCode> {
    let token = bearer(&ctx)?;
    let records = state.api.list_workers(token).await.map_err(|err| {
        tracing::warn!(error = %err, "worker list fetch failed");
        api_error_to_status(&err)
    })?;
    Ok(Json(RecordsPage::new(&ctx, records)))
}

/// `POST /admin/workers` — create a worker via the remote API.
pub async fn create_worker(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(worker): Json<Worker>,
) -> Result<Json<Worker>, StatusCode> {
    let token = bearer(&ctx)?;
    let created = state.api.create_worker(token, &worker).await.map_err(|err| {
        tracing::warn!(error = %err, "worker create failed");
        api_error_to_status(&err)
    })?;
    Ok(Json(created))
}

/// `GET /cars` — cars joined with their registration and owner.
pub async fn cars(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<RecordsPage<CarWithOwner>>, StatusCode> {
    let token = bearer(&ctx)?;

    let fetch_failed = |err: ApiError| {
        tracing::warn!(error = %err, "car page fetch failed");
        api_error_to_status(&err)
    };
    let cars = state.api.list_cars(token).await.map_err(fetch_failed)?;
    let links = state.api.list_customer_cars(token).await.map_err(fetch_failed)?;
    let customers = state.api.list_customers(token).await.map_err(fetch_failed)?;

    let records = join_cars_with_owners(&cars, &links, &customers);
    Ok(Json(RecordsPage::new(&ctx, records)))
}

/// Compose the cars-page shape: one row per registration link, joined with
/// its car and owner. Links pointing at records the API did not return are
/// skipped rather than invented.
pub(crate) fn join_cars_with_owners(
    cars: &[Car],
    links: &[CustomerCar],
    customers: &[Customer],
) -> Vec<CarWithOwner> {
    links
        .iter()
        .filter_map(|link| {
            let car = cars.iter().find(|c| c.car_id == Some(link.car_id))?;
            let owner = customers
                .iter()
                .find(|c| c.customer_id == Some(link.customer_id))?;
            Some(CarWithOwner {
                car: car.clone(),
                license_plate: link.license_plate.clone(),
                color: link.color.clone(),
                owner_name: format!("{} {}", owner.first_name, owner.last_name),
                customer_id: link.customer_id,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
