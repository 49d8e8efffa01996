//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page route sits behind the session guard; its decision is final for
//! the request and no page overrides it. Only `/healthz` lives outside the
//! guarded router — a health probe bouncing to `/login` helps nobody.

pub mod auth;
pub mod guard;
pub mod pages;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let pages = Router::new()
        .route("/", get(pages::home))
        .route("/signup", get(pages::signup))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/customers", get(pages::customers).post(pages::create_customer))
        .route("/cars", get(pages::cars))
        .route("/admin", get(pages::admin_home))
        .route("/admin/workers", get(pages::workers).post(pages::create_worker))
        .layer(middleware::from_fn_with_state(state.clone(), guard::session_gate));

    Router::new()
        .merge(pages)
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
