mod api;
mod routes;
mod services;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let config = api::ApiConfig::from_env().expect("API_BASE_URL required");
    let client = api::HttpApi::new(&config).expect("api client init failed");
    let state = state::AppState::new(Arc::new(client));

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, base_url = %config.base_url, "workbay listening");
    axum::serve(listener, app).await.expect("server failed");
}
