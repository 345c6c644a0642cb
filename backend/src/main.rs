use std::net::SocketAddr;

use axum::{
    http::{HeaderValue, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};

mod db;
mod domain;
mod rest;

use db::EmployeeStore;
use domain::EmployeeService;
use rest::AppState;

// Origin of the browser frontend that consumes this API
const FRONTEND_ORIGIN: &str = "http://localhost:8083";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Setting up database");
    let store = EmployeeStore::init().await?;

    let state = AppState::new(EmployeeService::new(store));

    // CORS setup to allow the frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(FRONTEND_ORIGIN.parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api/employee", rest::employee_routes())
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
