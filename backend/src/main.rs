use std::net::SocketAddr;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};

mod domain;
mod rest;
mod storage;

use domain::TransactionService;
use rest::AppState;
use storage::csv::{CsvConnection, LedgerRepository};
use storage::traits::LedgerStorage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let ledger_file =
        std::env::var("LEDGER_FILE").unwrap_or_else(|_| "finance_data.csv".to_string());
    info!("Using ledger file: {}", ledger_file);

    let connection = CsvConnection::new(&ledger_file);
    let ledger = LedgerRepository::new(connection);
    // Create the ledger with its header on first start; a no-op afterwards.
    ledger.initialize()?;

    let state = AppState::new(TransactionService::new(ledger));

    // CORS setup to allow a browser frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let api_routes = Router::new().route(
        "/transactions",
        get(rest::view_transactions).post(rest::create_transaction),
    );

    let app = Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
