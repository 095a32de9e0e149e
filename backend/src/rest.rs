use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use shared::{AddTransactionRequest, AddTransactionResponse, ViewTransactionsResponse};
use tracing::{info, warn};

use crate::domain::{TransactionError, TransactionService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub transaction_service: TransactionService,
}

impl AppState {
    pub fn new(transaction_service: TransactionService) -> Self {
        Self {
            transaction_service,
        }
    }
}

/// Query parameters for the transaction view endpoint
#[derive(Deserialize, Debug)]
pub struct ViewTransactionsQuery {
    pub start_date: String,
    pub end_date: String,
}

/// Axum handler for POST /api/transactions
pub async fn create_transaction(
    State(state): State<AppState>,
    Json(request): Json<AddTransactionRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/transactions - date: {}, category: {}",
        request.date, request.category
    );

    match state.transaction_service.add_transaction(
        &request.date,
        &request.amount,
        &request.category,
        &request.description,
    ) {
        Ok(()) => (
            StatusCode::CREATED,
            Json(AddTransactionResponse {
                message: "Transaction added successfully!".to_string(),
            }),
        ),
        Err(TransactionError::Validation(err)) => (
            StatusCode::BAD_REQUEST,
            Json(AddTransactionResponse {
                message: err.to_string(),
            }),
        ),
        Err(TransactionError::Storage(err)) => {
            // Write failures are advisory, not fatal.
            warn!("Error adding entry: {}", err);
            (
                StatusCode::OK,
                Json(AddTransactionResponse {
                    message: format!("Error adding entry: {}", err),
                }),
            )
        }
    }
}

/// Axum handler for GET /api/transactions
pub async fn view_transactions(
    State(state): State<AppState>,
    Query(query): Query<ViewTransactionsQuery>,
) -> impl IntoResponse {
    info!("GET /api/transactions - query: {:?}", query);

    let (transactions, chart) = state
        .transaction_service
        .view_transactions(&query.start_date, &query.end_date);

    let message = if transactions.is_empty() {
        Some("No transactions found in the given date range.".to_string())
    } else {
        None
    };

    (
        StatusCode::OK,
        Json(ViewTransactionsResponse {
            transactions,
            chart,
            message,
        }),
    )
}
