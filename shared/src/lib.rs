use serde::{Deserialize, Serialize};

/// One ledger entry: a dated income or expense record.
///
/// The ledger is append-only; records are never updated or removed, and
/// duplicates are distinct entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Transaction date in `DD-MM-YYYY` form (e.g. "09-04-2024")
    pub date: String,
    /// Transaction amount (non-negative; direction comes from the category)
    pub amount: f64,
    /// Free-text category; "Income" and "Expense" are significant for charting
    pub category: String,
    /// Free-text description, may be empty
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddTransactionRequest {
    /// Transaction date in `DD-MM-YYYY` form
    pub date: String,
    /// Amount as entered in the form; parsed and validated server-side
    pub amount: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddTransactionResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewTransactionsResponse {
    /// Matching records in ledger (append) order
    pub transactions: Vec<Record>,
    /// Inline `data:image/png;base64,...` chart, when one could be built
    pub chart: Option<String>,
    /// Advisory message for the user, e.g. when no records matched
    pub message: Option<String>,
}
