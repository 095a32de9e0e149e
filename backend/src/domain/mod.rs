//! Domain services for the finance tracker.

pub mod report_service;
pub mod transaction_service;

pub use report_service::ReportService;
pub use transaction_service::{TransactionError, TransactionService, ValidationError};
