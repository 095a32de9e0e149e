//! Transaction service domain logic for the finance tracker.

use shared::Record;
use tracing::warn;

use crate::domain::report_service::ReportService;
use crate::storage::csv::LedgerRepository;
use crate::storage::traits::{LedgerStorage, StorageError};

/// Validation failures for new transactions. The messages are user-facing
/// and are shown verbatim by the boundary layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingField,
    #[error("Invalid amount. Please enter a number.")]
    AmountNotNumeric,
    #[error("Invalid amount. Please enter a positive number.")]
    AmountNegative,
}

#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Domain service owning the ledger repository and the report builder.
#[derive(Clone)]
pub struct TransactionService {
    ledger: LedgerRepository,
    report: ReportService,
}

impl TransactionService {
    pub fn new(ledger: LedgerRepository) -> Self {
        Self {
            ledger,
            report: ReportService::new(),
        }
    }

    /// Validate and append one transaction.
    ///
    /// Nothing is written when validation fails; the store itself performs
    /// no validation.
    pub fn add_transaction(
        &self,
        date: &str,
        amount: &str,
        category: &str,
        description: &str,
    ) -> Result<(), TransactionError> {
        if date.is_empty() || amount.is_empty() || category.is_empty() {
            return Err(ValidationError::MissingField.into());
        }

        let amount: f64 = amount
            .trim()
            .parse()
            .map_err(|_| ValidationError::AmountNotNumeric)?;
        if amount < 0.0 || amount.is_nan() {
            return Err(ValidationError::AmountNegative.into());
        }

        let record = Record {
            date: date.to_string(),
            amount,
            category: category.to_string(),
            description: description.to_string(),
        };
        self.ledger.append_record(&record)?;

        Ok(())
    }

    /// Query the ledger for an inclusive date range and build the chart.
    ///
    /// Both bounds are trimmed of surrounding whitespace before use. A
    /// storage read failure degrades to an empty result with a warning.
    pub fn view_transactions(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> (Vec<Record>, Option<String>) {
        let records = match self
            .ledger
            .query_records(start_date.trim(), end_date.trim())
        {
            Ok(records) => records,
            Err(err) => {
                warn!("Error retrieving transactions: {}", err);
                return (Vec::new(), None);
            }
        };

        let chart = self.report.build_chart(&records);
        (records, chart)
    }
}
