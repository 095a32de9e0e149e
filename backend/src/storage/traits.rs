//! # Storage Traits
//!
//! This module defines the storage abstraction trait that allows different
//! ledger backends to be used interchangeably by the domain layer.

use shared::Record;

/// Errors surfaced by ledger storage operations.
///
/// "File absent" is not an error here: `initialize` self-heals that case.
/// These variants cover unexpected I/O failures only, and callers report
/// them as non-fatal warnings rather than crashing.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Unexpected failure while reading the ledger file.
    #[error("failed to read ledger: {0}")]
    Read(#[source] csv::Error),
    /// Unexpected failure while writing to the ledger file.
    #[error("failed to write ledger: {0}")]
    Write(#[source] csv::Error),
}

/// Trait defining the interface for ledger storage operations.
///
/// The ledger is append-only: no update or delete operation exists, and
/// duplicate records are permitted as distinct entries.
pub trait LedgerStorage: Send + Sync {
    /// Ensure the backing ledger exists with the expected header.
    ///
    /// Idempotent; safe to call on every process start. Never alters
    /// existing rows or duplicates the header.
    fn initialize(&self) -> Result<(), StorageError>;

    /// Append one record as the last row of the ledger.
    ///
    /// The write is visible to subsequent reads once the call returns.
    /// No validation happens here; that is the domain layer's job.
    fn append_record(&self, record: &Record) -> Result<(), StorageError>;

    /// Return records whose date falls within `[start_date, end_date]`,
    /// inclusive on both ends, in on-disk (append) order.
    ///
    /// Rows with unparseable dates are excluded rather than erroring the
    /// call; unparseable bounds yield an empty result.
    fn query_records(&self, start_date: &str, end_date: &str) -> Result<Vec<Record>, StorageError>;
}
