//! Storage layer: the ledger store abstraction and its CSV implementation.

pub mod csv;
pub mod traits;

pub use traits::{LedgerStorage, StorageError};
