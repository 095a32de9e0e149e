//! # CSV Storage Module
//!
//! CSV-backed implementation of the ledger store: a single UTF-8 text file
//! with a fixed header and one row per record, newline-terminated.
//!
//! ## File Format
//!
//! ```csv
//! date,amount,category,description
//! 09-04-2024,100,Income,Salary
//! 10-04-2024,42.5,Expense,Groceries
//! ```

pub mod connection;
pub mod ledger_repository;

pub use connection::{CsvConnection, DATE_FORMAT};
pub use ledger_repository::LedgerRepository;
