use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::storage::traits::StorageError;

/// Column order of the ledger file. Field order on disk is fixed.
pub const COLUMNS: [&str; 4] = ["date", "amount", "category", "description"];

/// Date pattern for stored dates and query bounds (e.g. "09-04-2024").
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// CsvConnection holds the ledger location, injected into repositories
/// instead of living in process globals.
#[derive(Clone)]
pub struct CsvConnection {
    ledger_path: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection for the given ledger file path.
    pub fn new<P: AsRef<Path>>(ledger_path: P) -> Self {
        Self {
            ledger_path: ledger_path.as_ref().to_path_buf(),
        }
    }

    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    /// Create the ledger file with only the header row when it is absent
    /// or empty. Existing rows are never touched.
    pub fn ensure_ledger_file_exists(&self) -> Result<(), StorageError> {
        let needs_header = match fs::metadata(&self.ledger_path) {
            Ok(metadata) => metadata.len() == 0,
            Err(_) => true,
        };

        if needs_header {
            if let Some(parent) = self.ledger_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent)
                        .map_err(|e| StorageError::Write(e.into()))?;
                }
            }

            info!("Creating ledger file at {}", self.ledger_path.display());
            let mut writer =
                csv::Writer::from_path(&self.ledger_path).map_err(StorageError::Write)?;
            writer.write_record(&COLUMNS).map_err(StorageError::Write)?;
            writer
                .flush()
                .map_err(|e| StorageError::Write(e.into()))?;
        }

        Ok(())
    }
}
