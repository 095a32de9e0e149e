use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use chrono::NaiveDate;
use csv::{Reader, WriterBuilder};
use shared::Record;
use tracing::warn;

use super::connection::{CsvConnection, DATE_FORMAT};
use crate::storage::traits::{LedgerStorage, StorageError};

/// CSV-based ledger repository
#[derive(Clone)]
pub struct LedgerRepository {
    connection: CsvConnection,
}

impl LedgerRepository {
    /// Create a new CSV ledger repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read every record in the ledger, in on-disk order.
    fn read_records(&self) -> Result<Vec<Record>, StorageError> {
        self.connection.ensure_ledger_file_exists()?;

        let file = File::open(self.connection.ledger_path())
            .map_err(|e| StorageError::Read(e.into()))?;
        let reader = BufReader::new(file);
        let mut csv_reader = Reader::from_reader(reader);

        let mut records = Vec::new();

        for result in csv_reader.records() {
            let row = match result {
                Ok(row) => row,
                Err(err) => {
                    // A single mangled row does not fail the whole read.
                    warn!("Skipping unreadable ledger row: {}", err);
                    continue;
                }
            };

            records.push(Record {
                date: row.get(0).unwrap_or("").to_string(),
                amount: row.get(1).unwrap_or("0").parse::<f64>().unwrap_or(0.0),
                category: row.get(2).unwrap_or("").to_string(),
                description: row.get(3).unwrap_or("").to_string(),
            });
        }

        Ok(records)
    }
}

impl LedgerStorage for LedgerRepository {
    fn initialize(&self) -> Result<(), StorageError> {
        self.connection.ensure_ledger_file_exists()
    }

    fn append_record(&self, record: &Record) -> Result<(), StorageError> {
        self.connection.ensure_ledger_file_exists()?;

        let file = OpenOptions::new()
            .append(true)
            .open(self.connection.ledger_path())
            .map_err(|e| StorageError::Write(e.into()))?;

        let writer = BufWriter::new(file);
        let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

        let amount = record.amount.to_string();
        csv_writer
            .write_record(&[
                record.date.as_str(),
                amount.as_str(),
                record.category.as_str(),
                record.description.as_str(),
            ])
            .map_err(StorageError::Write)?;
        csv_writer
            .flush()
            .map_err(|e| StorageError::Write(e.into()))?;

        Ok(())
    }

    fn query_records(&self, start_date: &str, end_date: &str) -> Result<Vec<Record>, StorageError> {
        let records = self.read_records()?;

        // Unparseable bounds match nothing rather than failing the query.
        let (start, end) = match (
            NaiveDate::parse_from_str(start_date, DATE_FORMAT),
            NaiveDate::parse_from_str(end_date, DATE_FORMAT),
        ) {
            (Ok(start), Ok(end)) => (start, end),
            _ => return Ok(Vec::new()),
        };

        Ok(records
            .into_iter()
            .filter(|record| {
                NaiveDate::parse_from_str(&record.date, DATE_FORMAT)
                    .map(|d| start <= d && d <= end)
                    .unwrap_or(false)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn setup() -> (LedgerRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path().join("finance_data.csv"));
        let repo = LedgerRepository::new(connection);
        repo.initialize().unwrap();
        (repo, temp_dir)
    }

    fn record(date: &str, amount: f64, category: &str) -> Record {
        Record {
            date: date.to_string(),
            amount,
            category: category.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn initialize_is_idempotent() {
        let (repo, temp_dir) = setup();
        repo.append_record(&record("09-04-2024", 100.0, "Income")).unwrap();

        repo.initialize().unwrap();
        repo.initialize().unwrap();

        let contents =
            std::fs::read_to_string(temp_dir.path().join("finance_data.csv")).unwrap();
        assert_eq!(contents.matches("date,amount,category,description").count(), 1);

        let rows = repo.query_records("09-04-2024", "09-04-2024").unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn append_then_query_respects_range() {
        let (repo, _temp_dir) = setup();
        repo.append_record(&record("09-04-2024", 100.0, "Income")).unwrap();
        repo.append_record(&record("20-05-2024", 30.0, "Expense")).unwrap();

        let rows = repo.query_records("01-04-2024", "30-04-2024").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "09-04-2024");
        assert_eq!(rows[0].amount, 100.0);
    }

    #[test]
    fn query_bounds_are_inclusive() {
        let (repo, _temp_dir) = setup();
        repo.append_record(&record("09-04-2024", 10.0, "Income")).unwrap();

        let rows = repo.query_records("09-04-2024", "09-04-2024").unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn query_preserves_append_order() {
        let (repo, _temp_dir) = setup();
        repo.append_record(&record("10-04-2024", 1.0, "Income")).unwrap();
        repo.append_record(&record("08-04-2024", 2.0, "Expense")).unwrap();
        repo.append_record(&record("09-04-2024", 3.0, "Income")).unwrap();

        let rows = repo.query_records("01-04-2024", "30-04-2024").unwrap();
        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["10-04-2024", "08-04-2024", "09-04-2024"]);
    }

    #[test]
    fn duplicate_records_are_distinct_entries() {
        let (repo, _temp_dir) = setup();
        let entry = record("09-04-2024", 5.0, "Expense");
        repo.append_record(&entry).unwrap();
        repo.append_record(&entry).unwrap();

        let rows = repo.query_records("09-04-2024", "09-04-2024").unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn unparseable_row_date_is_excluded() {
        let (repo, temp_dir) = setup();
        repo.append_record(&record("09-04-2024", 100.0, "Income")).unwrap();

        let mut file = OpenOptions::new()
            .append(true)
            .open(temp_dir.path().join("finance_data.csv"))
            .unwrap();
        writeln!(file, "not-a-date,5,Income,mystery").unwrap();

        let rows = repo.query_records("01-01-2000", "31-12-2099").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "09-04-2024");
    }

    #[test]
    fn unparseable_bounds_match_nothing() {
        let (repo, _temp_dir) = setup();
        repo.append_record(&record("09-04-2024", 100.0, "Income")).unwrap();

        assert!(repo.query_records("garbage", "09-04-2024").unwrap().is_empty());
        assert!(repo.query_records("09-04-2024", "").unwrap().is_empty());
    }

    #[test]
    fn query_on_empty_ledger_returns_empty() {
        let (repo, _temp_dir) = setup();
        assert!(repo.query_records("01-01-2024", "31-12-2024").unwrap().is_empty());
    }

    #[test]
    fn description_with_commas_round_trips() {
        let (repo, _temp_dir) = setup();
        let entry = Record {
            date: "09-04-2024".to_string(),
            amount: 12.5,
            category: "Expense".to_string(),
            description: "coffee, cake, and a tip".to_string(),
        };
        repo.append_record(&entry).unwrap();

        let rows = repo.query_records("09-04-2024", "09-04-2024").unwrap();
        assert_eq!(rows[0].description, "coffee, cake, and a tip");
    }
}
