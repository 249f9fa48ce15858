use std::path::Path;

use rusqlite::{params_from_iter, Connection};

use super::RecordSink;
use crate::dataset::Dataset;
use crate::error::ClaimsheetError;
use crate::schema::COLUMNS;

pub const DEFAULT_TABLE: &str = "pdf_data";

/// SQLite table sink. Every schema column is stored as TEXT under its header name.
pub struct SqliteSink {
    conn: Connection,
    table: String,
}

impl SqliteSink {
    /// Open (or create) the database at `path` and make sure the table exists.
    pub fn open(path: &Path, table: &str) -> Result<Self, ClaimsheetError> {
        validate_table_name(table)?;
        let conn = Connection::open(path)?;
        Self::with_connection(conn, table)
    }

    /// In-memory database (for testing).
    pub fn open_in_memory(table: &str) -> Result<Self, ClaimsheetError> {
        validate_table_name(table)?;
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn, table)
    }

    fn with_connection(conn: Connection, table: &str) -> Result<Self, ClaimsheetError> {
        conn.execute_batch(&create_table_sql(table))?;
        Ok(SqliteSink {
            conn,
            table: table.to_string(),
        })
    }

    /// Number of rows currently in the table.
    pub fn count_rows(&self) -> Result<i64, ClaimsheetError> {
        let count = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM \"{}\"", self.table),
            [],
            |row| row.get::<_, i64>(0),
        )?;
        Ok(count)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl RecordSink for SqliteSink {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn append(&mut self, dataset: &Dataset) -> Result<usize, ClaimsheetError> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&insert_sql(&self.table))?;
            for record in dataset.records() {
                stmt.execute(params_from_iter(record.cells().iter()))?;
            }
        }
        tx.commit()?;
        Ok(dataset.len())
    }
}

/// Table names are interpolated into SQL, so only plain identifiers pass.
pub fn validate_table_name(table: &str) -> Result<(), ClaimsheetError> {
    let mut chars = table.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !valid {
        return Err(ClaimsheetError::ConfigInvalid(format!(
            "invalid table name '{}' (expected letters, digits and '_', not starting with a digit)",
            table
        )));
    }
    Ok(())
}

fn create_table_sql(table: &str) -> String {
    let columns: Vec<String> = COLUMNS.iter().map(|c| format!("\"{c}\" TEXT")).collect();
    format!(
        "CREATE TABLE IF NOT EXISTS \"{}\" ({})",
        table,
        columns.join(", ")
    )
}

fn insert_sql(table: &str) -> String {
    let columns: Vec<String> = COLUMNS.iter().map(|c| format!("\"{c}\"")).collect();
    let placeholders: Vec<String> = (1..=COLUMNS.len()).map(|i| format!("?{i}")).collect();
    format!(
        "INSERT INTO \"{}\" ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders.join(", ")
    )
}
