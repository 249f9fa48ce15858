use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ClaimsheetError;
use crate::export::{DEFAULT_SHEET_NAME, OUTPUT_FILENAME};
use crate::persist::sqlite::{validate_table_name, DEFAULT_TABLE};

/// Conversion settings, usually read from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertOptions {
    /// File name the workbook is delivered under.
    pub output_filename: String,
    pub sheet_name: String,
    /// Where to append the dataset. Persistence is skipped when absent.
    pub database: Option<DatabaseOptions>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            output_filename: OUTPUT_FILENAME.to_string(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            database: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseOptions {
    pub path: PathBuf,
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

/// Load options from a JSON file.
pub fn load_options(path: &Path) -> Result<ConvertOptions, ClaimsheetError> {
    let content = std::fs::read_to_string(path).map_err(|e| ClaimsheetError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let options: ConvertOptions =
        serde_json::from_str(&content).map_err(|e| ClaimsheetError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_options(&options)?;
    Ok(options)
}

/// Parse options from a JSON string (no file path context).
pub fn parse_options_str(json: &str) -> Result<ConvertOptions, ClaimsheetError> {
    let options: ConvertOptions = serde_json::from_str(json)?;
    validate_options(&options)?;
    Ok(options)
}

/// Validate that options are usable before any work starts.
pub fn validate_options(options: &ConvertOptions) -> Result<(), ClaimsheetError> {
    let filename = options.output_filename.trim();
    if filename.is_empty() {
        return Err(ClaimsheetError::ConfigInvalid(
            "output_filename must not be empty".into(),
        ));
    }
    if !filename.to_lowercase().ends_with(".xlsx") {
        return Err(ClaimsheetError::ConfigInvalid(format!(
            "output_filename '{}' must end in .xlsx",
            filename
        )));
    }

    let sheet = &options.sheet_name;
    if sheet.is_empty() || sheet.chars().count() > 31 {
        return Err(ClaimsheetError::ConfigInvalid(
            "sheet_name must be 1 to 31 characters".into(),
        ));
    }
    if let Some(c) = sheet.chars().find(|c| "[]:*?/\\".contains(*c)) {
        return Err(ClaimsheetError::ConfigInvalid(format!(
            "sheet_name must not contain '{}'",
            c
        )));
    }

    if let Some(ref db) = options.database {
        if db.path.as_os_str().is_empty() {
            return Err(ClaimsheetError::ConfigInvalid(
                "database path must not be empty".into(),
            ));
        }
        validate_table_name(&db.table)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_object_gives_defaults() {
        let options = parse_options_str("{}").unwrap();
        assert_eq!(options, ConvertOptions::default());
        assert_eq!(options.output_filename, "output.xlsx");
        assert!(options.database.is_none());
    }

    #[test]
    fn database_table_defaults() {
        let options = parse_options_str(r#"{"database": {"path": "claims.db"}}"#).unwrap();
        let db = options.database.unwrap();
        assert_eq!(db.path, PathBuf::from("claims.db"));
        assert_eq!(db.table, "pdf_data");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse_options_str(r#"{"output_filename": "out.csv"}"#).is_err());
        assert!(parse_options_str(r#"{"sheet_name": "a/b"}"#).is_err());
        assert!(parse_options_str(r#"{"sheet_name": ""}"#).is_err());
        assert!(
            parse_options_str(r#"{"database": {"path": "x.db", "table": "bad name"}}"#).is_err()
        );
        assert!(parse_options_str(r#"{"unknown": 1}"#).is_err());
    }

    #[test]
    fn load_reports_path_on_failure() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        match load_options(file.path()) {
            Err(ClaimsheetError::ConfigLoad { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
