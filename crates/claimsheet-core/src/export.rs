//! Spreadsheet export of a dataset, and reading an export back.

use std::io::Cursor;

use calamine::{Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};

use crate::dataset::Dataset;
use crate::error::ClaimsheetError;
use crate::schema::COLUMNS;

/// File name the workbook is delivered under.
pub const OUTPUT_FILENAME: &str = "output.xlsx";

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Render the dataset as an xlsx workbook.
///
/// Row 1 holds the column headers; records follow in order as text cells.
/// Missing and empty cells are left blank.
pub fn write_xlsx(dataset: &Dataset, sheet_name: &str) -> Result<Vec<u8>, ClaimsheetError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, name) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
    }

    for (i, record) in dataset.records().iter().enumerate() {
        let row = i as u32 + 1;
        for (col, cell) in record.cells().iter().enumerate() {
            if let Some(value) = cell.as_deref().filter(|v| !v.is_empty()) {
                worksheet.write_string(row, col as u16, value)?;
            }
        }
    }

    let bytes = workbook.save_to_buffer()?;
    tracing::debug!(rows = dataset.len(), bytes = bytes.len(), "rendered workbook");
    Ok(bytes)
}

/// Contents of the first worksheet of a workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

/// Read the first worksheet back: header row plus data rows.
///
/// Blank cells come back as `None`. Since [`write_xlsx`] leaves both missing
/// and empty cells blank, `Some("")` and `None` both read back as `None`.
pub fn read_xlsx(bytes: &[u8]) -> Result<SheetTable, ClaimsheetError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| ClaimsheetError::SpreadsheetRead(format!("failed to open xlsx: {e}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ClaimsheetError::SpreadsheetRead("workbook has no worksheets".into()))?
        .map_err(|e| ClaimsheetError::SpreadsheetRead(e.to_string()))?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|r| {
            r.iter()
                .map(|c| cell_as_string(c).unwrap_or_default())
                .collect()
        })
        .unwrap_or_default();
    let rows = rows
        .map(|r| r.iter().map(cell_as_string).collect())
        .collect();

    Ok(SheetTable { headers, rows })
}

fn cell_as_string(cell: &calamine::Data) -> Option<String> {
    match cell {
        calamine::Data::String(s) if s.is_empty() => None,
        calamine::Data::String(s) => Some(s.clone()),
        calamine::Data::Float(f) => Some(f.to_string()),
        calamine::Data::Int(i) => Some(i.to_string()),
        calamine::Data::Empty => None,
        _ => Some(format!("{cell}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SCHEMA_WIDTH;

    fn dataset() -> Dataset {
        let mut first = vec![Some("1".to_string()); SCHEMA_WIDTH];
        first[0] = Some("PABN-001".to_string());
        first[4] = Some("Dr. Smith".to_string());
        first[6] = Some(String::new());
        let mut second = vec![Some("2".to_string()); SCHEMA_WIDTH];
        second[3] = None;
        let (dataset, _) = Dataset::from_candidates(vec![first, second]).unwrap();
        dataset
    }

    #[test]
    fn workbook_round_trips_cell_values() {
        let dataset = dataset();
        let bytes = write_xlsx(&dataset, DEFAULT_SHEET_NAME).unwrap();
        let sheet = read_xlsx(&bytes).unwrap();

        assert_eq!(sheet.headers, COLUMNS.to_vec());
        assert_eq!(sheet.rows.len(), dataset.len());
        for (sheet_row, record) in sheet.rows.iter().zip(dataset.records()) {
            let expected: Vec<Option<String>> = record
                .cells()
                .iter()
                .map(|c| c.clone().filter(|v| !v.is_empty()))
                .collect();
            assert_eq!(sheet_row, &expected);
        }

        assert_eq!(sheet.rows[0][4].as_deref(), Some("Dr. Smith"));
        // Empty folio and missing name both read back blank.
        assert_eq!(sheet.rows[0][6], None);
        assert_eq!(sheet.rows[1][3], None);
        // Numeric-looking text stays text.
        assert_eq!(sheet.rows[1][16].as_deref(), Some("2"));
    }

    #[test]
    fn invalid_sheet_name_is_rejected() {
        assert!(matches!(
            write_xlsx(&dataset(), "bad[name]"),
            Err(ClaimsheetError::Spreadsheet(_))
        ));
    }

    #[test]
    fn garbage_is_not_a_workbook() {
        assert!(matches!(
            read_xlsx(b"not a zip"),
            Err(ClaimsheetError::SpreadsheetRead(_))
        ));
    }
}
