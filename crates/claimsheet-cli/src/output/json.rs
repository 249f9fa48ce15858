use claimsheet_core::error::ClaimsheetError;
use claimsheet_core::export::SheetTable;
use serde::Serialize;
use serde_json::{Map, Value};

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), ClaimsheetError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// Workbook rows as objects keyed by the header row.
pub fn sheet_records(sheet: &SheetTable) -> Vec<Map<String, Value>> {
    sheet
        .rows
        .iter()
        .map(|row| {
            sheet
                .headers
                .iter()
                .zip(row)
                .map(|(h, c)| (h.clone(), c.clone().map(Value::String).unwrap_or(Value::Null)))
                .collect()
        })
        .collect()
}
