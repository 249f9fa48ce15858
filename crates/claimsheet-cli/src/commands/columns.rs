use claimsheet_core::error::ClaimsheetError;
use claimsheet_core::schema::{COLUMNS, FOLIO, HEALTH_CARE_PROFESSIONAL};

pub fn run() -> Result<(), ClaimsheetError> {
    println!("Output columns ({}):\n", COLUMNS.len());
    for (i, name) in COLUMNS.iter().enumerate() {
        let note = match i {
            HEALTH_CARE_PROFESSIONAL => "  (from the \"Health Care Professional/s:\" line)",
            FOLIO => "  (always empty)",
            _ => "",
        };
        println!("  {:>2}  {}{}", i + 1, name, note);
    }
    Ok(())
}
