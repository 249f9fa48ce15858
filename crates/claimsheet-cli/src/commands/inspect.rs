use claimsheet_core::error::ClaimsheetError;
use claimsheet_core::export::read_xlsx;
use claimsheet_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use crate::output;

pub fn run(input_file: PathBuf, output_format: &str) -> Result<(), ClaimsheetError> {
    let bytes = std::fs::read(&input_file)?;

    let is_xlsx = input_file
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false);

    if is_xlsx {
        let sheet = read_xlsx(&bytes)?;
        match output_format {
            "json" => output::json::print(&output::json::sheet_records(&sheet))?,
            _ => println!("{}", output::table::format_rows(&sheet.headers, &sheet.rows)),
        }
        return Ok(());
    }

    let extractor = PdftotextExtractor::new();
    let (dataset, report) = claimsheet_core::parse_pdf(&bytes, &extractor)?;

    match output_format {
        "json" => output::json::print(&dataset)?,
        _ => {
            println!("{}", output::table::format_dataset(&dataset));
            output::table::print_report(&report);
        }
    }

    Ok(())
}
