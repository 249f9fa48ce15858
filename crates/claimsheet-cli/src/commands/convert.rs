use claimsheet_core::error::ClaimsheetError;
use claimsheet_core::extraction::pdftotext::PdftotextExtractor;
use claimsheet_core::options::{load_options, validate_options, ConvertOptions, DatabaseOptions};
use claimsheet_core::persist::sqlite::{SqliteSink, DEFAULT_TABLE};
use claimsheet_core::persist::RecordSink;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    out: Option<PathBuf>,
    db: Option<PathBuf>,
    table: Option<String>,
    config: Option<PathBuf>,
    output_format: &str,
) -> Result<(), ClaimsheetError> {
    let mut options = match config {
        Some(ref path) => load_options(path)?,
        None => ConvertOptions::default(),
    };

    // Flags override the options file.
    if let Some(path) = db {
        let table = table
            .or_else(|| options.database.as_ref().map(|d| d.table.clone()))
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());
        options.database = Some(DatabaseOptions { path, table });
    }
    if let Some(name) = out.as_ref().and_then(|p| p.file_name()) {
        options.output_filename = name.to_string_lossy().into_owned();
    }
    validate_options(&options)?;

    let out_path = out.unwrap_or_else(|| PathBuf::from(&options.output_filename));

    let mut sink = match options.database {
        Some(ref db) => match SqliteSink::open(&db.path, &db.table) {
            Ok(sink) => Some(sink),
            Err(e) => {
                // Opening is part of persistence; the workbook still gets written.
                tracing::error!(path = %db.path.display(), error = %e, "failed to open database");
                None
            }
        },
        None => None,
    };

    let pdf_bytes = std::fs::read(&input_file)?;
    let extractor = PdftotextExtractor::new();
    let conversion = claimsheet_core::convert_pdf(
        &pdf_bytes,
        &extractor,
        sink.as_mut().map(|s| s as &mut dyn RecordSink),
        &options,
    )?;

    std::fs::write(&out_path, &conversion.workbook)?;
    eprintln!(
        "Converted {} record(s), written to {}",
        conversion.dataset.len(),
        out_path.display()
    );

    match output_format {
        "json" => output::json::print(&conversion)?,
        _ => output::table::print_summary(&conversion),
    }

    Ok(())
}
