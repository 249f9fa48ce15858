use claimsheet_core::dataset::Dataset;
use claimsheet_core::persist::PersistenceOutcome;
use claimsheet_core::schema::COLUMNS;
use claimsheet_core::{Conversion, ConversionReport};

/// Widest a column is allowed to get before its cells are truncated.
const MAX_CELL_WIDTH: usize = 28;

pub fn format_dataset(dataset: &Dataset) -> String {
    let headers: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    let rows: Vec<Vec<Option<String>>> = dataset
        .records()
        .iter()
        .map(|r| r.cells().to_vec())
        .collect();
    format_rows(&headers, &rows)
}

pub fn format_rows(headers: &[String], rows: &[Vec<Option<String>>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| cell_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.as_deref().map(cell_width).unwrap_or(0);
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(len);
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format_line(headers.iter().map(|h| h.as_str()), &widths));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        out.push('\n');
        out.push_str(&format_line(
            row.iter().map(|c| c.as_deref().unwrap_or("")),
            &widths,
        ));
    }
    out
}

fn cell_width(s: &str) -> usize {
    s.chars().count().min(MAX_CELL_WIDTH)
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| {
            let truncated: String = if cell.chars().count() > *width {
                let mut t: String = cell.chars().take(width.saturating_sub(1)).collect();
                t.push('…');
                t
            } else {
                cell.to_string()
            };
            format!("{:<width$}", truncated, width = *width)
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

pub fn print_report(report: &ConversionReport) {
    eprintln!();
    eprintln!("  Pages:                      {}", report.pages);
    if !report.pages_without_table.is_empty() {
        let pages: Vec<String> = report
            .pages_without_table
            .iter()
            .map(|p| p.to_string())
            .collect();
        eprintln!("  Pages without a table:      {}", pages.join(", "));
    }
    eprintln!("  Header rows dropped:        {}", report.noise_rows_dropped);
    eprintln!(
        "  Records with physician:     {}",
        report.records_with_physician
    );
    eprintln!(
        "  Records without physician:  {}",
        report.records_without_physician
    );
    eprintln!(
        "  Malformed records dropped:  {}",
        report.malformed_records_dropped
    );
    eprintln!("  Records kept:               {}", report.records_kept);
}

pub fn print_summary(conversion: &Conversion) {
    print_report(&conversion.report);

    match &conversion.persistence {
        PersistenceOutcome::Skipped => {}
        PersistenceOutcome::Stored { sink, rows } => {
            eprintln!("  Stored:                     {} row(s) in {}", rows, sink);
        }
        PersistenceOutcome::Failed { sink, reason } => {
            eprintln!("  Storage failed ({}):        {}", sink, reason);
        }
    }
}
