//! Assembly of logical records from raw page rows.
//!
//! A record is a base row, optionally followed by a physician line
//! ("Health Care Professional/s: ..."). Both rows collapse into one record
//! with the physician name and an empty folio spliced in.

use serde::Serialize;

use crate::extraction::{PageTable, RawRow};
use crate::noise::is_noise_row;
use crate::schema::{CONTINUATION_MARKER, FOLIO, HEALTH_CARE_PROFESSIONAL};

/// A reconstructed record that has not been checked against the schema yet.
pub type CandidateRecord = Vec<Option<String>>;

/// Counters collected while walking the pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconstructStats {
    pub pages: usize,
    pub pages_without_table: Vec<usize>,
    pub noise_rows_dropped: usize,
    pub records_with_physician: usize,
    pub records_without_physician: usize,
}

/// Copy of `cells` with `value` inserted at `index`.
///
/// An index past the end appends, so short rows keep their cells in order.
fn spliced(cells: &[Option<String>], index: usize, value: Option<String>) -> CandidateRecord {
    let at = index.min(cells.len());
    let mut out = Vec::with_capacity(cells.len() + 1);
    out.extend_from_slice(&cells[..at]);
    out.push(value);
    out.extend_from_slice(&cells[at..]);
    out
}

/// Physician name carried by a continuation row, if `row` is one.
pub fn physician_name(row: &[Option<String>]) -> Option<String> {
    let first = row.first()?.as_deref()?;
    let (_, name) = first.rsplit_once(CONTINUATION_MARKER)?;
    Some(name.trim().to_string())
}

/// Base record merged with the physician named on the following row.
pub fn merge_with_physician(base: &[Option<String>], physician: String) -> CandidateRecord {
    let with_name = spliced(base, HEALTH_CARE_PROFESSIONAL, Some(physician));
    spliced(&with_name, FOLIO, Some(String::new()))
}

/// Base record with no physician row after it.
pub fn standalone(base: &[Option<String>]) -> CandidateRecord {
    spliced(base, HEALTH_CARE_PROFESSIONAL, Some(String::new()))
}

/// Walk one page's rows and build its records in order.
pub fn reconstruct_page(rows: &[RawRow], stats: &mut ReconstructStats) -> Vec<CandidateRecord> {
    let mut records = Vec::new();
    let mut j = 0;

    while j < rows.len() {
        let base = &rows[j];
        if is_noise_row(base) {
            stats.noise_rows_dropped += 1;
            j += 1;
            continue;
        }

        match rows.get(j + 1).and_then(|next| physician_name(next)) {
            Some(name) => {
                records.push(merge_with_physician(base, name));
                stats.records_with_physician += 1;
                j += 2;
            }
            None => {
                records.push(standalone(base));
                stats.records_without_physician += 1;
                j += 1;
            }
        }
    }

    records
}

/// Build records across all pages, in page order.
///
/// The first page's leading row is the document header and is always
/// dropped. Pages without a table contribute nothing.
pub fn reconstruct(pages: &[PageTable], stats: &mut ReconstructStats) -> Vec<CandidateRecord> {
    let mut records = Vec::new();

    for (index, page) in pages.iter().enumerate() {
        stats.pages += 1;

        let Some(rows) = page.rows.as_deref() else {
            tracing::warn!(page = page.page_number, "no table found on page");
            tracing::debug!(page = page.page_number, text = %page.text, "page text");
            stats.pages_without_table.push(page.page_number);
            continue;
        };

        let rows = if index == 0 {
            rows.get(1..).unwrap_or_default()
        } else {
            rows
        };

        let before = records.len();
        records.extend(reconstruct_page(rows, stats));
        tracing::debug!(
            page = page.page_number,
            rows = rows.len(),
            records = records.len() - before,
            "reconstructed page"
        );
    }

    records
}
