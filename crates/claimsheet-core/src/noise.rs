//! Detection of header and subheader rows that page-wise extraction repeats
//! at the top of every page.

use crate::schema::{HEADER_KEYWORDS, HEADER_SCAN_WIDTH, SUBHEADER_KEYWORDS};

/// Text of a cell, if it has any. Empty strings count as blank.
fn text(cell: &Option<String>) -> Option<&str> {
    cell.as_deref().filter(|s| !s.is_empty())
}

/// Main header row: a header label in one of the first six cells.
pub fn is_header_row(row: &[Option<String>]) -> bool {
    row.iter()
        .take(HEADER_SCAN_WIDTH)
        .filter_map(text)
        .any(|cell| HEADER_KEYWORDS.iter().any(|k| cell.contains(k)))
}

/// Subheader row: every non-blank cell carries a column-group label.
///
/// Rows without any non-blank cell are not subheaders; see [`is_blank_row`].
pub fn is_subheader_row(row: &[Option<String>]) -> bool {
    let mut cells = row.iter().filter_map(text).peekable();
    if cells.peek().is_none() {
        return false;
    }
    cells.all(|cell| SUBHEADER_KEYWORDS.iter().any(|k| cell.contains(k)))
}

/// A row with no text at all (including a zero-length row).
pub fn is_blank_row(row: &[Option<String>]) -> bool {
    row.iter().all(|cell| text(cell).is_none())
}

/// Whether a raw row is extraction noise rather than data.
///
/// Blank rows are noise: they carry nothing to merge or fill.
pub fn is_noise_row(row: &[Option<String>]) -> bool {
    is_blank_row(row) || is_header_row(row) || is_subheader_row(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[Option<&str>]) -> Vec<Option<String>> {
        cells.iter().map(|c| c.map(str::to_string)).collect()
    }

    #[test]
    fn main_header_in_first_six_cells() {
        let header = row(&[
            Some("PABN No."),
            Some("Series No."),
            Some("Member PIN"),
            Some("Patient Name"),
            Some("Confinement Period"),
            Some("Caserate1"),
        ]);
        assert!(is_noise_row(&header));

        // A single label is enough, even embedded in longer text.
        let partial = row(&[None, None, Some("Patient Name / Address"), Some("x")]);
        assert!(is_header_row(&partial));
    }

    #[test]
    fn header_label_after_sixth_cell_is_ignored() {
        let mut cells = vec![Some("data"); 6];
        cells.push(Some("Patient Name"));
        assert!(!is_header_row(&row(&cells)));
        assert!(!is_noise_row(&row(&cells)));
    }

    #[test]
    fn subheader_requires_every_cell_to_match() {
        let sub = row(&[
            None,
            None,
            Some("Code"),
            Some("Gross"),
            Some(""),
            Some("WTax"),
            Some("HCI"),
            Some("PF"),
        ]);
        assert!(is_noise_row(&sub));

        let mixed = row(&[Some("Code"), Some("Gross"), Some("1,500.00")]);
        assert!(!is_subheader_row(&mixed));
        assert!(!is_noise_row(&mixed));
    }

    #[test]
    fn data_row_is_not_noise() {
        let data = row(&[
            Some("PABN1"),
            Some("S1"),
            Some("PIN1"),
            Some("Name1"),
            Some("Conf1"),
            Some("C1"),
            Some("G1"),
        ]);
        assert!(!is_noise_row(&data));
    }

    #[test]
    fn all_blank_row_is_noise() {
        let blank = row(&[None, None, Some(""), None]);
        assert!(is_blank_row(&blank));
        assert!(!is_subheader_row(&blank));
        assert!(is_noise_row(&blank));
        assert!(is_noise_row(&[]));
    }
}
