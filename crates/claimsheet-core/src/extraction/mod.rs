pub mod pdftotext;
pub mod table;

use crate::error::ClaimsheetError;

/// One physical table line as extracted from a page. Width varies per row.
pub type RawRow = Vec<Option<String>>;

/// Table content extracted from a single page of a PDF.
#[derive(Debug, Clone, Default)]
pub struct PageTable {
    pub page_number: usize,
    /// `None` when no table was detected on the page.
    pub rows: Option<Vec<RawRow>>,
    /// Plain page text, kept for diagnostics when no table is found.
    pub text: String,
}

impl PageTable {
    pub fn with_rows(page_number: usize, rows: Vec<RawRow>) -> Self {
        PageTable {
            page_number,
            rows: Some(rows),
            text: String::new(),
        }
    }

    pub fn without_table(page_number: usize, text: impl Into<String>) -> Self {
        PageTable {
            page_number,
            rows: None,
            text: text.into(),
        }
    }
}

/// Trait for PDF table extraction backends.
pub trait PageTableExtractor: Send + Sync {
    /// Extract the candidate table of every page, in page order.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageTable>, ClaimsheetError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
