use crate::error::ClaimsheetError;
use crate::extraction::table::detect_table;
use crate::extraction::{PageTable, PageTableExtractor};
use std::io::Write;
use std::process::Command;

/// PDF table extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout` to preserve whitespace alignment of tables, then
/// rebuilds each page's grid with [`detect_table`].
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageTableExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageTable>, ClaimsheetError> {
        // Write PDF bytes to a temp file
        let mut tmpfile = tempfile::NamedTempFile::new()
            .map_err(|e| ClaimsheetError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| ClaimsheetError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg("-layout")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ClaimsheetError::PdftotextNotFound
                } else {
                    ClaimsheetError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(ClaimsheetError::PdftotextFailed { code, stderr });
        }

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(pages_from_layout_text(&text))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Split layout text into pages (pdftotext uses form feed as page separator).
fn pages_from_layout_text(text: &str) -> Vec<PageTable> {
    let mut segments: Vec<&str> = text.split('\x0c').collect();
    if segments.len() > 1 && segments.last().is_some_and(|s| s.trim().is_empty()) {
        segments.pop();
    }

    segments
        .into_iter()
        .enumerate()
        .map(|(i, page_text)| {
            let lines: Vec<String> = page_text.lines().map(|l| l.to_string()).collect();
            match detect_table(&lines) {
                Some(rows) => PageTable {
                    page_number: i + 1,
                    rows: Some(rows),
                    text: page_text.to_string(),
                },
                None => PageTable::without_table(i + 1, page_text),
            }
        })
        .collect()
}
