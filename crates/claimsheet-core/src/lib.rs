pub mod dataset;
pub mod error;
pub mod export;
pub mod extraction;
pub mod noise;
pub mod options;
pub mod persist;
pub mod reconstruct;
pub mod schema;

use serde::Serialize;

use dataset::Dataset;
use error::ClaimsheetError;
use extraction::{PageTable, PageTableExtractor};
use options::ConvertOptions;
use persist::{PersistenceOutcome, RecordSink};
use reconstruct::{reconstruct, ReconstructStats};

/// Counters describing how a document turned into its dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub pages: usize,
    pub pages_without_table: Vec<usize>,
    pub noise_rows_dropped: usize,
    pub records_with_physician: usize,
    pub records_without_physician: usize,
    pub malformed_records_dropped: usize,
    pub records_kept: usize,
}

impl ConversionReport {
    fn new(stats: ReconstructStats, malformed_records_dropped: usize, records_kept: usize) -> Self {
        ConversionReport {
            pages: stats.pages,
            pages_without_table: stats.pages_without_table,
            noise_rows_dropped: stats.noise_rows_dropped,
            records_with_physician: stats.records_with_physician,
            records_without_physician: stats.records_without_physician,
            malformed_records_dropped,
            records_kept,
        }
    }
}

/// Result of converting one PDF document.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    pub dataset: Dataset,
    pub report: ConversionReport,
    pub persistence: PersistenceOutcome,
    #[serde(skip)]
    pub workbook: Vec<u8>,
    pub filename: String,
}

impl Conversion {
    pub fn mime(&self) -> &'static str {
        export::XLSX_MIME
    }
}

/// Turn extracted pages into the filled, schema-conforming dataset.
///
/// Fails with [`ClaimsheetError::NoValidData`] when no record survives.
pub fn build_dataset(pages: &[PageTable]) -> Result<(Dataset, ConversionReport), ClaimsheetError> {
    let mut stats = ReconstructStats::default();
    let candidates = reconstruct(pages, &mut stats);

    let (mut dataset, dropped) = Dataset::from_candidates(candidates)?;
    dataset.forward_fill();

    let report = ConversionReport::new(stats, dropped, dataset.len());
    tracing::info!(
        pages = report.pages,
        records = report.records_kept,
        malformed = report.malformed_records_dropped,
        "built dataset"
    );
    Ok((dataset, report))
}

/// Extract and reconstruct a PDF without writing anything.
pub fn parse_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PageTableExtractor,
) -> Result<(Dataset, ConversionReport), ClaimsheetError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    tracing::debug!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        "extracted pages"
    );
    build_dataset(&pages)
}

/// Main API entry point: convert a PDF statement into a workbook.
///
/// The dataset is appended to `sink` when one is given. A failing sink is
/// reported in [`Conversion::persistence`] and never stops the export.
pub fn convert_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PageTableExtractor,
    sink: Option<&mut dyn RecordSink>,
    options: &ConvertOptions,
) -> Result<Conversion, ClaimsheetError> {
    options::validate_options(options)?;

    let (dataset, report) = parse_pdf(pdf_bytes, extractor)?;
    let persistence = persist::persist(sink, &dataset);
    let workbook = export::write_xlsx(&dataset, &options.sheet_name)?;

    Ok(Conversion {
        dataset,
        report,
        persistence,
        workbook,
        filename: options.output_filename.clone(),
    })
}
