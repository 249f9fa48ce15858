pub mod sqlite;

use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::ClaimsheetError;

/// Append-only destination for finished datasets.
pub trait RecordSink {
    /// Name of this sink (for diagnostics).
    fn name(&self) -> &str;

    /// Append every record of the dataset. Returns the number of rows written.
    fn append(&mut self, dataset: &Dataset) -> Result<usize, ClaimsheetError>;
}

/// What happened to the dataset on its way to persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PersistenceOutcome {
    /// No sink was configured.
    Skipped,
    Stored { sink: String, rows: usize },
    Failed { sink: String, reason: String },
}

impl PersistenceOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, PersistenceOutcome::Failed { .. })
    }
}

/// Append the dataset to the sink, absorbing any failure into the outcome.
pub fn persist(sink: Option<&mut dyn RecordSink>, dataset: &Dataset) -> PersistenceOutcome {
    let Some(sink) = sink else {
        return PersistenceOutcome::Skipped;
    };

    match sink.append(dataset) {
        Ok(rows) => {
            tracing::info!(sink = sink.name(), rows, "stored dataset");
            PersistenceOutcome::Stored {
                sink: sink.name().to_string(),
                rows,
            }
        }
        Err(e) => {
            tracing::error!(sink = sink.name(), error = %e, "failed to store dataset");
            PersistenceOutcome::Failed {
                sink: sink.name().to_string(),
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SCHEMA_WIDTH;

    struct BrokenSink;

    impl RecordSink for BrokenSink {
        fn name(&self) -> &str {
            "broken"
        }

        fn append(&mut self, _dataset: &Dataset) -> Result<usize, ClaimsheetError> {
            Err(ClaimsheetError::Extraction("connection refused".into()))
        }
    }

    fn dataset() -> Dataset {
        let (dataset, _) =
            Dataset::from_candidates(vec![vec![Some("x".to_string()); SCHEMA_WIDTH]]).unwrap();
        dataset
    }

    #[test]
    fn no_sink_is_skipped() {
        assert_eq!(persist(None, &dataset()), PersistenceOutcome::Skipped);
    }

    #[test]
    fn failure_is_absorbed_into_outcome() {
        let mut sink = BrokenSink;
        let outcome = persist(Some(&mut sink), &dataset());
        assert!(outcome.is_failed());
        match outcome {
            PersistenceOutcome::Failed { sink, reason } => {
                assert_eq!(sink, "broken");
                assert!(reason.contains("connection refused"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
