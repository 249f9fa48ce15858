use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::ClaimsheetError;
use crate::reconstruct::CandidateRecord;
use crate::schema::{column_index, COLUMNS, SCHEMA_WIDTH};

/// One output row, exactly as wide as the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalRecord {
    cells: [Option<String>; SCHEMA_WIDTH],
}

impl LogicalRecord {
    pub fn cells(&self) -> &[Option<String>] {
        &self.cells
    }

    /// Cell value by header name.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells[column_index(column)?].as_deref()
    }
}

impl TryFrom<CandidateRecord> for LogicalRecord {
    type Error = CandidateRecord;

    /// Fails with the untouched candidate when its width is wrong.
    fn try_from(candidate: CandidateRecord) -> Result<Self, Self::Error> {
        let cells = <[Option<String>; SCHEMA_WIDTH]>::try_from(candidate)?;
        Ok(LogicalRecord { cells })
    }
}

impl Serialize for LogicalRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(SCHEMA_WIDTH))?;
        for (name, value) in COLUMNS.iter().zip(&self.cells) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Ordered, schema-conforming records of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<LogicalRecord>,
}

impl Dataset {
    /// Keep the candidates that match the schema width.
    ///
    /// Returns the dataset and the number of malformed candidates dropped.
    /// An empty result is an error: it means no page mapped onto the layout.
    pub fn from_candidates(
        candidates: Vec<CandidateRecord>,
    ) -> Result<(Dataset, usize), ClaimsheetError> {
        let total = candidates.len();
        let records: Vec<LogicalRecord> = candidates
            .into_iter()
            .filter_map(|c| LogicalRecord::try_from(c).ok())
            .collect();

        if records.is_empty() {
            return Err(ClaimsheetError::NoValidData);
        }

        let dropped = total - records.len();
        Ok((Dataset { records }, dropped))
    }

    /// Fill missing cells from the row above, column by column.
    ///
    /// Runs top to bottom so a value carries down through consecutive gaps.
    /// Missing cells of the first record stay missing. Empty strings are values.
    pub fn forward_fill(&mut self) {
        for i in 1..self.records.len() {
            let (above, below) = self.records.split_at_mut(i);
            let previous = &above[i - 1];
            for (cell, prev) in below[0].cells.iter_mut().zip(&previous.cells) {
                if cell.is_none() {
                    cell.clone_from(prev);
                }
            }
        }
    }

    pub fn records(&self) -> &[LogicalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&str> {
        self.records.get(row)?.cells.get(column)?.as_deref()
    }

    /// All values of one column, top to bottom.
    pub fn column(&self, column: usize) -> Vec<Option<&str>> {
        self.records
            .iter()
            .map(|r| r.cells.get(column).and_then(|c| c.as_deref()))
            .collect()
    }
}
