//! The fixed output layout of a claim statement.

/// Output header, in order. Every valid record has exactly one cell per entry.
pub const COLUMNS: [&str; SCHEMA_WIDTH] = [
    "PABN No.",
    "Series No.",
    "Member PIN",
    "Patient Name",
    "Health Care Professional",
    "Confinement Period",
    "Folio",
    "Caserate1_Code",
    "Caserate1_Gross",
    "Caserate2_Code",
    "Caserate2_Gross",
    "Others_Code",
    "Others_Gross",
    "Total_Gross",
    "Total_WTax",
    "Total_HCI",
    "Total_PF",
];

pub const SCHEMA_WIDTH: usize = 17;

/// Position of the physician name, right after "Patient Name".
pub const HEALTH_CARE_PROFESSIONAL: usize = 4;

/// Position of the folio column. Never populated from the source document.
pub const FOLIO: usize = 6;

/// Prefix of the physician line that trails a base record.
pub const CONTINUATION_MARKER: &str = "Health Care Professional/s:";

/// Main header labels, looked for in the first [`HEADER_SCAN_WIDTH`] cells.
pub const HEADER_KEYWORDS: [&str; 5] = [
    "PABN No.",
    "Series No.",
    "Member PIN",
    "Patient Name",
    "Confinement Period",
];

pub const HEADER_SCAN_WIDTH: usize = 6;

/// Column-group subheader labels ("Code", "Gross", ...).
pub const SUBHEADER_KEYWORDS: [&str; 5] = ["Code", "Gross", "WTax", "HCI", "PF"];

/// Index of a column by its header name.
pub fn column_index(name: &str) -> Option<usize> {
    COLUMNS.iter().position(|c| *c == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserted_columns_sit_where_the_merge_puts_them() {
        assert_eq!(COLUMNS[HEALTH_CARE_PROFESSIONAL], "Health Care Professional");
        assert_eq!(COLUMNS[FOLIO], "Folio");
        assert_eq!(COLUMNS[HEALTH_CARE_PROFESSIONAL - 1], "Patient Name");
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("PABN No."), Some(0));
        assert_eq!(column_index("Total_PF"), Some(16));
        assert_eq!(column_index("Physician"), None);
    }
}
