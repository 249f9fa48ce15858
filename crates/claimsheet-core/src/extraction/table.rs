use crate::extraction::RawRow;
use crate::schema::CONTINUATION_MARKER;

/// Reconstruct table rows from pdftotext -layout output.
///
/// pdftotext -layout preserves column alignment using spaces. Cells are
/// separated by runs of two or more spaces (or a tab) and snapped onto the
/// column anchors of the widest line, so blank cells come back as `None`.
pub const MIN_TABLE_COLUMNS: usize = 3;

/// How far (in characters) a cell may start from a column anchor and still
/// count as aligned with it.
pub const ANCHOR_TOLERANCE: usize = 2;

/// A cell and the character offset where it starts.
#[derive(Debug, Clone, PartialEq)]
struct Span {
    start: usize,
    text: String,
}

fn split_spans(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut start = 0;
    let mut whitespace_run = 0;

    for (offset, ch) in line.chars().enumerate() {
        if ch == '\t' || (ch.is_whitespace() && whitespace_run >= 1) {
            if !current.trim().is_empty() {
                spans.push(Span {
                    start,
                    text: current.trim().to_string(),
                });
            }
            current.clear();
            whitespace_run += 1;
            continue;
        }

        if ch.is_whitespace() {
            whitespace_run += 1;
            current.push(' ');
            continue;
        }

        if current.trim().is_empty() {
            current.clear();
            start = offset;
        }
        whitespace_run = 0;
        current.push(ch);
    }

    if !current.trim().is_empty() {
        spans.push(Span {
            start,
            text: current.trim().to_string(),
        });
    }

    spans
}

/// Split a layout line into its cells, ignoring column alignment.
pub fn split_line_into_cells(line: &str) -> RawRow {
    split_spans(line).into_iter().map(|s| Some(s.text)).collect()
}

fn is_continuation_line(line: &str) -> bool {
    line.trim_start().starts_with(CONTINUATION_MARKER)
}

/// Find the table region of a page and turn its lines into rows.
///
/// The region starts at the first line with at least [`MIN_TABLE_COLUMNS`]
/// cells and runs through the last such line, then on through any trailing
/// physician lines and sparse rows aligned with the columns. A blank line or
/// an unaligned line (a footer) ends it. Returns `None` if no line qualifies.
pub fn detect_table(lines: &[String]) -> Option<Vec<RawRow>> {
    let spans: Vec<Vec<Span>> = lines.iter().map(|l| split_spans(l)).collect();

    let first = spans.iter().position(|s| s.len() >= MIN_TABLE_COLUMNS)?;
    let mut last = spans.iter().rposition(|s| s.len() >= MIN_TABLE_COLUMNS)?;

    let anchors: Vec<usize> = spans[first..=last]
        .iter()
        .fold(&spans[first], |widest, s| {
            if s.len() > widest.len() {
                s
            } else {
                widest
            }
        })
        .iter()
        .map(|s| s.start)
        .collect();

    while let Some(next) = spans.get(last + 1) {
        let trailing = !next.is_empty()
            && (is_continuation_line(&lines[last + 1])
                || (next.len() >= 2 && is_aligned(next, &anchors)));
        if !trailing {
            break;
        }
        last += 1;
    }

    let mut rows = Vec::new();
    for (line, line_spans) in lines[first..=last].iter().zip(&spans[first..=last]) {
        if line_spans.is_empty() {
            continue;
        }

        // The physician line is one logical cell even if the layout spread it.
        if is_continuation_line(line) {
            let text = line.split_whitespace().collect::<Vec<_>>().join(" ");
            rows.push(vec![Some(text)]);
            continue;
        }

        if line_spans.len() == 1 {
            rows.push(vec![Some(line_spans[0].text.clone())]);
            continue;
        }

        rows.push(snap_to_anchors(line_spans, &anchors));
    }

    Some(rows)
}

/// Every cell starts within [`ANCHOR_TOLERANCE`] of some column anchor.
fn is_aligned(spans: &[Span], anchors: &[usize]) -> bool {
    spans.iter().all(|span| {
        anchors
            .iter()
            .any(|anchor| anchor.abs_diff(span.start) <= ANCHOR_TOLERANCE)
    })
}

fn snap_to_anchors(spans: &[Span], anchors: &[usize]) -> RawRow {
    let mut row: RawRow = vec![None; anchors.len()];
    for span in spans {
        let column = anchors
            .iter()
            .enumerate()
            .min_by_key(|(_, anchor)| anchor.abs_diff(span.start))
            .map(|(i, _)| i)
            .unwrap_or(0);

        row[column] = match row[column].take() {
            Some(existing) => Some(format!("{existing} {}", span.text)),
            None => Some(span.text.clone()),
        };
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn splits_double_space_separated_cells() {
        let cells = split_line_into_cells("  Juan Dela Cruz   12-001  Dr. Smith");
        assert_eq!(
            cells,
            vec![
                Some("Juan Dela Cruz".to_string()),
                Some("12-001".to_string()),
                Some("Dr. Smith".to_string()),
            ]
        );
    }

    #[test]
    fn splits_tab_separated_cells() {
        let cells = split_line_into_cells("A\tB\tC");
        assert_eq!(cells.len(), 3);
    }

    #[test]
    fn blank_columns_come_back_as_none() {
        let page = lines(&[
            "PABN         Series    PIN",
            "P-001        S-1       1234",
            "P-002                  5678",
        ]);
        let rows = detect_table(&page).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[2],
            vec![Some("P-002".to_string()), None, Some("5678".to_string())]
        );
    }

    #[test]
    fn continuation_line_stays_one_cell() {
        let page = lines(&[
            "Statement of Account",
            "P-001        S-1       1234",
            "Health Care Professional/s:     Dr. Smith",
            "P-002        S-2       5678",
            "",
            "Page 1 of 3",
        ]);
        let rows = detect_table(&page).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[1],
            vec![Some("Health Care Professional/s: Dr. Smith".to_string())]
        );
    }

    #[test]
    fn physician_line_at_end_of_page_is_kept() {
        let page = lines(&[
            "PABN         Series    PIN",
            "P-001        S-1       1234",
            "Health Care Professional/s:   Dr. Smith",
            "P-002        S-2       5678",
            "Health Care Professional/s:   Dr. Jones",
        ]);
        let rows = detect_table(&page).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(
            rows[4],
            vec![Some("Health Care Professional/s: Dr. Jones".to_string())]
        );
    }

    #[test]
    fn sparse_trailing_row_kept_and_footer_dropped() {
        let page = lines(&[
            "PABN         Series    PIN",
            "P-001        S-1       1234",
            "P-002                  5678",
            "Prepared by finance on 2024-01-01",
            "",
            "Health Care Professional/s:   Dr. Nobody",
        ]);
        let rows = detect_table(&page).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[2],
            vec![Some("P-002".to_string()), None, Some("5678".to_string())]
        );
    }

    #[test]
    fn blank_line_ends_trailing_rows() {
        let page = lines(&[
            "PABN         Series    PIN",
            "P-001        S-1       1234",
            "",
            "P-002                  5678",
        ]);
        let rows = detect_table(&page).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn text_only_page_has_no_table() {
        let page = lines(&["Cover letter", "", "Dear Sir  or Madam,"]);
        assert!(detect_table(&page).is_none());
    }
}
