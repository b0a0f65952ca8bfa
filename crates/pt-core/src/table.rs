//! Comma-separated numeric tables (interval and SLI summaries).

use std::io::{self, BufRead};

use thiserror::Error;

/// Errors reading a summary table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read table: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: expected at most {expected} fields, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// A header row plus numeric cells; blank or non-numeric cells are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<f64>>>,
}

impl Table {
    /// Parses a table with a header line.
    ///
    /// Blank lines are ignored. Rows shorter than the header are padded with
    /// `None`; longer rows are an error.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, TableError> {
        let mut table = Self::default();
        let mut lines = reader.lines().enumerate();

        for (_, line) in lines.by_ref() {
            let line = line?;
            if !line.trim().is_empty() {
                table.columns = line.split(',').map(|c| c.trim().to_string()).collect();
                break;
            }
        }

        for (idx, line) in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let mut row: Vec<Option<f64>> = line.split(',').map(parse_cell).collect();
            if row.len() > table.columns.len() {
                return Err(TableError::RaggedRow {
                    line: idx + 1,
                    expected: table.columns.len(),
                    found: row.len(),
                });
            }
            row.resize(table.columns.len(), None);
            table.rows.push(row);
        }

        Ok(table)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `name` in the header.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

fn parse_cell(cell: &str) -> Option<f64> {
    let value: f64 = cell.trim().parse().ok()?;
    (!value.is_nan()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    #[test]
    fn parses_header_and_numeric_rows() {
        let input = "t_start,t_end,pool_now\n0,10,3\n10,20,4\n";
        let table = Table::parse(Cursor::new(input)).unwrap();

        assert_eq!(table.columns, ["t_start", "t_end", "pool_now"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], [Some(10.0), Some(20.0), Some(4.0)]);
        assert_eq!(table.column("pool_now"), Some(2));
        assert_eq!(table.column("missing"), None);
    }

    #[test]
    fn blank_and_text_cells_are_missing() {
        let input = "t_start,t_end,label\n5,,abc\n";
        let table = Table::parse(Cursor::new(input)).unwrap();
        assert_eq!(table.rows[0], [Some(5.0), None, None]);
    }

    #[test]
    fn short_rows_are_padded() {
        let input = "t_start,t_end\n5\n";
        let table = Table::parse(Cursor::new(input)).unwrap();
        assert_eq!(table.rows[0], [Some(5.0), None]);
    }

    #[test]
    fn long_rows_are_rejected() {
        let input = "t_start,t_end\n1,2,3\n";
        let err = Table::parse(Cursor::new(input)).unwrap_err();
        assert_eq!(err.to_string(), "line 2: expected at most 2 fields, found 3");
    }

    #[test]
    fn header_only_table_is_empty() {
        let table = Table::parse(Cursor::new("total_time_s,rejections\n")).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns.len(), 2);
    }

    #[test]
    fn empty_input_has_no_columns() {
        let table = Table::parse(Cursor::new("")).unwrap();
        assert!(table.columns.is_empty());
        assert!(table.is_empty());
    }
}
