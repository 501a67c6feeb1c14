//! In-memory view of one worksheet: ordered column names and ordered rows.
//!
//! Loading lives in `reader`; the read-only profiling used by `explore` lives in `explore`.

use std::fmt;

pub mod explore;
pub mod reader;

/// A single cell, already decoupled from the spreadsheet library's representation.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl CellValue {
    /// The cell's text if it holds a string value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Empty => Ok(()),
        }
    }
}

/// One data row. Cells are positionally aligned with `Table::columns`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<CellValue>,
}

impl Row {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    pub fn cell(&self, index: usize) -> &CellValue {
        self.cells.get(index).unwrap_or(&CellValue::Empty)
    }

    /// Cells paired with their column names, in declared column order.
    pub fn named_cells<'a>(
        &'a self,
        columns: &'a [String],
    ) -> impl Iterator<Item = (&'a str, &'a CellValue)> + 'a {
        columns
            .iter()
            .enumerate()
            .map(move |(i, name)| (name.as_str(), self.cell(i)))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Keeps only the first `n` rows.
    pub fn truncate(&mut self, n: usize) {
        self.rows.truncate(n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_cell_reads_as_empty() {
        let row = Row::new(vec![CellValue::Text("a".into())]);
        assert_eq!(row.cell(0), &CellValue::Text("a".into()));
        assert_eq!(row.cell(5), &CellValue::Empty);
    }

    #[test]
    fn test_named_cells_follow_column_order() {
        let columns = vec!["id".to_string(), "notas".to_string(), "extra".to_string()];
        let row = Row::new(vec![CellValue::Number(7.0), CellValue::Text("hola".into())]);
        let named: Vec<_> = row.named_cells(&columns).collect();
        assert_eq!(named.len(), 3);
        assert_eq!(named[0], ("id", &CellValue::Number(7.0)));
        assert_eq!(named[1], ("notas", &CellValue::Text("hola".into())));
        assert_eq!(named[2], ("extra", &CellValue::Empty));
    }

    #[test]
    fn test_display_renders_plain_values() {
        assert_eq!(CellValue::Number(42.0).to_string(), "42");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Bool(true).to_string(), "true");
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn test_truncate_keeps_first_rows() {
        let mut table = Table::new(
            vec!["c".into()],
            (0..5).map(|i| Row::new(vec![CellValue::Number(i as f64)])).collect(),
        );
        table.truncate(2);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].cell(0), &CellValue::Number(1.0));
    }
}
