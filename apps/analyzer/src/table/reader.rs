//! Spreadsheet loading. Reads the first worksheet; the first row is the header.

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::{error, info};

use crate::errors::TableError;
use crate::table::{CellValue, Row, Table};

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
                CellValue::Text(s.clone())
            }
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::Error(_) | Data::Empty => CellValue::Empty,
        }
    }
}

/// Loads the table at `path`, or an empty table if anything goes wrong.
/// Never fails: errors are logged and the run continues with the next file.
pub fn read_table(path: &Path) -> Table {
    match load_first_sheet(path) {
        Ok(table) => {
            info!(
                path = %path.display(),
                rows = table.len(),
                columns = ?table.columns,
                "Spreadsheet loaded"
            );
            table
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to read spreadsheet");
            Table::default()
        }
    }
}

/// Loads the first worksheet of the workbook at `path`.
pub fn load_first_sheet(path: &Path) -> Result<Table, TableError> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(TableError::NoWorksheet)?;

    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows_iter = range.rows();
    let Some(header_row) = rows_iter.next() else {
        return Ok(Table::default());
    };

    let columns = header_names(header_row);
    let rows = rows_iter
        .map(|row| {
            let mut cells: Vec<CellValue> = row.iter().map(CellValue::from).collect();
            cells.resize(columns.len(), CellValue::Empty);
            Row::new(cells)
        })
        .collect();

    Ok(Table::new(columns, rows))
}

/// Turns the header row into unique column names.
/// Blank headers become `Unnamed: <index>`; repeats get a `.1`, `.2`, ... suffix.
fn header_names(header_row: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    header_row
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let base = CellValue::from(cell).to_string();
            let base = if base.trim().is_empty() {
                format!("Unnamed: {index}")
            } else {
                base
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::{Path, PathBuf};

    use rust_xlsxwriter::Workbook;

    /// A cell to write into an `.xlsx` fixture.
    pub enum Cell<'a> {
        Text(&'a str),
        Number(f64),
        Blank,
    }

    /// Writes a single-sheet workbook with a header row followed by `rows`.
    pub fn write_xlsx(dir: &Path, name: &str, header: &[&str], rows: &[Vec<Cell<'_>>]) -> PathBuf {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        for (col, title) in header.iter().enumerate() {
            worksheet.write_string(0, col as u16, *title).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            let row_idx = (r + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Text(s) => {
                        worksheet.write_string(row_idx, col as u16, *s).unwrap();
                    }
                    Cell::Number(n) => {
                        worksheet.write_number(row_idx, col as u16, *n).unwrap();
                    }
                    Cell::Blank => {}
                }
            }
        }
        let path = dir.join(name);
        workbook.save(&path).unwrap();
        path
    }
}
