//! Structure survey of a spreadsheet, used to find which columns hold conversation text
//! before spending money on classification.

use std::path::{Path, PathBuf};

use crate::errors::TableError;
use crate::table::reader::load_first_sheet;
use crate::table::{CellValue, Table};

/// Columns whose longest text exceeds this are reported as likely conversations.
pub const LONG_TEXT_THRESHOLD: usize = 100;
const PREVIEW_ROWS: usize = 3;
const SAMPLE_COUNT: usize = 2;
const SAMPLE_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
    Boolean,
    Empty,
    Mixed,
}

impl ColumnKind {
    fn label(self) -> &'static str {
        match self {
            ColumnKind::Text => "text",
            ColumnKind::Number => "number",
            ColumnKind::Boolean => "boolean",
            ColumnKind::Empty => "empty",
            ColumnKind::Mixed => "mixed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    /// Longest text cell, in characters. Zero for columns without text.
    pub max_text_chars: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exploration {
    pub path: PathBuf,
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnProfile>,
    pub preview: Vec<Vec<String>>,
    /// (column, max chars), longest first.
    pub long_text_columns: Vec<(String, usize)>,
    pub samples: Vec<String>,
}

pub fn explore_table(path: &Path) -> Result<Exploration, TableError> {
    let table = load_first_sheet(path)?;
    Ok(profile_table(path, &table))
}

pub fn profile_table(path: &Path, table: &Table) -> Exploration {
    let columns: Vec<ColumnProfile> = table
        .columns
        .iter()
        .enumerate()
        .map(|(index, name)| profile_column(table, index, name))
        .collect();

    let mut long_text_columns: Vec<(String, usize)> = columns
        .iter()
        .filter(|c| matches!(c.kind, ColumnKind::Text | ColumnKind::Mixed))
        .filter(|c| c.max_text_chars > LONG_TEXT_THRESHOLD)
        .map(|c| (c.name.clone(), c.max_text_chars))
        .collect();
    long_text_columns.sort_by(|a, b| b.1.cmp(&a.1));

    let samples = long_text_columns
        .first()
        .and_then(|(name, _)| table.columns.iter().position(|c| c == name))
        .map(|index| {
            table
                .rows
                .iter()
                .map(|row| row.cell(index))
                .filter(|cell| !cell.is_empty())
                .take(SAMPLE_COUNT)
                .map(|cell| {
                    let text = cell.to_string();
                    let cut: String = text.chars().take(SAMPLE_CHARS).collect();
                    format!("{cut}...")
                })
                .collect()
        })
        .unwrap_or_default();

    let preview = table
        .rows
        .iter()
        .take(PREVIEW_ROWS)
        .map(|row| {
            (0..table.columns.len())
                .map(|i| row.cell(i).to_string())
                .collect()
        })
        .collect();

    Exploration {
        path: path.to_path_buf(),
        row_count: table.len(),
        column_count: table.columns.len(),
        columns,
        preview,
        long_text_columns,
        samples,
    }
}

fn profile_column(table: &Table, index: usize, name: &str) -> ColumnProfile {
    let mut kind = ColumnKind::Empty;
    let mut max_text_chars = 0;

    for cell in table.rows.iter().map(|row| row.cell(index)) {
        let cell_kind = match cell {
            CellValue::Text(s) => {
                max_text_chars = max_text_chars.max(s.chars().count());
                ColumnKind::Text
            }
            CellValue::Number(_) => ColumnKind::Number,
            CellValue::Bool(_) => ColumnKind::Boolean,
            CellValue::Empty => continue,
        };
        kind = match kind {
            ColumnKind::Empty => cell_kind,
            k if k == cell_kind => k,
            _ => ColumnKind::Mixed,
        };
    }

    ColumnProfile {
        name: name.to_string(),
        kind,
        max_text_chars,
    }
}

/// Human-readable rendering for the console.
pub fn render_exploration(exploration: &Exploration) -> String {
    let rule = "=".repeat(60);
    let mut lines = vec![
        String::new(),
        rule.clone(),
        format!("EXPLORANDO: {}", exploration.path.display()),
        rule,
        format!(
            "Dimensiones: {} filas x {} columnas",
            exploration.row_count, exploration.column_count
        ),
        String::new(),
        "Columnas disponibles:".to_string(),
    ];

    lines.extend(
        exploration
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("  {}. {} ({})", i + 1, column.name, column.kind.label())),
    );

    lines.push(String::new());
    lines.push(format!("Primeras {PREVIEW_ROWS} filas:"));
    lines.extend(
        exploration
            .preview
            .iter()
            .enumerate()
            .map(|(i, row)| format!("  [{}] {}", i + 1, row.join(" | "))),
    );

    if !exploration.long_text_columns.is_empty() {
        lines.push(String::new());
        lines.push("Columnas con texto largo (posibles conversaciones):".to_string());
        lines.extend(
            exploration
                .long_text_columns
                .iter()
                .map(|(name, max_len)| format!("  - {name}: máximo {max_len} caracteres")),
        );

        lines.push(String::new());
        lines.push("Muestras de texto de la columna más larga:".to_string());
        for (i, sample) in exploration.samples.iter().enumerate() {
            lines.push(String::new());
            lines.push(format!("Muestra {}:", i + 1));
            lines.push(format!("'{sample}'"));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
