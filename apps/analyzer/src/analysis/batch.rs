//! Batch processing — drives table loading, extraction, classification and pacing
//! across the rows of one spreadsheet.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::analysis::classifier::{ClassificationResult, ComplaintClassifier};
use crate::analysis::extractor::{excerpt, truncate_chars, ConversationExtractor};
use crate::analysis::pacing::Pacer;
use crate::table::reader::read_table;
use crate::table::Table;

/// Conversation text sent to the classifier is cut to this many characters.
pub const CLASSIFY_MAX_CHARS: usize = 2000;
/// Excerpt stored in the report.
pub const EXCERPT_MAX_CHARS: usize = 500;
pub const EXCERPT_MARKER: &str = "...";

/// One analyzed row: where it came from, what it said, and the verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRecord {
    #[serde(rename = "archivo")]
    pub source_file: String,
    /// 1-based position among the data rows of the sheet.
    #[serde(rename = "fila")]
    pub row_number: usize,
    #[serde(rename = "texto_conversacion")]
    pub conversation_excerpt: String,
    #[serde(flatten)]
    pub classification: ClassificationResult,
}

pub struct BatchProcessor {
    extractor: ConversationExtractor,
    classifier: Arc<dyn ComplaintClassifier>,
    pacer: Arc<dyn Pacer>,
}

impl BatchProcessor {
    pub fn new(
        extractor: ConversationExtractor,
        classifier: Arc<dyn ComplaintClassifier>,
        pacer: Arc<dyn Pacer>,
    ) -> Self {
        Self {
            extractor,
            classifier,
            pacer,
        }
    }

    /// Analyzes the first `max_rows` rows of the spreadsheet at `path` (all rows when `None`).
    /// An unreadable file yields no records.
    pub async fn process_file(&self, path: &Path, max_rows: Option<usize>) -> Vec<AnalysisRecord> {
        let table = read_table(path);
        self.process_table(&path.display().to_string(), table, max_rows)
            .await
    }

    pub async fn process_table(
        &self,
        source_file: &str,
        mut table: Table,
        max_rows: Option<usize>,
    ) -> Vec<AnalysisRecord> {
        if table.is_empty() {
            return Vec::new();
        }

        if let Some(limit) = max_rows {
            table.truncate(limit);
        }

        let total = table.len();
        info!("Processing {total} conversations from {source_file}");

        let mut records = Vec::new();
        for (index, row) in table.rows.iter().enumerate() {
            let row_number = index + 1;
            info!("Analyzing conversation {row_number}/{total}");

            let blob = self.extractor.extract(row, &table.columns);
            if blob.trim().is_empty() {
                debug!("Row {row_number} has no conversation text, skipping");
                continue;
            }

            let classification = self
                .classifier
                .classify(truncate_chars(&blob, CLASSIFY_MAX_CHARS))
                .await;

            records.push(AnalysisRecord {
                source_file: source_file.to_string(),
                row_number,
                conversation_excerpt: excerpt(&blob, EXCERPT_MAX_CHARS, EXCERPT_MARKER),
                classification,
            });

            self.pacer.pause().await;
        }

        records
    }
}
