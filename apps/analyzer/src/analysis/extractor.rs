//! Conversation extraction — joins the long free-text cells of a row into one blob.
//!
//! Which cells count as conversation text is decided by a `TextPredicate`, so the
//! heuristic can be swapped without touching the joining logic.

use crate::table::Row;

/// Cells must be strictly longer than this (in characters) to count as conversation text.
pub const LONG_TEXT_MIN_CHARS: usize = 50;

/// Decides whether a textual cell belongs to the conversation blob.
pub trait TextPredicate: Send + Sync {
    fn qualifies(&self, column: &str, text: &str) -> bool;
}

/// Default heuristic: any text longer than `min_chars` characters, in any column.
#[derive(Debug, Clone, Copy)]
pub struct LongTextPredicate {
    pub min_chars: usize,
}

impl Default for LongTextPredicate {
    fn default() -> Self {
        Self {
            min_chars: LONG_TEXT_MIN_CHARS,
        }
    }
}

impl TextPredicate for LongTextPredicate {
    fn qualifies(&self, _column: &str, text: &str) -> bool {
        text.chars().count() > self.min_chars
    }
}

pub struct ConversationExtractor {
    predicate: Box<dyn TextPredicate>,
}

impl Default for ConversationExtractor {
    fn default() -> Self {
        Self::new(Box::new(LongTextPredicate::default()))
    }
}

impl ConversationExtractor {
    pub fn new(predicate: Box<dyn TextPredicate>) -> Self {
        Self { predicate }
    }

    /// Concatenates every qualifying text cell in column order, each followed by a space.
    /// Returns an empty string when no cell qualifies.
    pub fn extract(&self, row: &Row, columns: &[String]) -> String {
        let mut blob = String::new();
        for (column, cell) in row.named_cells(columns) {
            if let Some(text) = cell.as_text() {
                if self.predicate.qualifies(column, text) {
                    blob.push_str(text);
                    blob.push(' ');
                }
            }
        }
        blob
    }
}

/// The first `max_chars` characters of `text`, cut on a character boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// `text` cut to `max_chars` characters plus `marker` when it is longer, else `text` unchanged.
pub fn excerpt(text: &str, max_chars: usize, marker: &str) -> String {
    let cut = truncate_chars(text, max_chars);
    if cut.len() < text.len() {
        format!("{cut}{marker}")
    } else {
        text.to_string()
    }
}
