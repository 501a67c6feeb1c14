use thiserror::Error;

/// Failures while loading a worksheet. The table reader logs these and
/// degrades to an empty table; only `explore` surfaces them to the user.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Unable to open the spreadsheet: {0}")]
    Open(#[from] calamine::Error),

    #[error("The workbook does not contain any worksheets")]
    NoWorksheet,
}

/// Failures while persisting the final report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Report write failed: {0}")]
    Io(#[from] std::io::Error),
}
