//! Report generation — tallies analysis records into the final complaint report,
//! writes it as JSON and prints the console summary.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::info;

use crate::analysis::batch::AnalysisRecord;
use crate::analysis::classifier::Severity;
use crate::errors::ReportError;

pub mod console;

/// Key used in `device_type_counts` when the service named no device.
pub const UNSPECIFIED_DEVICE: &str = "No especificado";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    #[serde(rename = "total_conversaciones")]
    pub total_conversations: usize,
    #[serde(rename = "quejas_dispositivos")]
    pub device_complaints: usize,
    /// Rounded to two decimals.
    #[serde(rename = "porcentaje_quejas")]
    pub complaint_percentage: f64,
}

/// Fixed three-bucket severity tally; always serialized with all three keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeverityCounts {
    #[serde(rename = "baja")]
    pub low: usize,
    #[serde(rename = "media")]
    pub medium: usize,
    #[serde(rename = "alta")]
    pub high: usize,
}

impl SeverityCounts {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Low => self.low += 1,
            Severity::Medium => self.medium += 1,
            Severity::High => self.high += 1,
        }
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Low => self.low,
            Severity::Medium => self.medium,
            Severity::High => self.high,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(rename = "fecha_analisis")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "resumen")]
    pub summary: ReportSummary,
    #[serde(rename = "tipos_dispositivos")]
    pub device_type_counts: BTreeMap<String, usize>,
    #[serde(rename = "gravedad_quejas")]
    pub severity_counts: SeverityCounts,
    #[serde(rename = "quejas_detalladas")]
    pub detailed_complaints: Vec<AnalysisRecord>,
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = part as f64 / total as f64 * 100.0;
    // Exact halves go to the even digit: 3.125 -> 3.12.
    (raw * 100.0).round_ties_even() / 100.0
}

/// Tallies `records` into a report stamped with the current local time.
/// Returns `None` when there is nothing to report.
pub fn build_report(records: &[AnalysisRecord]) -> Option<Report> {
    if records.is_empty() {
        return None;
    }

    let complaints: Vec<AnalysisRecord> = records
        .iter()
        .filter(|r| r.classification.is_device_complaint)
        .cloned()
        .collect();

    let mut device_type_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut severity_counts = SeverityCounts::default();
    for complaint in &complaints {
        let device = complaint
            .classification
            .device_type
            .as_deref()
            .unwrap_or(UNSPECIFIED_DEVICE);
        *device_type_counts.entry(device.to_string()).or_insert(0) += 1;

        if let Some(severity) = complaint.classification.severity {
            severity_counts.record(severity);
        }
    }

    Some(Report {
        timestamp: Local::now().naive_local(),
        summary: ReportSummary {
            total_conversations: records.len(),
            device_complaints: complaints.len(),
            complaint_percentage: percentage(complaints.len(), records.len()),
        },
        device_type_counts,
        severity_counts,
        detailed_complaints: complaints,
    })
}

/// Writes `report` as pretty-printed UTF-8 JSON. The file appears fully formed or not at all.
pub fn write_report(report: &Report, path: &Path) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(report)?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Builds the report, writes it to `output` if given, and prints the console summary.
/// With no records, logs and returns `Ok(None)` without touching the filesystem.
pub fn generate_report(
    records: &[AnalysisRecord],
    output: Option<&Path>,
) -> Result<Option<Report>, ReportError> {
    let Some(report) = build_report(records) else {
        info!("No results to build a report from");
        return Ok(None);
    };

    if let Some(path) = output {
        write_report(&report, path)?;
        info!("Report saved to {}", path.display());
    }

    print!("{}", console::render_summary(&report));

    Ok(Some(report))
}
