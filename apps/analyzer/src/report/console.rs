//! Console rendering of a finished report.

use crate::analysis::classifier::Severity;
use crate::report::Report;

/// Formats a percentage the way the summary shows it: `50.0`, `33.33`.
fn format_percentage(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

pub fn render_summary(report: &Report) -> String {
    let rule = "=".repeat(50);
    let mut lines = vec![
        String::new(),
        rule.clone(),
        "REPORTE DE ANÁLISIS DE QUEJAS".to_string(),
        rule,
        format!(
            "Total de conversaciones analizadas: {}",
            report.summary.total_conversations
        ),
        format!(
            "Quejas sobre dispositivos encontradas: {}",
            report.summary.device_complaints
        ),
        format!(
            "Porcentaje de quejas: {}%",
            format_percentage(report.summary.complaint_percentage)
        ),
    ];

    if !report.device_type_counts.is_empty() {
        let mut by_count: Vec<(&String, &usize)> = report.device_type_counts.iter().collect();
        by_count.sort_by(|a, b| b.1.cmp(a.1));

        lines.push(String::new());
        lines.push("Tipos de dispositivos más mencionados:".to_string());
        lines.extend(
            by_count
                .into_iter()
                .map(|(device, count)| format!("  - {device}: {count}")),
        );
    }

    if report.severity_counts.total() > 0 {
        lines.push(String::new());
        lines.push("Distribución por gravedad:".to_string());
        lines.extend(
            Severity::ALL
                .into_iter()
                .map(|severity| (severity, report.severity_counts.get(severity)))
                .filter(|(_, count)| *count > 0)
                .map(|(severity, count)| format!("  - {}: {count}", severity.label())),
        );
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(50.0), "50.0");
        assert_eq!(format_percentage(0.0), "0.0");
        assert_eq!(format_percentage(33.33), "33.33");
    }
}
