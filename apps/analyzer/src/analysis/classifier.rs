//! Complaint Classifier — the narrow `classify(text)` seam between the batch loop and the
//! classification service.
//!
//! Default: `LlmComplaintClassifier`, one chat-completion call per conversation.
//! Tests substitute deterministic implementations of `ComplaintClassifier`.
//!
//! A classifier never fails: every error collapses into `ClassificationResult::fallback()`.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::error;

use crate::analysis::prompts::{CLASSIFY_PARAMS, CLASSIFY_PROMPT, CLASSIFY_SYSTEM};
use crate::llm_client::LlmClient;

/// Summary carried by the fallback record.
pub const ANALYSIS_ERROR_SUMMARY: &str = "Error en análisis";

/// Complaint severity. Serialized with the Spanish labels the service is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Severity {
    #[serde(rename = "baja")]
    Low,
    #[serde(rename = "media")]
    Medium,
    #[serde(rename = "alta")]
    High,
}

impl Severity {
    /// Report order.
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

    /// Accepts the Spanish and English labels, case-insensitively. Anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "baja" | "low" => Some(Severity::Low),
            "media" | "medium" => Some(Severity::Medium),
            "alta" | "high" => Some(Severity::High),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "baja",
            Severity::Medium => "media",
            Severity::High => "alta",
        }
    }
}

/// The five-field verdict for one conversation.
///
/// Every field must be present in the service's reply (nulls allowed where optional);
/// a reply missing any of them is rejected as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(rename = "es_queja_dispositivo")]
    pub is_device_complaint: bool,
    #[serde(rename = "tipo_dispositivo", deserialize_with = "nullable_text")]
    pub device_type: Option<String>,
    #[serde(rename = "gravedad", deserialize_with = "nullable_severity")]
    pub severity: Option<Severity>,
    #[serde(rename = "palabras_clave")]
    pub keywords: Vec<String>,
    #[serde(rename = "resumen")]
    pub summary: String,
}

impl ClassificationResult {
    /// The record substituted whenever classification fails.
    pub fn fallback() -> Self {
        Self {
            is_device_complaint: false,
            device_type: None,
            severity: None,
            keywords: Vec::new(),
            summary: ANALYSIS_ERROR_SUMMARY.to_string(),
        }
    }
}

fn nullable_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

fn nullable_severity<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Severity>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Severity::parse))
}

/// The classifier trait. Implement this to swap backends without touching the batch loop.
#[async_trait]
pub trait ComplaintClassifier: Send + Sync {
    async fn classify(&self, conversation: &str) -> ClassificationResult;
}

/// Classifier backed by the chat-completions service.
pub struct LlmComplaintClassifier {
    llm: LlmClient,
}

impl LlmComplaintClassifier {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ComplaintClassifier for LlmComplaintClassifier {
    async fn classify(&self, conversation: &str) -> ClassificationResult {
        let prompt = format!("{CLASSIFY_PROMPT}{conversation}");
        match self
            .llm
            .call_json::<ClassificationResult>(&prompt, CLASSIFY_SYSTEM, CLASSIFY_PARAMS)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                error!("Complaint classification failed: {e}");
                ClassificationResult::fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::{stub, DEFAULT_MODEL};
    use axum::http::StatusCode;
    use serde_json::json;

    fn classifier_for(base_url: &str) -> LlmComplaintClassifier {
        LlmComplaintClassifier::new(
            LlmClient::new(
                "test-key".to_string(),
                base_url.to_string(),
                DEFAULT_MODEL.to_string(),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_fallback_record_shape() {
        let fallback = ClassificationResult::fallback();
        assert!(!fallback.is_device_complaint);
        assert_eq!(fallback.device_type, None);
        assert_eq!(fallback.severity, None);
        assert!(fallback.keywords.is_empty());
        assert_eq!(fallback.summary, "Error en análisis");
    }

    #[test]
    fn test_fallback_serializes_with_nulls() {
        let value = serde_json::to_value(ClassificationResult::fallback()).unwrap();
        assert_eq!(
            value,
            json!({
                "es_queja_dispositivo": false,
                "tipo_dispositivo": null,
                "gravedad": null,
                "palabras_clave": [],
                "resumen": "Error en análisis"
            })
        );
    }

    #[test]
    fn test_severity_parse_accepts_both_vocabularies() {
        assert_eq!(Severity::parse("alta"), Some(Severity::High));
        assert_eq!(Severity::parse(" Media "), Some(Severity::Medium));
        assert_eq!(Severity::parse("LOW"), Some(Severity::Low));
        assert_eq!(Severity::parse("crítica"), None);
        assert_eq!(Severity::parse(""), None);
    }

    #[test]
    fn test_reply_deserializes() {
        let json = r#"{
            "es_queja_dispositivo": true,
            "tipo_dispositivo": "impresora",
            "gravedad": "alta",
            "palabras_clave": ["atasco", "papel"],
            "resumen": "La impresora se atasca constantemente"
        }"#;
        let result: ClassificationResult = serde_json::from_str(json).unwrap();
        assert!(result.is_device_complaint);
        assert_eq!(result.device_type.as_deref(), Some("impresora"));
        assert_eq!(result.severity, Some(Severity::High));
        assert_eq!(result.keywords, vec!["atasco", "papel"]);
    }

    #[test]
    fn test_unknown_severity_becomes_null() {
        let json = r#"{
            "es_queja_dispositivo": true,
            "tipo_dispositivo": "tablet",
            "gravedad": "urgente",
            "palabras_clave": [],
            "resumen": "x"
        }"#;
        let result: ClassificationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.severity, None);
    }

    #[test]
    fn test_reply_missing_field_is_rejected() {
        // `tipo_dispositivo` absent entirely (not null).
        let json = r#"{
            "es_queja_dispositivo": false,
            "gravedad": null,
            "palabras_clave": [],
            "resumen": "Sin queja"
        }"#;
        assert!(serde_json::from_str::<ClassificationResult>(json).is_err());
    }

    #[tokio::test]
    async fn test_classify_parses_service_reply() {
        let reply = json!({
            "es_queja_dispositivo": true,
            "tipo_dispositivo": "teléfono",
            "gravedad": "media",
            "palabras_clave": ["pantalla", "rota"],
            "resumen": "Pantalla rota tras una semana"
        })
        .to_string();
        let server = stub::spawn(StatusCode::OK, stub::completion(&reply)).await;

        let result = classifier_for(&server.base_url)
            .classify("Cliente: la pantalla de mi teléfono se rompió sola.")
            .await;
        assert!(result.is_device_complaint);
        assert_eq!(result.device_type.as_deref(), Some("teléfono"));
        assert_eq!(result.severity, Some(Severity::Medium));

        let requests = server.requests.lock().unwrap();
        let sent = &requests[0];
        assert_eq!(sent["messages"][0]["content"], CLASSIFY_SYSTEM);
        let user = sent["messages"][1]["content"].as_str().unwrap();
        assert!(user.starts_with(CLASSIFY_PROMPT));
        assert!(user.ends_with("se rompió sola."));
        assert_eq!(sent["max_tokens"], 500);
    }

    #[tokio::test]
    async fn test_service_error_yields_fallback() {
        let server = stub::spawn(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": { "message": "overloaded" } }),
        )
        .await;
        let result = classifier_for(&server.base_url).classify("texto").await;
        assert_eq!(result, ClassificationResult::fallback());
    }

    #[tokio::test]
    async fn test_non_json_reply_yields_fallback() {
        let server = stub::spawn(
            StatusCode::OK,
            stub::completion("No hay queja en esta conversación."),
        )
        .await;
        let result = classifier_for(&server.base_url).classify("texto").await;
        assert_eq!(result, ClassificationResult::fallback());
    }

    #[tokio::test]
    async fn test_unreachable_service_yields_fallback() {
        // Bind then drop a listener to get a port with nothing behind it.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = classifier_for(&format!("http://{addr}"))
            .classify("texto")
            .await;
        assert_eq!(result, ClassificationResult::fallback());
    }
}
