// Prompt constants for complaint classification.
// The service is addressed in Spanish; the reply keys below are the wire contract
// parsed by `classifier::ClassificationResult`.

use crate::llm_client::CompletionParams;

/// System role instruction.
pub const CLASSIFY_SYSTEM: &str =
    "Eres un analista experto en identificar quejas sobre dispositivos tecnológicos.";

/// Task prompt. The conversation text is appended directly after it.
pub const CLASSIFY_PROMPT: &str = r#"
Analiza la siguiente conversación y determina si contiene quejas sobre dispositivos.

Instrucciones:
1. Identifica si hay quejas sobre dispositivos (computadoras, teléfonos, tablets, impresoras, etc.)
2. Clasifica el tipo de dispositivo mencionado
3. Evalúa la gravedad de la queja (baja, media, alta)
4. Extrae palabras clave relevantes

Responde en formato JSON con la siguiente estructura:
{
    "es_queja_dispositivo": true/false,
    "tipo_dispositivo": "string o null",
    "gravedad": "baja/media/alta o null",
    "palabras_clave": ["lista", "de", "palabras"],
    "resumen": "breve descripción de la queja"
}

Conversación a analizar:
"#;

/// Near-deterministic sampling with a short reply budget.
pub const CLASSIFY_PARAMS: CompletionParams = CompletionParams {
    temperature: 0.1,
    max_tokens: 500,
};
