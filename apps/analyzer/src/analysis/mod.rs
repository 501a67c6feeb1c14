// Complaint analysis pipeline: row text extraction, classification, pacing, batch driving.
// All service calls go through llm_client — nothing here talks HTTP directly.

pub mod batch;
pub mod classifier;
pub mod extractor;
pub mod pacing;
pub mod prompts;
