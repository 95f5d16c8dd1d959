use thiserror::Error;

use crate::llm_client::LlmError;

/// Pipeline-level error type.
/// Wraps client failures and the parse/validation outcomes of the labeling flow.
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Unparseable model response: {snippet}")]
    UnparseableResponse { snippet: String },

    #[error("Response is valid JSON but does not match the expected {expected} schema")]
    SchemaMismatch { expected: &'static str },
}
