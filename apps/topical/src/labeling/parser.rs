//! Tolerant parsing of model output into structured records.
//!
//! Strict decode first. On a syntax failure, a bounded repair pass (strip
//! markdown fences, drop a trailing comma, append the one missing closing
//! delimiter) and exactly one re-decode. Valid JSON of the wrong shape is a
//! schema mismatch; repeated syntax failure is a dedicated
//! unparseable-response outcome, never a generic format error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::LabelError;

/// Expected shape of a classification response. Chosen by the caller and
/// validated here — never inferred from the output itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSchema {
    /// A JSON array of topic strings.
    TopicList,
    /// A JSON array of {topic, sentence} objects.
    TopicSentence,
}

impl OutputSchema {
    pub fn expected(&self) -> &'static str {
        match self {
            OutputSchema::TopicList => "topic-list",
            OutputSchema::TopicSentence => "topic/sentence",
        }
    }
}

/// One classified sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicRecord {
    pub topic: String,
    pub sentence: String,
}

/// Parsed model output, shaped per the requested schema.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedOutput {
    Topics(Vec<String>),
    Records(Vec<TopicRecord>),
}

/// Parses raw model output against `schema`.
///
/// A response that stays syntactically broken after the repair pass yields
/// `LabelError::UnparseableResponse`; syntactically valid JSON that decodes
/// to the wrong shape yields `LabelError::SchemaMismatch`.
pub fn parse_response(text: &str, schema: OutputSchema) -> Result<ParsedOutput, LabelError> {
    let cleaned = strip_code_fences(text).trim();

    match serde_json::from_str::<Value>(cleaned) {
        Ok(value) => decode(value, schema),
        Err(_) => {
            let repaired = repair(cleaned);
            match serde_json::from_str::<Value>(&repaired) {
                Ok(value) => decode(value, schema),
                Err(_) => Err(LabelError::UnparseableResponse {
                    snippet: snippet(cleaned),
                }),
            }
        }
    }
}

fn decode(value: Value, schema: OutputSchema) -> Result<ParsedOutput, LabelError> {
    match schema {
        OutputSchema::TopicList => serde_json::from_value::<Vec<String>>(value)
            .map(ParsedOutput::Topics)
            .map_err(|_| LabelError::SchemaMismatch {
                expected: schema.expected(),
            }),
        OutputSchema::TopicSentence => serde_json::from_value::<Vec<TopicRecord>>(value)
            .map(ParsedOutput::Records)
            .map_err(|_| LabelError::SchemaMismatch {
                expected: schema.expected(),
            }),
    }
}

/// Appends the one closing delimiter a truncated response most often drops.
/// A trailing comma before the truncation point is dropped first.
fn repair(text: &str) -> String {
    let mut repaired = text.trim_end().trim_end_matches(',').to_string();
    if repaired.starts_with('[') && !repaired.ends_with(']') {
        repaired.push(']');
    } else if repaired.starts_with('{') && !repaired.ends_with('}') {
        repaired.push('}');
    }
    repaired
}

fn snippet(text: &str) -> String {
    text.chars().take(80).collect()
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
