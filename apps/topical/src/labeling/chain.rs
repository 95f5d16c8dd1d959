//! Chain-of-thought classification — two sequential sub-queries where the
//! first response feeds the second prompt.
//!
//! Step 1: batched topic extraction over every row (one call per window).
//! Step 2: classify all rows against the distinct single-word topic set,
//!         output shaped per the caller-chosen schema.

use std::collections::BTreeSet;

use tracing::info;

use crate::errors::LabelError;
use crate::llm_client::prompts::JSON_ONLY_FRAGMENT;
use crate::llm_client::{Completion, CompletionRequest, Message};

use super::dispatcher::{dispatch_batches, join_batch};
use super::labels::distinct_single_word_labels;
use super::parser::{parse_response, OutputSchema, ParsedOutput};
use super::prompts::{
    BATCH_TOPICS_SYSTEM, CLASSIFY_RECORDS_TEMPLATE, CLASSIFY_SYSTEM, CLASSIFY_TOPICS_TEMPLATE,
    MAX_TOKENS_BATCH, TEMPERATURE,
};

/// Result of the two-step classification chain.
#[derive(Debug, Clone)]
pub struct ChainOutcome {
    /// Distinct single-word topics extracted in step 1.
    pub topics: BTreeSet<String>,
    /// Step 2 classification, shaped per the requested schema.
    pub output: ParsedOutput,
}

/// Runs the full chain: batched topic extraction, label-set reduction, then
/// one classification call validated against `schema`.
pub async fn classify_with_topic_chain(
    client: &dyn Completion,
    rows: &[String],
    batch_size: usize,
    schema: OutputSchema,
) -> Result<ChainOutcome, LabelError> {
    // Step 1: candidate topics, one call per batch window
    let step_one_system = format!("{BATCH_TOPICS_SYSTEM} {JSON_ONLY_FRAGMENT}");
    let responses = dispatch_batches(client, rows, &step_one_system, batch_size).await?;

    let mut raw_labels = Vec::new();
    for response in &responses {
        match parse_response(response, OutputSchema::TopicList)? {
            ParsedOutput::Topics(topics) => raw_labels.extend(topics),
            ParsedOutput::Records(_) => unreachable!("TopicList decoding yields Topics"),
        }
    }

    let topics = distinct_single_word_labels(&raw_labels);
    info!(
        "Extracted {} distinct topics from {} rows",
        topics.len(),
        rows.len()
    );

    if topics.is_empty() {
        return Err(LabelError::Validation(
            "Topic extraction produced no single-word topics".to_string(),
        ));
    }

    // Step 2: classify every row against the topic list
    let template = match schema {
        OutputSchema::TopicList => CLASSIFY_TOPICS_TEMPLATE,
        OutputSchema::TopicSentence => CLASSIFY_RECORDS_TEMPLATE,
    };
    let topic_list = topics.iter().cloned().collect::<Vec<_>>().join(", ");
    let prompt = template
        .replace("{topics}", &topic_list)
        .replace("{sentences}", &join_batch(rows));

    let request = CompletionRequest {
        system: format!("{CLASSIFY_SYSTEM} {JSON_ONLY_FRAGMENT}"),
        messages: vec![Message::user(prompt)],
        max_tokens: MAX_TOKENS_BATCH,
        temperature: TEMPERATURE,
    };
    let response = client.complete(&request).await?;
    let output = parse_response(&response, schema)?;

    Ok(ChainOutcome { topics, output })
}
