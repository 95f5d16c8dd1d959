//! Batch Dispatcher — slices rows into fixed-size windows and drives one
//! completion call per window.
//!
//! Flow: validate batch_size → chunk rows → join with delimiter → call →
//! collect responses in batch order. Calls are strictly sequential; a client
//! failure that exhausted its retry budget aborts the remaining batches and
//! nothing is checkpointed.

use tracing::info;

use crate::errors::LabelError;
use crate::llm_client::{Completion, CompletionRequest, Message};

use super::prompts::{BATCH_DELIMITER, MAX_TOKENS_BATCH, TEMPERATURE};

/// Joins one batch of rows into a single prompt payload.
pub fn join_batch(rows: &[String]) -> String {
    rows.join(BATCH_DELIMITER)
}

/// Issues one completion call per `batch_size` window of `rows`, in source
/// order, and returns the raw response texts, one per batch.
///
/// Every row lands in exactly one batch and batches preserve source order;
/// the final batch may be short. An empty row sequence issues no calls.
pub async fn dispatch_batches(
    client: &dyn Completion,
    rows: &[String],
    system: &str,
    batch_size: usize,
) -> Result<Vec<String>, LabelError> {
    if batch_size == 0 {
        return Err(LabelError::Validation(
            "batch_size must be at least 1".to_string(),
        ));
    }

    let batch_count = rows.len().div_ceil(batch_size);
    let mut responses = Vec::with_capacity(batch_count);

    for (index, batch) in rows.chunks(batch_size).enumerate() {
        let request = CompletionRequest {
            system: system.to_string(),
            messages: vec![Message::user(join_batch(batch))],
            max_tokens: MAX_TOKENS_BATCH,
            temperature: TEMPERATURE,
        };

        let response = client.complete(&request).await?;
        info!(
            "Batch {}/{} ({} rows) labeled",
            index + 1,
            batch_count,
            batch.len()
        );
        responses.push(response);
    }

    Ok(responses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::llm_client::LlmError;

    fn rows(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    /// Records every request and replies with "reply-<n>".
    struct RecordingClient {
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl RecordingClient {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
            }
        }

        fn payloads(&self) -> Vec<String> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.messages[0].content.clone())
                .collect()
        }
    }

    #[async_trait]
    impl Completion for RecordingClient {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            Ok(format!("reply-{}", requests.len()))
        }
    }

    /// Fails every call after the first `succeed` calls with a rate limit.
    struct FailingClient {
        calls: Mutex<u32>,
        succeed: u32,
    }

    #[async_trait]
    impl Completion for FailingClient {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, LlmError> {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            if *calls <= self.succeed {
                Ok("ok".to_string())
            } else {
                Err(LlmError::Api {
                    status: 429,
                    message: "rate limited".to_string(),
                })
            }
        }
    }

    #[tokio::test]
    async fn test_five_rows_batch_two_yields_three_calls_in_order() {
        let client = RecordingClient::new();
        let rows = rows(&["a", "b", "c", "d", "e"]);

        let responses = dispatch_batches(&client, &rows, "label these", 2)
            .await
            .unwrap();

        assert_eq!(responses, vec!["reply-1", "reply-2", "reply-3"]);
        assert_eq!(
            client.payloads(),
            vec!["a\n###\nb", "c\n###\nd", "e"],
            "batches must preserve source order with the final batch short"
        );
    }

    #[tokio::test]
    async fn test_batch_larger_than_rows_is_a_single_call() {
        let client = RecordingClient::new();
        let rows = rows(&["a", "b", "c"]);

        let responses = dispatch_batches(&client, &rows, "label these", 10)
            .await
            .unwrap();

        assert_eq!(responses.len(), 1);
        assert_eq!(client.payloads(), vec!["a\n###\nb\n###\nc"]);
    }

    #[tokio::test]
    async fn test_empty_rows_issue_no_calls() {
        let client = RecordingClient::new();

        let responses = dispatch_batches(&client, &[], "label these", 3)
            .await
            .unwrap();

        assert!(responses.is_empty());
        assert!(client.payloads().is_empty());
    }

    #[tokio::test]
    async fn test_zero_batch_size_is_a_validation_error() {
        let client = RecordingClient::new();
        let rows = rows(&["a"]);

        let result = dispatch_batches(&client, &rows, "label these", 0).await;

        assert!(matches!(result, Err(LabelError::Validation(_))));
        assert!(
            client.payloads().is_empty(),
            "no call may be issued before validation"
        );
    }

    #[tokio::test]
    async fn test_requests_carry_system_and_batch_budget() {
        let client = RecordingClient::new();
        let rows = rows(&["a", "b"]);

        dispatch_batches(&client, &rows, "the system instruction", 1)
            .await
            .unwrap();

        let requests = client.requests.lock().unwrap();
        for request in requests.iter() {
            assert_eq!(request.system, "the system instruction");
            assert_eq!(request.max_tokens, MAX_TOKENS_BATCH);
            assert_eq!(request.temperature, TEMPERATURE);
            assert_eq!(request.messages.len(), 1);
        }
    }

    #[tokio::test]
    async fn test_client_failure_aborts_remaining_batches() {
        let client = FailingClient {
            calls: Mutex::new(0),
            succeed: 1,
        };
        let rows = rows(&["a", "b", "c", "d", "e", "f"]);

        let result = dispatch_batches(&client, &rows, "label these", 2).await;

        assert!(matches!(
            result,
            Err(LabelError::Llm(LlmError::Api { status: 429, .. }))
        ));
        assert_eq!(
            *client.calls.lock().unwrap(),
            2,
            "the third batch must never be dispatched"
        );
    }

    #[test]
    fn test_chunking_covers_all_rows_without_gaps_or_repeats() {
        for row_count in 0..13usize {
            let rows: Vec<String> = (0..row_count).map(|i| format!("row-{i}")).collect();
            for batch_size in 1..6 {
                let batches: Vec<&[String]> = rows.chunks(batch_size).collect();
                assert_eq!(
                    batches.len(),
                    row_count.div_ceil(batch_size),
                    "N={row_count} B={batch_size}: batch count must be ceil(N/B)"
                );
                let rejoined: Vec<String> = batches.concat();
                assert_eq!(
                    rejoined, rows,
                    "N={row_count} B={batch_size}: concatenated batches must reconstruct the rows"
                );
            }
        }
    }

    #[test]
    fn test_join_batch_uses_the_delimiter() {
        let joined = join_batch(&rows(&["one", "two"]));
        assert_eq!(joined, "one\n###\ntwo");
        assert_eq!(join_batch(&[]), "");
    }
}
