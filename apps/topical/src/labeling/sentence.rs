//! Single-sentence labeling — the zero-shot and one-shot variants.

use crate::errors::LabelError;
use crate::llm_client::{Completion, CompletionRequest, Message};

use super::prompts::{
    MAX_TOKENS_SINGLE, ONE_SHOT_EXAMPLE_INPUT, ONE_SHOT_EXAMPLE_OUTPUT, ONE_SHOT_SYSTEM,
    TEMPERATURE, ZERO_SHOT_SYSTEM,
};

/// Labels one sentence with no worked example.
pub async fn label_zero_shot(
    client: &dyn Completion,
    sentence: &str,
) -> Result<String, LabelError> {
    let request = CompletionRequest {
        system: ZERO_SHOT_SYSTEM.to_string(),
        messages: vec![Message::user(sentence)],
        max_tokens: MAX_TOKENS_SINGLE,
        temperature: TEMPERATURE,
    };
    Ok(client.complete(&request).await?)
}

/// Labels one sentence with a worked example exchange ahead of the real
/// request, steering the output format.
pub async fn label_one_shot(
    client: &dyn Completion,
    sentence: &str,
) -> Result<String, LabelError> {
    let request = CompletionRequest {
        system: ONE_SHOT_SYSTEM.to_string(),
        messages: vec![
            Message::user(ONE_SHOT_EXAMPLE_INPUT),
            Message::assistant(ONE_SHOT_EXAMPLE_OUTPUT),
            Message::user(sentence),
        ],
        max_tokens: MAX_TOKENS_SINGLE,
        temperature: TEMPERATURE,
    };
    Ok(client.complete(&request).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::llm_client::{LlmError, Role};

    struct RecordingClient {
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl RecordingClient {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Completion for RecordingClient {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok("tech".to_string())
        }
    }

    #[tokio::test]
    async fn test_zero_shot_sends_one_user_message() {
        let client = RecordingClient::new();

        let label = label_zero_shot(&client, "New battery chemistry unveiled")
            .await
            .unwrap();

        assert_eq!(label, "tech");
        let requests = client.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system, ZERO_SHOT_SYSTEM);
        assert_eq!(requests[0].messages.len(), 1);
        assert_eq!(requests[0].messages[0].role, Role::User);
        assert_eq!(requests[0].messages[0].content, "New battery chemistry unveiled");
        assert_eq!(requests[0].max_tokens, MAX_TOKENS_SINGLE);
    }

    #[tokio::test]
    async fn test_one_shot_prepends_the_worked_example() {
        let client = RecordingClient::new();

        label_one_shot(&client, "Central bank holds rates steady")
            .await
            .unwrap();

        let requests = client.requests.lock().unwrap();
        let messages = &requests[0].messages;
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, ONE_SHOT_EXAMPLE_INPUT);
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].content, ONE_SHOT_EXAMPLE_OUTPUT);
        assert_eq!(messages[2].role, Role::User);
        assert_eq!(messages[2].content, "Central bank holds rates steady");
    }
}
