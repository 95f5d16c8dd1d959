// All LLM prompt constants for the labeling module.
// Reuses the cross-cutting JSON-only fragment from llm_client::prompts.

/// Delimiter inserted between rows inside one batched prompt.
/// Out-of-band for headline text and tokenizes as a single unit.
pub const BATCH_DELIMITER: &str = "\n###\n";

/// All labeling calls are deterministic.
pub const TEMPERATURE: f32 = 0.0;

/// Output budget for single-sentence calls.
pub const MAX_TOKENS_SINGLE: u32 = 150;

/// Output budget for batched calls.
pub const MAX_TOKENS_BATCH: u32 = 300;

/// System prompt for zero-shot labeling — no worked example.
pub const ZERO_SHOT_SYSTEM: &str = "You are a news-headline topic labeler. \
    Decide the topic of the headline you are given. \
    Respond with a single lower-case word and nothing else.";

/// System prompt for one-shot labeling. The worked example travels as a
/// user/assistant exchange ahead of the real request.
pub const ONE_SHOT_SYSTEM: &str = "You are a news-headline topic labeler. \
    Decide the topic of the headline you are given. \
    Answer in exactly the format of the worked example.";

pub const ONE_SHOT_EXAMPLE_INPUT: &str =
    "Investors flee bond markets as yields spike to decade highs";
pub const ONE_SHOT_EXAMPLE_OUTPUT: &str = "finance";

/// System prompt for batched topic extraction (chain step 1).
/// Composed with the JSON-only fragment at the call site.
pub const BATCH_TOPICS_SYSTEM: &str = "You are a news-headline topic labeler. \
    You will be given several headlines separated by a ### token. \
    Decide the topic of each headline. \
    Return a JSON array of lower-case single-word topic strings, \
    one per headline, in the same order as the headlines.";

/// System prompt for classification against a fixed topic list (chain step 2).
/// Composed with the JSON-only fragment at the call site.
pub const CLASSIFY_SYSTEM: &str = "You are a news-headline classifier. \
    Assign each headline exactly one topic from the allowed list. \
    Never invent a topic outside the list.";

/// Chain step 2 prompt when the caller wants {topic, sentence} records.
/// Replace `{topics}` and `{sentences}` before sending.
pub const CLASSIFY_RECORDS_TEMPLATE: &str = r#"ALLOWED TOPICS:
{topics}

HEADLINES (separated by ###):
{sentences}

Return a JSON ARRAY with one object per headline, in headline order:
[
  {"topic": "space", "sentence": "the exact headline text"}
]"#;

/// Chain step 2 prompt when the caller wants a bare topic list.
/// Replace `{topics}` and `{sentences}` before sending.
pub const CLASSIFY_TOPICS_TEMPLATE: &str = r#"ALLOWED TOPICS:
{topics}

HEADLINES (separated by ###):
{sentences}

Return a JSON ARRAY of topic strings, one per headline, in headline order:
["space", "finance"]"#;
