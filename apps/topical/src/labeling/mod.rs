// The labeling pipeline: batch dispatch, tolerant parsing, label-set
// extraction, and the prompt-technique entry points (zero-shot, one-shot,
// chain-of-thought). All LLM calls go through llm_client — no direct API
// calls here.

pub mod chain;
pub mod dispatcher;
pub mod labels;
pub mod parser;
pub mod prompts;
pub mod sentence;
