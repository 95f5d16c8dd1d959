mod config;
mod errors;
mod labeling;
mod llm_client;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::labeling::chain::classify_with_topic_chain;
use crate::labeling::parser::{OutputSchema, ParsedOutput};
use crate::labeling::sentence::{label_one_shot, label_zero_shot};
use crate::llm_client::LlmClient;

/// Sample headline dataset. Stand-in for the single-column sentence table —
/// CSV ingestion is a collaborator, not part of this pipeline.
const SAMPLE_HEADLINES: &[&str] = &[
    "NASA delays lunar lander contract amid budget review",
    "Streaming giant posts record subscriber growth in Asia",
    "New battery chemistry promises faster electric vehicle charging",
    "Parliament debates landmark data privacy legislation",
    "Underdogs clinch championship in overtime thriller",
    "Central bank holds interest rates steady despite inflation fears",
    "Breakthrough gene therapy restores vision in early trial",
    "Wildfire smoke blankets west coast cities for third day",
    "Quantum startup raises funding to scale error-corrected chips",
    "Museum returns looted artifacts after decade-long dispute",
];

const DEMO_BATCH_SIZE: usize = 4;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Topical v{}", env!("CARGO_PKG_VERSION"));

    let client = LlmClient::new(&config);
    info!("LLM client initialized (model: {})", client.model());

    let rows: Vec<String> = SAMPLE_HEADLINES.iter().map(|s| s.to_string()).collect();

    // Zero-shot: no worked example
    let zero = label_zero_shot(&client, &rows[0]).await?;
    info!("Zero-shot label for {:?}: {zero}", rows[0]);

    // One-shot: a worked example steers the output format
    let one = label_one_shot(&client, &rows[1]).await?;
    info!("One-shot label for {:?}: {one}", rows[1]);

    // Chain of thought: extract topics in batches, then classify against them
    let outcome =
        classify_with_topic_chain(&client, &rows, DEMO_BATCH_SIZE, OutputSchema::TopicSentence)
            .await?;
    info!(
        "Chain extracted topics: {}",
        outcome
            .topics
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    );

    match outcome.output {
        ParsedOutput::Records(records) => {
            for record in records {
                info!("[{}] {}", record.topic, record.sentence);
            }
        }
        ParsedOutput::Topics(topics) => {
            for topic in topics {
                info!("topic: {topic}");
            }
        }
    }

    Ok(())
}
