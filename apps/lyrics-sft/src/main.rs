mod config;
mod errors;
mod io;
mod llm_client;
mod models;
mod pipeline;

use std::fs::File;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::io::acquire::ensure_input_file;
use crate::llm_client::LlmClient;
use crate::pipeline::orchestrator::LyricsPipeline;
use crate::pipeline::summarizer::LyricsSummarizer;
use crate::pipeline::throttle::{FixedDelay, NoDelay, Throttle};

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration first: a missing OPENAI_API_KEY aborts before any work
    let config = Config::from_env()?;

    init_tracing(&config)?;
    info!("Starting lyrics-sft v{}", env!("CARGO_PKG_VERSION"));

    let input = ensure_input_file(&config.input_path, config.download_url.as_deref()).await?;

    let llm = LlmClient::new(config.openai_api_key.clone(), config.model.clone())
        .with_base_url(&config.openai_base_url)
        .with_max_retries(config.llm_max_retries);
    info!("LLM client initialized (model: {})", llm.model());

    let throttle: Arc<dyn Throttle> = if config.rate_limit.is_zero() {
        Arc::new(NoDelay)
    } else {
        Arc::new(FixedDelay(config.rate_limit))
    };
    let pipeline = LyricsPipeline::new(Arc::new(LyricsSummarizer::new(llm)), throttle);

    let stats = pipeline
        .run_files(&input, &config.output_path, config.max_items)
        .await?;

    info!(
        "Done: {} records seen, {} pairs written in {} flushes, {} skipped{}",
        stats.seen,
        stats.emitted,
        stats.flushes,
        stats.skipped,
        if stats.stopped_by_cap {
            " (stopped at max_items)"
        } else {
            ""
        }
    );

    Ok(())
}

/// Console plus a per-run log file, both behind the same `EnvFilter`.
fn init_tracing(config: &Config) -> Result<()> {
    let log_file = File::create(&config.log_file)
        .with_context(|| format!("Failed to create log file {}", config.log_file.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    Ok(())
}
