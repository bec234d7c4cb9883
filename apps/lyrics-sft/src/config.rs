use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use crate::llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const DEFAULT_INPUT_PATH: &str = "data/cleaned_lyrics.txt";
pub const DEFAULT_DOWNLOAD_URL: &str =
    "https://drive.google.com/file/d/1PqADJhbqqTgyEAXKltgPe6Q0x_zQGLqA/view?usp=drive_link";
pub const DEFAULT_OUTPUT_PATH: &str = "training_pairs.jsonl";

/// Command-line arguments. Every flag falls back to an environment variable.
#[derive(Debug, Parser)]
#[command(
    name = "lyrics-sft",
    version,
    about = "Convert a lyrics corpus into {prompt, completion} fine-tuning pairs"
)]
pub struct Cli {
    /// Line-delimited JSON lyrics corpus
    #[arg(long, env = "LYRICS_INPUT_PATH", default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    /// Fetched when the input file is missing; empty disables the download
    #[arg(long, env = "LYRICS_DOWNLOAD_URL", default_value = DEFAULT_DOWNLOAD_URL)]
    pub download_url: String,

    /// Output JSONL file, truncated at the start of every run
    #[arg(long, env = "LYRICS_OUTPUT_PATH", default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Pause after each emitted pair, in milliseconds
    #[arg(long, env = "RATE_LIMIT_SLEEP_MS", default_value_t = 600)]
    pub rate_limit_ms: u64,

    /// Stop after this many input records (0 = no limit)
    #[arg(long, env = "MAX_ITEMS")]
    pub max_items: Option<usize>,

    /// Extra attempts on 429/5xx from the model API
    #[arg(long, env = "LLM_MAX_RETRIES", default_value_t = 0)]
    pub llm_max_retries: u32,

    #[arg(long, env = "LOG_FILE", default_value = "app.log")]
    pub log_file: PathBuf,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub openai_base_url: String,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub rust_log: String,
}

/// Validated run configuration. Built once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub input_path: PathBuf,
    pub download_url: Option<String>,
    pub output_path: PathBuf,
    pub model: String,
    pub rate_limit: Duration,
    pub max_items: Option<usize>,
    pub llm_max_retries: u32,
    pub log_file: PathBuf,
    pub openai_base_url: String,
    pub openai_api_key: String,
    pub rust_log: String,
}

impl Config {
    /// Loads `.env` (if present), parses the command line and validates the result.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(cli: Cli) -> Result<Self> {
        let openai_api_key = cli
            .openai_api_key
            .filter(|key| !key.trim().is_empty())
            .context("Required environment variable 'OPENAI_API_KEY' is not set")?;

        Ok(Config {
            input_path: cli.input,
            download_url: Some(cli.download_url).filter(|url| !url.trim().is_empty()),
            output_path: cli.output,
            model: cli.model,
            rate_limit: Duration::from_millis(cli.rate_limit_ms),
            max_items: cli.max_items.filter(|&n| n > 0),
            llm_max_retries: cli.llm_max_retries,
            log_file: cli.log_file,
            openai_base_url: cli.openai_base_url,
            openai_api_key,
            rust_log: cli.rust_log,
        })
    }
}
