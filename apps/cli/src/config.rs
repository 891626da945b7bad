use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::documents::{DEFAULT_PD_DIR, DEFAULT_RESUME_DIR};
use crate::llm_client::{
    LlmConfig, RetryPolicy, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
use crate::text::wrap::DEFAULT_WIDTH;

/// Application configuration loaded from environment variables, then overridden by
/// command-line flags. Fails at startup if the API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model: String,
    pub temperature: f32,
    pub wrap_width: usize,
    pub pd_dir: PathBuf,
    pub resume_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            openai_api_key: lookup("OPENAI_API_KEY")
                .context("Required environment variable 'OPENAI_API_KEY' is not set")?,
            openai_base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: parse_or(&lookup, "OPENAI_TEMPERATURE", DEFAULT_TEMPERATURE)?,
            wrap_width: parse_or(&lookup, "RESUME_GPT_WIDTH", DEFAULT_WIDTH)?,
            pd_dir: PathBuf::from(DEFAULT_PD_DIR),
            resume_dir: PathBuf::from(DEFAULT_RESUME_DIR),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Flags given on the command line win over the environment.
    pub fn with_args(mut self, args: &Cli) -> Self {
        if let Some(model) = &args.model {
            self.model = model.clone();
        }
        if let Some(temperature) = args.temperature {
            self.temperature = temperature;
        }
        if let Some(width) = args.width {
            self.wrap_width = width;
        }
        if let Some(dir) = &args.pd_dir {
            self.pd_dir = dir.clone();
        }
        if let Some(dir) = &args.resume_dir {
            self.resume_dir = dir.clone();
        }
        self
    }

    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            api_key: self.openai_api_key.clone(),
            base_url: self.openai_base_url.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            retry: RetryPolicy::default(),
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
