mod cli;
mod config;
mod conversation;
mod documents;
mod errors;
mod llm_client;
mod text;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Commands, Console, SessionOptions, OVERLOADED_MESSAGE};
use crate::config::Config;
use crate::conversation::Conversation;
use crate::llm_client::LlmClient;
use crate::text::WordWrap;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();

    if let Some(Commands::Fill {
        path,
        width,
        collapse_newlines,
        number_lines,
    }) = &args.command
    {
        init_tracing("info");
        let filled =
            cli::run_fill(path.clone(), *width, *collapse_newlines, *number_lines).await?;
        println!("{filled}");
        return Ok(ExitCode::SUCCESS);
    }

    // Load configuration first (fails on a missing API key)
    let config = Config::from_env()?.with_args(&args);
    init_tracing(&config.rust_log);

    info!("Starting resume-gpt v{}", env!("CARGO_PKG_VERSION"));

    let wrapper = WordWrap::new(config.wrap_width, false).context("Invalid wrap width")?;
    let llm = LlmClient::new(config.llm_config()).context("Failed to build HTTP client")?;
    info!(
        "LLM client initialized (model: {}, wrap width: {})",
        llm.model(),
        wrapper.width()
    );

    let mut conversation = Conversation::new(Arc::new(llm), wrapper);
    let mut console = Console::new(BufReader::new(tokio::io::stdin()), std::io::stdout());
    let options = SessionOptions {
        pd_dir: config.pd_dir.clone(),
        resume_dir: config.resume_dir.clone(),
        skip_review: args.chat,
        context: args.context.clone(),
    };

    match cli::session::run(&mut conversation, &mut console, &options).await {
        Ok(()) => {
            let usage = conversation.usage();
            info!(
                calls = usage.call_count(),
                prompt_tokens = usage.total().prompt_tokens,
                completion_tokens = usage.total().completion_tokens,
                total_tokens = usage.total_tokens(),
                "Session finished"
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_model_overloaded() => {
            error!("{e}");
            println!("{OVERLOADED_MESSAGE}");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

/// Structured logging to stderr so it never interleaves with model replies on stdout.
fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), default_level))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
