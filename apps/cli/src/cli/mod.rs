//! Command-line surface: flags, the `fill` utility subcommand and the interactive session.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::errors::AppError;
use crate::text::wrap::{self, DEFAULT_WIDTH};

pub mod commands;
pub mod console;
pub mod session;

pub use console::Console;
pub use session::SessionOptions;

/// Printed when the model is still rate-limited after every retry.
pub const OVERLOADED_MESSAGE: &str =
    "Sorry, the model is currently overloaded with other requests. Please try again later.";

#[derive(Debug, Parser)]
#[command(name = "resume-gpt")]
#[command(about = "Rate resumes against a position description with a chat model", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the position description
    #[arg(long)]
    pub pd_dir: Option<PathBuf>,

    /// Directory holding the resumes to review
    #[arg(long)]
    pub resume_dir: Option<PathBuf>,

    /// Chat model name (overrides OPENAI_MODEL)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Sampling temperature (overrides OPENAI_TEMPERATURE)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Wrap width for model replies (overrides RESUME_GPT_WIDTH)
    #[arg(short, long)]
    pub width: Option<usize>,

    /// Skip the resume review and go straight to chat
    #[arg(long, conflicts_with = "context")]
    pub chat: bool,

    /// Extra context for the reviewer; skips the startup question
    #[arg(short, long)]
    pub context: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Reflow a text file to a fixed width and print it
    Fill {
        /// File to reflow
        path: PathBuf,
        /// Maximum line width
        #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
        width: usize,
        /// Drop existing line breaks instead of keeping them
        #[arg(long)]
        collapse_newlines: bool,
        /// Print one numbered line per output line
        #[arg(long)]
        number_lines: bool,
    },
}

/// Runs the `fill` subcommand and returns the text to print.
pub async fn run_fill(
    path: PathBuf,
    width: usize,
    collapse_newlines: bool,
    number_lines: bool,
) -> Result<String, AppError> {
    let text = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| AppError::io(&path, e))?;

    if number_lines {
        let lines = wrap::wrap(&text, width, collapse_newlines)?;
        Ok(lines
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{:>4} | {line}", i + 1))
            .collect::<Vec<_>>()
            .join("\n"))
    } else {
        Ok(wrap::fill(&text, width, collapse_newlines)?)
    }
}
