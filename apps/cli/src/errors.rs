use std::path::PathBuf;

use thiserror::Error;

use crate::llm_client::LlmError;
use crate::text::WrapError;

/// Application-level error type.
/// `main` inspects it to decide the exit path; nothing below `main` exits the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Invalid wrap configuration: {0}")]
    Wrap(#[from] WrapError),

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Console error: {0}")]
    Console(#[source] std::io::Error),
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the model stayed rate-limited or unavailable through every retry.
    /// Exhausted transport failures (bad base URL, no network) are not overload.
    pub fn is_model_overloaded(&self) -> bool {
        matches!(self, AppError::Llm(e) if e.is_overloaded())
    }
}
