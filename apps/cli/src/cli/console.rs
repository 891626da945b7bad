use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::errors::AppError;

/// Line-oriented terminal I/O. Generic so sessions can be driven from a byte buffer in tests.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `prompt` without a newline and reads one line.
    /// Returns `None` at end of input.
    pub async fn ask(&mut self, prompt: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{prompt}").map_err(AppError::Console)?;
        self.output.flush().map_err(AppError::Console)?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .await
            .map_err(AppError::Console)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    pub fn say(&mut self, text: &str) -> Result<(), AppError> {
        writeln!(self.output, "{text}").map_err(AppError::Console)
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
