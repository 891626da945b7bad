//! Interactive session: optional context, a review of every resume against the PD, then a
//! command loop for follow-up questions.
//!
//! An exhausted retry budget ends the session with an error so the binary can decide how to
//! exit. Any other failed request inside the loop is reported and the loop carries on.

use std::io::Write;
use std::path::PathBuf;

use tokio::io::AsyncBufRead;
use tracing::{error, info, warn};

use crate::cli::commands::{is_yes, Command, ContextChoice, HELP_TEXT};
use crate::cli::console::Console;
use crate::conversation::Conversation;
use crate::documents;
use crate::errors::AppError;
use crate::llm_client::LlmError;

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub pd_dir: PathBuf,
    pub resume_dir: PathBuf,
    /// Skip the startup review and go straight to the command loop.
    pub skip_review: bool,
    /// Context given up front; the startup question is not asked.
    pub context: Option<String>,
}

/// Answer to a "please paste" prompt.
enum Pasted {
    Text(String),
    Blank,
    Closed,
}

pub async fn run<R, W>(
    conversation: &mut Conversation,
    console: &mut Console<R, W>,
    options: &SessionOptions,
) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let choice = if options.skip_review {
        ContextChoice::SkipToChat
    } else if let Some(context) = &options.context {
        ContextChoice::Context(context.clone())
    } else {
        match console
            .ask("Would you like to add additional context? (text/No)\n")
            .await?
        {
            Some(answer) => ContextChoice::parse(&answer),
            None => return quit(console),
        }
    };

    match &choice {
        ContextChoice::SkipToChat => console.say("Going straight to chat.\n")?,
        ContextChoice::NoContext => console.say("No context set.\n")?,
        ContextChoice::Context(text) => {
            conversation.set_context(text, false).await?;
            console.say("Ok I'll keep that in mind.\n")?;
        }
    }

    if choice != ContextChoice::SkipToChat {
        review_resumes(conversation, console, options).await?;
    }

    console.say("\nType 'help' for commands.")?;
    command_loop(conversation, console).await
}

async fn review_resumes<R, W>(
    conversation: &mut Conversation,
    console: &mut Console<R, W>,
    options: &SessionOptions,
) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    match documents::load_position_description(&options.pd_dir).await? {
        Some(pd) => {
            info!(file = %pd.name(), "Loaded position description");
            conversation.set_position_description(&pd.text);
        }
        None => warn!(
            dir = %options.pd_dir.display(),
            "No position description found; reviewing without one"
        ),
    }

    let resumes = documents::load_resumes(&options.resume_dir).await?;
    if resumes.is_empty() {
        warn!(dir = %options.resume_dir.display(), "No resumes found");
    }

    for resume in resumes {
        info!(file = %resume.name(), "Reviewing resume");
        let review = conversation.set_resume(&resume.text).await?;
        console.say(&format!("== {} ==", resume.name()))?;
        console.say(&review)?;
        console.say("\n")?;
    }
    Ok(())
}

async fn command_loop<R, W>(
    conversation: &mut Conversation,
    console: &mut Console<R, W>,
) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    loop {
        let Some(line) = console.ask(">> ").await? else {
            return quit(console);
        };

        match Command::parse(&line) {
            Command::Empty => {}
            Command::Help => console.say(HELP_TEXT)?,
            Command::Quit => return quit(console),
            Command::SetPositionDescription => {
                match ask_pasted(console, "Please paste the PD:\n").await? {
                    Pasted::Text(text) => {
                        conversation.set_position_description(&text);
                        console.say("PD updated.\n")?;
                    }
                    Pasted::Blank => console.say("PD cannot be empty.")?,
                    Pasted::Closed => return quit(console),
                }
            }
            Command::SetResume => match ask_pasted(console, "Please paste the resume:\n").await? {
                Pasted::Text(text) => {
                    let result = conversation.set_resume(&text).await;
                    report(console, result)?;
                }
                Pasted::Blank => console.say("Resume cannot be empty.")?,
                Pasted::Closed => return quit(console),
            },
            Command::SetContext => {
                match ask_pasted(console, "Please enter the context:\n").await? {
                    Pasted::Text(text) => {
                        let update = console
                            .ask("Would you like to update the response? (Yes/No)\n")
                            .await?
                            .is_some_and(|answer| is_yes(&answer));
                        match conversation.set_context(&text, update).await {
                            Ok(Some(reply)) => console.say(&reply)?,
                            Ok(None) => console.say("Context updated.\n")?,
                            Err(e) => report(console, Err(e))?,
                        }
                    }
                    Pasted::Blank => console.say("Context cannot be empty.")?,
                    Pasted::Closed => return quit(console),
                }
            }
            Command::Chat(text) => {
                let result = conversation.chat(&text).await;
                report(console, result)?;
            }
        }
    }
}

async fn ask_pasted<R, W>(console: &mut Console<R, W>, prompt: &str) -> Result<Pasted, AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    Ok(match console.ask(prompt).await? {
        Some(text) if text.trim().is_empty() => Pasted::Blank,
        Some(text) => Pasted::Text(text.trim().to_string()),
        None => Pasted::Closed,
    })
}

/// Prints a reply. Exhausted retries end the session; other failures are shown and skipped.
fn report<R, W>(console: &mut Console<R, W>, result: Result<String, LlmError>) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    match result {
        Ok(reply) => console.say(&reply),
        Err(e) if e.is_retries_exhausted() => Err(e.into()),
        Err(e) => {
            error!(error = %e, "Request failed");
            console.say(&format!("Request failed: {e}"))
        }
    }
}

fn quit<R, W>(console: &mut Console<R, W>) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    console.say("Quitting program...\n")
}
