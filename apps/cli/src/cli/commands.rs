//! Parsing of what the user types at the prompts.
//! Keywords are matched case-insensitively; free text is passed on untouched apart from trimming.

/// One line typed at the `>> ` prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetPositionDescription,
    SetResume,
    SetContext,
    Help,
    Quit,
    /// Blank line; nothing is sent.
    Empty,
    Chat(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_lowercase().as_str() {
            "" => Command::Empty,
            "set pd" => Command::SetPositionDescription,
            "set resume" => Command::SetResume,
            "set context" => Command::SetContext,
            "help" => Command::Help,
            "quit" | "q" => Command::Quit,
            _ => Command::Chat(trimmed.to_string()),
        }
    }
}

pub const HELP_TEXT: &str = "\
set pd: Sets the position description.
set resume: Input a new resume.
set context: Gives context for the job.
quit: Exits the program.";

/// Answer to the startup "additional context?" question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextChoice {
    SkipToChat,
    NoContext,
    Context(String),
}

impl ContextChoice {
    pub fn parse(answer: &str) -> Self {
        let trimmed = answer.trim();
        match trimmed.to_lowercase().as_str() {
            "c" | "chat" => ContextChoice::SkipToChat,
            "" | "n" | "no" => ContextChoice::NoContext,
            _ => ContextChoice::Context(trimmed.to_string()),
        }
    }
}

/// `y` / `yes` in any case.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
