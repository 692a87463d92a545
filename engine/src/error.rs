//! Errors surfaced by the command router.
//!
//! None of these are fatal. The router turns every one of them into
//! transcript lines; they never escape `CommandRouter::submit`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Command not found: {0}")]
    UnknownCommand(String),
    #[error("Challenge not found: {0}")]
    UnknownChallengeId(String),
    #[error("Invalid input: {0}")]
    InvalidDecodeInput(&'static str),
    #[error("cat: {file}: Permission denied")]
    PermissionDenied { file: String, hint: &'static str },
    #[error("You already solved this challenge!")]
    AlreadySolved(&'static str),
    #[error("usage: {0}")]
    MissingArgument(&'static str),
    #[error("cat: {0}: No such file or directory")]
    NoSuchFile(String),
}

impl CommandError {
    /// Transcript lines for this error, headline first.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let headline = self.to_string();
        match self {
            CommandError::UnknownCommand(_) => {
                vec![headline, "Type \"help\" for available commands".to_string()]
            }
            CommandError::UnknownChallengeId(_) => vec![
                headline,
                "Use \"challenges\" to see available challenges.".to_string(),
            ],
            CommandError::PermissionDenied { hint, .. } => vec![headline, format!("Hint: {hint}")],
            CommandError::InvalidDecodeInput(_)
            | CommandError::AlreadySolved(_)
            | CommandError::MissingArgument(_)
            | CommandError::NoSuchFile(_) => vec![headline],
        }
    }
}
