//! UI state types shared by the engine and the TUI.
//!
//! Pure data types with no IO and no ratatui dependency.

mod draft;
mod history;

pub use draft::DraftInput;
pub use history::{InputHistory, NavOutcome};

/// UI configuration options derived from config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    /// Use ASCII-only glyphs for markers and prompts.
    pub ascii_only: bool,
    pub high_contrast: bool,
}
