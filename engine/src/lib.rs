//! Core engine for the CTF terminal: registry, session and command routing.
//!
//! This crate contains the `App` state without TUI dependencies. Hosts feed it
//! key-level edits and committed lines; it owns the one `Session` and hands it
//! to the `CommandRouter` by `&mut` for every line.

mod catalog;
mod commands;
mod config;
mod decode;
mod error;
mod matcher;
mod registry;
mod sandbox;
mod session;
mod ui;

pub use catalog::CHALLENGES;
pub use commands::{
    CommandRouter, CommandSpec, Outcome, Response, builtin_named, command_help_lines,
    command_specs,
};
pub use config::{
    AppConfig, CONFIG_PATH_ENV, ConfigError, DEFAULT_BANNER, DEFAULT_HOST, DEFAULT_USER,
    TerminalConfig, TerminalSection, config_path,
};
pub use decode::{Decoded, Encoding, decode};
pub use error::CommandError;
pub use matcher::{Attempt, SolutionMatch, find_match, normalize_attempt};
pub use registry::{Registry, RegistryError};
pub use sandbox::{SECRET_TARGET, secret};
pub use session::{Session, SolveRecord};
pub use ui::{
    DraftInput, InputHistory, NavOutcome, ScrollState, StatusKind, TranscriptScroll, UiOptions,
    ViewState,
};

pub use ctf_types::{AcceptRule, Challenge, Difficulty, MatchKind, TranscriptLine};

/// Application state: one visitor's session plus the input and view around it.
#[derive(Debug)]
pub struct App {
    router: CommandRouter,
    session: Session,
    draft: DraftInput,
    history: InputHistory,
    view: ViewState,
    user: String,
    host: String,
    should_quit: bool,
}

impl App {
    /// Build the shipped registry and a fresh session.
    pub fn new(config: Option<&TerminalConfig>) -> Result<Self, RegistryError> {
        Ok(Self::with_registry(Registry::builtin()?, config))
    }

    #[must_use]
    pub fn with_registry(registry: Registry, config: Option<&TerminalConfig>) -> Self {
        let defaults = TerminalConfig::default();
        let config = config.unwrap_or(&defaults);
        let ui_options = UiOptions {
            ascii_only: config.ascii_only(),
            high_contrast: config.high_contrast(),
        };

        tracing::debug!(
            challenges = registry.len(),
            ascii_only = ui_options.ascii_only,
            "Starting session"
        );

        Self {
            router: CommandRouter::new(registry).with_ascii_only(ui_options.ascii_only),
            session: Session::new(&config.banner()),
            draft: DraftInput::default(),
            history: InputHistory::default(),
            view: ViewState::new(ui_options),
            user: config.user().to_string(),
            host: config.host().to_string(),
            should_quit: false,
        }
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// Submit the draft as a command line and clear the draft.
    pub fn submit_draft(&mut self) -> Response {
        let line = self.draft.take_text();
        self.history.push(&line);
        self.history.reset_navigation();
        self.submit(&line)
    }

    /// Run one line through the router.
    pub fn submit(&mut self, line: &str) -> Response {
        let response = self.router.submit(&mut self.session, line);
        self.apply_outcome(&response.outcome);
        self.view.scroll.to_bottom();
        response
    }

    fn apply_outcome(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Empty | Outcome::Printed => self.clear_status(),
            Outcome::Cleared => self.set_status(StatusKind::Info, "Terminal cleared"),
            Outcome::SecretDiscovered(_) => {
                let found = self.session.discovered_secrets().len();
                self.set_status(
                    StatusKind::Success,
                    format!("Secret discovered ({found}/{SECRET_TARGET})"),
                );
            }
            Outcome::Solved(id) => {
                let (solved, total) = self.progress();
                self.set_status(
                    StatusKind::Success,
                    format!("Solved {id} ({solved}/{total})"),
                );
            }
            Outcome::Rejected(CommandError::AlreadySolved(id)) => {
                self.set_status(StatusKind::Info, format!("{id} is already solved"));
            }
            Outcome::Rejected(err) => self.set_status(StatusKind::Warning, err.to_string()),
        }
    }

    // ------------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn transcript(&self) -> &[TranscriptLine] {
        self.session.transcript()
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        self.router.registry()
    }

    /// `(solved, total)` challenge counts.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        (self.session.solved_count(), self.registry().len())
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    // ------------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn draft(&self) -> &DraftInput {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut DraftInput {
        self.history.reset_navigation();
        &mut self.draft
    }

    /// Recall the previous submitted line into the draft.
    pub fn history_up(&mut self) {
        if let NavOutcome::Moved(text) = self.history.navigate_up(self.draft.text()) {
            self.draft.set_text(text);
        }
    }

    /// Move towards newer lines, ending at the stashed draft.
    pub fn history_down(&mut self) {
        if let NavOutcome::Moved(text) = self.history.navigate_down() {
            self.draft.set_text(text);
        }
    }

    #[must_use]
    pub fn history(&self) -> &InputHistory {
        &self.history
    }

    // ------------------------------------------------------------------------
    // View
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.view.ui_options
    }

    #[must_use]
    pub fn scroll(&self) -> &TranscriptScroll {
        &self.view.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut TranscriptScroll {
        &mut self.view.scroll
    }

    pub fn status_message(&self) -> Option<&str> {
        self.view.status.as_ref().map(|(_, msg)| msg.as_str())
    }

    pub fn status_kind(&self) -> StatusKind {
        self.view
            .status
            .as_ref()
            .map_or(StatusKind::Info, |(kind, _)| *kind)
    }

    pub fn set_status(&mut self, kind: StatusKind, message: impl Into<String>) {
        self.view.status = Some((kind, message.into()));
    }

    pub fn clear_status(&mut self) {
        self.view.status = None;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        tracing::info!(
            solved = self.session.solved_count(),
            secrets = self.session.discovered_secrets().len(),
            "Session ending"
        );
        self.should_quit = true;
    }
}
