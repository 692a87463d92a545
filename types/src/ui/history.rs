//! Recall of previously submitted lines.
//!
//! Up/Down navigation over a capped buffer, the way a shell recalls history.

use std::mem::take;

const MAX_HISTORY: usize = 100;

/// `Idle` means the visitor is editing a fresh draft.
/// `Active` means they are browsing history entries.
#[derive(Debug, Default, Clone)]
enum NavState {
    #[default]
    Idle,
    Active {
        index: usize,
        stash: String,
    },
}

/// Result of a navigation attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum NavOutcome {
    Moved(String),
    AtBoundary,
}

/// Submitted lines, most recent last.
///
/// When the visitor presses Up for the first time the current draft is
/// stashed; pressing Down past the newest entry restores it. Submitting
/// resets navigation.
#[derive(Debug, Default, Clone)]
pub struct InputHistory {
    entries: Vec<String>,
    nav: NavState,
}

impl InputHistory {
    /// Record a submitted line.
    ///
    /// Blank lines and repeats of the newest entry are ignored. The buffer is
    /// capped at `MAX_HISTORY`.
    pub fn push(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() || self.entries.last().is_some_and(|last| last == line) {
            return;
        }
        self.entries.push(line.to_owned());
        if self.entries.len() > MAX_HISTORY {
            self.entries.remove(0);
        }
    }

    /// Move to the previous (older) entry.
    pub fn navigate_up(&mut self, current: &str) -> NavOutcome {
        match &mut self.nav {
            NavState::Idle => match self.entries.len().checked_sub(1) {
                None => NavOutcome::AtBoundary,
                Some(last) => {
                    self.nav = NavState::Active {
                        index: last,
                        stash: current.to_owned(),
                    };
                    NavOutcome::Moved(self.entries[last].clone())
                }
            },
            NavState::Active { index: 0, .. } => NavOutcome::AtBoundary,
            NavState::Active { index, .. } => {
                *index -= 1;
                NavOutcome::Moved(self.entries[*index].clone())
            }
        }
    }

    /// Move to the next (newer) entry, restoring the stashed draft at the end.
    pub fn navigate_down(&mut self) -> NavOutcome {
        let newest = self.entries.len().saturating_sub(1);
        match &mut self.nav {
            NavState::Idle => NavOutcome::AtBoundary,
            NavState::Active { index, stash } if *index >= newest => {
                let stash = take(stash);
                self.nav = NavState::Idle;
                NavOutcome::Moved(stash)
            }
            NavState::Active { index, .. } => {
                *index += 1;
                NavOutcome::Moved(self.entries[*index].clone())
            }
        }
    }

    pub fn reset_navigation(&mut self) {
        self.nav = NavState::Idle;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
