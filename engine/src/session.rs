//! Per-visitor session state.
//!
//! The session is the only mutable value in the core. Its fields are private
//! so every mutation goes through a method that keeps them consistent:
//! a solve updates `solved_ids` and `unlocked_rewards` together, and the
//! transcript can only be appended to or reset by `clear`.

use std::collections::HashSet;

use ctf_types::{Challenge, TranscriptLine};

/// Whether `record_solve` changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveRecord {
    Recorded,
    AlreadySolved,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    solved_ids: HashSet<&'static str>,
    /// Rewards in solve order.
    unlocked_rewards: Vec<&'static str>,
    /// Secret labels in discovery order, no duplicates.
    discovered_secrets: Vec<&'static str>,
    transcript: Vec<TranscriptLine>,
}

impl Session {
    /// A fresh session whose transcript opens with `banner`.
    #[must_use]
    pub fn new<S: AsRef<str>>(banner: &[S]) -> Self {
        Self {
            transcript: banner
                .iter()
                .map(|line| TranscriptLine::output(line.as_ref()))
                .collect(),
            ..Self::default()
        }
    }

    /// Mark `challenge` solved and unlock its reward.
    pub fn record_solve(&mut self, challenge: &'static Challenge) -> SolveRecord {
        if self.solved_ids.insert(challenge.id) {
            self.unlocked_rewards.push(challenge.reward);
            SolveRecord::Recorded
        } else {
            SolveRecord::AlreadySolved
        }
    }

    #[must_use]
    pub fn is_solved(&self, id: &str) -> bool {
        self.solved_ids.contains(id)
    }

    #[must_use]
    pub fn solved_count(&self) -> usize {
        self.solved_ids.len()
    }

    #[must_use]
    pub fn unlocked_rewards(&self) -> &[&'static str] {
        &self.unlocked_rewards
    }

    /// Record a secret; returns `false` if it was already known.
    pub fn record_secret(&mut self, label: &'static str) -> bool {
        if self.discovered_secrets.contains(&label) {
            return false;
        }
        self.discovered_secrets.push(label);
        true
    }

    #[must_use]
    pub fn discovered_secrets(&self) -> &[&'static str] {
        &self.discovered_secrets
    }

    #[must_use]
    pub fn transcript(&self) -> &[TranscriptLine] {
        &self.transcript
    }

    pub fn push_echo(&mut self, text: impl Into<String>) {
        self.transcript.push(TranscriptLine::input_echo(text));
    }

    pub fn push_output<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transcript
            .extend(lines.into_iter().map(TranscriptLine::output));
    }

    /// Replace the transcript with the lone sentinel prompt.
    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
        self.transcript.push(TranscriptLine::sentinel());
    }
}
