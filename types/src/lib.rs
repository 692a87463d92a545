//! Core domain types for the CTF terminal.
//!
//! This crate contains pure domain types with no IO and minimal dependencies.
//! Everything here can be used from any layer of the application.

mod text;
pub mod ui;

pub use text::{collapse_whitespace, normalize_command, sanitize_terminal_text};

use std::fmt;

// ============================================================================
// Difficulty
// ============================================================================

/// How hard a challenge is meant to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Accepted answers
// ============================================================================

/// Tier of an accepted-answer rule.
///
/// Rules of one challenge are always evaluated in `PRIORITY` order, whatever
/// order they were declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    Exact,
    Substring,
    Custom,
}

impl MatchKind {
    pub const PRIORITY: [Self; 3] = [Self::Exact, Self::Substring, Self::Custom];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::Substring => "substring",
            MatchKind::Custom => "custom",
        }
    }
}

/// One accepted form of a challenge solution.
///
/// All comparisons run against a normalized line (trimmed, lowercased, inner
/// whitespace collapsed). Literal rule texts are normalized the same way, so
/// they may be written in any case and spacing.
#[derive(Clone, Copy)]
pub enum AcceptRule {
    /// The whole line equals the text.
    ExactMatch(&'static str),
    /// The line contains the text anywhere.
    SubstringMatch(&'static str),
    /// A hard-coded predicate over the normalized line.
    ///
    /// `samples` are inputs the predicate must accept; registry validation
    /// uses them to prove the predicate does not collide with other challenges.
    CustomPredicate {
        label: &'static str,
        check: fn(&str) -> bool,
        samples: &'static [&'static str],
    },
}

impl AcceptRule {
    #[must_use]
    pub const fn kind(&self) -> MatchKind {
        match self {
            AcceptRule::ExactMatch(_) => MatchKind::Exact,
            AcceptRule::SubstringMatch(_) => MatchKind::Substring,
            AcceptRule::CustomPredicate { .. } => MatchKind::Custom,
        }
    }

    /// Whether `normalized` satisfies this rule.
    #[must_use]
    pub fn accepts(&self, normalized: &str) -> bool {
        match self {
            AcceptRule::ExactMatch(text) => normalized == normalize_form(text),
            AcceptRule::SubstringMatch(text) => normalized.contains(&normalize_form(text)),
            AcceptRule::CustomPredicate { check, .. } => check(normalized),
        }
    }

    /// Concrete inputs this rule is known to accept.
    ///
    /// Literal rules yield their own text; predicates yield their samples.
    #[must_use]
    pub fn probes(&self) -> Vec<&'static str> {
        match self {
            AcceptRule::ExactMatch(text) | AcceptRule::SubstringMatch(text) => vec![*text],
            AcceptRule::CustomPredicate { samples, .. } => samples.to_vec(),
        }
    }
}

/// Comparison form of a literal rule text.
fn normalize_form(text: &str) -> String {
    collapse_whitespace(&normalize_command(text))
}

impl fmt::Debug for AcceptRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcceptRule::ExactMatch(text) => f.debug_tuple("ExactMatch").field(text).finish(),
            AcceptRule::SubstringMatch(text) => {
                f.debug_tuple("SubstringMatch").field(text).finish()
            }
            AcceptRule::CustomPredicate { label, samples, .. } => f
                .debug_struct("CustomPredicate")
                .field("label", label)
                .field("samples", samples)
                .finish_non_exhaustive(),
        }
    }
}

// ============================================================================
// Challenge
// ============================================================================

/// A single puzzle in the catalog. Immutable once declared.
#[derive(Debug, Clone, Copy)]
pub struct Challenge {
    pub id: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub difficulty: Difficulty,
    pub description: &'static str,
    pub hint: &'static str,
    pub accepts: &'static [AcceptRule],
    pub reward: &'static str,
    pub steps: &'static [&'static str],
}

impl Challenge {
    /// First rule that accepts `normalized`, in `MatchKind::PRIORITY` order.
    #[must_use]
    pub fn accepting_rule(&self, normalized: &str) -> Option<&'static AcceptRule> {
        MatchKind::PRIORITY.into_iter().find_map(|kind| {
            self.accepts
                .iter()
                .filter(|rule| rule.kind() == kind)
                .find(|rule| rule.accepts(normalized))
        })
    }

    #[must_use]
    pub fn accepts(&self, normalized: &str) -> bool {
        self.accepting_rule(normalized).is_some()
    }
}

// ============================================================================
// Transcript
// ============================================================================

/// One rendered terminal line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub text: String,
    /// True when the line echoes what the visitor typed.
    pub is_input_echo: bool,
}

impl TranscriptLine {
    #[must_use]
    pub fn input_echo(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_input_echo: true,
        }
    }

    #[must_use]
    pub fn output(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_input_echo: false,
        }
    }

    /// The lone prompt left behind by `clear`.
    #[must_use]
    pub fn sentinel() -> Self {
        Self::input_echo("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infosec(line: &str) -> bool {
        line == "infosec"
    }

    const RULES: &[AcceptRule] = &[
        AcceptRule::CustomPredicate {
            label: "infosec",
            check: infosec,
            samples: &["infosec"],
        },
        AcceptRule::SubstringMatch("First"),
        AcceptRule::ExactMatch("SecurityFirst"),
    ];

    const CHALLENGE: Challenge = Challenge {
        id: "sample",
        title: "Sample",
        category: "Test",
        difficulty: Difficulty::Easy,
        description: "",
        hint: "",
        accepts: RULES,
        reward: "",
        steps: &[],
    };

    #[test]
    fn difficulty_displays_label() {
        assert_eq!(Difficulty::Medium.to_string(), "Medium");
        assert!(Difficulty::Easy < Difficulty::Hard);
    }

    #[test]
    fn exact_rule_ignores_case_of_rule_text() {
        let rule = AcceptRule::ExactMatch("CHALLENGE_ACCEPTED");
        assert!(rule.accepts("challenge_accepted"));
        assert!(!rule.accepts("challenge_accepted!"));
    }

    #[test]
    fn literal_rule_text_is_whitespace_normalized() {
        let exact = AcceptRule::ExactMatch(" Hello  World ");
        assert!(exact.accepts("hello world"));
        let substring = AcceptRule::SubstringMatch("UNION   SELECT");
        assert!(substring.accepts("1' union select flag --"));
    }

    #[test]
    fn substring_rule_matches_anywhere() {
        let rule = AcceptRule::SubstringMatch("FLAG{x}");
        assert!(rule.accepts("here it is: flag{x} ok"));
        assert!(!rule.accepts("flag{y}"));
    }

    #[test]
    fn exact_rule_wins_over_declaration_order() {
        let rule = CHALLENGE.accepting_rule("securityfirst");
        assert_eq!(rule.map(AcceptRule::kind), Some(MatchKind::Exact));
    }

    #[test]
    fn substring_rule_wins_over_custom() {
        let rule = CHALLENGE.accepting_rule("first");
        assert_eq!(rule.map(AcceptRule::kind), Some(MatchKind::Substring));
    }

    #[test]
    fn custom_rule_used_last() {
        let rule = CHALLENGE.accepting_rule("infosec");
        assert_eq!(rule.map(AcceptRule::kind), Some(MatchKind::Custom));
        assert!(!CHALLENGE.accepts("security"));
    }

    #[test]
    fn probes_cover_literals_and_samples() {
        let probes: Vec<&str> = RULES.iter().flat_map(AcceptRule::probes).collect();
        assert_eq!(probes, vec!["infosec", "First", "SecurityFirst"]);
    }

    #[test]
    fn sentinel_is_empty_echo() {
        let line = TranscriptLine::sentinel();
        assert!(line.is_input_echo);
        assert!(line.text.is_empty());
    }
}
