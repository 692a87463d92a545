//! Solution matcher: decides whether a free-form line solves a challenge.
//!
//! # Matching order
//!
//! 1. The line is normalized: trimmed, lowercased, whitespace runs collapsed.
//! 2. Challenges are scanned in declaration order; the first challenge with an
//!    accepting rule wins.
//! 3. Within one challenge, rules are tried by tier: `ExactMatch`, then
//!    `SubstringMatch`, then `CustomPredicate`.
//!
//! A validated [`Registry`] guarantees that at most one challenge accepts any
//! of the known solution forms, so step 2 only matters for novel inputs.

use tracing::info;

use ctf_types::{Challenge, MatchKind, collapse_whitespace, normalize_command};

use crate::registry::Registry;
use crate::session::{Session, SolveRecord};

/// Comparison form used by every accept rule.
#[must_use]
pub fn normalize_attempt(raw: &str) -> String {
    collapse_whitespace(&normalize_command(raw))
}

/// Which challenge a line satisfied, and through which tier.
#[derive(Debug, Clone, Copy)]
pub struct SolutionMatch {
    pub challenge: &'static Challenge,
    pub kind: MatchKind,
}

/// First challenge, in declaration order, that accepts `normalized`.
#[must_use]
pub fn find_match(challenges: &'static [Challenge], normalized: &str) -> Option<SolutionMatch> {
    challenges.iter().find_map(|challenge| {
        challenge
            .accepting_rule(normalized)
            .map(|rule| SolutionMatch {
                challenge,
                kind: rule.kind(),
            })
    })
}

/// Result of offering a line to the matcher.
#[derive(Debug, Clone, Copy)]
pub enum Attempt {
    Solved(SolutionMatch),
    AlreadySolved(&'static Challenge),
    NoMatch,
}

/// Offer `raw` to every challenge and record a solve on the session.
pub fn attempt(registry: &Registry, session: &mut Session, raw: &str) -> Attempt {
    let normalized = normalize_attempt(raw);
    if normalized.is_empty() {
        return Attempt::NoMatch;
    }

    let Some(found) = find_match(registry.challenges(), &normalized) else {
        return Attempt::NoMatch;
    };

    match session.record_solve(found.challenge) {
        SolveRecord::Recorded => {
            info!(
                challenge = found.challenge.id,
                tier = found.kind.as_str(),
                solved = session.solved_count(),
                "Challenge solved"
            );
            Attempt::Solved(found)
        }
        SolveRecord::AlreadySolved => Attempt::AlreadySolved(found.challenge),
    }
}

/// Lines announcing a fresh solve.
#[must_use]
pub fn success_block(
    challenge: &Challenge,
    solved: usize,
    total: usize,
    ascii_only: bool,
) -> Vec<String> {
    let marker = if ascii_only { "[+]" } else { "🎉" };
    vec![
        format!("{marker} Correct! Challenge solved!"),
        format!(
            "Challenge: {} ({}, {})",
            challenge.title, challenge.difficulty, challenge.category
        ),
        format!("Unlocked: {}", challenge.reward),
        String::new(),
        format!("Progress: {solved}/{total} challenges completed"),
    ]
}

#[cfg(test)]
mod tests {
    use ctf_types::{AcceptRule, Challenge, Difficulty, MatchKind};

    use super::{Attempt, attempt, find_match, normalize_attempt, success_block};
    use crate::registry::Registry;
    use crate::session::Session;

    const fn challenge(id: &'static str, accepts: &'static [AcceptRule]) -> Challenge {
        Challenge {
            id,
            title: id,
            category: "Test",
            difficulty: Difficulty::Medium,
            description: "",
            hint: "",
            accepts,
            reward: "reward",
            steps: &[],
        }
    }

    // Deliberately overlapping: never passes registry validation.
    static OVERLAPPING: &[Challenge] = &[
        challenge("first", &[AcceptRule::SubstringMatch("shared")]),
        challenge("second", &[AcceptRule::ExactMatch("shared secret")]),
    ];

    #[test]
    fn normalize_collapses_and_lowercases() {
        assert_eq!(normalize_attempt("  UNION   Select\tflag "), "union select flag");
    }

    #[test]
    fn declaration_order_breaks_ties() {
        let found = find_match(OVERLAPPING, "shared secret").expect("match");
        assert_eq!(found.challenge.id, "first");
        assert_eq!(found.kind, MatchKind::Substring);
    }

    #[test]
    fn no_match_for_unrelated_line() {
        assert!(find_match(OVERLAPPING, "nothing here").is_none());
    }

    #[test]
    fn exact_solution_any_case() {
        let registry = Registry::builtin().unwrap();
        let mut session = Session::default();
        let result = attempt(&registry, &mut session, "challenge_accepted");
        assert!(matches!(
            result,
            Attempt::Solved(found)
                if found.challenge.id == "caesar_cipher" && found.kind == MatchKind::Exact
        ));
        assert_eq!(session.unlocked_rewards(), ["Age: 22 years old"]);
    }

    #[test]
    fn substring_solution_inside_longer_line() {
        let registry = Registry::builtin().unwrap();
        let mut session = Session::default();
        let result = attempt(
            &registry,
            &mut session,
            "1' UNION   SELECT flag FROM secrets --",
        );
        assert!(matches!(
            result,
            Attempt::Solved(found)
                if found.challenge.id == "sql_injection" && found.kind == MatchKind::Substring
        ));
    }

    #[test]
    fn custom_predicate_variants() {
        let registry = Registry::builtin().unwrap();
        for (line, id) in [
            ("' OR 1=1 --", "sql_injection"),
            ("127.0.0.1 && cat /etc/flag", "command_injection"),
            ("Challenge Accepted", "caesar_cipher"),
            ("security-first", "reverse_engineering"),
        ] {
            let mut session = Session::default();
            let result = attempt(&registry, &mut session, line);
            assert!(
                matches!(
                    result,
                    Attempt::Solved(found)
                        if found.challenge.id == id && found.kind == MatchKind::Custom
                ),
                "{line}"
            );
        }
    }

    #[test]
    fn second_submission_is_already_solved() {
        let registry = Registry::builtin().unwrap();
        let mut session = Session::default();
        attempt(&registry, &mut session, "Hello");
        let again = attempt(&registry, &mut session, "HELLO");
        assert!(matches!(again, Attempt::AlreadySolved(c) if c.id == "binary_message"));
        assert_eq!(session.solved_count(), 1);
        assert_eq!(session.unlocked_rewards().len(), 1);
    }

    #[test]
    fn blank_line_never_matches() {
        let registry = Registry::builtin().unwrap();
        let mut session = Session::default();
        assert!(matches!(
            attempt(&registry, &mut session, "   "),
            Attempt::NoMatch
        ));
    }

    #[test]
    fn success_block_reports_progress() {
        let registry = Registry::builtin().unwrap();
        let challenge = registry.get("hidden_message").unwrap();
        let lines = success_block(challenge, 1, 8, true);
        assert_eq!(lines[0], "[+] Correct! Challenge solved!");
        assert_eq!(lines[1], "Challenge: Hidden Message (Easy, Web)");
        assert_eq!(lines[2], "Unlocked: Real Name: Alex Chen");
        assert_eq!(lines[4], "Progress: 1/8 challenges completed");
    }
}
