//! Property tests over arbitrary command sequences.

use proptest::prelude::*;

use ctf_engine::{Outcome, SECRET_TARGET};

use crate::common::{router, session};

/// Lines a visitor plausibly types, mixed with arbitrary text.
fn line() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "help",
            "challenges",
            "status",
            "secrets",
            "whoami",
            "ls",
            "clear",
            "CLEAR",
            "solve caesar_cipher",
            "hint sql_injection",
            "steps robots_txt",
            "decode aGVsbG8=",
            "decode 01001000 01101001",
            "curl /robots.txt",
            "curl /index.html",
            "cat notes.txt",
            "cat vault.txt",
            "Hello",
            "SecurityFirst",
            "' or 1=1 --",
            "127.0.0.1; cat /etc/flag",
            "FLAG{welcome_to_my_portfolio}",
            "",
            "   ",
        ])
        .prop_map(String::from),
        "\\PC{0,40}",
        any::<String>(),
    ]
}

proptest! {
    #[test]
    fn rewards_track_solves(lines in prop::collection::vec(line(), 0..24)) {
        let router = router(true);
        let mut session = session();
        let mut last_solved = 0;
        for line in &lines {
            router.submit(&mut session, line);
            prop_assert!(session.solved_count() >= last_solved);
            last_solved = session.solved_count();
        }

        prop_assert_eq!(session.unlocked_rewards().len(), session.solved_count());
        prop_assert!(session.solved_count() <= router.registry().len());
        prop_assert!(session.discovered_secrets().len() <= SECRET_TARGET);
        for challenge in router.registry().challenges() {
            prop_assert_eq!(
                session.is_solved(challenge.id),
                session.unlocked_rewards().contains(&challenge.reward)
            );
        }
    }

    #[test]
    fn clear_keeps_progress(lines in prop::collection::vec(line(), 0..16)) {
        let router = router(false);
        let mut session = session();
        for line in &lines {
            router.submit(&mut session, line);
        }
        let solved = session.solved_count();
        let rewards = session.unlocked_rewards().to_vec();
        let secrets = session.discovered_secrets().to_vec();

        let response = router.submit(&mut session, "clear");
        prop_assert_eq!(response.outcome, Outcome::Cleared);
        prop_assert_eq!(session.transcript().len(), 1);
        prop_assert_eq!(session.solved_count(), solved);
        prop_assert_eq!(session.unlocked_rewards(), rewards.as_slice());
        prop_assert_eq!(session.discovered_secrets(), secrets.as_slice());
    }

    #[test]
    fn every_line_is_echoed_before_its_output(line in line()) {
        let router = router(true);
        let mut session = session();
        let before = session.transcript().len();
        let response = router.submit(&mut session, &line);

        if response.outcome == Outcome::Cleared {
            prop_assert_eq!(session.transcript().len(), 1);
        } else {
            let transcript = session.transcript();
            prop_assert_eq!(transcript.len(), before + 1 + response.lines.len());
            prop_assert!(transcript[before].is_input_echo);
            prop_assert!(
                !transcript[before]
                    .text
                    .chars()
                    .any(|c| c.is_control() && c != '\t')
            );
            for (entry, text) in transcript[before + 1..].iter().zip(&response.lines) {
                prop_assert!(!entry.is_input_echo);
                prop_assert_eq!(&entry.text, text);
            }
        }
    }
}
