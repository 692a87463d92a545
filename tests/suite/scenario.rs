//! End-to-end runs through the router, the way a visitor would type them.

use ctf_engine::{CommandError, Outcome, command_help_lines};

use crate::common::{router, session, submit_all, texts};

#[test]
fn first_solve_unlocks_one_reward() {
    let router = router(false);
    let mut session = session();

    let help = router.submit(&mut session, "help");
    assert_eq!(help.lines, command_help_lines());

    let challenges = router.submit(&mut session, "challenges");
    assert_eq!(challenges.lines[0], "Available CTF Challenges:");
    assert_eq!(challenges.lines.len(), 2 + router.registry().len());
    assert!(challenges.lines[2..].iter().all(|l| l.ends_with("[LOCKED]")));

    let solved = router.submit(&mut session, "FLAG{welcome_to_my_portfolio}");
    assert_eq!(solved.outcome, Outcome::Solved("hidden_message"));
    assert_eq!(solved.lines[0], "🎉 Correct! Challenge solved!");
    assert_eq!(solved.lines[2], "Unlocked: Real Name: Alex Chen");

    let challenges = router.submit(&mut session, "challenges");
    assert_eq!(
        challenges.lines[2],
        "hidden_message: Hidden Message (Easy, Web) [SOLVED]"
    );
    assert!(challenges.lines[3..].iter().all(|l| l.ends_with("[LOCKED]")));

    let whoami = router.submit(&mut session, "whoami");
    assert_eq!(
        whoami.lines,
        vec!["Unlocked Information:", "", "• Real Name: Alex Chen"]
    );
}

#[test]
fn transcript_echoes_every_line_before_its_output() {
    let router = router(true);
    let mut session = session();
    router.submit(&mut session, "  status  ");

    assert_eq!(
        texts(&session),
        vec!["status", "Solved: 0/8 challenges", "Secrets: 0/6 discovered"]
    );
    assert!(session.transcript()[0].is_input_echo);
    assert!(!session.transcript()[1].is_input_echo);
}

#[test]
fn solving_twice_is_rejected_without_double_counting() {
    let router = router(true);
    let mut session = session();
    let responses = submit_all(&router, &mut session, &["Hello", "  hello  "]);

    assert_eq!(responses[0].outcome, Outcome::Solved("binary_message"));
    assert_eq!(
        responses[1].outcome,
        Outcome::Rejected(CommandError::AlreadySolved("binary_message"))
    );
    assert_eq!(responses[1].lines, vec!["You already solved this challenge!"]);
    assert_eq!(session.solved_count(), 1);
    assert_eq!(session.unlocked_rewards().len(), 1);
}

#[test]
fn vault_opens_only_after_sql_injection() {
    let router = router(true);
    let mut session = session();

    let denied = router.submit(&mut session, "cat vault.txt");
    assert!(matches!(
        denied.outcome,
        Outcome::Rejected(CommandError::PermissionDenied { .. })
    ));
    assert_eq!(denied.lines[0], "cat: vault.txt: Permission denied");
    assert!(denied.lines[1].starts_with("Hint: "));

    router.submit(&mut session, "admin' OR '1'='1");
    assert!(session.is_solved("sql_injection"));

    let opened = router.submit(&mut session, "cat ~/vault.txt");
    assert!(matches!(opened.outcome, Outcome::SecretDiscovered(_)));
    assert!(opened.lines.iter().any(|l| l.contains("FLAG{root_of_all_evil}")));
}

#[test]
fn recon_chain_finds_admin_flag() {
    let router = router(true);
    let mut session = session();
    let responses = submit_all(
        &router,
        &mut session,
        &[
            "curl http://localhost/robots.txt",
            "curl /admin-portal",
            "curl /missing",
        ],
    );

    assert!(responses[0].lines.iter().any(|l| l == "Disallow: /admin-portal"));
    assert!(
        responses[1]
            .lines
            .iter()
            .any(|l| l.contains("FLAG{robots_are_not_access_control}"))
    );
    assert_eq!(responses[2].outcome, Outcome::Printed);
    assert_eq!(session.discovered_secrets().len(), 2);

    let solved = router.submit(&mut session, "FLAG{robots_are_not_access_control}");
    assert_eq!(solved.outcome, Outcome::Solved("robots_txt"));
}

#[test]
fn unknown_input_points_at_help() {
    let router = router(true);
    let mut session = session();
    let response = router.submit(&mut session, "sudo make me a sandwich");
    assert_eq!(
        response.lines,
        vec![
            "Command not found: sudo make me a sandwich",
            "Type \"help\" for available commands",
        ]
    );
    assert_eq!(session.solved_count(), 0);
}
