//! Full-frame snapshots of the TUI.

use insta::assert_snapshot;
use ratatui::{Terminal, backend::TestBackend};

use ctf_engine::{App, ScrollState};
use ctf_tui::draw;

use crate::common::{app, app_with_config};

const ASCII: &str = "[app]\nascii_only = true\n";

/// Draw one frame of `app` and return the backend for snapshotting.
fn render(app: &mut App, width: u16, height: u16) -> TestBackend {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
    terminal.draw(|frame| draw(frame, app)).expect("draw");
    terminal.backend().clone()
}

#[test]
fn snapshot_first_frame() {
    let mut app = app_with_config(ASCII);
    assert_snapshot!(render(&mut app, 60, 12), @r#"
    " alex@cybersec-terminal | -------- 0/8 solved | 0/6 secrets "
    "╭ terminal ────────────────────────────────────────────────╮"
    "│Welcome to Alex's CTF Terminal v2.1.0                     │"
    "│Type "help" for available commands                        │"
    "│                                                          │"
    "│                                                          │"
    "│                                                          │"
    "╰──────────────────────────────────────────────────────────╯"
    "╭ alex@cybersec-terminal:~$ ───────────Enter run  Esc quit ╮"
    "│>                                                         │"
    "╰──────────────────────────────────────────────────────────╯"
    " ^/v history  |  PgUp/PgDn scroll  |  Ctrl+L clear          "
    "#);
}

#[test]
fn snapshot_ascii_solve() {
    let mut app = app_with_config(ASCII);
    app.submit("Hello");
    assert_snapshot!(render(&mut app, 60, 16), @r#"
    " alex@cybersec-terminal | +------- 1/8 solved | 0/6 secrets "
    "╭ terminal ────────────────────────────────────────────────╮"
    "│Welcome to Alex's CTF Terminal v2.1.0                     │"
    "│Type "help" for available commands                        │"
    "│> Hello                                                   │"
    "│[+] Correct! Challenge solved!                            │"
    "│Challenge: Binary Message (Medium, Encoding)              │"
    "│Unlocked: University: MIT - Computer Science              │"
    "│                                                          │"
    "│Progress: 1/8 challenges completed                        │"
    "│                                                          │"
    "╰──────────────────────────────────────────────────────────╯"
    "╭ alex@cybersec-terminal:~$ ───────────Enter run  Esc quit ╮"
    "│>                                                         │"
    "╰──────────────────────────────────────────────────────────╯"
    " Solved binary_message (1/8)                                "
    "#);
}

#[test]
fn snapshot_custom_identity_with_draft() {
    let mut app = app_with_config(
        "[app]\nascii_only = true\n[terminal]\nuser = \"guest\"\nhost = \"lab\"\nbanner = []\n",
    );
    app.draft_mut().enter_text("curl /robots.txt");
    assert_snapshot!(render(&mut app, 48, 8), @r#"
    " guest@lab | -------- 0/8 solved | 0/6 secrets  "
    "╭ terminal ────────────────────────────────────╮"
    "│                                              │"
    "╰──────────────────────────────────────────────╯"
    "╭ guest@lab:~$ ────────────Enter run  Esc quit ╮"
    "│> curl /robots.txt                            │"
    "╰──────────────────────────────────────────────╯"
    " ^/v history  |  PgUp/PgDn scroll  |  Ctrl+L cle"
    "#);
}

#[test]
fn long_transcript_stays_pinned_to_bottom() {
    let mut app = app();
    for _ in 0..6 {
        app.submit("help");
    }
    render(&mut app, 80, 14);

    assert_eq!(app.scroll().state(), ScrollState::AutoBottom);
    assert!(app.scroll().offset_from_top() > 0);
}
