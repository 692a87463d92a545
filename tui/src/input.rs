//! Input handling for the CTF terminal TUI.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tracing::debug;

use ctf_engine::App;

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(50); // redraw cadence when idle
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

/// Drain pending terminal events into `app`.
///
/// Blocks for at most `INPUT_POLL_TIMEOUT` waiting for the first event, then
/// takes whatever else is already queued. Returns `true` when the app should quit.
pub fn handle_events(app: &mut App) -> Result<bool> {
    let mut processed = 0;
    let mut timeout = INPUT_POLL_TIMEOUT;
    while processed < MAX_EVENTS_PER_FRAME && event::poll(timeout)? {
        let ev = event::read()?;
        if apply_event(app, ev) {
            return Ok(true);
        }
        processed += 1;
        timeout = Duration::ZERO;
    }
    Ok(app.should_quit())
}

/// Apply one terminal event. Returns `true` when the app should quit.
pub fn apply_event(app: &mut App, event: Event) -> bool {
    match event {
        Event::Key(key) => {
            // Handle press + repeat events (ignore releases)
            if !matches!(key.kind, KeyEventKind::Release) {
                handle_key(app, key);
            }
        }
        Event::Paste(text) => {
            debug!(bytes = text.len(), "Paste");
            app.draft_mut().enter_text(&text);
        }
        _ => {}
    }
    app.should_quit()
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => app.request_quit(),
        KeyCode::Char('c' | 'd') if ctrl => app.request_quit(),
        KeyCode::Char('l') if ctrl => {
            app.submit("clear");
        }
        KeyCode::Char('u') if ctrl => app.draft_mut().set_text(String::new()),
        KeyCode::Enter => {
            app.submit_draft();
        }
        // Transcript scrolling (Ctrl+arrows, Ctrl+Home/End, PageUp/PageDown)
        KeyCode::Up if ctrl => app.scroll_mut().up(),
        KeyCode::Down if ctrl => app.scroll_mut().down(),
        KeyCode::Home if ctrl => app.scroll_mut().to_top(),
        KeyCode::End if ctrl => app.scroll_mut().to_bottom(),
        // Navigate command history (Up/Down)
        KeyCode::Up => app.history_up(),
        KeyCode::Down => app.history_down(),
        KeyCode::PageUp => app.scroll_mut().page_up(),
        KeyCode::PageDown => app.scroll_mut().page_down(),
        KeyCode::Backspace => app.draft_mut().delete_char(),
        KeyCode::Delete => app.draft_mut().delete_char_forward(),
        KeyCode::Left => app.draft_mut().move_cursor_left(),
        KeyCode::Right => app.draft_mut().move_cursor_right(),
        KeyCode::Home => app.draft_mut().move_cursor_home(),
        KeyCode::End => app.draft_mut().move_cursor_end(),
        // Ignore \r: Enter submits and paste folds line breaks.
        KeyCode::Char(c) if !ctrl && c != '\r' => app.draft_mut().enter_char(c),
        _ => {}
    }
}
