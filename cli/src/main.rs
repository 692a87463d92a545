//! CTF terminal - binary entry point and terminal session management.
//!
//! # Architecture
//!
//! The binary bridges [`ctf_engine`] (session and routing) and [`ctf_tui`]
//! (rendering), providing RAII-based terminal management with guaranteed
//! cleanup.
//!
//! ```text
//! main() -> stdin is a TTY?  yes -> TerminalSession::new() -> run_app() -> App + TUI
//!                            no  -> run_line_mode()        -> App + stdout
//! ```
//!
//! # Event Loop
//!
//! The full-screen loop is synchronous:
//!
//! 1. Render frame
//! 2. Poll for input (up to one poll timeout) and drain queued events
//! 3. Stop when the app requests quit

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::{
    fs::{self, OpenOptions},
    io::{self, BufRead, IsTerminal, Stdout, Write, stdout},
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use ctf_engine::{App, Outcome, TerminalConfig, TranscriptLine};
use ctf_tui::{draw, handle_events};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // If we can't open a log file, prefer "no logs" over corrupting the TUI
    // by writing to stdout/stderr.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, std::fs::File)>, Vec<String>) {
    let candidates = log_file_candidates();
    let mut warnings = Vec::new();

    for candidate in candidates {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: next to the config file, normally ~/.ctf-terminal/logs/
    if let Some(config_path) = TerminalConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("ctf-terminal.log"));
    }

    // Fallback: ./.ctf-terminal/logs/ (useful in constrained environments)
    candidates.push(
        PathBuf::from(".ctf-terminal")
            .join("logs")
            .join("ctf-terminal.log"),
    );

    candidates
}

fn load_config() -> Option<TerminalConfig> {
    TerminalConfig::path().and_then(|path| load_config_from(&path))
}

/// A bad config file is not fatal. `load_from` has already logged it.
fn load_config_from(path: &Path) -> Option<TerminalConfig> {
    TerminalConfig::load_from(path).ok().flatten()
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnableBracketedPaste) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }
        if let Err(err) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            let _ = execute!(out, LeaveAlternateScreen, DisableBracketedPaste);
            return Err(err.into());
        }

        let terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), LeaveAlternateScreen, DisableBracketedPaste);
                return Err(err.into());
            }
        };

        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        );
        let _ = self.terminal.show_cursor();
    }
}

fn main() -> Result<()> {
    init_tracing();

    let config = load_config();
    let mut app = App::new(config.as_ref()).context("challenge catalog failed validation")?;

    if io::stdin().is_terminal() {
        let mut session = TerminalSession::new()?;
        run_app(&mut session.terminal, &mut app)?;
    } else {
        tracing::info!("stdin is not a terminal; running in line mode");
        run_line_mode(&mut app, io::stdin().lock(), &mut stdout().lock())?;
    }

    Ok(())
}

fn run_app<B>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        if handle_events(app)? {
            return Ok(());
        }
    }
}

/// One command per input line. Every transcript record a line adds is
/// written to `out`, so stdout shows exactly what the TUI would.
fn run_line_mode<R, W>(app: &mut App, input: R, out: &mut W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    write_records(out, app.transcript())?;

    for line in input.lines() {
        let line = line?;
        let start = app.transcript().len();
        let response = app.submit(&line);
        if response.outcome == Outcome::Cleared {
            continue;
        }
        write_records(out, app.transcript().get(start..).unwrap_or_default())?;
    }
    out.flush()?;
    Ok(())
}

fn write_records<W: Write>(out: &mut W, records: &[TranscriptLine]) -> io::Result<()> {
    for record in records {
        if record.is_input_echo {
            writeln!(out, "> {}", record.text)?;
        } else {
            writeln!(out, "{}", record.text)?;
        }
    }
    Ok(())
}
