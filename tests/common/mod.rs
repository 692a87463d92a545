//! Shared test utilities and fixtures

#![allow(dead_code)]

use ctf_engine::{App, CommandRouter, Registry, Response, Session, TerminalConfig};

/// A router over the built-in catalog.
pub fn router(ascii_only: bool) -> CommandRouter {
    CommandRouter::new(Registry::builtin().expect("builtin catalog")).with_ascii_only(ascii_only)
}

/// A fresh session with no banner.
pub fn session() -> Session {
    Session::new::<&str>(&[])
}

/// An app with default settings.
pub fn app() -> App {
    App::new(None).expect("builtin catalog")
}

/// An app built from an inline TOML config.
pub fn app_with_config(toml_text: &str) -> App {
    let config: TerminalConfig = toml::from_str(toml_text).expect("config parses");
    App::new(Some(&config)).expect("builtin catalog")
}

pub fn submit_all(router: &CommandRouter, session: &mut Session, lines: &[&str]) -> Vec<Response> {
    lines
        .iter()
        .map(|line| router.submit(session, line))
        .collect()
}

pub fn texts(session: &Session) -> Vec<String> {
    session
        .transcript()
        .iter()
        .map(|line| line.text.clone())
        .collect()
}
