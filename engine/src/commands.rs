//! Command routing for the terminal.
//!
//! Builtins are recognized by their first token and always win over solution
//! matching. Everything else is offered to the solution matcher; a line
//! nothing accepts becomes `Command not found`.

use tracing::{debug, info};

use ctf_types::sanitize_terminal_text;

use crate::decode::decode;
use crate::error::CommandError;
use crate::matcher::{self, Attempt};
use crate::registry::Registry;
use crate::sandbox::{self, Resource, SECRET_TARGET, secret};
use crate::session::Session;

#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

const COMMAND_SPECS: &[CommandSpec] = &[
    CommandSpec {
        name: "help",
        usage: "help",
        description: "Show this help message",
    },
    CommandSpec {
        name: "challenges",
        usage: "challenges",
        description: "List all CTF challenges",
    },
    CommandSpec {
        name: "status",
        usage: "status",
        description: "Show solved challenges",
    },
    CommandSpec {
        name: "secrets",
        usage: "secrets",
        description: "List discovered secrets",
    },
    CommandSpec {
        name: "clear",
        usage: "clear",
        description: "Clear terminal",
    },
    CommandSpec {
        name: "whoami",
        usage: "whoami",
        description: "Show unlocked information",
    },
    CommandSpec {
        name: "solve",
        usage: "solve <id>",
        description: "Attempt to solve a challenge",
    },
    CommandSpec {
        name: "hint",
        usage: "hint <id>",
        description: "Get a hint for a challenge",
    },
    CommandSpec {
        name: "steps",
        usage: "steps <id>",
        description: "Walk through a challenge's solution",
    },
    CommandSpec {
        name: "decode",
        usage: "decode <text>",
        description: "Decode base64 or binary",
    },
    CommandSpec {
        name: "curl",
        usage: "curl <path>",
        description: "Fetch a page from the web server",
    },
    CommandSpec {
        name: "cat",
        usage: "cat <file>",
        description: "Print a file",
    },
    CommandSpec {
        name: "ls",
        usage: "ls",
        description: "List files",
    },
];

#[must_use]
pub fn command_specs() -> &'static [CommandSpec] {
    COMMAND_SPECS
}

/// The fixed `help` output.
#[must_use]
pub fn command_help_lines() -> Vec<String> {
    std::iter::once("Available commands:".to_string())
        .chain(
            COMMAND_SPECS
                .iter()
                .map(|spec| format!("  {:<14}- {}", spec.usage, spec.description)),
        )
        .collect()
}

/// Builtin whose name equals `head` (already case-folded).
#[must_use]
pub fn builtin_named(head: &str) -> Option<&'static str> {
    COMMAND_SPECS
        .iter()
        .find(|spec| spec.name == head)
        .map(|spec| spec.name)
}

/// Parsed command with typed arguments. Arguments keep their original case.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Command<'a> {
    Help,
    Challenges,
    Status,
    Secrets,
    Clear,
    Whoami,
    Solve(Option<&'a str>),
    Hint(Option<&'a str>),
    Steps(Option<&'a str>),
    Decode(Option<&'a str>),
    Curl(Option<&'a str>),
    Cat(Option<&'a str>),
    Ls,
    Attempt(&'a str),
    Empty,
}

impl<'a> Command<'a> {
    /// Parse a raw line into a typed Command.
    pub(crate) fn parse(raw: &'a str) -> Self {
        let line = raw.trim();
        if line.is_empty() {
            return Command::Empty;
        }

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then_some(rest);

        match head.to_lowercase().as_str() {
            "help" => Command::Help,
            "challenges" => Command::Challenges,
            "status" => Command::Status,
            "secrets" => Command::Secrets,
            "clear" => Command::Clear,
            "whoami" => Command::Whoami,
            "solve" => Command::Solve(arg),
            "hint" => Command::Hint(arg),
            "steps" => Command::Steps(arg),
            "decode" => Command::Decode(arg),
            "curl" => Command::Curl(arg),
            "cat" => Command::Cat(arg),
            "ls" => Command::Ls,
            _ => Command::Attempt(line),
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Challenges => "challenges",
            Command::Status => "status",
            Command::Secrets => "secrets",
            Command::Clear => "clear",
            Command::Whoami => "whoami",
            Command::Solve(_) => "solve",
            Command::Hint(_) => "hint",
            Command::Steps(_) => "steps",
            Command::Decode(_) => "decode",
            Command::Curl(_) => "curl",
            Command::Cat(_) => "cat",
            Command::Ls => "ls",
            Command::Attempt(_) => "attempt",
            Command::Empty => "empty",
        }
    }
}

/// What a submitted line did, for the host's status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Empty,
    Cleared,
    Printed,
    SecretDiscovered(&'static str),
    Solved(&'static str),
    Rejected(CommandError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Output lines appended to the transcript after the echo.
    pub lines: Vec<String>,
    pub outcome: Outcome,
}

impl Response {
    fn printed(lines: Vec<String>) -> Self {
        Self {
            lines,
            outcome: Outcome::Printed,
        }
    }

    fn rejected(err: CommandError) -> Self {
        Self {
            lines: err.lines(),
            outcome: Outcome::Rejected(err),
        }
    }
}

/// Glyphs that differ between the emoji and ASCII renditions.
#[derive(Debug, Clone, Copy)]
struct Markers {
    celebrate: &'static str,
    secret: &'static str,
    bullet: &'static str,
}

impl Markers {
    const fn new(ascii_only: bool) -> Self {
        if ascii_only {
            Self {
                celebrate: "[*]",
                secret: "[!]",
                bullet: "-",
            }
        } else {
            Self {
                celebrate: "🎉",
                secret: "🔓",
                bullet: "•",
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CommandRouter {
    registry: Registry,
    ascii_only: bool,
}

impl CommandRouter {
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            ascii_only: false,
        }
    }

    #[must_use]
    pub fn with_ascii_only(mut self, ascii_only: bool) -> Self {
        self.ascii_only = ascii_only;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub fn ascii_only(&self) -> bool {
        self.ascii_only
    }

    /// Process one submitted line: echo it, run it, append the output.
    pub fn submit(&self, session: &mut Session, raw: &str) -> Response {
        let command = Command::parse(raw);
        debug!(command = command.kind(), "Dispatching command");

        match command {
            Command::Clear => {
                session.clear_transcript();
                return Response {
                    lines: Vec::new(),
                    outcome: Outcome::Cleared,
                };
            }
            Command::Empty => {
                session.push_echo("");
                return Response {
                    lines: Vec::new(),
                    outcome: Outcome::Empty,
                };
            }
            _ => {}
        }

        session.push_echo(sanitize_terminal_text(raw.trim()).into_owned());
        let response = self.dispatch(session, command).unwrap_or_else(|err| {
            debug!(error = %err, "Command rejected");
            Response::rejected(err)
        });
        session.push_output(response.lines.iter().cloned());
        response
    }

    fn dispatch(
        &self,
        session: &mut Session,
        command: Command<'_>,
    ) -> Result<Response, CommandError> {
        let markers = Markers::new(self.ascii_only);
        match command {
            Command::Help => Ok(Response::printed(command_help_lines())),
            Command::Challenges => Ok(Response::printed(self.challenge_list(session))),
            Command::Status => Ok(Response::printed(self.status_lines(session, markers))),
            Command::Secrets => Ok(Response::printed(secret_lines(session, markers))),
            Command::Whoami => Ok(Response::printed(whoami_lines(session, markers))),
            Command::Solve(id) => {
                let challenge = self.lookup(id, "solve <id>")?;
                Ok(Response::printed(vec![
                    format!("Challenge: {}", challenge.title),
                    challenge.description.to_string(),
                    String::new(),
                    "Enter your solution:".to_string(),
                ]))
            }
            Command::Hint(id) => {
                let challenge = self.lookup(id, "hint <id>")?;
                Ok(Response::printed(vec![
                    format!("Hint for {}:", challenge.title),
                    challenge.hint.to_string(),
                ]))
            }
            Command::Steps(id) => {
                let challenge = self.lookup(id, "steps <id>")?;
                let mut lines = vec![format!("Walkthrough for {}:", challenge.title)];
                lines.extend(
                    challenge
                        .steps
                        .iter()
                        .enumerate()
                        .map(|(i, step)| format!("  {}. {step}", i + 1)),
                );
                Ok(Response::printed(lines))
            }
            Command::Decode(payload) => {
                let decoded = decode(payload.unwrap_or_default())?;
                let mut lines = vec![format!("Decoded ({}):", decoded.encoding.as_str())];
                lines.extend(decoded.text.lines().map(|line| format!("  {line}")));
                Ok(reveal(session, lines, Some(secret::DECODING), markers))
            }
            Command::Curl(path) => {
                let path = path.ok_or(CommandError::MissingArgument("curl <path>"))?;
                Ok(match sandbox::fetch(path) {
                    Some(resource) => serve(session, resource, markers),
                    None => Response::printed(sandbox::not_found(path)),
                })
            }
            Command::Cat(file) => {
                let file = file.ok_or(CommandError::MissingArgument("cat <file>"))?;
                let resource = sandbox::read_file(file, session)?;
                Ok(serve(session, resource, markers))
            }
            Command::Ls => Ok(Response::printed(sandbox::listing())),
            Command::Attempt(line) => self.attempt(session, line),
            Command::Clear | Command::Empty => Ok(Response {
                lines: Vec::new(),
                outcome: Outcome::Empty,
            }),
        }
    }

    fn lookup(
        &self,
        id: Option<&str>,
        usage: &'static str,
    ) -> Result<&'static ctf_types::Challenge, CommandError> {
        let id = id.ok_or(CommandError::MissingArgument(usage))?;
        self.registry
            .get(id)
            .ok_or_else(|| CommandError::UnknownChallengeId(id.to_string()))
    }

    fn attempt(&self, session: &mut Session, line: &str) -> Result<Response, CommandError> {
        match matcher::attempt(&self.registry, session, line) {
            Attempt::Solved(found) => Ok(Response {
                lines: matcher::success_block(
                    found.challenge,
                    session.solved_count(),
                    self.registry.len(),
                    self.ascii_only,
                ),
                outcome: Outcome::Solved(found.challenge.id),
            }),
            Attempt::AlreadySolved(challenge) => Err(CommandError::AlreadySolved(challenge.id)),
            Attempt::NoMatch => Err(CommandError::UnknownCommand(
                sanitize_terminal_text(line).into_owned(),
            )),
        }
    }

    fn challenge_list(&self, session: &Session) -> Vec<String> {
        let mut lines = vec!["Available CTF Challenges:".to_string(), String::new()];
        lines.extend(self.registry.challenges().iter().map(|challenge| {
            let marker = if session.is_solved(challenge.id) {
                "[SOLVED]"
            } else {
                "[LOCKED]"
            };
            format!(
                "{}: {} ({}, {}) {marker}",
                challenge.id, challenge.title, challenge.difficulty, challenge.category
            )
        }));
        lines
    }

    fn status_lines(&self, session: &Session, markers: Markers) -> Vec<String> {
        let solved = session.solved_count();
        let total = self.registry.len();
        let mut lines = vec![
            format!("Solved: {solved}/{total} challenges"),
            format!(
                "Secrets: {}/{SECRET_TARGET} discovered",
                session.discovered_secrets().len()
            ),
        ];
        if solved == total {
            lines.push(format!(
                "{} All challenges completed! You've unlocked all information!",
                markers.celebrate
            ));
        }
        lines
    }
}

fn whoami_lines(session: &Session, markers: Markers) -> Vec<String> {
    if session.unlocked_rewards().is_empty() {
        return vec![
            "No information unlocked yet. Solve challenges to learn more about me!".to_string(),
        ];
    }
    let mut lines = vec!["Unlocked Information:".to_string(), String::new()];
    lines.extend(
        session
            .unlocked_rewards()
            .iter()
            .map(|reward| format!("{} {reward}", markers.bullet)),
    );
    lines
}

fn secret_lines(session: &Session, markers: Markers) -> Vec<String> {
    if session.discovered_secrets().is_empty() {
        return vec!["No secrets discovered yet. Try ls, cat, curl and decode.".to_string()];
    }
    let mut lines = vec!["Discovered secrets:".to_string(), String::new()];
    lines.extend(
        session
            .discovered_secrets()
            .iter()
            .map(|label| format!("{} {label}", markers.bullet)),
    );
    lines
}

fn serve(session: &mut Session, resource: &Resource, markers: Markers) -> Response {
    let lines = resource.lines.iter().map(ToString::to_string).collect();
    reveal(session, lines, resource.secret, markers)
}

/// Record `secret` and announce it if it is new.
fn reveal(
    session: &mut Session,
    mut lines: Vec<String>,
    secret: Option<&'static str>,
    markers: Markers,
) -> Response {
    match secret {
        Some(label) if session.record_secret(label) => {
            info!(
                secret = label,
                discovered = session.discovered_secrets().len(),
                "Secret discovered"
            );
            lines.push(String::new());
            lines.push(format!("{} Secret discovered: {label}", markers.secret));
            Response {
                lines,
                outcome: Outcome::SecretDiscovered(label),
            }
        }
        _ => Response::printed(lines),
    }
}
