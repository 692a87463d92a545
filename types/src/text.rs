//! Small pure text helpers for command lines and terminal output.

use std::borrow::Cow;

/// ASCII escape character that starts ANSI sequences.
const ESC: char = '\x1b';
/// ASCII bell character that can terminate OSC sequences.
const BEL: char = '\x07';

/// Comparison form of a submitted line: trimmed and lowercased.
///
/// Only used to decide what a line means. Echoed text and free-text
/// arguments keep the visitor's original casing.
#[must_use]
pub fn normalize_command(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Collapse every run of whitespace into a single space.
#[must_use]
pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip terminal escape sequences and control characters.
///
/// Visitor input and pasted text are rendered back verbatim, so anything
/// that could move the cursor or rewrite the screen is removed first.
/// Tabs survive; every other C0/C1 control and DEL is dropped.
#[must_use]
pub fn sanitize_terminal_text(input: &str) -> Cow<'_, str> {
    if !input.chars().any(is_unsafe) {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ESC {
            match chars.peek() {
                // CSI: parameters then a final byte in '@'..='~'
                Some('[') => {
                    chars.next();
                    for next in chars.by_ref() {
                        if ('@'..='~').contains(&next) {
                            break;
                        }
                    }
                }
                // OSC: terminated by BEL or ESC '\'
                Some(']') => {
                    chars.next();
                    while let Some(next) = chars.next() {
                        if next == BEL {
                            break;
                        }
                        if next == ESC && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                Some(_) => {
                    chars.next();
                }
                None => {}
            }
        } else if !is_unsafe(c) {
            result.push(c);
        }
    }
    Cow::Owned(result)
}

fn is_unsafe(c: char) -> bool {
    c != '\t' && (c.is_control() || c == ESC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_command("  HeLLo World \n"), "hello world");
        assert_eq!(normalize_command("   "), "");
    }

    #[test]
    fn collapse_whitespace_joins_runs() {
        assert_eq!(collapse_whitespace("a \t b\n\nc"), "a b c");
        assert_eq!(collapse_whitespace("  "), "");
    }

    #[test]
    fn clean_text_is_borrowed() {
        let clean = "FLAG{ok}\twith tab";
        assert!(matches!(sanitize_terminal_text(clean), Cow::Borrowed(_)));
    }

    #[test]
    fn csi_sequences_are_stripped() {
        assert_eq!(sanitize_terminal_text("Hello\x1b[2JWorld"), "HelloWorld");
        assert_eq!(sanitize_terminal_text("\x1b[31mred\x1b[0m"), "red");
    }

    #[test]
    fn osc_sequences_are_stripped() {
        assert_eq!(
            sanitize_terminal_text("a\x1b]52;c;ZXZpbA==\x07b"),
            "ab"
        );
        assert_eq!(sanitize_terminal_text("a\x1b]8;;x\x1b\\b"), "ab");
    }

    #[test]
    fn control_characters_are_dropped() {
        assert_eq!(sanitize_terminal_text("a\x00b\x7fc\rd\ne"), "abcde");
        assert_eq!(sanitize_terminal_text("x\u{9b}y"), "xy");
    }
}
