//! Line protocol definitions
//!
//! The wire format is newline-delimited UTF-8 text with no framing beyond
//! the delimiter. This module classifies inbound lines and formats the
//! broadcast lines the server fans out.

/// Prefix that marks a line as a command
pub const COMMAND_PREFIX: char = '/';

/// A single line received from a client, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLine {
    /// Blank after trimming; ignored by the session
    Empty,
    /// Command line: whitespace-separated tokens, name first
    Command(Vec<String>),
    /// Plain chat text, broadcast to the whole room
    Chat(String),
}

/// Classify a raw inbound line
///
/// Surrounding whitespace is trimmed first. A line starting with `/` is
/// tokenized on whitespace; anything else non-empty is chat text.
pub fn classify(raw: &str) -> InputLine {
    let line = raw.trim();
    if line.is_empty() {
        return InputLine::Empty;
    }
    if line.starts_with(COMMAND_PREFIX) {
        let tokens = line.split_whitespace().map(str::to_string).collect();
        return InputLine::Command(tokens);
    }
    InputLine::Chat(line.to_string())
}

/// Format a chat line for broadcast to the room
pub fn broadcast_line(username: &str, text: &str) -> String {
    format!("{username}> {text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_empty() {
        assert_eq!(classify(""), InputLine::Empty);
        assert_eq!(classify("   "), InputLine::Empty);
        assert_eq!(classify("\t\r\n"), InputLine::Empty);
    }

    #[test]
    fn test_classify_chat() {
        assert_eq!(classify("hello there"), InputLine::Chat("hello there".to_string()));
        // Surrounding whitespace is stripped, inner whitespace kept
        assert_eq!(classify("  hi  all \n"), InputLine::Chat("hi  all".to_string()));
    }

    #[test]
    fn test_classify_command_tokens() {
        let InputLine::Command(tokens) = classify("/msg bob hello there") else {
            panic!("expected a command");
        };
        assert_eq!(tokens, vec!["/msg", "bob", "hello", "there"]);
    }

    #[test]
    fn test_classify_command_extra_whitespace() {
        let InputLine::Command(tokens) = classify("  /users   ") else {
            panic!("expected a command");
        };
        assert_eq!(tokens, vec!["/users"]);
    }

    #[test]
    fn test_classify_bare_slash_is_command() {
        assert_eq!(
            classify("/"),
            InputLine::Command(vec!["/".to_string()])
        );
    }

    #[test]
    fn test_broadcast_line_format() {
        assert_eq!(broadcast_line("alice", "hi all"), "alice> hi all");
    }
}
