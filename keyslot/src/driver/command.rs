//! Parsing of command-file lines.
use keyslot_core::Key;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// A single table operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Insert(Key),
    Delete(Key),
    Search(Key),
    Print,
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Insert(key) => write!(f, "insert {}", key),
            Command::Delete(key) => write!(f, "delete {}", key),
            Command::Search(key) => write!(f, "search {}", key),
            Command::Print => f.write_str("print"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Missing key for command: {0}")]
    MissingKey(String),
    #[error("Invalid number format for command: {verb} {token}")]
    InvalidKey { verb: String, token: String },
}

/// Parses a whitespace-separated command line.
///
/// Returns `Ok(None)` for blank lines. Tokens after the key are ignored.
///
/// # Errors
///
/// - [`CommandError::UnknownCommand`] if the first token isn't `insert`, `delete`, `search` or
///   `print`.
/// - [`CommandError::MissingKey`] if a keyed command has no second token.
/// - [`CommandError::InvalidKey`] if the second token of a keyed command isn't an `i32`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let mut tokens = line.split_whitespace();
    let Some(verb) = tokens.next() else {
        return Ok(None);
    };

    let constructor: fn(Key) -> Command = match verb {
        "insert" => Command::Insert,
        "delete" => Command::Delete,
        "search" => Command::Search,
        "print" => return Ok(Some(Command::Print)),
        _ => return Err(CommandError::UnknownCommand(verb.to_string())),
    };

    let token = tokens
        .next()
        .ok_or_else(|| CommandError::MissingKey(verb.to_string()))?;
    let key = token.parse::<Key>().map_err(|_| CommandError::InvalidKey {
        verb: verb.to_string(),
        token: token.to_string(),
    })?;
    Ok(Some(constructor(key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse("insert 5"), Ok(Some(Command::Insert(5))));
        assert_eq!(parse("  delete\t-12  "), Ok(Some(Command::Delete(-12))));
        assert_eq!(parse("search 2147483647"), Ok(Some(Command::Search(i32::MAX))));
        assert_eq!(parse("print"), Ok(Some(Command::Print)));
        assert_eq!(parse("print 3"), Ok(Some(Command::Print)));
        assert_eq!(parse("insert 5 extra"), Ok(Some(Command::Insert(5))));
    }

    #[test]
    fn test_parse_blank_lines() {
        assert_eq!(parse(""), Ok(None));
        assert_eq!(parse("   \t "), Ok(None));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse("upsert 5"),
            Err(CommandError::UnknownCommand("upsert".to_string()))
        );
        assert_eq!(
            parse("insert"),
            Err(CommandError::MissingKey("insert".to_string()))
        );
        assert_eq!(
            parse("delete five"),
            Err(CommandError::InvalidKey {
                verb: "delete".to_string(),
                token: "five".to_string()
            })
        );
        assert!(matches!(
            parse("search 2147483648"),
            Err(CommandError::InvalidKey { .. })
        ));
    }

    #[test]
    fn test_display_round_trip() {
        for command in [
            Command::Insert(-3),
            Command::Delete(0),
            Command::Search(77),
            Command::Print,
        ] {
            assert_eq!(parse(&command.to_string()), Ok(Some(command)));
        }
    }
}
