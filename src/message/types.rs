use std::convert::Infallible;
use std::fmt::{self, Write};
use std::str::FromStr;

use crate::response::Response;

use super::nom_parser::RawLine;

/// One IRC protocol line, split into its parts.
///
/// Parsing is total: any received text produces a `ParsedLine`, possibly
/// with an empty `command`, so a noisy bridge can never make the client fail.
///
/// # Example
///
/// ```
/// use slirc_client::ParsedLine;
///
/// let line = ParsedLine::parse(":alice!~a@host PRIVMSG #room :hello there");
/// assert_eq!(line.prefix.as_deref(), Some("alice!~a@host"));
/// assert_eq!(line.command, "PRIVMSG");
/// assert_eq!(line.params, vec!["#room"]);
/// assert_eq!(line.trailing.as_deref(), Some("hello there"));
/// assert_eq!(line.source_nick(), Some("alice"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedLine {
    /// Sender identity without the leading `:`, e.g. `nick!user@host`.
    pub prefix: Option<String>,
    /// Command word or three-digit numeric, uppercased.
    pub command: String,
    /// Middle parameters.
    pub params: Vec<String>,
    /// Final `:`-introduced parameter. `Some("")` differs from `None`.
    pub trailing: Option<String>,
}

impl ParsedLine {
    /// Parse one raw line. CR/LF at the end are ignored.
    pub fn parse(raw: &str) -> Self {
        let RawLine {
            prefix,
            command,
            params,
            trailing,
        } = RawLine::tokenize(raw);

        ParsedLine {
            prefix: prefix.map(str::to_owned),
            command: command.to_ascii_uppercase(),
            params: params.into_iter().map(str::to_owned).collect(),
            trailing: trailing.map(str::to_owned),
        }
    }

    /// True when no command could be read from the line.
    pub fn is_empty(&self) -> bool {
        self.command.is_empty()
    }

    /// Nickname of the sender: the prefix up to its first `!`.
    pub fn source_nick(&self) -> Option<&str> {
        let prefix = self.prefix.as_deref()?;
        Some(prefix.split_once('!').map_or(prefix, |(nick, _)| nick))
    }

    /// The modeled numeric this line carries, if any.
    pub fn response(&self) -> Option<Response> {
        Response::from_code(&self.command)
    }

    /// Get the middle parameter at `idx`.
    pub fn param(&self, idx: usize) -> Option<&str> {
        self.params.get(idx).map(String::as_str)
    }
}

impl FromStr for ParsedLine {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ParsedLine::parse(s))
    }
}

impl fmt::Display for ParsedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            f.write_char(':')?;
            f.write_str(prefix)?;
            f.write_char(' ')?;
        }
        f.write_str(&self.command)?;
        for param in &self.params {
            f.write_char(' ')?;
            f.write_str(param)?;
        }
        if let Some(trailing) = &self.trailing {
            f.write_str(" :")?;
            f.write_str(trailing)?;
        }
        Ok(())
    }
}
