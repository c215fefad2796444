//! Outbound client commands.
//!
//! # Reference
//! - RFC 2812: Internet Relay Chat: Client Protocol

/// A client intent that maps to exactly one outbound line.
///
/// `Display` renders the line without a terminator; text arguments have
/// CR, LF and NUL removed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Command {
    /// `USER username * * :username`
    USER(String),
    /// `NICK nickname`
    NICK(String),
    /// `PRIVMSG target :text`
    PRIVMSG(String, String),
    /// `JOIN channel`
    JOIN(String),
    /// `PART channel`
    PART(String),
    /// `QUIT :message`
    QUIT(String),
    /// `MODE channel modes`
    MODE(String, String),
    /// `KICK channel nick :message`
    KICK(String, String, String),
    /// `TOPIC channel :topic`
    TOPIC(String, String),
    /// `NAMES channel`
    NAMES(String),
}
