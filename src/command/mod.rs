//! Command formatting: caller intents to outbound lines.
//!
//! Every function here is pure and returns one line without a terminator.

mod serialize;
mod types;

pub use self::types::Command;

/// The registration handshake: `USER` then `NICK`, in that order.
///
/// ```
/// use slirc_client::command::handshake;
///
/// assert_eq!(
///     handshake("websocket", "bot"),
///     ["USER websocket * * :websocket", "NICK bot"]
/// );
/// ```
pub fn handshake(username: &str, nick: &str) -> [String; 2] {
    [
        Command::USER(username.to_owned()).to_string(),
        Command::NICK(nick.to_owned()).to_string(),
    ]
}

/// `PRIVMSG <target> :<message>`
///
/// ```
/// assert_eq!(
///     slirc_client::command::privmsg("#room", "hi there"),
///     "PRIVMSG #room :hi there"
/// );
/// ```
pub fn privmsg(target: &str, message: &str) -> String {
    Command::PRIVMSG(target.to_owned(), message.to_owned()).to_string()
}

/// `NICK <new_nick>`
pub fn nick(new_nick: &str) -> String {
    Command::NICK(new_nick.to_owned()).to_string()
}

/// `JOIN <channel>`
pub fn join(channel: &str) -> String {
    Command::JOIN(channel.to_owned()).to_string()
}

/// `PART <channel>`
pub fn part(channel: &str) -> String {
    Command::PART(channel.to_owned()).to_string()
}

/// `QUIT :<message>`
pub fn quit(message: &str) -> String {
    Command::QUIT(message.to_owned()).to_string()
}

/// `MODE <channel> <mode>`
pub fn mode(channel: &str, mode: &str) -> String {
    Command::MODE(channel.to_owned(), mode.to_owned()).to_string()
}

/// `KICK <channel> <nick> :<message>`
pub fn kick(channel: &str, nick: &str, message: &str) -> String {
    Command::KICK(channel.to_owned(), nick.to_owned(), message.to_owned()).to_string()
}

/// `TOPIC <channel> :<topic>`
pub fn topic(channel: &str, topic: &str) -> String {
    Command::TOPIC(channel.to_owned(), topic.to_owned()).to_string()
}

/// `NAMES <channel>`
pub fn names(channel: &str) -> String {
    Command::NAMES(channel.to_owned()).to_string()
}
