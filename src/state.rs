//! Sans-IO connection engine for the client side of an IRC session.
//!
//! The engine does not perform I/O. It consumes raw lines in arrival order
//! and produces domain events plus the lines that must be sent back
//! (PONG replies and nickname retries).
//!
//! # Example
//!
//! ```
//! use slirc_client::state::{ConnectionMachine, Event, Phase};
//!
//! let mut machine = ConnectionMachine::new("bot", "websocket");
//!
//! // Keepalive works in every phase.
//! let out = machine.on_line("PING :tok");
//! assert_eq!(out.outbound, vec!["PONG :tok"]);
//!
//! // Collision before registration retries with a new nickname.
//! let out = machine.on_line(":server 433 * bot :Nickname is already in use");
//! assert_eq!(out.outbound, vec!["NICK bot_"]);
//!
//! let out = machine.on_line(":server 376 bot_ :End of /MOTD command.");
//! assert_eq!(out.events, vec![Event::Connected]);
//! assert_eq!(machine.phase(), Phase::Registered);
//! ```

use tracing::{debug, info, trace, warn};

use crate::casemap::irc_eq;
use crate::command;
use crate::message::ParsedLine;
use crate::response::Response;
use crate::util::strip_line_breaks;

/// Appended to the nickname when the server rejects it during registration.
pub const NICK_COLLISION_SUFFIX: &str = "_";

/// Registration progress of a connection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Handshake sent, end of MOTD not seen yet.
    #[default]
    Unregistered,
    /// Received 376. Never reverts for the lifetime of the connection.
    Registered,
}

/// Per-connection state, owned by exactly one [`ConnectionMachine`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionState {
    /// Registration progress.
    pub phase: Phase,
    /// Current nickname, as far as the client knows.
    pub nickname: String,
    /// Username sent in the `USER` line.
    pub username: String,
}

/// Domain events produced from server lines.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// Registration completed.
    Connected,
    /// A PRIVMSG to us or to a channel we are in.
    Message { from: String, text: String },
    /// Someone (possibly us) joined a channel.
    Join {
        channel: String,
        nick: Option<String>,
    },
    /// A names reply for a channel.
    Names { channel: String, names: Vec<String> },
    /// A nickname change was rejected after registration.
    NickInUse,
}

/// Result of feeding one line to the engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineOutput {
    /// Events to dispatch to handlers, in order.
    pub events: Vec<Event>,
    /// Lines to send to the server, in order.
    pub outbound: Vec<String>,
}

impl LineOutput {
    fn event(event: Event) -> Self {
        LineOutput {
            events: vec![event],
            outbound: Vec::new(),
        }
    }

    fn send(line: String) -> Self {
        LineOutput {
            events: Vec::new(),
            outbound: vec![line],
        }
    }

    /// True when the line produced nothing.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.outbound.is_empty()
    }
}

/// Sans-IO state machine for one IRC connection.
///
/// Create one per transport connection and drop it when the transport
/// closes. It is not meant to be shared between threads; lines must be fed
/// one at a time in the order they arrive.
#[derive(Clone, Debug)]
pub struct ConnectionMachine {
    state: ConnectionState,
}

impl ConnectionMachine {
    /// Create a machine in the `Unregistered` phase.
    #[must_use]
    pub fn new(nickname: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            state: ConnectionState {
                phase: Phase::Unregistered,
                nickname: nickname.into(),
                username: username.into(),
            },
        }
    }

    #[must_use]
    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn nickname(&self) -> &str {
        &self.state.nickname
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.state.username
    }

    /// The `USER` and `NICK` lines that open registration.
    #[must_use]
    pub fn handshake(&self) -> [String; 2] {
        command::handshake(&self.state.username, &self.state.nickname)
    }

    /// Feed one raw line from the transport.
    ///
    /// Never fails. Lines that cannot be interpreted produce an empty output.
    #[must_use]
    pub fn on_line(&mut self, raw: &str) -> LineOutput {
        let line = raw.trim_end_matches(['\r', '\n']);
        trace!(line, "==>");

        // PONG must echo the PING token verbatim, so this bypasses the parser.
        if let Some(token) = ping_token(line) {
            return LineOutput::send(format!("PONG{}", strip_line_breaks(token)));
        }

        let msg = ParsedLine::parse(line);
        if msg.is_empty() {
            debug!(line, "dropping line without a command");
            return LineOutput::default();
        }

        let mut out = LineOutput::default();

        if self.state.phase == Phase::Unregistered {
            match msg.response() {
                Some(Response::RPL_ENDOFMOTD) => {
                    self.state.phase = Phase::Registered;
                    info!(nick = %self.state.nickname, "registration complete");
                    out.events.push(Event::Connected);
                }
                Some(Response::ERR_NICKNAMEINUSE) => return self.retry_nickname(),
                _ => {}
            }
            // Re-checked so the line completing registration reaches dispatch.
            if self.state.phase == Phase::Unregistered {
                return out;
            }
        }

        let dispatched = self.dispatch_registered(&msg);
        out.events.extend(dispatched.events);
        out.outbound.extend(dispatched.outbound);
        out
    }

    fn retry_nickname(&mut self) -> LineOutput {
        let rejected = self.state.nickname.clone();
        self.state.nickname.push_str(NICK_COLLISION_SUFFIX);
        warn!(
            rejected = %rejected,
            retry = %self.state.nickname,
            "nickname in use during registration, retrying"
        );
        LineOutput::send(command::nick(&self.state.nickname))
    }

    fn dispatch_registered(&mut self, msg: &ParsedLine) -> LineOutput {
        match msg.command.as_str() {
            "PRIVMSG" => {
                let Some(from) = msg.source_nick() else {
                    debug!("PRIVMSG without a source, ignoring");
                    return LineOutput::default();
                };
                let text = msg.trailing.as_deref().or_else(|| msg.param(1)).unwrap_or("");
                LineOutput::event(Event::Message {
                    from: from.to_owned(),
                    text: text.to_owned(),
                })
            }
            "JOIN" => {
                let channel = msg
                    .trailing
                    .as_deref()
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .or_else(|| msg.param(0));
                match channel {
                    Some(channel) => LineOutput::event(Event::Join {
                        channel: channel.to_owned(),
                        nick: msg.source_nick().map(str::to_owned),
                    }),
                    None => LineOutput::default(),
                }
            }
            "NICK" => {
                self.track_nick_change(msg);
                LineOutput::default()
            }
            _ => match msg.response() {
                Some(Response::ERR_NICKNAMEINUSE) => {
                    warn!(nick = %self.state.nickname, "nickname change rejected");
                    LineOutput::event(Event::NickInUse)
                }
                Some(Response::RPL_NAMREPLY) => names_reply(msg)
                    .map(LineOutput::event)
                    .unwrap_or_default(),
                _ => LineOutput::default(),
            },
        }
    }

    /// Follow our own nickname when the server confirms a change.
    fn track_nick_change(&mut self, msg: &ParsedLine) {
        let Some(old) = msg.source_nick() else {
            return;
        };
        if !irc_eq(old, &self.state.nickname) {
            return;
        }
        let new = msg.trailing.as_deref().or_else(|| msg.param(0));
        if let Some(new) = new.map(str::trim).filter(|n| !n.is_empty()) {
            debug!(old, new, "nickname changed");
            self.state.nickname = new.to_owned();
        }
    }
}

/// The text after `PING` if the line starts with the PING token.
fn ping_token(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("PING")?;
    (rest.is_empty() || rest.starts_with(' ')).then_some(rest)
}

/// `:server 353 me = #chan :nick1 nick2` → names event.
fn names_reply(msg: &ParsedLine) -> Option<Event> {
    let marker = msg
        .params
        .iter()
        .position(|p| matches!(p.as_str(), "=" | "@" | "*"))?;
    let channel = msg.param(marker + 1)?;
    let names = msg
        .trailing
        .as_deref()
        .unwrap_or("")
        .split_whitespace()
        .map(str::to_owned)
        .collect();
    Some(Event::Names {
        channel: channel.to_owned(),
        names,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registered() -> ConnectionMachine {
        let mut machine = ConnectionMachine::new("bot", "websocket");
        let _ = machine.on_line(":server 376 bot :End of /MOTD command.");
        machine
    }

    #[test]
    fn test_handshake_order() {
        let machine = ConnectionMachine::new("bot", "websocket");
        assert_eq!(
            machine.handshake(),
            ["USER websocket * * :websocket", "NICK bot"]
        );
    }

    #[test]
    fn test_ping_in_every_phase() {
        let mut machine = ConnectionMachine::new("bot", "websocket");
        let out = machine.on_line("PING :tok");
        assert_eq!(out.outbound, vec!["PONG :tok"]);
        assert!(out.events.is_empty());

        let mut machine = registered();
        let out = machine.on_line("PING :tok\r\n");
        assert_eq!(out.outbound, vec!["PONG :tok"]);
        assert!(out.events.is_empty());
    }

    #[test]
    fn test_ping_token_forms() {
        let mut machine = ConnectionMachine::new("bot", "websocket");
        assert_eq!(machine.on_line("PING").outbound, vec!["PONG"]);
        assert_eq!(machine.on_line("PING irc.net").outbound, vec!["PONG irc.net"]);
        assert!(machine.on_line("PINGER :x").is_empty());
    }

    #[test]
    fn test_pong_never_carries_line_breaks() {
        let mut machine = ConnectionMachine::new("bot", "websocket");
        let out = machine.on_line("PING :a\rQUIT :b\0c\r\n");
        assert_eq!(out.outbound, vec!["PONG :aQUIT :bc"]);
    }

    #[test]
    fn test_registration_fires_once() {
        let mut machine = ConnectionMachine::new("bot", "websocket");
        let first = machine.on_line(":server 376 bot :End of /MOTD command.");
        assert_eq!(first.events, vec![Event::Connected]);
        assert_eq!(machine.phase(), Phase::Registered);

        let second = machine.on_line(":server 376 bot :End of /MOTD command.");
        assert!(second.is_empty());
        assert_eq!(machine.phase(), Phase::Registered);
    }

    #[test]
    fn test_nothing_dispatched_before_registration() {
        let mut machine = ConnectionMachine::new("bot", "websocket");
        assert!(machine.on_line(":alice!a@h PRIVMSG bot :early").is_empty());
        assert!(machine.on_line(":bot!w@h JOIN :#room").is_empty());
        assert!(machine.on_line(":server 353 bot = #room :bot").is_empty());
    }

    #[test]
    fn test_collision_before_registration() {
        let mut machine = ConnectionMachine::new("bot", "websocket");
        let out = machine.on_line(":server 433 * bot :Nickname in use");
        assert_eq!(out.outbound, vec!["NICK bot_"]);
        assert!(out.events.is_empty());
        assert_eq!(machine.phase(), Phase::Unregistered);
        assert_eq!(machine.nickname(), "bot_");

        let out = machine.on_line(":server 433 * bot_ :Nickname in use");
        assert_eq!(out.outbound, vec!["NICK bot__"]);
    }

    #[test]
    fn test_collision_after_registration() {
        let mut machine = registered();
        let out = machine.on_line(":server 433 bot taken :Nickname in use");
        assert_eq!(out.events, vec![Event::NickInUse]);
        assert!(out.outbound.is_empty());
        assert_eq!(machine.nickname(), "bot");
    }

    #[test]
    fn test_privmsg() {
        let mut machine = registered();
        let out = machine.on_line(":alice!~a@host PRIVMSG #room :hello there");
        assert_eq!(
            out.events,
            vec![Event::Message {
                from: "alice".into(),
                text: "hello there".into()
            }]
        );
        assert!(out.outbound.is_empty());
    }

    #[test]
    fn test_join_trailing_and_param_forms() {
        let mut machine = registered();
        let out = machine.on_line(":alice!a@h JOIN :#room ");
        assert_eq!(
            out.events,
            vec![Event::Join {
                channel: "#room".into(),
                nick: Some("alice".into())
            }]
        );

        let out = machine.on_line(":bob!b@h JOIN #other");
        assert_eq!(
            out.events,
            vec![Event::Join {
                channel: "#other".into(),
                nick: Some("bob".into())
            }]
        );
    }

    #[test]
    fn test_names_reply() {
        let mut machine = registered();
        let out = machine.on_line(":server 353 bot = #room :alice bob carol");
        assert_eq!(
            out.events,
            vec![Event::Names {
                channel: "#room".into(),
                names: vec!["alice".into(), "bob".into(), "carol".into()]
            }]
        );

        let out = machine.on_line(":server 353 bot @ #secret :@op +voice");
        assert_eq!(
            out.events,
            vec![Event::Names {
                channel: "#secret".into(),
                names: vec!["@op".into(), "+voice".into()]
            }]
        );

        assert!(machine.on_line(":server 353 bot #nomarker :x").is_empty());
    }

    #[test]
    fn test_unknown_lines_ignored() {
        let mut machine = registered();
        assert!(machine.on_line(":server 372 bot :- motd text").is_empty());
        assert!(machine.on_line("garbage").is_empty());
        assert!(machine.on_line("").is_empty());
        assert!(machine.on_line(":::: :: :").is_empty());
        assert_eq!(machine.phase(), Phase::Registered);
    }

    #[test]
    fn test_own_nick_change_tracked() {
        let mut machine = registered();
        assert!(machine.on_line(":BOT!w@h NICK :robot").is_empty());
        assert_eq!(machine.nickname(), "robot");

        let _ = machine.on_line(":alice!a@h NICK :alicia");
        assert_eq!(machine.nickname(), "robot");
    }
}
