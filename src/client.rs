//! Client facade: engine, hooks and a transport sink wired together.
//!
//! The transport collaborator calls [`Client::transport_opened`],
//! [`Client::line_received`], [`Client::transport_closed`] and
//! [`Client::transport_error`]; the client answers through its [`LineSink`].
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use slirc_client::{Client, ClientConfig, CommandExt};
//!
//! let sent = Rc::new(RefCell::new(Vec::<String>::new()));
//! let config = ClientConfig {
//!     nick: Some("bot".into()),
//!     ..ClientConfig::new("bridge.example.net", 7667)
//! };
//! let mut client = Client::new(config, Rc::clone(&sent)).unwrap();
//!
//! let mut sink = Rc::clone(&sent);
//! client.handlers_mut().on_connect(move || {
//!     sink.join("#room").unwrap();
//! });
//!
//! client.transport_opened().unwrap();
//! client.line_received(":server 376 bot :End of /MOTD command.").unwrap();
//!
//! assert_eq!(
//!     *sent.borrow(),
//!     vec!["USER websocket * * :websocket", "NICK bot", "JOIN #room"]
//! );
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, trace, warn};

use crate::command;
use crate::config::ClientConfig;
use crate::error::{ConfigError, SendError, TransportError};
use crate::handler::HandlerSet;
use crate::state::ConnectionMachine;

/// Quit message used by [`CommandExt::disconnect`].
pub const DEFAULT_QUIT_MESSAGE: &str = "bye";

/// The sending half of a transport.
pub trait LineSink {
    /// Send one line, without terminator.
    fn send_line(&mut self, line: &str) -> Result<(), SendError>;

    /// Close the transport.
    fn close(&mut self) -> Result<(), SendError>;
}

impl LineSink for Vec<String> {
    fn send_line(&mut self, line: &str) -> Result<(), SendError> {
        self.push(line.to_owned());
        Ok(())
    }

    fn close(&mut self) -> Result<(), SendError> {
        Ok(())
    }
}

impl<S: LineSink + ?Sized> LineSink for Rc<RefCell<S>> {
    fn send_line(&mut self, line: &str) -> Result<(), SendError> {
        self.borrow_mut().send_line(line)
    }

    fn close(&mut self) -> Result<(), SendError> {
        self.borrow_mut().close()
    }
}

/// Caller intents, available on every [`LineSink`].
pub trait CommandExt: LineSink {
    /// Send `PRIVMSG <target> :<message>`.
    fn send_message(&mut self, target: &str, message: &str) -> Result<(), SendError> {
        self.send_line(&command::privmsg(target, message))
    }

    /// Request a new nickname: `NICK <new_nick>`.
    fn change_nick(&mut self, new_nick: &str) -> Result<(), SendError> {
        self.send_line(&command::nick(new_nick))
    }

    /// `JOIN <channel>`
    fn join(&mut self, channel: &str) -> Result<(), SendError> {
        self.send_line(&command::join(channel))
    }

    /// `PART <channel>`
    fn part(&mut self, channel: &str) -> Result<(), SendError> {
        self.send_line(&command::part(channel))
    }

    /// `QUIT :<message>`. The transport stays open.
    fn quit(&mut self, message: &str) -> Result<(), SendError> {
        self.send_line(&command::quit(message))
    }

    /// `MODE <channel> <mode>`
    fn mode(&mut self, channel: &str, mode: &str) -> Result<(), SendError> {
        self.send_line(&command::mode(channel, mode))
    }

    /// `KICK <channel> <nick> :<message>`
    fn kick(&mut self, channel: &str, nick: &str, message: &str) -> Result<(), SendError> {
        self.send_line(&command::kick(channel, nick, message))
    }

    /// `TOPIC <channel> :<topic>`
    fn topic(&mut self, channel: &str, topic: &str) -> Result<(), SendError> {
        self.send_line(&command::topic(channel, topic))
    }

    /// `NAMES <channel>`
    fn names(&mut self, channel: &str) -> Result<(), SendError> {
        self.send_line(&command::names(channel))
    }

    /// `QUIT :bye`, then close the transport.
    fn disconnect(&mut self) -> Result<(), SendError> {
        self.quit(DEFAULT_QUIT_MESSAGE)?;
        self.close()
    }
}

impl<S: LineSink + ?Sized> CommandExt for S {}

/// One client session over one transport connection.
pub struct Client<S> {
    config: ClientConfig,
    machine: ConnectionMachine,
    handlers: HandlerSet,
    sink: S,
}

impl<S: LineSink> Client<S> {
    /// Validate `config` and build a client. Nothing is sent yet.
    pub fn new(config: ClientConfig, sink: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let machine = ConnectionMachine::new(config.nickname(), config.username());
        Ok(Self {
            config,
            machine,
            handlers: HandlerSet::new(),
            sink,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn machine(&self) -> &ConnectionMachine {
        &self.machine
    }

    /// Hook registration.
    pub fn handlers_mut(&mut self) -> &mut HandlerSet {
        &mut self.handlers
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Send the `USER`/`NICK` handshake, then fire the `open` hook.
    pub fn transport_opened(&mut self) -> Result<(), SendError> {
        info!(url = %self.config.url(), nick = %self.machine.nickname(), "transport open");
        for line in self.machine.handshake() {
            self.send_line(&line)?;
        }
        self.handlers.opened();
        Ok(())
    }

    /// Feed one received line. Replies are sent before hooks run.
    ///
    /// Only a failing sink is reported; uninterpretable lines are dropped.
    pub fn line_received(&mut self, raw: &str) -> Result<(), SendError> {
        let out = self.machine.on_line(raw);
        let sent = out.outbound.iter().try_for_each(|line| self.send_line(line));
        if let Err(ref e) = sent {
            warn!(error = %e, "failed to send reply");
        }
        for event in &out.events {
            let kind = event.kind();
            debug!(?kind, hooked = self.handlers.is_set(kind), "event");
            self.handlers.dispatch(event);
        }
        sent
    }

    pub fn transport_closed(&mut self, reason: Option<&str>) {
        info!(reason = reason.unwrap_or(""), "transport closed");
        self.handlers.closed(reason);
    }

    pub fn transport_error(&mut self, err: &TransportError) {
        warn!(error = %err, "transport error");
        self.handlers.failed(err);
    }
}

impl<S: LineSink> LineSink for Client<S> {
    fn send_line(&mut self, line: &str) -> Result<(), SendError> {
        trace!(line, "<==");
        self.sink.send_line(line)
    }

    fn close(&mut self) -> Result<(), SendError> {
        self.sink.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Phase;

    fn client() -> Client<Vec<String>> {
        let config = ClientConfig {
            nick: Some("bot".into()),
            ..ClientConfig::new("bridge", 7667)
        };
        Client::new(config, Vec::new()).unwrap()
    }

    #[test]
    fn test_new_fails_fast_without_address() {
        let err = Client::new(ClientConfig::default(), Vec::<String>::new()).err();
        assert_eq!(err, Some(ConfigError::MissingServer));
    }

    #[test]
    fn test_open_sends_handshake() {
        let mut client = client();
        client.transport_opened().unwrap();
        assert_eq!(
            client.sink(),
            &vec!["USER websocket * * :websocket", "NICK bot"]
        );
    }

    #[test]
    fn test_ping_reply_goes_to_sink() {
        let mut client = client();
        client.line_received("PING :abc").unwrap();
        assert_eq!(client.sink(), &vec!["PONG :abc"]);
    }

    #[test]
    fn test_commands_through_client() {
        let mut client = client();
        client.send_message("#room", "hi").unwrap();
        client.disconnect().unwrap();
        assert_eq!(client.sink(), &vec!["PRIVMSG #room :hi", "QUIT :bye"]);
    }

    #[test]
    fn test_registration_via_client() {
        let mut client = client();
        client.line_received(":s 433 * bot :in use").unwrap();
        client.line_received(":s 376 bot_ :End").unwrap();
        assert_eq!(client.machine().phase(), Phase::Registered);
        assert_eq!(client.machine().nickname(), "bot_");
        assert_eq!(client.sink(), &vec!["NICK bot_"]);
    }
}
