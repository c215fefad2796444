//! # slirc-client
//!
//! A client-side IRC engine for WebSocket-to-IRC bridges.
//!
//! ## Features
//!
//! - Total line parser: every received line yields a [`ParsedLine`]
//! - Sans-IO connection engine: registration, keepalive and nickname collisions
//! - Single-slot hooks for messages, joins, names and transport events
//! - Newline-safe command formatting
//! - Optional Tokio WebSocket transport
//!
//! ## Quick Start
//!
//! ### Driving the engine directly
//!
//! ```rust
//! use slirc_client::state::{ConnectionMachine, Event};
//!
//! let mut machine = ConnectionMachine::new("bot", "websocket");
//! let _ = machine.on_line(":server 376 bot :End of /MOTD command.");
//!
//! let out = machine.on_line(":alice!~a@host PRIVMSG #room :hello there");
//! assert_eq!(
//!     out.events,
//!     vec![Event::Message { from: "alice".into(), text: "hello there".into() }]
//! );
//! ```
//!
//! ### Connecting to a bridge
//!
//! ```rust,no_run
//! # #[cfg(feature = "tokio")]
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use slirc_client::{ClientConfig, CommandExt, Session};
//!
//! let mut session = Session::new(ClientConfig::new("bridge.example.net", 7667))?;
//! let mut sink = session.sink();
//! session.handlers_mut().on_connect(move || {
//!     let _ = sink.join("#room");
//! });
//! session.run().await?;
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod casemap;
pub mod client;
pub mod command;
pub mod config;
pub mod error;
pub mod handler;
pub mod message;
pub mod response;
pub mod state;
pub mod util;

#[cfg(feature = "tokio")]
pub mod transport;

pub use self::casemap::irc_eq;
pub use self::client::{Client, CommandExt, LineSink};
pub use self::command::Command;
pub use self::config::ClientConfig;
pub use self::error::{ConfigError, SendError, TransportError};
pub use self::handler::{EventKind, HandlerSet};
pub use self::message::{parse, ParsedLine};
pub use self::response::Response;
pub use self::state::{ConnectionMachine, ConnectionState, Event, LineOutput, Phase};

#[cfg(feature = "tokio")]
pub use self::transport::{QueueSink, Session, MAX_IRC_LINE_LEN};
