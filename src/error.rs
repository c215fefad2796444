//! Error types for the IRC client engine.
//!
//! Parsing and the connection engine never fail: unexpected input is dropped.
//! The only fallible surfaces are client construction (missing configuration)
//! and the transport that carries lines to and from the bridge.

use thiserror::Error;

/// Convenience type alias for Results using [`TransportError`].
pub type Result<T, E = TransportError> = std::result::Result<T, E>;

/// Errors raised while building a client from its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// No bridge host was configured.
    #[error("no server specified")]
    MissingServer,

    /// No bridge port was configured.
    #[error("no port specified")]
    MissingPort,
}

/// The transport refused an outbound line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SendError {
    /// The transport is closed; the line was not sent.
    #[error("transport closed")]
    Closed,
}

/// Failures of the underlying bidirectional transport.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// I/O error while connecting, reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The WebSocket layer reported an error.
    #[error("websocket error: {0}")]
    WebSocket(String),

    /// An outbound line could not be queued.
    #[error("send failed: {0}")]
    Send(#[from] SendError),
}
