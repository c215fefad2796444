//! WebSocket transport collaborator for a WebSocket-to-IRC bridge.
//!
//! A [`Session`] owns one [`Client`] and one WebSocket connection. Outbound
//! lines go through an unbounded queue ([`QueueSink`]) so hooks can hold a
//! sink of their own and issue commands while the session is running.
//!
//! Hooks are not `Send`, so [`Session::run`] is meant to be awaited on the
//! current task (e.g. directly in `#[tokio::main]`), not spawned.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage, WebSocketStream};
use tracing::{debug, warn};

use crate::client::{Client, LineSink};
use crate::config::ClientConfig;
use crate::error::{ConfigError, Result, SendError, TransportError};
use crate::handler::HandlerSet;

pub const MAX_IRC_LINE_LEN: usize = 8191;

/// An item in the outbound queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outgoing {
    Line(String),
    Close,
}

/// Cloneable sending half of a [`Session`].
#[derive(Clone, Debug)]
pub struct QueueSink {
    tx: UnboundedSender<Outgoing>,
}

impl LineSink for QueueSink {
    fn send_line(&mut self, line: &str) -> std::result::Result<(), SendError> {
        self.tx
            .send(Outgoing::Line(line.to_owned()))
            .map_err(|_| SendError::Closed)
    }

    fn close(&mut self) -> std::result::Result<(), SendError> {
        self.tx.send(Outgoing::Close).map_err(|_| SendError::Closed)
    }
}

/// One connection to the bridge. Consumed by [`Session::run`], so a client
/// is never reused across connections.
pub struct Session {
    client: Client<QueueSink>,
    sink: QueueSink,
    outgoing: UnboundedReceiver<Outgoing>,
}

impl Session {
    pub fn new(config: ClientConfig) -> std::result::Result<Self, ConfigError> {
        let (tx, outgoing) = mpsc::unbounded_channel();
        let sink = QueueSink { tx };
        let client = Client::new(config, sink.clone())?;
        Ok(Self {
            client,
            sink,
            outgoing,
        })
    }

    /// A sink for issuing commands from hooks or other code.
    pub fn sink(&self) -> QueueSink {
        self.sink.clone()
    }

    pub fn handlers_mut(&mut self) -> &mut HandlerSet {
        self.client.handlers_mut()
    }

    pub fn client(&self) -> &Client<QueueSink> {
        &self.client
    }

    /// Connect, register and pump lines until either side closes.
    ///
    /// Every exit ends with the `close` hook. A transport failure first goes
    /// to the `error` hook and is then returned. No reconnection is attempted.
    pub async fn run(mut self) -> Result<()> {
        let (result, reason) = match self.pump().await {
            Ok(reason) => (Ok(()), reason),
            Err(err) => {
                self.client.transport_error(&err);
                (Err(err), None)
            }
        };
        self.client.transport_closed(reason.as_deref());
        result
    }

    /// Drive the connection. Returns the peer's close reason, if any.
    async fn pump(&mut self) -> Result<Option<String>> {
        let url = self.client.config().url();
        debug!(%url, "connecting");

        let (mut stream, _response) = connect_async(url.as_str())
            .await
            .map_err(websocket_error)?;

        self.client.transport_opened()?;

        loop {
            tokio::select! {
                frame = stream.next() => match frame {
                    Some(Ok(WsMessage::Text(text))) => {
                        for line in split_lines(&text) {
                            self.client.line_received(line)?;
                        }
                    }
                    Some(Ok(WsMessage::Close(frame))) => {
                        return Ok(frame.map(|f| f.reason.into_owned()));
                    }
                    None => return Ok(None),
                    Some(Ok(WsMessage::Binary(_))) => {
                        warn!("Ignoring binary WebSocket frame (IRC is text-only)");
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(websocket_error(e)),
                },
                out = self.outgoing.recv() => match out {
                    Some(Outgoing::Line(line)) => {
                        write_websocket_message(&mut stream, &line)
                            .await
                            .map_err(websocket_error)?;
                    }
                    Some(Outgoing::Close) | None => {
                        if let Err(e) = stream.close(None).await {
                            debug!(error = %e, "close handshake failed");
                        }
                        return Ok(None);
                    }
                },
            }
        }
    }
}

fn websocket_error(e: impl std::fmt::Display) -> TransportError {
    TransportError::WebSocket(e.to_string())
}

/// Split a text frame into protocol lines.
///
/// Bridges may batch several lines per frame. Empty lines are skipped;
/// oversized lines and lines carrying NUL are dropped.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| {
            if line.is_empty() {
                return false;
            }
            if line.len() > MAX_IRC_LINE_LEN {
                warn!(len = line.len(), "dropping oversized line");
                return false;
            }
            if line.contains('\0') {
                warn!("dropping line containing NUL");
                return false;
            }
            true
        })
}

async fn write_websocket_message<S>(
    stream: &mut WebSocketStream<S>,
    line: &str,
) -> anyhow::Result<()>
where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
{
    let msg = line.trim_end_matches(&['\r', '\n'][..]);
    stream
        .send(WsMessage::Text(msg.to_string()))
        .await
        .map_err(|e| anyhow::anyhow!("WebSocket send error: {}", e))?;
    Ok(())
}
