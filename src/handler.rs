//! Caller-registered hooks.
//!
//! Each event kind has one slot. Registering a hook replaces whatever was
//! there before; an empty slot behaves as a no-op.
//!
//! ```
//! use slirc_client::handler::{EventKind, HandlerSet};
//!
//! let mut handlers = HandlerSet::new();
//! handlers
//!     .on_connect(|| println!("registered"))
//!     .on_message(|from, text| println!("{from}> {text}"));
//!
//! assert!(handlers.is_set(EventKind::Connect));
//! assert!(!handlers.is_set(EventKind::Join));
//! ```

use std::fmt;

use crate::error::TransportError;
use crate::state::Event;

type MessageHook = Box<dyn FnMut(&str, &str)>;
type JoinHook = Box<dyn FnMut(&str, Option<&str>)>;
type NamesHook = Box<dyn FnMut(&str, &[String])>;
type UnitHook = Box<dyn FnMut()>;
type CloseHook = Box<dyn FnMut(Option<&str>)>;
type ErrorHook = Box<dyn FnMut(&TransportError)>;

/// The kinds of event a hook can be registered for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    Message,
    Join,
    Connect,
    Names,
    NickInUse,
    Open,
    Close,
    Error,
}

impl Event {
    /// The hook slot this event is delivered to.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Connected => EventKind::Connect,
            Event::Message { .. } => EventKind::Message,
            Event::Join { .. } => EventKind::Join,
            Event::Names { .. } => EventKind::Names,
            Event::NickInUse => EventKind::NickInUse,
        }
    }
}

/// One optional callback per [`EventKind`]. Last writer wins.
#[derive(Default)]
pub struct HandlerSet {
    message: Option<MessageHook>,
    join: Option<JoinHook>,
    connect: Option<UnitHook>,
    names: Option<NamesHook>,
    nick_in_use: Option<UnitHook>,
    open: Option<UnitHook>,
    close: Option<CloseHook>,
    error: Option<ErrorHook>,
}

impl HandlerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// `from`, `text` of each PRIVMSG.
    pub fn on_message<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(&str, &str) + 'static,
    {
        self.message = Some(Box::new(hook));
        self
    }

    /// `channel` and, when known, the joining nickname.
    pub fn on_join<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(&str, Option<&str>) + 'static,
    {
        self.join = Some(Box::new(hook));
        self
    }

    /// Registration completed.
    pub fn on_connect<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.connect = Some(Box::new(hook));
        self
    }

    /// `channel` and its member list from a names reply.
    pub fn on_names<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(&str, &[String]) + 'static,
    {
        self.names = Some(Box::new(hook));
        self
    }

    /// A nickname change was rejected after registration.
    pub fn on_nick_in_use<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.nick_in_use = Some(Box::new(hook));
        self
    }

    /// The transport opened; the handshake has already been queued.
    pub fn on_open<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        self.open = Some(Box::new(hook));
        self
    }

    /// The transport closed, with the peer's reason if it gave one.
    pub fn on_close<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(Option<&str>) + 'static,
    {
        self.close = Some(Box::new(hook));
        self
    }

    /// The transport failed.
    pub fn on_error<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(&TransportError) + 'static,
    {
        self.error = Some(Box::new(hook));
        self
    }

    /// Reset a slot to the no-op default.
    pub fn clear(&mut self, kind: EventKind) -> &mut Self {
        match kind {
            EventKind::Message => self.message = None,
            EventKind::Join => self.join = None,
            EventKind::Connect => self.connect = None,
            EventKind::Names => self.names = None,
            EventKind::NickInUse => self.nick_in_use = None,
            EventKind::Open => self.open = None,
            EventKind::Close => self.close = None,
            EventKind::Error => self.error = None,
        }
        self
    }

    pub fn is_set(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::Message => self.message.is_some(),
            EventKind::Join => self.join.is_some(),
            EventKind::Connect => self.connect.is_some(),
            EventKind::Names => self.names.is_some(),
            EventKind::NickInUse => self.nick_in_use.is_some(),
            EventKind::Open => self.open.is_some(),
            EventKind::Close => self.close.is_some(),
            EventKind::Error => self.error.is_some(),
        }
    }

    /// Deliver a domain event to its slot.
    pub fn dispatch(&mut self, event: &Event) {
        match event {
            Event::Connected => fire(&mut self.connect),
            Event::Message { from, text } => {
                if let Some(hook) = self.message.as_mut() {
                    hook(from, text);
                }
            }
            Event::Join { channel, nick } => {
                if let Some(hook) = self.join.as_mut() {
                    hook(channel, nick.as_deref());
                }
            }
            Event::Names { channel, names } => {
                if let Some(hook) = self.names.as_mut() {
                    hook(channel, names);
                }
            }
            Event::NickInUse => fire(&mut self.nick_in_use),
        }
    }

    pub(crate) fn opened(&mut self) {
        fire(&mut self.open);
    }

    pub(crate) fn closed(&mut self, reason: Option<&str>) {
        if let Some(hook) = self.close.as_mut() {
            hook(reason);
        }
    }

    pub(crate) fn failed(&mut self, err: &TransportError) {
        if let Some(hook) = self.error.as_mut() {
            hook(err);
        }
    }
}

fn fire(slot: &mut Option<UnitHook>) {
    if let Some(hook) = slot.as_mut() {
        hook();
    }
}

impl fmt::Debug for HandlerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerSet")
            .field("message", &self.message.is_some())
            .field("join", &self.join.is_some())
            .field("connect", &self.connect.is_some())
            .field("names", &self.names.is_some())
            .field("nick_in_use", &self.nick_in_use.is_some())
            .field("open", &self.open.is_some())
            .field("close", &self.close.is_some())
            .field("error", &self.error.is_some())
            .finish()
    }
}
