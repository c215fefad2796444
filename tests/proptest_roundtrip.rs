//! Property-based tests for line parsing and command formatting.
//!
//! Uses proptest to generate random IRC components and verify that:
//! 1. Parsing never panics, on any input
//! 2. Prefix extraction matches the text before the first space
//! 3. A formatted PRIVMSG parses back to its target and text
//! 4. The engine stays quiet on unknown commands once registered

use proptest::prelude::*;
use slirc_client::command;
use slirc_client::{ConnectionMachine, ParsedLine, Phase};

// =============================================================================
// STRATEGIES - Generators for valid IRC components
// =============================================================================

/// Valid IRC nickname per RFC 2812.
fn nickname_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z\\[\\]\\\\^_`{|}][a-zA-Z0-9\\-\\[\\]\\\\^_`{|}]{0,8}")
        .expect("valid regex")
}

/// Valid IRC channel name: starts with # or &, followed by valid chars
fn channel_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[#&][a-zA-Z0-9_\\-]{1,49}").expect("valid regex")
}

/// Message text that doesn't contain CR/LF/NUL
fn message_text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[^\r\n\0]{0,400}").expect("valid regex")
}

/// Prefix text: no spaces, no line breaks
fn prefix_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[^ \r\n\0]{0,60}").expect("valid regex")
}

/// Alphabetic command words that the engine does not act on
fn unknown_command_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z]{3,10}")
        .expect("valid regex")
        .prop_filter("known command", |c| {
            !matches!(c.as_str(), "PRIVMSG" | "JOIN" | "NICK" | "PING")
                && !c.starts_with("PING")
        })
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn parse_never_panics(raw in any::<String>()) {
        let _ = ParsedLine::parse(&raw);
    }

    #[test]
    fn engine_never_panics(lines in prop::collection::vec(any::<String>(), 0..20)) {
        let mut machine = ConnectionMachine::new("bot", "websocket");
        for line in &lines {
            let _ = machine.on_line(line);
        }
    }

    #[test]
    fn prefix_is_text_before_first_space(
        prefix in prefix_strategy(),
        rest in "[A-Z]{1,8}( [a-z#]{1,8}){0,3}",
    ) {
        let raw = format!(":{} {}", prefix, rest);
        let line = ParsedLine::parse(&raw);
        prop_assert_eq!(line.prefix.as_deref(), Some(prefix.as_str()));
    }

    #[test]
    fn privmsg_roundtrip(channel in channel_strategy(), text in message_text_strategy()) {
        let raw = command::privmsg(&channel, &text);
        let line = ParsedLine::parse(&raw);
        prop_assert_eq!(line.command.as_str(), "PRIVMSG");
        prop_assert_eq!(line.params, vec![channel]);
        prop_assert_eq!(line.trailing, Some(text));
    }

    #[test]
    fn formatted_lines_are_single_lines(target in any::<String>(), text in any::<String>()) {
        let raw = command::privmsg(&target, &text);
        prop_assert!(!raw.contains('\n'));
        prop_assert!(!raw.contains('\r'));
    }

    #[test]
    fn unknown_commands_are_silent(
        nick in nickname_strategy(),
        cmd in unknown_command_strategy(),
        text in message_text_strategy(),
    ) {
        let mut machine = ConnectionMachine::new("bot", "websocket");
        let _ = machine.on_line(":server 376 bot :End of /MOTD command.");

        let out = machine.on_line(&format!(":{}!u@h {} #c :{}", nick, cmd, text));
        prop_assert!(out.is_empty());
        prop_assert_eq!(machine.phase(), Phase::Registered);
    }

    #[test]
    fn ping_is_answered_in_any_phase(token in "[a-zA-Z0-9.]{1,20}", registered in any::<bool>()) {
        let mut machine = ConnectionMachine::new("bot", "websocket");
        if registered {
            let _ = machine.on_line(":server 376 bot :End");
        }
        let out = machine.on_line(&format!("PING :{}", token));
        prop_assert_eq!(out.outbound, vec![format!("PONG :{}", token)]);
        prop_assert!(out.events.is_empty());
    }
}
