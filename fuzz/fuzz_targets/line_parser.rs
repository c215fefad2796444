//! Fuzz target for IRC line parsing and the connection engine
//!
//! Any received text must parse and be consumed by the engine without
//! panicking, in either registration phase.

#![no_main]

use libfuzzer_sys::fuzz_target;
use slirc_client::{ConnectionMachine, ParsedLine};
use std::str;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = str::from_utf8(data) else {
        return;
    };

    let _ = ParsedLine::parse(input);

    let mut machine = ConnectionMachine::new("bot", "websocket");
    for line in input.split('\n') {
        let _ = machine.on_line(line);
    }
    let _ = machine.on_line(":server 376 bot :End of /MOTD command.");
    for line in input.split('\n') {
        let _ = machine.on_line(line);
    }
});
