use std::fmt::{self, Write};

use crate::util::strip_line_breaks;

use super::types::Command;

/// Write a command followed by space-separated middle arguments.
fn write_cmd(f: &mut fmt::Formatter<'_>, cmd: &str, args: &[&str]) -> fmt::Result {
    f.write_str(cmd)?;
    for arg in args {
        f.write_char(' ')?;
        f.write_str(&strip_line_breaks(arg))?;
    }
    Ok(())
}

/// Write a command with a freeform (always colon-prefixed) trailing argument.
fn write_cmd_freeform(f: &mut fmt::Formatter<'_>, cmd: &str, args: &[&str]) -> fmt::Result {
    match args.split_last() {
        Some((suffix, middle)) => {
            write_cmd(f, cmd, middle)?;
            f.write_str(" :")?;
            f.write_str(&strip_line_breaks(suffix))
        }
        None => f.write_str(cmd),
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::USER(u) => write_cmd_freeform(f, "USER", &[u, "*", "*", u]),
            Command::NICK(n) => write_cmd(f, "NICK", &[n]),
            Command::PRIVMSG(t, m) => write_cmd_freeform(f, "PRIVMSG", &[t, m]),
            Command::JOIN(c) => write_cmd(f, "JOIN", &[c]),
            Command::PART(c) => write_cmd(f, "PART", &[c]),
            Command::QUIT(m) => write_cmd_freeform(f, "QUIT", &[m]),
            Command::MODE(c, m) => write_cmd(f, "MODE", &[c, m]),
            Command::KICK(c, n, m) => write_cmd_freeform(f, "KICK", &[c, n, m]),
            Command::TOPIC(c, t) => write_cmd_freeform(f, "TOPIC", &[c, t]),
            Command::NAMES(c) => write_cmd(f, "NAMES", &[c]),
        }
    }
}
