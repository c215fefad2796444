//! IRC numeric replies the client engine acts on.
//!
//! Only three numerics drive client behaviour; everything else is ignored.
//! Codes are matched as strings, exactly as they appear on the wire.
//!
//! # Reference
//! - RFC 2812: Internet Relay Chat: Client Protocol
//! - Modern IRC documentation: <https://modern.ircdocs.horse/>

#![allow(non_camel_case_types)]

use std::fmt;

/// A numeric reply recognised by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Response {
    /// 353 - Names list for a channel
    RPL_NAMREPLY,
    /// 376 - End of MOTD; registration is complete
    RPL_ENDOFMOTD,
    /// 433 - Nickname is already in use
    ERR_NICKNAMEINUSE,
}

impl Response {
    /// The three-digit wire code.
    pub const fn code(self) -> &'static str {
        match self {
            Response::RPL_NAMREPLY => "353",
            Response::RPL_ENDOFMOTD => "376",
            Response::ERR_NICKNAMEINUSE => "433",
        }
    }

    /// Look up a wire command. Returns `None` for anything not modeled,
    /// including numerics with a different spelling such as `"0376"`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "353" => Some(Response::RPL_NAMREPLY),
            "376" => Some(Response::RPL_ENDOFMOTD),
            "433" => Some(Response::ERR_NICKNAMEINUSE),
            _ => None,
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_strings() {
        assert_eq!(Response::from_code("376"), Some(Response::RPL_ENDOFMOTD));
        assert_eq!(Response::from_code("0376"), None);
        assert_eq!(Response::from_code("001"), None);
        assert_eq!(Response::ERR_NICKNAMEINUSE.to_string(), "433");
    }

    #[test]
    fn test_code_lookup_is_inverse() {
        for r in [
            Response::RPL_NAMREPLY,
            Response::RPL_ENDOFMOTD,
            Response::ERR_NICKNAMEINUSE,
        ] {
            assert_eq!(Response::from_code(r.code()), Some(r));
        }
    }
}
