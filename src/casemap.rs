//! IRC case-mapping.
//!
//! Nicknames compare case-insensitively under `rfc1459` rules, where
//! `[]\~` are the uppercase forms of `{}|^`.

#[inline]
fn fold(c: char) -> char {
    match c {
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        'A'..='Z' => c.to_ascii_lowercase(),
        _ => c,
    }
}

/// Compare two strings using RFC 1459 case-insensitive comparison.
pub fn irc_eq(a: &str, b: &str) -> bool {
    a.len() == b.len() && a.chars().zip(b.chars()).all(|(ca, cb)| fold(ca) == fold(cb))
}
