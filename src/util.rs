//! Helpers shared by the formatter and configuration.

use std::borrow::Cow;

/// Characters that would break line framing if sent inside an argument.
pub const LINE_BREAK_CHARS: &[char] = &['\r', '\n', '\0'];

/// Removes CR, LF and NUL from an outbound argument.
///
/// The bridge is line-delimited, so an embedded newline would split one
/// command into two and desynchronize the stream.
///
/// ```
/// use slirc_client::util::strip_line_breaks;
///
/// assert_eq!(strip_line_breaks("hello"), "hello");
/// assert_eq!(strip_line_breaks("hi\r\nQUIT :pwned"), "hiQUIT :pwned");
/// ```
pub fn strip_line_breaks(s: &str) -> Cow<'_, str> {
    if s.contains(LINE_BREAK_CHARS) {
        Cow::Owned(s.chars().filter(|c| !LINE_BREAK_CHARS.contains(c)).collect())
    } else {
        Cow::Borrowed(s)
    }
}

/// Formats `n` in lowercase base 36.
pub fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if n == 0 {
        return "0".to_string();
    }

    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    buf.into_iter().map(char::from).collect()
}
