//! IRC line parsing.

mod nom_parser;
mod types;

pub use self::types::ParsedLine;

/// Parse one raw protocol line. Shorthand for [`ParsedLine::parse`].
pub fn parse(raw: &str) -> ParsedLine {
    ParsedLine::parse(raw)
}
