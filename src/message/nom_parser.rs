//! Nom-based IRC line tokenizer.
//!
//! The prefix and command are recognised with nom combinators; parameters
//! are then scanned token by token so that runs of spaces and an empty
//! trailing segment behave predictably:
//!
//! ```text
//! [:prefix] <command> [params...] [:trailing]
//! ```
//!
//! - empty tokens produced by consecutive spaces are skipped,
//! - the first token starting with `:` opens the trailing section, which runs
//!   verbatim to the end of the line (spaces included, never split),
//! - `"... :"` yields an empty-but-present trailing.

use nom::{
    bytes::complete::{take_till, take_while},
    character::complete::char,
    combinator::opt,
    sequence::preceded,
    IResult,
};

/// Parse the message prefix (the part after `:` and before the first space).
fn parse_prefix(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_till(|c: char| c == ' '))(input)
}

/// Parse the command word or numeric. May be empty.
fn parse_command(input: &str) -> IResult<&str, &str> {
    take_till(|c: char| c == ' ')(input)
}

fn parse_head(input: &str) -> IResult<&str, (Option<&str>, &str)> {
    let (input, prefix) = opt(parse_prefix)(input)?;
    let (input, _) = take_while(|c: char| c == ' ')(input)?;
    let (input, command) = parse_command(input)?;
    Ok((input, (prefix, command)))
}

/// Scan the parameter section into middle params and an optional trailing.
fn scan_params(mut rest: &str) -> (Vec<&str>, Option<&str>) {
    let mut params = Vec::new();

    loop {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            return (params, None);
        }
        if let Some(trailing) = rest.strip_prefix(':') {
            return (params, Some(trailing));
        }
        let end = rest.find(' ').unwrap_or(rest.len());
        params.push(&rest[..end]);
        rest = &rest[end..];
    }
}

/// A tokenized IRC line with borrowed slices into the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawLine<'a> {
    pub prefix: Option<&'a str>,
    pub command: &'a str,
    pub params: Vec<&'a str>,
    pub trailing: Option<&'a str>,
}

impl<'a> RawLine<'a> {
    /// Tokenize one line. Never fails: input nom cannot make sense of comes
    /// back as an empty line with no command.
    pub fn tokenize(input: &'a str) -> Self {
        let line = input.trim_end_matches(['\r', '\n']);

        match parse_head(line) {
            Ok((rest, (prefix, command))) => {
                let (params, trailing) = scan_params(rest);
                RawLine {
                    prefix,
                    command,
                    params,
                    trailing,
                }
            }
            Err(_) => RawLine::default(),
        }
    }
}
