//! A module implementing lexical analysis (tokenization) of a single command stage.
//!
//! The grammar is deliberately small: words are separated by runs of whitespace,
//! and a `&` as the very last character of the line marks the command as a
//! background job. Quotes, escapes and variables have no special meaning.

use crate::error::{ShellError, ShellResult};

/// Character that detaches a command when it ends the line.
pub const BACKGROUND_MARKER: char = '&';

/// Upper bound on the number of words in one command when nothing else is configured.
pub const DEFAULT_MAX_ARGS: usize = 100;

/// The outcome of tokenizing one command stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokenized {
    /// Argument vector; index 0 is the program or built-in name.
    pub args: Vec<String>,
    /// Whether the stage ended with the background marker.
    pub background: bool,
}

impl Tokenized {
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

/// Splits a raw command stage into an argument vector.
///
/// Exactly one trailing `\n` is removed. If the last remaining character is
/// [`BACKGROUND_MARKER`], it is removed too and `background` is set; a marker
/// anywhere else stays part of its word.
///
/// # Arguments
/// * `raw` - The stage text, possibly still carrying its line terminator.
/// * `max_args` - Maximum number of words accepted.
///
/// # Returns
/// The argument vector and background flag, or [`ShellError::TooManyArguments`]
/// when the stage holds more than `max_args` words.
pub fn tokenize(raw: &str, max_args: usize) -> ShellResult<Tokenized> {
    let line = raw.strip_suffix('\n').unwrap_or(raw);
    let (line, background) = match line.strip_suffix(BACKGROUND_MARKER) {
        Some(rest) => (rest, true),
        None => (line, false),
    };

    let mut args = Vec::new();
    for word in line.split_whitespace() {
        if args.len() == max_args {
            return Err(ShellError::TooManyArguments { max: max_args });
        }
        args.push(word.to_owned());
    }

    Ok(Tokenized { args, background })
}
