//! Sources of command lines for the read loop.

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{BufRead, Write};

/// Something that can show a prompt and hand back the next line.
pub trait LineSource {
    /// Returns the next line including its terminator, or `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Prints the prompt to a writer and reads lines from any buffered reader.
///
/// Used when standard input is not a terminal, and in tests.
pub struct Prompted<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompted<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> LineSource for Prompted<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Interactive line editing on a terminal, with arrow-key recall.
pub struct Editor {
    rl: DefaultEditor,
}

impl Editor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            rl: DefaultEditor::new()?,
        })
    }
}

impl LineSource for Editor {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        loop {
            match self.rl.readline(prompt) {
                Ok(mut line) => {
                    if !line.trim().is_empty() {
                        self.rl.add_history_entry(line.as_str())?;
                    }
                    line.push('\n');
                    return Ok(Some(line));
                }
                // Ctrl-C discards the current line and prompts again.
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => return Ok(None),
                Err(err) => return Err(err.into()),
            }
        }
    }
}
