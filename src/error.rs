//! Errors reported by the execution engine.
//!
//! Every variant's `Display` output is the exact message shown to the user, so
//! callers print errors with `writeln!(err, "{e}")` and carry on with the next line.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for engine operations.
pub type ShellResult<T> = Result<T, ShellError>;

/// Engine errors. None of these terminate the interpreter.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("too many arguments (max {max})")]
    TooManyArguments { max: usize },

    #[error("too many pipeline stages (max {max})")]
    TooManyStages { max: usize },

    #[error("empty command in pipeline (stage {stage})")]
    EmptyStage { stage: usize },

    #[error("Error executing command: {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Pipe failed: {0}")]
    Channel(#[source] io::Error),

    #[error("cd: {path}: {source}")]
    ChangeDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{command}: expected argument to \"{command}\"")]
    MissingArgument { command: &'static str },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
