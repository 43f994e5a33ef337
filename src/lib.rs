//! A small interactive command interpreter.
//!
//! Lines are split into pipeline stages on `|`, each stage into words on
//! whitespace, and a trailing `&` sends the command to the background. The
//! built-ins `history`, `cd` and `exit` run in-process; everything else is
//! started as a child process, with the stages of a pipeline connected by
//! anonymous pipes.
//!
//! The main entry point is [`Interpreter`]. All process and pipe creation goes
//! through the [`ProcessSpawner`] trait, implemented for the real OS by
//! [`OsSpawner`].

mod builtin;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
mod external;
pub mod history;
pub mod io_adapters;
mod interpreter;
pub mod launcher;
pub mod lexer;
pub mod parser;
pub mod pipeline;

pub use command::{Endpoint, ExitCode, ProcessSpawner};
pub use config::ShellConfig;
pub use error::{ShellError, ShellResult};
pub use external::{DEFAULT_SEARCH_PATH, OsSpawner, resolve_program};
pub use history::HistoryBuffer;
pub use interpreter::{Flow, Interpreter};
