use crate::builtin::{BuiltinContext, Builtins};
use crate::command::{Endpoint, ProcessSpawner};
use crate::config::ShellConfig;
use crate::env::Environment;
use crate::external::OsSpawner;
use crate::history::HistoryBuffer;
use crate::io_adapters::LineSource;
use crate::launcher::launch;
use crate::lexer::tokenize;
use crate::parser::{has_pipe, split_pipeline};
use crate::pipeline::run_pipeline;
use std::io::{self, Write};

/// Whether the read loop should keep going after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// An interactive session: history, built-ins and the process spawner.
///
/// Example
/// ```
/// use kanav_shell::{Flow, Interpreter, ShellConfig};
/// let mut sh = Interpreter::new(ShellConfig::default());
/// let (mut out, mut err) = (Vec::new(), Vec::new());
/// sh.execute_line("true\n", &mut out, &mut err).unwrap();
/// assert_eq!(sh.execute_line("exit\n", &mut out, &mut err).unwrap(), Flow::Exit);
/// assert_eq!(sh.history().len(), 2);
/// ```
pub struct Interpreter<S = OsSpawner> {
    config: ShellConfig,
    history: HistoryBuffer,
    env: Environment,
    builtins: Builtins,
    spawner: S,
}

impl Interpreter<OsSpawner> {
    /// Create a session that starts real processes.
    pub fn new(config: ShellConfig) -> Self {
        Self::with_spawner(config, OsSpawner)
    }
}

impl<S: ProcessSpawner> Interpreter<S> {
    /// Create a session around a custom spawner.
    pub fn with_spawner(config: ShellConfig, spawner: S) -> Self {
        Self {
            history: HistoryBuffer::new(config.history_size),
            config,
            env: Environment::new(),
            builtins: Builtins::default(),
            spawner,
        }
    }

    /// Replace the environment, e.g. to intercept directory changes.
    pub fn with_environment(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Record `line` and run it to completion (or detach it).
    ///
    /// Every problem with the command itself is reported on `err`; the
    /// returned error is only for failures writing to `out` or `err`.
    pub fn execute_line(
        &mut self,
        line: &str,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<Flow> {
        self.history.record(line);

        if has_pipe(line) {
            match split_pipeline(line, self.config.max_stages) {
                Ok(stages) => {
                    let run = run_pipeline(&mut self.spawner, &stages, self.config.max_args, out, err)?;
                    tracing::debug!(?run, "pipeline finished");
                }
                Err(e) => writeln!(err, "{e}")?,
            }
            out.flush()?;
            return Ok(Flow::Continue);
        }

        let tokens = match tokenize(line, self.config.max_args) {
            Ok(tokens) => tokens,
            Err(e) => {
                writeln!(err, "{e}")?;
                return Ok(Flow::Continue);
            }
        };

        if let Some(builtin) = self.builtins.resolve(line, &tokens.args) {
            let mut ctx = BuiltinContext {
                env: &mut self.env,
                history: &self.history,
                out: &mut *out,
                err: &mut *err,
            };
            if let Err(e) = builtin.execute(&mut ctx) {
                writeln!(err, "{e}")?;
            }
            out.flush()?;
            return Ok(if self.env.should_exit {
                Flow::Exit
            } else {
                Flow::Continue
            });
        }

        if tokens.is_empty() {
            return Ok(Flow::Continue);
        }

        let launched = launch(
            &mut self.spawner,
            &tokens.args,
            tokens.background,
            Endpoint::Inherit,
            Endpoint::Inherit,
            out,
            err,
        )?;
        tracing::debug!(?launched, "command finished");
        out.flush()?;
        Ok(Flow::Continue)
    }

    /// Read-evaluate loop: runs lines from `source` until end of input or `exit`.
    pub fn repl(
        &mut self,
        source: &mut dyn LineSource,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> anyhow::Result<()> {
        while let Some(line) = source.read_line(&self.config.prompt)? {
            if self.execute_line(&line, out, err)? == Flow::Exit {
                break;
            }
        }
        tracing::debug!(lines = self.history.len(), "read loop finished");
        Ok(())
    }
}
