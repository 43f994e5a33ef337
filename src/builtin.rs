use crate::env::Environment;
use crate::error::ShellError;
use crate::history::HistoryBuffer;
use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use std::io::Write;
use std::marker::PhantomData;
use std::path::Path;

/// Everything a built-in may read or change while it runs.
pub struct BuiltinContext<'a> {
    pub env: &'a mut Environment,
    pub history: &'a HistoryBuffer,
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed directly
/// in-process without spawning a child process.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd".
    fn name() -> &'static str;

    /// Whether this built-in handles `line`, whose first word is `name`.
    fn matches(_line: &str, name: &str) -> bool {
        name == Self::name()
    }

    fn execute(self, ctx: &mut BuiltinContext<'_>) -> Result<()>;
}

/// Object-safe form of a built-in, ready to run.
pub trait ExecutableBuiltin {
    fn execute(self: Box<Self>, ctx: &mut BuiltinContext<'_>) -> Result<()>;
}

impl<T: BuiltinCommand> ExecutableBuiltin for T {
    fn execute(self: Box<Self>, ctx: &mut BuiltinContext<'_>) -> Result<()> {
        T::execute(*self, ctx)
    }
}

/// Output of argh when the arguments could not be parsed (or `--help` was asked for).
struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableBuiltin for InvalidArgs {
    fn execute(self: Box<Self>, ctx: &mut BuiltinContext<'_>) -> Result<()> {
        let sink = if self.is_error { &mut *ctx.err } else { &mut *ctx.out };
        writeln!(sink, "{}", self.output.trim_end())?;
        Ok(())
    }
}

/// Factory that tries to create a built-in from a raw line and its argument vector.
///
/// Returns `None` when the factory doesn't recognize the line.
pub(crate) trait BuiltinFactory {
    fn try_create(&self, line: &str, args: &[String]) -> Option<Box<dyn ExecutableBuiltin>>;
}

pub(crate) struct Factory<T> {
    _phantom: PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<T: BuiltinCommand + 'static> BuiltinFactory for Factory<T> {
    fn try_create(&self, line: &str, args: &[String]) -> Option<Box<dyn ExecutableBuiltin>> {
        let (name, rest) = args.split_first()?;
        if !T::matches(line, name) {
            return None;
        }
        // Words after the name are operands, never options: `cd -dir` and
        // `exit -1` must reach the command untouched.
        let operands: Vec<&str> = match rest {
            [] => Vec::new(),
            words => std::iter::once("--")
                .chain(words.iter().map(String::as_str))
                .collect(),
        };
        Some(match T::from_args(&[name.as_str()], &operands) {
            Ok(cmd) => Box::new(cmd),
            Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                output,
                is_error: status.is_err(),
            }),
        })
    }
}

/// The fixed set of built-ins: `history`, `cd` and `exit`.
pub struct Builtins {
    factories: Vec<Box<dyn BuiltinFactory>>,
}

impl Builtins {
    /// Find the built-in that handles a single-stage line.
    ///
    /// `line` is the raw line as read; `args` is its argument vector.
    pub fn resolve(&self, line: &str, args: &[String]) -> Option<Box<dyn ExecutableBuiltin>> {
        self.factories
            .iter()
            .find_map(|factory| factory.try_create(line, args))
    }
}

impl Default for Builtins {
    fn default() -> Self {
        Self {
            factories: vec![
                Box::new(Factory::<History>::default()),
                Box::new(Factory::<Cd>::default()),
                Box::new(Factory::<Exit>::default()),
            ],
        }
    }
}

#[derive(FromArgs)]
/// List the commands entered in this session, oldest first.
pub struct History {}

impl BuiltinCommand for History {
    fn name() -> &'static str {
        "history"
    }

    /// Only the exact line `history` is the built-in; anything else is a program.
    fn matches(line: &str, _name: &str) -> bool {
        line.strip_suffix('\n').unwrap_or(line) == Self::name()
    }

    fn execute(self, ctx: &mut BuiltinContext<'_>) -> Result<()> {
        for (index, line) in ctx.history.list() {
            writeln!(ctx.out, "{index} {line}")?;
        }
        Ok(())
    }
}

#[derive(FromArgs)]
/// Change the current working directory.
pub struct Cd {
    #[argh(positional, greedy)]
    /// directory to switch to; absolute or relative to the current directory. Extra words are ignored.
    pub args: Vec<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(self, ctx: &mut BuiltinContext<'_>) -> Result<()> {
        let Some(target) = self.args.first() else {
            return Err(ShellError::MissingArgument { command: "cd" }.into());
        };
        let path = Path::new(target);
        ctx.env
            .dir
            .change_dir(path)
            .map_err(|source| ShellError::ChangeDir {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "changed directory");
        Ok(())
    }
}

#[derive(FromArgs)]
/// Exit the shell.
pub struct Exit {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, ctx: &mut BuiltinContext<'_>) -> Result<()> {
        ctx.env.should_exit = true;
        Ok(())
    }
}
