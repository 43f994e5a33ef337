use anyhow::Result;
use argh::FromArgs;
use kanav_shell::config::DEFAULT_PROMPT;
use kanav_shell::history::DEFAULT_HISTORY_SIZE;
use kanav_shell::io_adapters::{Editor, LineSource, Prompted};
use kanav_shell::lexer::DEFAULT_MAX_ARGS;
use kanav_shell::parser::DEFAULT_MAX_STAGES;
use kanav_shell::{Interpreter, ShellConfig};
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(FromArgs)]
/// An interactive command interpreter with pipes and background commands.
struct Args {
    #[argh(option, default = "String::from(DEFAULT_PROMPT)")]
    /// prompt printed before each line
    prompt: String,

    #[argh(option, default = "DEFAULT_HISTORY_SIZE")]
    /// number of lines kept by the `history` built-in
    history_size: usize,

    #[argh(option, default = "DEFAULT_MAX_ARGS")]
    /// maximum number of words in one command
    max_args: usize,

    #[argh(option, default = "DEFAULT_MAX_STAGES")]
    /// maximum number of commands in one pipeline
    max_stages: usize,

    #[argh(switch, short = 'V')]
    /// print version information and exit
    version: bool,
}

fn main() -> ExitCode {
    // Respects RUST_LOG; logs go to stderr so they never mix with command output.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let args: Args = argh::from_env();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    if args.version {
        println!("kanav {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = ShellConfig {
        prompt: args.prompt,
        history_size: args.history_size,
        max_args: args.max_args,
        max_stages: args.max_stages,
    };
    config.validate()?;

    let mut source: Box<dyn LineSource> = if io::stdin().is_terminal() {
        Box::new(Editor::new()?)
    } else {
        Box::new(Prompted::new(io::stdin().lock(), io::stdout()))
    };

    let mut shell = Interpreter::new(config);
    shell.repl(source.as_mut(), &mut io::stdout(), &mut io::stderr())
}
