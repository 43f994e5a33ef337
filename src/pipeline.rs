//! Running several programs connected by channels.
//!
//! For N stages the orchestrator allocates N-1 channels before anything is
//! spawned. Stage `i` reads from channel `i - 1` and writes to channel `i`;
//! the first stage reads the interpreter's stdin and the last stage writes to
//! the interpreter's stdout. Endpoints are owned values, so every one of them
//! is closed exactly once: either by the spawn that consumes it, or when the
//! orchestrator drops what is left after the spawn loop.

use crate::command::{Endpoint, ProcessSpawner};
use crate::error::{ShellError, ShellResult};
use crate::launcher::report_background;
use crate::lexer::{Tokenized, tokenize};
use std::io::{self, Write};

/// What happened to a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineRun {
    /// Rejected before any channel was allocated or any child spawned.
    Aborted,
    /// Foreground pipeline; every child that started has been reaped.
    Completed { spawned: usize, failed: usize },
    /// Background pipeline; the children keep running unreaped.
    Detached(Vec<u32>),
}

/// Tokenizes every stage, rejecting empty ones.
///
/// Returns the argument vectors and whether the final stage asked for the
/// background. A marker on any other stage is dropped.
fn tokenize_stages(stages: &[&str], max_args: usize) -> ShellResult<(Vec<Vec<String>>, bool)> {
    let last = stages.len().saturating_sub(1);
    let mut background = false;
    let mut argvs = Vec::with_capacity(stages.len());
    for (i, stage) in stages.iter().enumerate() {
        let Tokenized { args, background: marked } = tokenize(stage, max_args)?;
        if args.is_empty() {
            return Err(ShellError::EmptyStage { stage: i + 1 });
        }
        if i == last {
            background = marked;
        } else if marked {
            tracing::debug!(stage = i + 1, "ignoring background marker on intermediate stage");
        }
        argvs.push(args);
    }
    Ok((argvs, background))
}

/// Runs `stages` (as produced by [`crate::parser::split_pipeline`]) as one pipeline.
///
/// Parse problems and channel allocation failures are reported on `err` and
/// abort the pipeline before any child exists. A stage that fails to spawn is
/// reported; the stages already running are left alone, the remaining stages
/// are still started, and every child that did start is waited for. A failure
/// to write a report is returned only once every child has been reaped or
/// detached.
pub fn run_pipeline<S: ProcessSpawner>(
    spawner: &mut S,
    stages: &[&str],
    max_args: usize,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> io::Result<PipelineRun> {
    let (argvs, background) = match tokenize_stages(stages, max_args) {
        Ok(parsed) => parsed,
        Err(e) => {
            writeln!(err, "{e}")?;
            return Ok(PipelineRun::Aborted);
        }
    };
    let n = argvs.len();

    let mut readers = Vec::with_capacity(n.saturating_sub(1));
    let mut writers = Vec::with_capacity(n.saturating_sub(1));
    for _ in 1..n {
        match spawner.channel() {
            Ok((reader, writer)) => {
                readers.push(Some(reader));
                writers.push(Some(writer));
            }
            // Channels allocated so far are closed when the vectors drop.
            Err(e) => {
                writeln!(err, "{}", ShellError::Channel(e))?;
                return Ok(PipelineRun::Aborted);
            }
        }
    }
    tracing::debug!(stages = n, channels = readers.len(), background, "starting pipeline");

    let mut children = Vec::with_capacity(n);
    let mut failed = 0;
    let mut reported = Ok(());
    for (i, args) in argvs.iter().enumerate() {
        let stdin = match i.checked_sub(1) {
            Some(prev) => Endpoint::from(readers[prev].take()),
            None => Endpoint::Inherit,
        };
        let stdout = if i + 1 < n {
            Endpoint::from(writers[i].take())
        } else {
            Endpoint::Inherit
        };

        match spawner.spawn(args, stdin, stdout) {
            Ok(child) => {
                tracing::debug!(stage = i + 1, pid = spawner.id(&child), program = %args[0], "spawned");
                children.push(child);
            }
            Err(source) => {
                failed += 1;
                let program = args[0].clone();
                reported = reported.and(writeln!(err, "{}", ShellError::Spawn { program, source }));
            }
        }
    }

    // Nothing may stay open here, or readers downstream never see end-of-stream.
    drop(readers);
    drop(writers);

    if background {
        let mut pids = Vec::with_capacity(children.len());
        for child in children {
            pids.push(spawner.id(&child));
            spawner.detach(child);
        }
        for &pid in &pids {
            reported = reported.and(report_background(out, pid));
        }
        return reported.map(|()| PipelineRun::Detached(pids));
    }

    let spawned = children.len();
    for child in children {
        let pid = spawner.id(&child);
        match spawner.wait(child) {
            Ok(code) => tracing::debug!(pid, code, "stage exited"),
            Err(e) => tracing::warn!(pid, error = %e, "failed to wait for stage"),
        }
    }
    reported.map(|()| PipelineRun::Completed { spawned, failed })
}
