//! Starting a single external program.

use crate::command::{Endpoint, ProcessSpawner};
use crate::error::ShellError;
use std::io::{self, Write};

/// What happened to a launched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launch {
    /// The child ran in the foreground and has been reaped.
    Completed,
    /// The child keeps running; nobody will wait for it.
    Detached(u32),
    /// The child could not be started. The error has already been reported.
    Failed,
}

/// Line printed for every child started in the background.
pub(crate) fn report_background(out: &mut dyn Write, pid: u32) -> io::Result<()> {
    writeln!(out, "Process running in background with PID: {pid}")?;
    out.flush()
}

/// Spawns `args[0]` with stdin/stdout connected to the given endpoints.
///
/// In the foreground this blocks until the child terminates; its exit status
/// is only logged. In the background the child's PID is reported on `out` and
/// the handle is detached without being reaped. A spawn failure is reported on
/// `err` and never propagates: the only errors returned are failures to write
/// those reports.
pub fn launch<S: ProcessSpawner>(
    spawner: &mut S,
    args: &[String],
    background: bool,
    stdin: Endpoint<S::Reader>,
    stdout: Endpoint<S::Writer>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> io::Result<Launch> {
    let child = match spawner.spawn(args, stdin, stdout) {
        Ok(child) => child,
        Err(source) => {
            let program = args.first().cloned().unwrap_or_default();
            writeln!(err, "{}", ShellError::Spawn { program, source })?;
            return Ok(Launch::Failed);
        }
    };

    let pid = spawner.id(&child);
    tracing::debug!(pid, program = %args[0], background, "spawned");

    if background {
        spawner.detach(child);
        report_background(out, pid)?;
        return Ok(Launch::Detached(pid));
    }

    match spawner.wait(child) {
        Ok(code) => tracing::debug!(pid, code, "child exited"),
        Err(e) => tracing::warn!(pid, error = %e, "failed to wait for child"),
    }
    Ok(Launch::Completed)
}
