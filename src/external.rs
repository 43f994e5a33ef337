use crate::command::{Endpoint, ExitCode, ProcessSpawner};
use std::borrow::Cow;
use std::ffi::OsStr;
use std::io::{self, PipeReader, PipeWriter};
use std::path::Path;
use std::process::{Child, Command};

/// Search path used when `PATH` is not set.
pub const DEFAULT_SEARCH_PATH: &str = "/bin:/usr/bin";

/// Spawner backed by real OS pipes and processes.
///
/// Channels come from [`std::io::pipe`], whose descriptors are close-on-exec,
/// so a child only ever holds the endpoints it was explicitly wired to.
#[derive(Debug, Default)]
pub struct OsSpawner;

impl ProcessSpawner for OsSpawner {
    type Reader = PipeReader;
    type Writer = PipeWriter;
    type Child = Child;

    fn channel(&mut self) -> io::Result<(PipeReader, PipeWriter)> {
        io::pipe()
    }

    fn spawn(
        &mut self,
        args: &[String],
        stdin: Endpoint<PipeReader>,
        stdout: Endpoint<PipeWriter>,
    ) -> io::Result<Child> {
        let (program, rest) = args
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command"))?;

        let search_paths = std::env::var_os("PATH");
        let search_paths = search_paths
            .as_deref()
            .unwrap_or_else(|| OsStr::new(DEFAULT_SEARCH_PATH));
        let executable = resolve_program(search_paths, Path::new(program))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "command not found"))?;
        tracing::trace!(program = %program, executable = %executable.display(), "resolved");

        let mut cmd = Command::new(&*executable);
        cmd.args(rest).stdin(stdin.stdio()).stdout(stdout.stdio());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.arg0(program);
        }
        // `cmd` owns the endpoints and closes them when it goes out of scope.
        cmd.spawn()
    }

    fn id(&self, child: &Child) -> u32 {
        child.id()
    }

    fn wait(&mut self, mut child: Child) -> io::Result<ExitCode> {
        let status = child.wait()?;
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Ok(128 + signal);
            }
        }
        Ok(status.code().unwrap_or(-1))
    }
}

/// Finds the file to execute for `program`, following `execvp` rules.
///
/// A name containing a slash is used as given; the exec itself reports it if
/// it is missing. A bare name is looked up in each directory of
/// `search_paths`, in order, and only regular files with an execute bit set
/// are accepted. An empty name never resolves.
pub fn resolve_program<'a>(search_paths: &OsStr, program: &'a Path) -> Option<Cow<'a, Path>> {
    if program.as_os_str().is_empty() {
        return None;
    }
    if program.components().count() > 1 || program.is_absolute() {
        return Some(Cow::Borrowed(program));
    }
    std::env::split_paths(search_paths)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
        .map(Cow::Owned)
}

#[cfg(unix)]
fn is_executable(candidate: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(candidate)
        .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(candidate: &Path) -> bool {
    candidate.is_file()
}
