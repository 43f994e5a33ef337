use std::io;
use std::process::Stdio;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// Children killed by a signal are reported as `128 + signal`, the way POSIX
/// shells do.
pub type ExitCode = i32;

/// Where a child's standard input or output is connected.
#[derive(Debug)]
pub enum Endpoint<T> {
    /// Share the interpreter's own stream.
    Inherit,
    /// Use one end of a channel. The child takes ownership of it.
    Channel(T),
}

impl<T> From<Option<T>> for Endpoint<T> {
    fn from(end: Option<T>) -> Self {
        match end {
            Some(end) => Endpoint::Channel(end),
            None => Endpoint::Inherit,
        }
    }
}

impl<T: Into<Stdio>> Endpoint<T> {
    /// Convert this endpoint into a [`Stdio`] handle for `std::process::Command`.
    pub fn stdio(self) -> Stdio {
        match self {
            Endpoint::Inherit => Stdio::inherit(),
            Endpoint::Channel(end) => end.into(),
        }
    }
}

/// Capability for creating channels and child processes.
///
/// The launcher and the pipeline orchestrator only talk to the OS through this
/// trait, so they can be exercised against a recording fake.
///
/// Channel endpoints are plain owned values: dropping one closes it. A spawn
/// consumes the endpoints it is given, and the implementation must make sure
/// a child never inherits any other endpoint.
pub trait ProcessSpawner {
    /// Read end of a channel.
    type Reader;
    /// Write end of a channel.
    type Writer;
    /// Handle to a running child.
    type Child;

    /// Allocate a new anonymous channel.
    fn channel(&mut self) -> io::Result<(Self::Reader, Self::Writer)>;

    /// Start `args[0]` with the full argument vector and the given stdin/stdout.
    fn spawn(
        &mut self,
        args: &[String],
        stdin: Endpoint<Self::Reader>,
        stdout: Endpoint<Self::Writer>,
    ) -> io::Result<Self::Child>;

    /// OS process identifier of `child`.
    fn id(&self, child: &Self::Child) -> u32;

    /// Block until `child` terminates and reap it.
    fn wait(&mut self, child: Self::Child) -> io::Result<ExitCode>;

    /// Give up ownership of `child` without waiting for it.
    fn detach(&mut self, child: Self::Child) {
        drop(child);
    }
}
