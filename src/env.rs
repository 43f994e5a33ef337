use std::env as stdenv;
use std::io;
use std::path::Path;

/// The process-wide state a built-in may change.
pub trait WorkingDirectory {
    /// Make `path` the working directory for the interpreter and the
    /// children it starts from now on.
    fn change_dir(&mut self, path: &Path) -> io::Result<()>;
}

/// Changes the real working directory of the interpreter process.
#[derive(Debug, Default)]
pub struct ProcessDirectory;

impl WorkingDirectory for ProcessDirectory {
    fn change_dir(&mut self, path: &Path) -> io::Result<()> {
        stdenv::set_current_dir(path)
    }
}

/// Mutable, user-level view of the interpreter's surroundings.
///
/// - `dir`: the capability used by `cd`.
/// - `should_exit`: a flag that the read loop checks to know when to terminate.
pub struct Environment {
    pub dir: Box<dyn WorkingDirectory>,
    pub should_exit: bool,
}

impl Environment {
    pub fn new() -> Self {
        Self::with_directory(Box::new(ProcessDirectory))
    }

    pub fn with_directory(dir: Box<dyn WorkingDirectory>) -> Self {
        Self {
            dir,
            should_exit: false,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializes tests that read or change the process working directory.
#[cfg(test)]
pub(crate) fn lock_current_dir() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};
    static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
    MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
