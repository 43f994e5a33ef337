//! Splitting a command line into pipeline stages.

use crate::error::{ShellError, ShellResult};

/// Separator between pipeline stages.
pub const PIPE_SEPARATOR: char = '|';

/// Upper bound on the number of stages in one pipeline when nothing else is configured.
pub const DEFAULT_MAX_STAGES: usize = 10;

/// Returns true when the line should go through the pipeline path.
pub fn has_pipe(line: &str) -> bool {
    line.contains(PIPE_SEPARATOR)
}

/// Splits `raw` on [`PIPE_SEPARATOR`] into its stages.
///
/// Stages are returned untrimmed, so `"a | b"` gives `"a "` and `" b"`.
/// Empty stages (adjacent separators, or one at either end) are kept as
/// empty strings; deciding what to do with them is up to the caller.
/// A line without a separator yields itself as the only stage.
///
/// # Returns
/// The stages in order, or [`ShellError::TooManyStages`] when there are more
/// than `max_stages`.
pub fn split_pipeline(raw: &str, max_stages: usize) -> ShellResult<Vec<&str>> {
    let mut stages = Vec::new();
    for stage in raw.split(PIPE_SEPARATOR) {
        if stages.len() == max_stages {
            return Err(ShellError::TooManyStages { max: max_stages });
        }
        stages.push(stage);
    }
    Ok(stages)
}
