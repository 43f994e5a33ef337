use crate::error::{ShellError, ShellResult};
use crate::history::DEFAULT_HISTORY_SIZE;
use crate::lexer::DEFAULT_MAX_ARGS;
use crate::parser::DEFAULT_MAX_STAGES;

/// Prompt printed before every line.
pub const DEFAULT_PROMPT: &str = "Kanav> ";

/// Runtime settings of an interpreter session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub prompt: String,
    /// Number of lines kept for the `history` built-in.
    pub history_size: usize,
    /// Maximum number of words in one command.
    pub max_args: usize,
    /// Maximum number of stages in one pipeline.
    pub max_stages: usize,
}

impl ShellConfig {
    /// Reject limits that would make every command fail.
    pub fn validate(&self) -> ShellResult<()> {
        let limits = [
            ("history size", self.history_size),
            ("max args", self.max_args),
            ("max stages", self.max_stages),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(ShellError::InvalidConfig(format!("{name} must be at least 1")));
            }
        }
        Ok(())
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            history_size: DEFAULT_HISTORY_SIZE,
            max_args: DEFAULT_MAX_ARGS,
            max_stages: DEFAULT_MAX_STAGES,
        }
    }
}
