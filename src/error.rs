use thiserror::Error;

/// Unified error type for git-flow-release operations
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("`{command}` failed: {stderr}")]
    Command { command: String, stderr: String },

    #[error("empty gitflow action")]
    MissingAction,

    #[error("unknown gitflow action: {0}")]
    UnknownAction(String),

    #[error("branch {0} does not exist")]
    MissingStageBranch(String),

    #[error("HEAD is detached, no current branch to merge")]
    DetachedHead,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-flow-release
pub type Result<T> = std::result::Result<T, FlowError>;

impl FlowError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        FlowError::Config(msg.into())
    }

    /// Create a command failure carrying the captured stderr
    pub fn command(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        FlowError::Command {
            command: command.into(),
            stderr: stderr.into().trim_end().to_string(),
        }
    }
}
