//! CLI-specific error types and exit code mapping

use watchbench_core::error::WatchbenchError;
use watchbench_watcher_client::error::WatcherError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// Watcher service unreachable or request failed.
    #[error("watcher service error: {0}")]
    Watcher(String),

    /// One or more benchmark iterations failed.
    #[error("{failed} of {total} iterations failed")]
    IterationsFailed { failed: usize, total: usize },

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from watchbench-core.
    #[error("{0}")]
    Core(WatchbenchError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                          |
    /// |------|----------------------------------|
    /// | 0    | Success                          |
    /// | 1    | General / command error          |
    /// | 2    | Configuration error              |
    /// | 3    | Watcher service error            |
    /// | 4    | Benchmark iterations failed      |
    /// | 10   | IO error                         |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Watcher(_) => 3,
            Self::IterationsFailed { .. } => 4,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(_) => 1,
        }
    }
}

impl From<WatchbenchError> for CliError {
    /// Config and IO failures keep their dedicated exit codes no matter
    /// which subcommand surfaced them.
    fn from(e: WatchbenchError) -> Self {
        match e {
            WatchbenchError::Config(e) => Self::Config(e.to_string()),
            WatchbenchError::Io(e) => Self::Io(e),
            other => Self::Core(other),
        }
    }
}

impl From<WatcherError> for CliError {
    fn from(e: WatcherError) -> Self {
        Self::Watcher(e.to_string())
    }
}

impl From<watchbench_core::error::RegistryError> for CliError {
    fn from(e: watchbench_core::error::RegistryError) -> Self {
        Self::Command(e.to_string())
    }
}
