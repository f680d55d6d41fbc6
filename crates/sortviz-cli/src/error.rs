#![forbid(unsafe_code)]

use sortviz_core::InputError;
use sortviz_runtime::ConfigError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("replay stalled: no tick within {waited_ms}ms")]
    TimerStalled { waited_ms: u64 },
}

impl CliError {
    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Input(_) => 2,
            Self::Config(_) => 3,
            Self::Io(_) | Self::Json(_) | Self::TimerStalled { .. } => 1,
        }
    }
}
