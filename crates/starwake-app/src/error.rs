//! Application-level errors.

use starwake_core::error::{ConfigError, EngineError};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("failed to read script {path}: {source}")]
    ScriptIo {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse script: {0}")]
    ScriptParse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("game loop thread panicked")]
    LoopPanicked,
}
