use thiserror::Error;

/// Top-level error type for wren.
#[derive(Debug, Error)]
pub enum WrenError {
    /// Error from the transport layer (send, reaction, connection).
    #[error("transport error: {0}")]
    Transport(String),

    /// Error raised by a plugin during construction or execution.
    #[error("plugin error: {0}")]
    Plugin(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
