use thiserror::Error;

/// Unified error type for the arbor server crates.
///
/// The configuration surface never lets these escape to callers; they exist
/// for the internal fallible steps that the public surface catches, logs, and
/// degrades from, and for binaries that do want to fail loudly.
#[derive(Error, Debug)]
pub enum ArborError {
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArborError>;
