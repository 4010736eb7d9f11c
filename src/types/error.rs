//! Errors for the configuration surface. The filter pipeline itself cannot fail.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlareError {
    /// Policy file could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Policy file is not valid JSON for a `SessionPolicy`
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Policy values out of range
    #[error("config error: {0}")]
    Config(String),
}

pub type FlareResult<T> = Result<T, FlareError>;
