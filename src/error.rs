use crate::types::Feature;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HardwareError {
    #[error("caller does not hold {0}")]
    PermissionDenied(String),

    #[error("{0} is not a boolean feature")]
    NotBoolean(Feature),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HardwareError>;
