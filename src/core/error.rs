use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClockError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid position: latitude {latitude}, longitude {longitude}")]
    InvalidPosition { latitude: f64, longitude: f64 },

    #[error("Beat value out of range: {0}")]
    InvalidBeat(f64),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClockError>;
