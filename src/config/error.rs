use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("required config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize resolved settings: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("failed to deserialize settings: {0}")]
    DeserializeError(#[from] toml::de::Error),

    #[error("environment '{key}' in '{path}' must be a table")]
    InvalidEnvironmentTable { path: PathBuf, key: String },

    #[error("'{key}' is constant and cannot be overridden by {origin}")]
    ConstantOverride { key: &'static str, origin: String },

    #[error("invalid value for '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },
}
