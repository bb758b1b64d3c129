use std::io;

use thiserror::Error;

/// Library-wide error type for specboard operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Required setting is missing from flags, environment, and env file.
    #[error("{setting} is required (set {env_var} or pass --{flag})")]
    MissingSetting { setting: &'static str, env_var: &'static str, flag: &'static str },

    /// Postman API returned an error or could not be reached.
    #[error("{message}")]
    PostmanApi { message: String, status: Option<u16> },

    /// A response did not carry the identifier the workflow needs.
    #[error("No {what} id in Postman response: {response}")]
    MissingIdentifier { what: &'static str, response: String },

    /// Collection generation never produced a queryable collection.
    #[error(
        "Collection for spec '{spec_id}' did not appear after {attempts} attempts (generation response: {response})"
    )]
    GenerationTimeout { spec_id: String, attempts: u32, response: String },

    /// Spec file or directory does not exist.
    #[error("Spec path not found: {0}")]
    SpecNotFound(String),

    /// Spec directory contains no YAML documents.
    #[error("No spec files (*.yaml, *.yml) found under {0}")]
    NoSpecsFound(String),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn api<S: Into<String>>(message: S, status: Option<u16>) -> Self {
        AppError::PostmanApi { message: message.into(), status }
    }

    /// HTTP status carried by an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::PostmanApi { status, .. } => *status,
            _ => None,
        }
    }
}
