//! Error types for diagsieve
//!
//! This module defines custom error types using `thiserror`. Classification
//! itself never fails; every error here comes from building the rule store,
//! reading configuration, or talking to external processes.

use thiserror::Error;

/// Main error type for diagsieve
#[derive(Error, Debug)]
pub enum SieveError {
    /// Rule attribute errors (fatal configuration errors)
    #[error("Rule error: {0}")]
    Rules(#[from] RuleError),

    /// Configuration file errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Diagnostic source errors
    #[error("Diagnostic source error: {0}")]
    Source(#[from] SourceError),

    /// Rule provider errors
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised while turning attributes into rules
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RuleError {
    /// An attribute carried a value we do not know how to interpret
    #[error("Unrecognized attribute value: {key}={value}")]
    UnrecognizedValue {
        /// Full attribute name, prefix included
        key: String,
        /// Value as reported by the attribute store
        value: String,
    },

    /// A numeric attribute suffix does not fit a diagnostic code
    #[error("Invalid diagnostic code in attribute '{key}'")]
    InvalidCode {
        /// Full attribute name, prefix included
        key: String,
    },
}

/// Errors that occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        /// Path to the configuration file
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// A message table is not valid `diagnosticMessages.json`
    #[error("Invalid message table '{path}': {source}")]
    Messages {
        /// Path to the table
        path: String,
        /// The underlying JSON error
        source: serde_json::Error,
    },

    /// Configuration file is not valid TOML for our schema
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration could not be serialized back to TOML
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Errors that occur while acquiring diagnostics
#[derive(Error, Debug)]
pub enum SourceError {
    /// Failed to read diagnostics from a file or stdin
    #[error("Failed to read diagnostics from '{path}': {source}")]
    Read {
        /// Path (or `<stdin>`) we were reading from
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The compiler command could not be started
    #[error("Failed to run compiler '{command}': {source}")]
    Spawn {
        /// Program name
        command: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// JSON diagnostic input was malformed
    #[error("Invalid JSON diagnostics: {0}")]
    Json(#[source] serde_json::Error),

    /// A JSON record used a category we do not know
    #[error("Unknown diagnostic category '{0}'")]
    UnknownCategory(String),
}

/// Errors from rule providers
#[derive(Error, Debug)]
pub enum ProviderError {
    /// A provider command failed to start or exited unsuccessfully
    #[error("Command failed: {command}: {message}")]
    CommandFailed {
        /// Command line that failed
        command: String,
        /// Captured stderr or I/O error
        message: String,
    },

    /// The working directory is not inside a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(String),
}

impl From<toml::de::Error> for SieveError {
    fn from(err: toml::de::Error) -> Self {
        SieveError::Config(ConfigError::Parse(err))
    }
}

impl From<toml::ser::Error> for SieveError {
    fn from(err: toml::ser::Error) -> Self {
        SieveError::Config(ConfigError::Serialize(err))
    }
}
