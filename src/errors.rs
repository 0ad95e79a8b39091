//! # Error Types Module
//!
//! This module defines the error type used at the edges of the substitution engine:
//! building a rule catalog, reading configuration or preferences, loading messages and
//! reading input lines.
//! Parsing and resolving ingredient lines never produce errors.

/// Custom error types for catalog construction, configuration and input handling
#[derive(Debug, Clone, PartialEq)]
pub enum SafeEatsError {
    /// A substitution rule failed validation (bad ratio, duplicate id, ...)
    InvalidRule(String),
    /// A rule pattern could not be compiled
    InvalidPattern(String),
    /// Two allergen categories share the same key
    DuplicateCategory(String),
    /// A configuration value could not be interpreted
    Config(String),
    /// Stored preferences could not be read or written
    Preferences(String),
    /// Reading candidate lines failed
    Io(String),
    /// The embedded message resource could not be loaded
    Localization(String),
}

impl std::fmt::Display for SafeEatsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SafeEatsError::InvalidRule(msg) => write!(f, "Invalid rule: {msg}"),
            SafeEatsError::InvalidPattern(msg) => write!(f, "Invalid pattern: {msg}"),
            SafeEatsError::DuplicateCategory(key) => {
                write!(f, "Duplicate allergen category: {key}")
            }
            SafeEatsError::Config(msg) => write!(f, "Configuration error: {msg}"),
            SafeEatsError::Preferences(msg) => write!(f, "Preferences error: {msg}"),
            SafeEatsError::Io(msg) => write!(f, "I/O error: {msg}"),
            SafeEatsError::Localization(msg) => write!(f, "Localization error: {msg}"),
        }
    }
}

impl std::error::Error for SafeEatsError {}

impl From<regex::Error> for SafeEatsError {
    fn from(err: regex::Error) -> Self {
        SafeEatsError::InvalidPattern(err.to_string())
    }
}

impl From<serde_json::Error> for SafeEatsError {
    fn from(err: serde_json::Error) -> Self {
        SafeEatsError::Preferences(err.to_string())
    }
}

impl From<std::io::Error> for SafeEatsError {
    fn from(err: std::io::Error) -> Self {
        SafeEatsError::Io(err.to_string())
    }
}
