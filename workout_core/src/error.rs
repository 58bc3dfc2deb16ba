//! Error types for the workout_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for workout operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// Program has no executable items
    #[error("Empty program: {0}")]
    EmptyProgram(String),

    /// Program definition cannot be expanded into a timeline
    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),

    /// Program references an exercise the catalog does not contain
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    /// Requested program id does not exist
    #[error("Unknown program: {0}")]
    UnknownProgram(String),

    /// Jump or redo request that fails the legality rules
    #[error("Illegal navigation: {0}")]
    IllegalNavigation(String),

    /// Session state error
    #[error("Session error: {0}")]
    Session(String),
}
