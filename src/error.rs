//! Error types.
//!
//! Domain failures are typed (`LoadError`, `ValidationError`, `PredictionError`)
//! so callers can react to them. At the binary boundary everything collapses into
//! `AppError`, which carries the process exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Exit code for usage, configuration and input validation errors.
pub const EXIT_USAGE: u8 = 2;
/// Exit code for artifact load failures.
pub const EXIT_LOAD: u8 = 3;
/// Exit code for prediction and terminal failures.
pub const EXIT_RUNTIME: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// The persisted pipeline could not be loaded.
///
/// Always fatal: without a pipeline there is nothing to predict with.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("model artifact not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("failed to read model artifact '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("model artifact '{}' is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("model artifact '{}' is incompatible: {reason}", path.display())]
    Incompatible { path: PathBuf, reason: String },
}

/// A raw input fell outside the domain of its field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} is not a numeric field")]
    NotNumeric { field: &'static str },

    #[error("'{value}' is not a valid {field} (expected one of: {expected})")]
    UnknownOption {
        field: &'static str,
        value: String,
        expected: String,
    },
}

/// The pipeline could not evaluate a batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("empty batch")]
    EmptyBatch,

    #[error("record is missing feature '{0}'")]
    MissingFeature(String),

    #[error("feature '{feature}' expects a {expected} value")]
    WrongType {
        feature: String,
        expected: &'static str,
    },

    #[error("unknown category '{value}' for feature '{feature}'")]
    UnknownCategory { feature: String, value: String },

    #[error("pipeline produced a non-finite score")]
    NonFinite,

    #[error("pipeline returned {got} score(s) for a batch of {expected}")]
    ResultCount { expected: usize, got: usize },
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        AppError::new(EXIT_LOAD, format!("Failed to load prediction pipeline: {err}"))
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::new(EXIT_USAGE, format!("Invalid input: {err}"))
    }
}

impl From<PredictionError> for AppError {
    fn from(err: PredictionError) -> Self {
        AppError::new(EXIT_RUNTIME, format!("Prediction failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_errors_map_to_load_exit_code() {
        let err: AppError = LoadError::Missing {
            path: PathBuf::from("model.json"),
        }
        .into();
        assert_eq!(err.exit_code(), EXIT_LOAD);
        assert!(err.to_string().contains("model.json"));
    }

    #[test]
    fn validation_message_names_the_field() {
        let err = ValidationError::OutOfRange {
            field: "age",
            min: 17.0,
            max: 45.0,
            value: 50.0,
        };
        assert_eq!(err.to_string(), "age must be between 17 and 45 (got 50)");
        assert_eq!(AppError::from(err).exit_code(), EXIT_USAGE);
    }
}
