//! Error types for vindec.
//!
//! Decoding itself never fails: a malformed VIN yields a decode result with
//! `is_valid == false`. The errors here cover the surfaces around the
//! decoder: strict VIN parsing, configuration, and fleet file handling.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Why a string was rejected as a VIN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidVinReason {
    /// The input was empty.
    Empty,
    /// The input did not have exactly 17 characters.
    Length(usize),
    /// The input contained a character outside `[A-HJ-NPR-Z0-9]`.
    Character(char),
}

impl fmt::Display for InvalidVinReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty input"),
            Self::Length(len) => write!(f, "expected 17 characters, got {len}"),
            Self::Character(c) => write!(f, "character '{c}' is not allowed"),
        }
    }
}

/// The main error type for vindec operations.
#[derive(Error, Debug)]
pub enum Error {
    // === VIN Errors ===
    /// The input is not a well-formed VIN.
    #[error("invalid VIN '{input}': {reason}")]
    InvalidVin {
        /// The rejected input.
        input: String,
        /// What was wrong with it.
        reason: InvalidVinReason,
    },

    /// Two trucks in the same fleet share a VIN.
    #[error("duplicate VIN in fleet: {vin}")]
    DuplicateVin {
        /// The repeated VIN.
        vin: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Failed to read an input file.
    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        /// Path that couldn't be read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an output file.
    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        /// Path that couldn't be written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for vindec operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid VIN error.
    #[must_use]
    pub fn invalid_vin(input: impl Into<String>, reason: InvalidVinReason) -> Self {
        Self::InvalidVin {
            input: input.into(),
            reason,
        }
    }

    /// Create a config validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }
}
