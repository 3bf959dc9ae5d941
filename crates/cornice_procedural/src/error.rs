//! # Material Error Types
//!
//! Loading and validating a material is the only fallible step of
//! building synthesis. Generation itself never returns errors.

use thiserror::Error;

/// Errors that can occur while loading a building material.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaterialError {
    /// The material file could not be read.
    #[error("failed to read material file {path}: {reason}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error text.
        reason: String,
    },

    /// The material text is not valid TOML for a material.
    #[error("failed to parse material: {0}")]
    Parse(String),

    /// A field holds a value the generator cannot work with.
    #[error("invalid material field `{field}`: {reason}")]
    InvalidField {
        /// Offending field name.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Result type for material operations.
pub type MaterialResult<T> = Result<T, MaterialError>;
