//! Unified error types for chatsift.
//!
//! This module provides a single [`SiftError`] enum that covers every failure
//! the pipeline can report. Parsing and scoring themselves never fail: a
//! transcript line that doesn't look like a message is absorbed or dropped,
//! and empty keyword lists simply contribute nothing. Errors come from the
//! boundary instead:
//!
//! - **Empty input**: the transcript is empty or whitespace-only
//! - **Configuration**: the configuration document can't be read or fails
//!   validation
//! - **I/O**: reading the transcript or writing the report failed

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatsift operations.
///
/// # Example
///
/// ```rust
/// use chatsift::error::Result;
/// use chatsift::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, SiftError>;

/// The error type for all chatsift operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SiftError {
    /// An I/O error occurred while reading a transcript or configuration,
    /// or while writing a report.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The transcript is empty or contains only whitespace.
    #[error("The chat export is empty. Please check your file and try again.")]
    EmptyInput,

    /// The configuration is structurally valid but its values are not.
    ///
    /// Raised for non-positive or non-finite score weights, unknown pattern
    /// names and similar problems.
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Description of what's wrong
        message: String,
    },

    /// The configuration document is not valid JSON for the expected structure.
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration document is not valid TOML for the expected structure.
    #[cfg(feature = "toml-config")]
    #[error("Invalid configuration TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// A keyword could not be compiled into a matcher.
    ///
    /// Keywords are escaped before compilation, so this only happens for
    /// pathological input such as keywords exceeding the regex size limit.
    #[error("Keyword '{keyword}' cannot be matched: {source}")]
    InvalidKeyword {
        /// The offending keyword
        keyword: String,
        /// The underlying regex error
        #[source]
        source: regex::Error,
    },

    /// The transcript is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl SiftError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        SiftError::Configuration {
            message: message.into(),
        }
    }

    /// Creates an invalid keyword error.
    pub fn invalid_keyword(keyword: impl Into<String>, source: regex::Error) -> Self {
        SiftError::InvalidKeyword {
            keyword: keyword.into(),
            source,
        }
    }

    /// Creates a UTF-8 error with context.
    pub fn utf8(context: impl Into<String>, source: std::string::FromUtf8Error) -> Self {
        SiftError::Utf8 {
            context: context.into(),
            source,
        }
    }

    /// Returns `true` if this is an I/O error.
    pub fn is_io(&self) -> bool {
        matches!(self, SiftError::Io(_))
    }

    /// Returns `true` if the transcript was empty.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, SiftError::EmptyInput)
    }

    /// Returns `true` if the configuration could not be used, whether it failed
    /// to deserialize or failed validation.
    pub fn is_configuration(&self) -> bool {
        match self {
            SiftError::Configuration { .. }
            | SiftError::Json(_)
            | SiftError::InvalidKeyword { .. } => true,
            #[cfg(feature = "toml-config")]
            SiftError::Toml(_) => true,
            _ => false,
        }
    }
}
