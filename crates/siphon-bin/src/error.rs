// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for the SIPHON binary.

use thiserror::Error;

/// Result type alias for siphon-bin operations.
pub type BinResult<T> = Result<T, BinError>;

/// Errors that can occur in the SIPHON binary.
#[derive(Debug, Error)]
pub enum BinError {
    /// Initialization error.
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Config parsing error.
    #[error("Config error: {0}")]
    Config(#[from] siphon_config::ConfigError),

    /// Acquisition client error.
    #[error("Client error: {0}")]
    Client(#[from] siphon_iec61850::ClientError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        /// The context description.
        context: String,
        /// The underlying error.
        #[source]
        source: Box<BinError>,
    },
}

impl BinError {
    /// Creates an initialization error.
    pub fn init(msg: impl Into<String>) -> Self {
        Self::Initialization(msg.into())
    }

    /// Creates an I/O error.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Adds context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Returns the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 1,
            Self::Initialization(_) => 2,
            Self::Client(_) => 3,
            Self::Io(_) => 4,
            Self::WithContext { source, .. } => source.exit_code(),
        }
    }
}

impl From<std::io::Error> for BinError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// =============================================================================
// Error Reporting
// =============================================================================

/// Reports an error with its cause chain.
pub fn report_error(error: &BinError) {
    eprintln!("Error: {}", error);

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("  Caused by: {}", cause);
        source = cause.source();
    }
}

/// Reports an error and exits with the appropriate code.
pub fn report_error_and_exit(error: BinError) -> ! {
    report_error(&error);
    std::process::exit(error.exit_code())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = BinError::init("missing transport");
        assert_eq!(err.to_string(), "Initialization error: missing transport");
    }

    #[test]
    fn test_error_with_context() {
        let err = BinError::io("file not found").with_context("loading configuration");
        assert_eq!(
            err.to_string(),
            "loading configuration: I/O error: file not found"
        );
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            BinError::Config(siphon_config::ConfigError::invalid_port("x")).exit_code(),
            1
        );
        assert_eq!(BinError::init("x").exit_code(), 2);
        assert_eq!(BinError::io("x").exit_code(), 4);
        assert_eq!(
            BinError::io("x").with_context("ctx").exit_code(),
            4
        );
    }
}
