// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration error types.

use thiserror::Error;

/// A Result type with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration-related errors.
///
/// Most invalid settings are corrected locally by default substitution and
/// never reach this type; malformed numeric fields are the exception and
/// must fail loading outright so the host framework can report a clear
/// setup error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    Parse {
        /// Error message.
        message: String,
    },

    /// The configuration document is not a key/value object.
    #[error("Configuration must be a JSON object, found {found}")]
    NotAnObject {
        /// The JSON type that was found instead.
        found: &'static str,
    },

    /// The `port` value does not parse as an unsigned 16-bit integer.
    #[error("Invalid port value '{value}': must be an unsigned 16-bit integer")]
    InvalidPort {
        /// The offending value.
        value: String,
    },
}

impl ConfigError {
    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Creates an invalid port error.
    pub fn invalid_port(value: impl Into<String>) -> Self {
        Self::InvalidPort {
            value: value.into(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ConfigError::invalid_port("99999");
        assert_eq!(
            err.to_string(),
            "Invalid port value '99999': must be an unsigned 16-bit integer"
        );
    }
}
