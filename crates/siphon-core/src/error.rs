// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Ingestion error types.

use thiserror::Error;

/// A Result type with IngestError.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors raised on the ingestion path.
///
/// `NotRegistered` and `AlreadyRegistered` are programming errors in the
/// host wiring and must surface loudly; `Delivery` indicates the downstream
/// consumer went away.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// `ingest` was called before a sink was registered.
    #[error("No ingestion sink registered")]
    NotRegistered,

    /// A sink was already registered; registration is a one-time binding.
    #[error("An ingestion sink is already registered")]
    AlreadyRegistered,

    /// The registered sink could not accept the reading.
    #[error("Failed to deliver reading to sink: {message}")]
    Delivery {
        /// Error message.
        message: String,
    },
}

impl IngestError {
    /// Creates a delivery error.
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }

    /// Returns `true` if this error indicates a wiring mistake rather than
    /// a runtime delivery failure.
    pub fn is_programming_error(&self) -> bool {
        matches!(
            self,
            IngestError::NotRegistered | IngestError::AlreadyRegistered
        )
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_programming_errors() {
        assert!(IngestError::NotRegistered.is_programming_error());
        assert!(IngestError::AlreadyRegistered.is_programming_error());
        assert!(!IngestError::delivery("closed").is_programming_error());
    }

    #[test]
    fn test_display() {
        let err = IngestError::delivery("channel closed");
        assert_eq!(
            err.to_string(),
            "Failed to deliver reading to sink: channel closed"
        );
    }
}
