// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error hierarchy for the IEC 61850 acquisition client.
//!
//! Three layers are distinguished:
//!
//! - [`IedClientError`]: the wire-protocol client's error-code surface,
//!   produced by transport implementations
//! - [`ConnectError`] / [`ReadError`]: session-level errors with endpoint
//!   and reference context; both are transient, and the acquisition loop
//!   absorbs them and retries
//! - [`ClientError`]: controller-level failures, including the loud
//!   programming errors (`AlreadyRunning`, `SinkNotRegistered`)
//!
//! No transport failure ever propagates past the acquisition loop.

use thiserror::Error;

use siphon_config::ConfigError;
use siphon_core::IngestError;

use crate::types::Endpoint;

// =============================================================================
// IedClientError - Wire Client Error Codes
// =============================================================================

/// Error codes reported by the wire-protocol client.
///
/// This mirrors the narrow error surface of the external MMS client
/// library; codes outside the known set are preserved verbatim.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IedClientError {
    /// No connection is established.
    #[error("not connected")]
    NotConnected,

    /// A connection already exists.
    #[error("already connected")]
    AlreadyConnected,

    /// The established connection was lost.
    #[error("connection lost")]
    ConnectionLost,

    /// The requested service is not supported by the server.
    #[error("service not supported")]
    ServiceNotSupported,

    /// The server rejected the connection.
    #[error("connection rejected")]
    ConnectionRejected,

    /// The referenced object does not exist.
    #[error("object does not exist")]
    ObjectDoesNotExist,

    /// The operation timed out.
    #[error("timeout")]
    Timeout,

    /// Access to the object was denied.
    #[error("access denied")]
    AccessDenied,

    /// An error code outside the known set.
    #[error("unknown error (code {0})")]
    Unknown(u32),
}

impl IedClientError {
    /// Creates an error from its wire code.
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => Self::NotConnected,
            2 => Self::AlreadyConnected,
            3 => Self::ConnectionLost,
            4 => Self::ServiceNotSupported,
            5 => Self::ConnectionRejected,
            32 => Self::ObjectDoesNotExist,
            48 => Self::Timeout,
            49 => Self::AccessDenied,
            other => Self::Unknown(other),
        }
    }

    /// Returns the wire code of this error.
    pub fn code(&self) -> u32 {
        match self {
            Self::NotConnected => 1,
            Self::AlreadyConnected => 2,
            Self::ConnectionLost => 3,
            Self::ServiceNotSupported => 4,
            Self::ConnectionRejected => 5,
            Self::ObjectDoesNotExist => 32,
            Self::Timeout => 48,
            Self::AccessDenied => 49,
            Self::Unknown(code) => *code,
        }
    }

    /// Returns `true` if this error means the connection is unusable.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::NotConnected | Self::ConnectionLost | Self::ConnectionRejected
        )
    }
}

// =============================================================================
// ConnectError
// =============================================================================

/// A failed connection attempt.
///
/// Every connect failure is transient from the loop's perspective: the
/// design favors indefinite retry with a fixed backoff over fail-fast.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// The server rejected the connection.
    #[error("Connection to {host}:{port} rejected by server")]
    Rejected {
        /// Server host.
        host: String,
        /// Server port.
        port: u16,
    },

    /// The connection attempt timed out.
    #[error("Connection to {host}:{port} timed out")]
    Timeout {
        /// Server host.
        host: String,
        /// Server port.
        port: u16,
    },

    /// The connection failed with a wire-client error code.
    #[error("Connection to {host}:{port} failed: {code}")]
    Failed {
        /// Server host.
        host: String,
        /// Server port.
        port: u16,
        /// Underlying wire-client error.
        code: IedClientError,
    },
}

impl ConnectError {
    /// Maps a wire-client error code into a connect error.
    pub fn from_code(endpoint: &Endpoint, code: IedClientError) -> Self {
        match code {
            IedClientError::ConnectionRejected => Self::Rejected {
                host: endpoint.host.clone(),
                port: endpoint.port,
            },
            IedClientError::Timeout => Self::Timeout {
                host: endpoint.host.clone(),
                port: endpoint.port,
            },
            other => Self::Failed {
                host: endpoint.host.clone(),
                port: endpoint.port,
                code: other,
            },
        }
    }

    /// Returns `true` if this error is retryable. Connect failures always
    /// are; the loop retries with a fixed backoff, without bound.
    pub fn is_retryable(&self) -> bool {
        true
    }
}

// =============================================================================
// ReadError
// =============================================================================

/// A failed read on an established session.
///
/// Any read error demotes the session back to reconnect; none terminates
/// the acquisition loop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// The session is not connected.
    #[error("Session is not connected")]
    NotConnected,

    /// The connection was lost mid-read.
    #[error("Connection lost while reading '{reference}'")]
    ConnectionLost {
        /// The object reference being read.
        reference: String,
    },

    /// The read timed out.
    #[error("Read of '{reference}' timed out")]
    Timeout {
        /// The object reference being read.
        reference: String,
    },

    /// The read failed with a wire-client error code.
    #[error("Read of '{reference}' failed: {code}")]
    Service {
        /// The object reference being read.
        reference: String,
        /// Underlying wire-client error.
        code: IedClientError,
    },
}

impl ReadError {
    /// Maps a wire-client error code into a read error.
    pub fn from_code(reference: &str, code: IedClientError) -> Self {
        match code {
            IedClientError::NotConnected => Self::NotConnected,
            IedClientError::ConnectionLost => Self::ConnectionLost {
                reference: reference.to_string(),
            },
            IedClientError::Timeout => Self::Timeout {
                reference: reference.to_string(),
            },
            other => Self::Service {
                reference: reference.to_string(),
                code: other,
            },
        }
    }

    /// Returns `true` if this error is retryable (all read errors are:
    /// the loop falls back to reconnect rather than terminating).
    pub fn is_retryable(&self) -> bool {
        true
    }
}

// =============================================================================
// ClientError
// =============================================================================

/// Controller-level errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// `start` was called while an acquisition loop is already running.
    #[error("Acquisition loop is already running")]
    AlreadyRunning,

    /// `start` was called before an ingestion sink was registered.
    #[error("No ingestion sink registered; call register_sink first")]
    SinkNotRegistered,

    /// Configuration loading failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Sink registration failed.
    #[error("Ingestion error: {0}")]
    Ingest(#[from] IngestError),
}

/// A Result type with ClientError.
pub type ClientResult<T> = Result<T, ClientError>;

// =============================================================================
// Tests
// =============================================================================
