// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Core data types for SIPHON.
//!
//! This module provides the protocol-agnostic types that flow between the
//! acquisition side and the ingestion sink: normalized records, timestamped
//! readings, and the connection state reported by a session.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

// =============================================================================
// Connection State
// =============================================================================

/// The connection state of an acquisition session.
///
/// The state is owned by the session and queried by the acquisition loop;
/// nothing outside the session mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    /// No transport connection is established.
    #[default]
    Disconnected,

    /// A connection attempt is in progress.
    Connecting,

    /// The transport is connected and reads may be issued.
    Connected,

    /// The transport failed; a new session is required.
    Error,
}

impl ConnectionState {
    /// Returns `true` if the session is connected.
    #[inline]
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    /// Returns `true` if the session has failed.
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, ConnectionState::Error)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "Disconnected"),
            ConnectionState::Connecting => write!(f, "Connecting"),
            ConnectionState::Connected => write!(f, "Connected"),
            ConnectionState::Error => write!(f, "Error"),
        }
    }
}

// =============================================================================
// Record Value
// =============================================================================

/// The value slot of a normalized record.
///
/// Decoded server values are widened into one of four canonical shapes
/// before ingestion, so the sink never has to deal with the source
/// protocol's type granularity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum RecordValue {
    /// Floating-point value (32-bit sources are widened losslessly).
    Float(f64),

    /// Signed integer value (booleans and unsigned sources are widened).
    Integer(i64),

    /// Text value, copied verbatim from the source.
    Text(String),

    /// Raw byte sequence of the reported length.
    Bytes(Vec<u8>),
}

impl RecordValue {
    /// Returns the type name of this value.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        match self {
            RecordValue::Float(_) => "float",
            RecordValue::Integer(_) => "integer",
            RecordValue::Text(_) => "text",
            RecordValue::Bytes(_) => "bytes",
        }
    }

    /// Attempts to get this value as an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RecordValue::Float(v) => Some(*v),
            RecordValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Attempts to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RecordValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to get this value as a string reference.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RecordValue::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to get this value as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RecordValue::Bytes(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordValue::Float(v) => write!(f, "{}", v),
            RecordValue::Integer(v) => write!(f, "{}", v),
            RecordValue::Text(v) => write!(f, "{}", v),
            RecordValue::Bytes(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}

// =============================================================================
// Normalized Record
// =============================================================================

/// A decoded data point, named by its source type.
///
/// The `name` is the semantic type tag reported by the server (for example
/// `"MMS_FLOAT"`); the `value` is the canonical representation handed to
/// the ingestion sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    /// Semantic type tag of the source value.
    pub name: &'static str,

    /// The normalized value.
    pub value: RecordValue,
}

impl NormalizedRecord {
    /// Creates a new normalized record.
    pub fn new(name: &'static str, value: RecordValue) -> Self {
        Self { name, value }
    }
}

impl fmt::Display for NormalizedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}

// =============================================================================
// Reading
// =============================================================================

/// A timestamped reading delivered to the ingestion sink.
///
/// Exactly one reading is produced per successful decode, tagged with the
/// configured asset name and a generation timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    /// The asset this reading belongs to.
    pub asset: String,

    /// The decoded record.
    pub record: NormalizedRecord,

    /// When the reading was produced.
    pub timestamp: DateTime<Utc>,
}

impl Reading {
    /// Creates a new reading stamped with the current time.
    pub fn new(asset: impl Into<String>, record: NormalizedRecord) -> Self {
        Self {
            asset: asset.into(),
            record,
            timestamp: Utc::now(),
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} @ {}",
            self.asset,
            self.record,
            self.timestamp.format("%Y-%m-%d %H:%M:%S%.3f")
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
