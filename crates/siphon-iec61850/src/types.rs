// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! IEC 61850 specific types.
//!
//! This module provides the MMS-facing type definitions:
//!
//! - **Endpoint**: TCP endpoint of the remote IED
//! - **FunctionalConstraint**: the closed FC qualifier space
//! - **MmsValue**: the runtime-tagged value returned by a read
//! - **DataAccessError**: MMS data-access failure reasons

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use siphon_config::settings::{DEFAULT_IP, DEFAULT_PORT};

// =============================================================================
// Endpoint
// =============================================================================

/// The TCP endpoint of the remote IED.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Endpoint {
    /// Host name or IP address.
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl Endpoint {
    /// Creates a new endpoint.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Returns the `host:port` form of this endpoint.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_IP, DEFAULT_PORT)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

// =============================================================================
// FunctionalConstraint
// =============================================================================

/// An IEC 61850 functional constraint.
///
/// The functional constraint narrows which facet of a modeled object a
/// read addresses (status value, measurand, setting, ...). The space is
/// closed by the standard; unknown strings are rejected at parse time and
/// degrade to the safe default [`FunctionalConstraint::St`] upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FunctionalConstraint {
    /// Status information.
    #[default]
    St,
    /// Measurands (analog values).
    Mx,
    /// Setpoints.
    Sp,
    /// Substitution.
    Sv,
    /// Configuration.
    Cf,
    /// Description.
    Dc,
    /// Setting groups.
    Sg,
    /// Setting group editing.
    Se,
    /// Service response.
    Sr,
    /// Operate received.
    Or,
    /// Blocking.
    Bl,
    /// Extended definition.
    Ex,
    /// Control.
    Co,
    /// Unicast SV.
    Us,
    /// Multicast SV.
    Ms,
    /// Unbuffered reporting.
    Rp,
    /// Buffered reporting.
    Br,
    /// Logging.
    Lg,
    /// GOOSE control.
    Go,
}

impl FunctionalConstraint {
    /// All functional constraints as an array.
    pub const ALL: [FunctionalConstraint; 19] = [
        Self::St,
        Self::Mx,
        Self::Sp,
        Self::Sv,
        Self::Cf,
        Self::Dc,
        Self::Sg,
        Self::Se,
        Self::Sr,
        Self::Or,
        Self::Bl,
        Self::Ex,
        Self::Co,
        Self::Us,
        Self::Ms,
        Self::Rp,
        Self::Br,
        Self::Lg,
        Self::Go,
    ];

    /// Returns the standard two-letter form of this constraint.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::St => "ST",
            Self::Mx => "MX",
            Self::Sp => "SP",
            Self::Sv => "SV",
            Self::Cf => "CF",
            Self::Dc => "DC",
            Self::Sg => "SG",
            Self::Se => "SE",
            Self::Sr => "SR",
            Self::Or => "OR",
            Self::Bl => "BL",
            Self::Ex => "EX",
            Self::Co => "CO",
            Self::Us => "US",
            Self::Ms => "MS",
            Self::Rp => "RP",
            Self::Br => "BR",
            Self::Lg => "LG",
            Self::Go => "GO",
        }
    }
}

impl fmt::Display for FunctionalConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a string does not name a functional constraint.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown functional constraint '{0}'")]
pub struct UnknownFunctionalConstraint(pub String);

impl FromStr for FunctionalConstraint {
    type Err = UnknownFunctionalConstraint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ST" => Ok(Self::St),
            "MX" => Ok(Self::Mx),
            "SP" => Ok(Self::Sp),
            "SV" => Ok(Self::Sv),
            "CF" => Ok(Self::Cf),
            "DC" => Ok(Self::Dc),
            "SG" => Ok(Self::Sg),
            "SE" => Ok(Self::Se),
            "SR" => Ok(Self::Sr),
            "OR" => Ok(Self::Or),
            "BL" => Ok(Self::Bl),
            "EX" => Ok(Self::Ex),
            "CO" => Ok(Self::Co),
            "US" => Ok(Self::Us),
            "MS" => Ok(Self::Ms),
            "RP" => Ok(Self::Rp),
            "BR" => Ok(Self::Br),
            "LG" => Ok(Self::Lg),
            "GO" => Ok(Self::Go),
            other => Err(UnknownFunctionalConstraint(other.to_string())),
        }
    }
}

// =============================================================================
// DataAccessError
// =============================================================================

/// MMS data-access failure reasons.
///
/// These are the reason codes a server may attach to a data-access-error
/// result instead of a value. The enumeration is defined by the wire
/// protocol; codes outside the known set are preserved verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataAccessError {
    /// The referenced object was invalidated.
    ObjectInvalidated,
    /// Hardware fault on the server side.
    HardwareFault,
    /// The object is temporarily unavailable.
    TemporarilyUnavailable,
    /// Access to the object was denied.
    ObjectAccessDenied,
    /// The object is undefined.
    ObjectUndefined,
    /// The address is invalid.
    InvalidAddress,
    /// The object's type is not supported.
    TypeUnsupported,
    /// The object's type is inconsistent with the request.
    TypeInconsistent,
    /// Object attributes are inconsistent.
    ObjectAttributeInconsistent,
    /// The access kind is unsupported for this object.
    ObjectAccessUnsupported,
    /// The object does not exist.
    ObjectNonExistent,
    /// The object's value is invalid.
    ObjectValueInvalid,
    /// A reason code outside the known set.
    Unknown(u8),
}

impl DataAccessError {
    /// Creates a reason from its wire code.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::ObjectInvalidated,
            1 => Self::HardwareFault,
            2 => Self::TemporarilyUnavailable,
            3 => Self::ObjectAccessDenied,
            4 => Self::ObjectUndefined,
            5 => Self::InvalidAddress,
            6 => Self::TypeUnsupported,
            7 => Self::TypeInconsistent,
            8 => Self::ObjectAttributeInconsistent,
            9 => Self::ObjectAccessUnsupported,
            10 => Self::ObjectNonExistent,
            11 => Self::ObjectValueInvalid,
            other => Self::Unknown(other),
        }
    }

    /// Returns the wire code of this reason.
    pub fn code(&self) -> u8 {
        match self {
            Self::ObjectInvalidated => 0,
            Self::HardwareFault => 1,
            Self::TemporarilyUnavailable => 2,
            Self::ObjectAccessDenied => 3,
            Self::ObjectUndefined => 4,
            Self::InvalidAddress => 5,
            Self::TypeUnsupported => 6,
            Self::TypeInconsistent => 7,
            Self::ObjectAttributeInconsistent => 8,
            Self::ObjectAccessUnsupported => 9,
            Self::ObjectNonExistent => 10,
            Self::ObjectValueInvalid => 11,
            Self::Unknown(code) => *code,
        }
    }
}

impl fmt::Display for DataAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ObjectInvalidated => write!(f, "object-invalidated"),
            Self::HardwareFault => write!(f, "hardware-fault"),
            Self::TemporarilyUnavailable => write!(f, "temporarily-unavailable"),
            Self::ObjectAccessDenied => write!(f, "object-access-denied"),
            Self::ObjectUndefined => write!(f, "object-undefined"),
            Self::InvalidAddress => write!(f, "invalid-address"),
            Self::TypeUnsupported => write!(f, "type-unsupported"),
            Self::TypeInconsistent => write!(f, "type-inconsistent"),
            Self::ObjectAttributeInconsistent => write!(f, "object-attribute-inconsistent"),
            Self::ObjectAccessUnsupported => write!(f, "object-access-unsupported"),
            Self::ObjectNonExistent => write!(f, "object-non-existent"),
            Self::ObjectValueInvalid => write!(f, "object-value-invalid"),
            Self::Unknown(code) => write!(f, "unknown({})", code),
        }
    }
}

// =============================================================================
// MmsValue
// =============================================================================

/// A runtime-tagged MMS value returned by a read.
///
/// Each poll produces a fresh value whose concrete representation depends
/// on the remote object's declared type. Ownership transfers from the
/// session through the decoder to the sink adapter and is released after
/// ingestion.
#[derive(Debug, Clone, PartialEq)]
pub enum MmsValue {
    /// 32-bit floating point.
    Float32(f32),
    /// 64-bit floating point.
    Float64(f64),
    /// Boolean.
    Boolean(bool),
    /// Signed 32-bit integer.
    Integer(i32),
    /// Unsigned 32-bit integer.
    Unsigned(u32),
    /// Visible string.
    VisibleString(String),
    /// Octet string of the reported length (not NUL-terminated).
    OctetString(Vec<u8>),
    /// The server reported a data-access error instead of a value.
    AccessError(DataAccessError),
    /// A type tag outside the supported set; the raw tag is preserved.
    Unsupported(u8),
}

impl MmsValue {
    /// Returns the MMS type tag of this value.
    ///
    /// Tags follow the wire protocol's type enumeration (boolean = 2,
    /// integer = 4, unsigned = 5, float = 6, octet-string = 7,
    /// visible-string = 8, data-access-error = 15).
    pub fn tag(&self) -> u8 {
        match self {
            MmsValue::Boolean(_) => 2,
            MmsValue::Integer(_) => 4,
            MmsValue::Unsigned(_) => 5,
            MmsValue::Float32(_) | MmsValue::Float64(_) => 6,
            MmsValue::OctetString(_) => 7,
            MmsValue::VisibleString(_) => 8,
            MmsValue::AccessError(_) => 15,
            MmsValue::Unsupported(tag) => *tag,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            MmsValue::Float32(_) => "float32",
            MmsValue::Float64(_) => "float64",
            MmsValue::Boolean(_) => "boolean",
            MmsValue::Integer(_) => "integer",
            MmsValue::Unsigned(_) => "unsigned",
            MmsValue::VisibleString(_) => "visible-string",
            MmsValue::OctetString(_) => "octet-string",
            MmsValue::AccessError(_) => "data-access-error",
            MmsValue::Unsupported(_) => "unsupported",
        }
    }

    /// Returns `true` if this is a data-access error.
    #[inline]
    pub fn is_access_error(&self) -> bool {
        matches!(self, MmsValue::AccessError(_))
    }

    /// Attempts to get this value as an f64 (floats only).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MmsValue::Float32(v) => Some(*v as f64),
            MmsValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to get this value as a boolean.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MmsValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to get this value as an i32.
    #[inline]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            MmsValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to get this value as a u32.
    #[inline]
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            MmsValue::Unsigned(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to get this value as a string reference.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MmsValue::VisibleString(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to get this value as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            MmsValue::OctetString(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for MmsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MmsValue::Float32(v) => write!(f, "{}", v),
            MmsValue::Float64(v) => write!(f, "{}", v),
            MmsValue::Boolean(v) => write!(f, "{}", v),
            MmsValue::Integer(v) => write!(f, "{}", v),
            MmsValue::Unsigned(v) => write!(f, "{}", v),
            MmsValue::VisibleString(v) => write!(f, "{}", v),
            MmsValue::OctetString(v) => write!(f, "<{} bytes>", v.len()),
            MmsValue::AccessError(reason) => write!(f, "access-error({})", reason),
            MmsValue::Unsupported(tag) => write!(f, "unsupported(tag {})", tag),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
