// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Typed-value decoder.
//!
//! [`decode`] is a pure, total mapping from a runtime-tagged [`MmsValue`]
//! to a [`NormalizedRecord`]. No tag is silently dropped: access errors
//! and unsupported tags produce explicit non-record outcomes that the
//! caller logs and skips, and the exhaustive match keeps the tag space
//! covered at compile time.
//!
//! | Source tag | Record name | Transform |
//! |---|---|---|
//! | Float32 / Float64 | `MMS_FLOAT` | numeric, precision preserved |
//! | Boolean | `MMS_BOOLEAN` | canonical 1/0 integer |
//! | Integer | `MMS_INTEGER` | widened to i64 |
//! | Unsigned | `MMS_UNSIGNED` | widened to i64 |
//! | VisibleString | `MMS_VISIBLE_STRING` | copied verbatim |
//! | OctetString | `MMS_OCTET_STRING` | bytes of reported length |
//! | AccessError | (none) | no record |
//! | anything else | (none) | no record |

use siphon_core::{NormalizedRecord, RecordValue};

use crate::types::{DataAccessError, MmsValue};

// =============================================================================
// DecodeOutcome
// =============================================================================

/// The result of decoding one server value.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    /// The value mapped to a normalized record.
    Record(NormalizedRecord),

    /// The server reported a data-access error; no record is emitted and
    /// the condition is recoverable.
    AccessError(DataAccessError),

    /// The value carried a type tag outside the supported set; no record
    /// is emitted.
    Unsupported(u8),
}

impl DecodeOutcome {
    /// Returns the record, if one was produced.
    pub fn into_record(self) -> Option<NormalizedRecord> {
        match self {
            DecodeOutcome::Record(record) => Some(record),
            _ => None,
        }
    }
}

// =============================================================================
// decode
// =============================================================================

/// Decodes a runtime-tagged value into its normalized form.
///
/// Never panics; unmapped tags degrade to [`DecodeOutcome::Unsupported`]
/// rather than aborting the caller's loop.
pub fn decode(value: MmsValue) -> DecodeOutcome {
    match value {
        MmsValue::Float32(v) => {
            DecodeOutcome::Record(NormalizedRecord::new("MMS_FLOAT", RecordValue::Float(v as f64)))
        }
        MmsValue::Float64(v) => {
            DecodeOutcome::Record(NormalizedRecord::new("MMS_FLOAT", RecordValue::Float(v)))
        }
        MmsValue::Boolean(v) => DecodeOutcome::Record(NormalizedRecord::new(
            "MMS_BOOLEAN",
            RecordValue::Integer(if v { 1 } else { 0 }),
        )),
        MmsValue::Integer(v) => DecodeOutcome::Record(NormalizedRecord::new(
            "MMS_INTEGER",
            RecordValue::Integer(i64::from(v)),
        )),
        MmsValue::Unsigned(v) => DecodeOutcome::Record(NormalizedRecord::new(
            "MMS_UNSIGNED",
            RecordValue::Integer(i64::from(v)),
        )),
        MmsValue::VisibleString(v) => DecodeOutcome::Record(NormalizedRecord::new(
            "MMS_VISIBLE_STRING",
            RecordValue::Text(v),
        )),
        MmsValue::OctetString(v) => DecodeOutcome::Record(NormalizedRecord::new(
            "MMS_OCTET_STRING",
            RecordValue::Bytes(v),
        )),
        MmsValue::AccessError(reason) => DecodeOutcome::AccessError(reason),
        MmsValue::Unsupported(tag) => DecodeOutcome::Unsupported(tag),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_preserves_precision() {
        let outcome = decode(MmsValue::Float32(1.5));
        assert_eq!(
            outcome,
            DecodeOutcome::Record(NormalizedRecord::new("MMS_FLOAT", RecordValue::Float(1.5)))
        );

        let outcome = decode(MmsValue::Float64(std::f64::consts::PI));
        assert_eq!(
            outcome,
            DecodeOutcome::Record(NormalizedRecord::new(
                "MMS_FLOAT",
                RecordValue::Float(std::f64::consts::PI)
            ))
        );
    }

    #[test]
    fn test_boolean_is_canonical_numeric() {
        assert_eq!(
            decode(MmsValue::Boolean(true)),
            DecodeOutcome::Record(NormalizedRecord::new("MMS_BOOLEAN", RecordValue::Integer(1)))
        );
        assert_eq!(
            decode(MmsValue::Boolean(false)),
            DecodeOutcome::Record(NormalizedRecord::new("MMS_BOOLEAN", RecordValue::Integer(0)))
        );
    }

    #[test]
    fn test_integers_widen() {
        assert_eq!(
            decode(MmsValue::Integer(i32::MIN)),
            DecodeOutcome::Record(NormalizedRecord::new(
                "MMS_INTEGER",
                RecordValue::Integer(i64::from(i32::MIN))
            ))
        );
        assert_eq!(
            decode(MmsValue::Unsigned(u32::MAX)),
            DecodeOutcome::Record(NormalizedRecord::new(
                "MMS_UNSIGNED",
                RecordValue::Integer(i64::from(u32::MAX))
            ))
        );
    }

    #[test]
    fn test_strings_and_bytes_copied_verbatim() {
        assert_eq!(
            decode(MmsValue::VisibleString("GGIO1".into())),
            DecodeOutcome::Record(NormalizedRecord::new(
                "MMS_VISIBLE_STRING",
                RecordValue::Text("GGIO1".into())
            ))
        );

        // Embedded NUL and the reported length survive.
        let bytes = vec![0x00, 0xFF, 0x00, 0x7A];
        assert_eq!(
            decode(MmsValue::OctetString(bytes.clone())),
            DecodeOutcome::Record(NormalizedRecord::new(
                "MMS_OCTET_STRING",
                RecordValue::Bytes(bytes)
            ))
        );
    }

    #[test]
    fn test_access_error_emits_no_record() {
        let outcome = decode(MmsValue::AccessError(DataAccessError::ObjectAccessDenied));
        assert_eq!(
            outcome,
            DecodeOutcome::AccessError(DataAccessError::ObjectAccessDenied)
        );
        assert_eq!(outcome.into_record(), None);
    }

    #[test]
    fn test_unsupported_tag_emits_no_record() {
        // Tag 3 is the bit-string type, which this client does not map.
        let outcome = decode(MmsValue::Unsupported(3));
        assert_eq!(outcome, DecodeOutcome::Unsupported(3));
        assert_eq!(outcome.into_record(), None);
    }

    #[test]
    fn test_every_record_name_matches_table() {
        let cases = [
            (MmsValue::Float32(0.0), "MMS_FLOAT"),
            (MmsValue::Float64(0.0), "MMS_FLOAT"),
            (MmsValue::Boolean(true), "MMS_BOOLEAN"),
            (MmsValue::Integer(0), "MMS_INTEGER"),
            (MmsValue::Unsigned(0), "MMS_UNSIGNED"),
            (MmsValue::VisibleString(String::new()), "MMS_VISIBLE_STRING"),
            (MmsValue::OctetString(Vec::new()), "MMS_OCTET_STRING"),
        ];

        for (value, expected) in cases {
            let record = decode(value).into_record().expect("record expected");
            assert_eq!(record.name, expected);
        }
    }
}
