// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Object address composition.
//!
//! An IEC 61850 data attribute is addressed by a reference string composed
//! from the IED model, logical device, logical node, common data class and
//! attribute names:
//!
//! ```text
//! <model><logical-device>/<logical-node>.<cdc>.<attribute>
//! ```
//!
//! [`ObjectAddress`] is an immutable value object: the reference is
//! composed once at construction and the whole address is replaced on
//! reconfiguration, so a read can never observe a partially updated
//! reference.

use std::fmt;

use serde::Serialize;

// =============================================================================
// ObjectAddress
// =============================================================================

/// The composed reference of one addressed data attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ObjectAddress {
    ied_model: String,
    logical_device: String,
    logical_node: String,
    cdc: String,
    attribute: String,
    reference: String,
}

impl ObjectAddress {
    /// Composes an address from its components.
    ///
    /// # Examples
    ///
    /// ```
    /// use siphon_iec61850::address::ObjectAddress;
    ///
    /// let addr = ObjectAddress::new("simpleIO", "GenericIO", "GGIO1", "SPCSO1", "stVal");
    /// assert_eq!(addr.reference(), "simpleIOGenericIO/GGIO1.SPCSO1.stVal");
    /// ```
    pub fn new(
        ied_model: impl Into<String>,
        logical_device: impl Into<String>,
        logical_node: impl Into<String>,
        cdc: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        let ied_model = ied_model.into();
        let logical_device = logical_device.into();
        let logical_node = logical_node.into();
        let cdc = cdc.into();
        let attribute = attribute.into();

        let reference = format!(
            "{}{}/{}.{}.{}",
            ied_model, logical_device, logical_node, cdc, attribute
        );

        Self {
            ied_model,
            logical_device,
            logical_node,
            cdc,
            attribute,
            reference,
        }
    }

    /// Returns the composed reference string.
    #[inline]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Returns the IED model name.
    #[inline]
    pub fn ied_model(&self) -> &str {
        &self.ied_model
    }

    /// Returns the logical device name.
    #[inline]
    pub fn logical_device(&self) -> &str {
        &self.logical_device
    }

    /// Returns the logical node name.
    #[inline]
    pub fn logical_node(&self) -> &str {
        &self.logical_node
    }

    /// Returns the common data class name.
    #[inline]
    pub fn cdc(&self) -> &str {
        &self.cdc
    }

    /// Returns the data attribute name.
    #[inline]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }
}

impl fmt::Display for ObjectAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reference)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_composition() {
        let addr = ObjectAddress::new("simpleIO", "GenericIO", "GGIO1", "SPCSO1", "stVal");
        assert_eq!(addr.reference(), "simpleIOGenericIO/GGIO1.SPCSO1.stVal");
        assert_eq!(format!("{}", addr), "simpleIOGenericIO/GGIO1.SPCSO1.stVal");
    }

    #[test]
    fn test_component_accessors() {
        let addr = ObjectAddress::new("m", "d", "n", "c", "a");
        assert_eq!(addr.ied_model(), "m");
        assert_eq!(addr.logical_device(), "d");
        assert_eq!(addr.logical_node(), "n");
        assert_eq!(addr.cdc(), "c");
        assert_eq!(addr.attribute(), "a");
        assert_eq!(addr.reference(), "md/n.c.a");
    }

    #[test]
    fn test_replacement_changes_reference_atomically() {
        let first = ObjectAddress::new("simpleIO", "GenericIO", "GGIO1", "SPCSO1", "stVal");
        let second = ObjectAddress::new("simpleIO", "GenericIO", "MMXU1", "TotW", "mag");

        assert_ne!(first, second);
        assert_eq!(second.reference(), "simpleIOGenericIO/MMXU1.TotW.mag");
        // The original is untouched by building the replacement.
        assert_eq!(first.reference(), "simpleIOGenericIO/GGIO1.SPCSO1.stVal");
    }
}
