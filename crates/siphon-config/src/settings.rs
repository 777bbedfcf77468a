// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Typed acquisition settings.
//!
//! This module turns the string-keyed [`ConfigProvider`] into the typed
//! field set the controller works with. Missing keys take the documented
//! defaults; invalid values fall back field by field. The exception is
//! `port`, which must parse as an unsigned 16-bit integer or configuration
//! loading fails outright.

use serde::Serialize;

use crate::error::{ConfigError, ConfigResult};
use crate::provider::ConfigProvider;

// =============================================================================
// Recognized Keys
// =============================================================================

/// Server IP address.
pub const KEY_IP: &str = "ip";
/// Server port.
pub const KEY_PORT: &str = "port";
/// IED model name.
pub const KEY_IED_MODEL: &str = "IED Model";
/// Logical device name.
pub const KEY_LOGICAL_DEVICE: &str = "Logical Device";
/// Logical node name.
pub const KEY_LOGICAL_NODE: &str = "Logical Node";
/// Common data class name.
pub const KEY_CDC: &str = "CDC";
/// Data attribute of the CDC.
pub const KEY_DATA_ATTRIBUTE: &str = "Data Attribute";
/// Functional constraint.
pub const KEY_FUNCTIONAL_CONSTRAINT: &str = "Functional Constraint";
/// Asset name attached to emitted readings.
pub const KEY_ASSET: &str = "asset";

// =============================================================================
// Documented Defaults
// =============================================================================

/// Default server IP.
pub const DEFAULT_IP: &str = "127.0.0.1";
/// Default server port.
pub const DEFAULT_PORT: u16 = 8102;
/// Default IED model.
pub const DEFAULT_IED_MODEL: &str = "simpleIO";
/// Default logical device.
pub const DEFAULT_LOGICAL_DEVICE: &str = "GenericIO";
/// Default logical node.
pub const DEFAULT_LOGICAL_NODE: &str = "GGIO1";
/// Default common data class.
pub const DEFAULT_CDC: &str = "SPCSO1";
/// Default data attribute.
pub const DEFAULT_DATA_ATTRIBUTE: &str = "stVal";
/// Default functional constraint.
pub const DEFAULT_FUNCTIONAL_CONSTRAINT: &str = "ST";
/// Default asset name.
pub const DEFAULT_ASSET: &str = "iec61850";

// =============================================================================
// AcquisitionSettings
// =============================================================================

/// The complete configuration of one acquisition client.
///
/// All fields are owned by the controller and mutated only inside an
/// exclusive reconfiguration window; the setters apply the documented
/// fallbacks for invalid endpoint values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcquisitionSettings {
    /// Server IP address.
    pub ip: String,
    /// Server port.
    pub port: u16,
    /// IED model name.
    pub ied_model: String,
    /// Logical device name.
    pub logical_device: String,
    /// Logical node name.
    pub logical_node: String,
    /// Common data class name.
    pub cdc: String,
    /// Data attribute of the CDC.
    pub attribute: String,
    /// Functional constraint (validated downstream, safe default `ST`).
    pub functional_constraint: String,
    /// Asset name attached to emitted readings.
    pub asset: String,
}

impl Default for AcquisitionSettings {
    fn default() -> Self {
        Self {
            ip: DEFAULT_IP.to_string(),
            port: DEFAULT_PORT,
            ied_model: DEFAULT_IED_MODEL.to_string(),
            logical_device: DEFAULT_LOGICAL_DEVICE.to_string(),
            logical_node: DEFAULT_LOGICAL_NODE.to_string(),
            cdc: DEFAULT_CDC.to_string(),
            attribute: DEFAULT_DATA_ATTRIBUTE.to_string(),
            functional_constraint: DEFAULT_FUNCTIONAL_CONSTRAINT.to_string(),
            asset: DEFAULT_ASSET.to_string(),
        }
    }
}

impl AcquisitionSettings {
    /// Builds settings from a configuration provider.
    ///
    /// Missing keys keep their defaults. `port` must parse as u16.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] for a malformed port value.
    pub fn from_provider(provider: &ConfigProvider) -> ConfigResult<Self> {
        let mut settings = Self::default();

        if let Some(ip) = provider.get_value(KEY_IP) {
            settings.set_ip(ip);
        }
        if let Some(port) = provider.get_value(KEY_PORT) {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid_port(port))?;
            settings.set_port(port);
        }
        if let Some(model) = provider.get_value(KEY_IED_MODEL) {
            settings.set_ied_model(model);
        }
        if let Some(device) = provider.get_value(KEY_LOGICAL_DEVICE) {
            settings.set_logical_device(device);
        }
        if let Some(node) = provider.get_value(KEY_LOGICAL_NODE) {
            settings.set_logical_node(node);
        }
        if let Some(cdc) = provider.get_value(KEY_CDC) {
            settings.set_cdc(cdc);
        }
        if let Some(attribute) = provider.get_value(KEY_DATA_ATTRIBUTE) {
            settings.set_attribute(attribute);
        }
        if let Some(fc) = provider.get_value(KEY_FUNCTIONAL_CONSTRAINT) {
            settings.set_functional_constraint(fc);
        }
        if let Some(asset) = provider.get_value(KEY_ASSET) {
            settings.set_asset(asset);
        }

        Ok(settings)
    }

    /// Sets the server IP. An empty value falls back to [`DEFAULT_IP`].
    pub fn set_ip(&mut self, ip: &str) {
        if ip.is_empty() {
            tracing::warn!(default = DEFAULT_IP, "empty server IP, using default");
            self.ip = DEFAULT_IP.to_string();
        } else {
            self.ip = ip.to_string();
        }
    }

    /// Sets the server port. Zero falls back to [`DEFAULT_PORT`].
    pub fn set_port(&mut self, port: u16) {
        if port == 0 {
            tracing::warn!(default = DEFAULT_PORT, "zero server port, using default");
            self.port = DEFAULT_PORT;
        } else {
            self.port = port;
        }
    }

    /// Sets the IED model name.
    pub fn set_ied_model(&mut self, model: &str) {
        self.ied_model = model.to_string();
    }

    /// Sets the logical device name.
    pub fn set_logical_device(&mut self, device: &str) {
        self.logical_device = device.to_string();
    }

    /// Sets the logical node name.
    pub fn set_logical_node(&mut self, node: &str) {
        self.logical_node = node.to_string();
    }

    /// Sets the common data class name.
    pub fn set_cdc(&mut self, cdc: &str) {
        self.cdc = cdc.to_string();
    }

    /// Sets the data attribute name.
    pub fn set_attribute(&mut self, attribute: &str) {
        self.attribute = attribute.to_string();
    }

    /// Sets the functional constraint string.
    ///
    /// The value is validated downstream against the closed FC space;
    /// unrecognized constraints degrade to the safe default there.
    pub fn set_functional_constraint(&mut self, fc: &str) {
        self.functional_constraint = fc.to_string();
    }

    /// Sets the asset name. An empty value falls back to [`DEFAULT_ASSET`].
    pub fn set_asset(&mut self, asset: &str) {
        if asset.is_empty() {
            self.asset = DEFAULT_ASSET.to_string();
        } else {
            self.asset = asset.to_string();
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
    fn test_defaults_when_keys_missing() {
        let provider = ConfigProvider::empty();
        let settings = AcquisitionSettings::from_provider(&provider).unwrap();

        assert_eq!(settings, AcquisitionSettings::default());
        assert_eq!(settings.ip, "127.0.0.1");
        assert_eq!(settings.port, 8102);
        assert_eq!(settings.asset, "iec61850");
    }

    #[test]
    fn test_full_configuration() {
        let provider = ConfigProvider::from_json_str(
            r#"{
                "asset": "substation-a",
                "ip": "10.0.0.5",
                "port": 102,
                "IED Model": "simpleIO",
                "Logical Device": "GenericIO",
                "Logical Node": "GGIO1",
                "CDC": "SPCSO1",
                "Data Attribute": "stVal",
                "Functional Constraint": "ST"
            }"#,
        )
        .unwrap();

        let settings = AcquisitionSettings::from_provider(&provider).unwrap();
        assert_eq!(settings.ip, "10.0.0.5");
        assert_eq!(settings.port, 102);
        assert_eq!(settings.ied_model, "simpleIO");
        assert_eq!(settings.logical_device, "GenericIO");
        assert_eq!(settings.logical_node, "GGIO1");
        assert_eq!(settings.cdc, "SPCSO1");
        assert_eq!(settings.attribute, "stVal");
        assert_eq!(settings.functional_constraint, "ST");
        assert_eq!(settings.asset, "substation-a");
    }

    #[test]
    fn test_empty_ip_and_zero_port_fall_back() {
        let provider =
            ConfigProvider::from_json_str(r#"{"ip": "", "port": 0}"#).unwrap();
        let settings = AcquisitionSettings::from_provider(&provider).unwrap();

        assert_eq!(settings.ip, DEFAULT_IP);
        assert_eq!(settings.port, DEFAULT_PORT);
    }

    #[test]
    fn test_malformed_port_fails_loading() {
        let provider =
            ConfigProvider::from_json_str(r#"{"port": "not-a-port"}"#).unwrap();
        let err = AcquisitionSettings::from_provider(&provider).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));

        let provider = ConfigProvider::from_json_str(r#"{"port": 99999}"#).unwrap();
        let err = AcquisitionSettings::from_provider(&provider).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
    }

    #[test]
    fn test_empty_asset_falls_back() {
        let mut settings = AcquisitionSettings::default();
        settings.set_asset("");
        assert_eq!(settings.asset, DEFAULT_ASSET);

        settings.set_asset("meter-7");
        assert_eq!(settings.asset, "meter-7");
    }
}
