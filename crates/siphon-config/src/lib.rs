// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # siphon-config
//!
//! Configuration handling for the SIPHON acquisition client.
//!
//! The host framework supplies configuration as a JSON document of
//! key/value items at `init` and again at every `reconfigure`; nothing is
//! persisted here. This crate provides:
//!
//! - [`ConfigProvider`]: string-keyed lookup with an existence predicate
//! - [`AcquisitionSettings`]: the typed field set with documented defaults
//! - [`ConfigError`]: field-level validation failures
//!
//! ## Example
//!
//! ```
//! use siphon_config::{AcquisitionSettings, ConfigProvider};
//!
//! let provider = ConfigProvider::from_json_str(
//!     r#"{"ip": "10.0.0.5", "port": 102, "asset": "bay-1"}"#,
//! ).unwrap();
//!
//! let settings = AcquisitionSettings::from_provider(&provider).unwrap();
//! assert_eq!(settings.ip, "10.0.0.5");
//! assert_eq!(settings.port, 102);
//! // Missing keys keep their documented defaults.
//! assert_eq!(settings.ied_model, "simpleIO");
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod provider;
pub mod settings;

pub use error::{ConfigError, ConfigResult};
pub use provider::ConfigProvider;
pub use settings::AcquisitionSettings;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
