// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # siphon-iec61850
//!
//! IEC 61850 (MMS) acquisition client for SIPHON.
//!
//! This crate implements the connection lifecycle and typed-acquisition
//! loop: a background task connects to a remote IED, polls one addressed
//! data attribute, decodes the runtime-typed result, and forwards
//! normalized readings to the registered ingestion sink. Transient
//! transport failures are absorbed inside the loop: connect failures are
//! retried indefinitely, read failures demote to reconnect, and decode
//! misses are logged and skipped.
//!
//! The MMS wire protocol itself belongs to an external client library,
//! modeled by the [`client::MmsTransport`] seam; a deterministic simulated
//! transport ships for tests and commissioning.
//!
//! ## Components
//!
//! - [`types`]: [`Endpoint`], [`MmsValue`], [`FunctionalConstraint`]
//! - [`address`]: [`ObjectAddress`] composition
//! - [`client`]: the wire transport seam and simulator
//! - [`session`]: one connection lifetime ([`IedSession`])
//! - [`decode`]: pure typed-value decoder
//! - [`poller`]: the acquisition state machine ([`AcquisitionLoop`])
//! - [`controller`]: lifecycle + reconfiguration ([`IedController`])
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use siphon_config::AcquisitionSettings;
//! use siphon_core::ChannelSink;
//! use siphon_iec61850::client::SimTransportFactory;
//! use siphon_iec61850::controller::IedController;
//! use siphon_iec61850::types::MmsValue;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let factory = Arc::new(SimTransportFactory::with_value(
//!     "simpleIOGenericIO/GGIO1.SPCSO1.stVal",
//!     MmsValue::Boolean(true),
//! ));
//!
//! let controller = IedController::new(AcquisitionSettings::default(), factory);
//! let (sink, mut rx) = ChannelSink::unbounded();
//! controller.register_sink(Arc::new(sink)).unwrap();
//!
//! controller.start().await.unwrap();
//! let reading = rx.recv().await.unwrap();
//! assert_eq!(reading.record.name, "MMS_BOOLEAN");
//! controller.stop().await;
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod address;
pub mod client;
pub mod controller;
pub mod decode;
pub mod error;
pub mod poller;
pub mod session;
pub mod types;

pub use address::ObjectAddress;
pub use controller::IedController;
pub use decode::{decode, DecodeOutcome};
pub use error::{ClientError, ClientResult, ConnectError, IedClientError, ReadError};
pub use poller::{AcquisitionLoop, PollContext, POLL_INTERVAL, RECONNECT_BACKOFF};
pub use session::IedSession;
pub use types::{DataAccessError, Endpoint, FunctionalConstraint, MmsValue};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
