// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # siphon-core
//!
//! Core abstractions and shared types for the SIPHON acquisition client.
//!
//! This crate provides the protocol-agnostic foundation used by the
//! acquisition crates:
//!
//! - **Types**: [`ConnectionState`], [`RecordValue`], [`NormalizedRecord`],
//!   [`Reading`]
//! - **Sink**: the [`IngestSink`] trait, the one-time-binding
//!   [`SinkAdapter`], and the [`ChannelSink`] / [`LogSink`] implementations
//! - **Error**: the ingestion error hierarchy
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use siphon_core::{ChannelSink, NormalizedRecord, RecordValue, SinkAdapter};
//!
//! let (sink, mut rx) = ChannelSink::unbounded();
//! let adapter = SinkAdapter::new();
//! adapter.register(Arc::new(sink)).unwrap();
//!
//! adapter
//!     .ingest("plant-a", NormalizedRecord::new("MMS_FLOAT", RecordValue::Float(25.5)))
//!     .unwrap();
//!
//! let reading = rx.try_recv().unwrap();
//! assert_eq!(reading.asset, "plant-a");
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod sink;
pub mod types;

pub use error::{IngestError, IngestResult};
pub use sink::{ChannelSink, IngestSink, LogSink, SinkAdapter};
pub use types::{ConnectionState, NormalizedRecord, Reading, RecordValue};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
