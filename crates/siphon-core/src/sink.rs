// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Ingestion sink abstraction.
//!
//! This module defines the seam between the acquisition side and whatever
//! consumes the readings: a trait-typed sink object bound exactly once
//! through [`SinkAdapter`], with a typed single-consumer channel
//! implementation ([`ChannelSink`]) as the standard consumer.
//!
//! # Contract
//!
//! - Registration is a one-time operation; a second `register` fails.
//! - Calling `ingest` before registration fails loudly with
//!   [`IngestError::NotRegistered`] rather than dropping the reading.
//! - Exactly one downstream call is made per ingested record; there is no
//!   batching or buffering at this layer.

use std::sync::{Arc, OnceLock};

use tokio::sync::mpsc;

use crate::error::IngestError;
use crate::types::{NormalizedRecord, Reading};

// =============================================================================
// IngestSink Trait
// =============================================================================

/// A consumer of timestamped readings.
///
/// Implementations must be cheap and non-blocking: the acquisition loop
/// calls `ingest` inline between polls, and readings are delivered in the
/// order reads complete.
pub trait IngestSink: Send + Sync {
    /// Accepts one reading.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Delivery`] if the downstream consumer is gone.
    fn ingest(&self, reading: Reading) -> Result<(), IngestError>;
}

// =============================================================================
// SinkAdapter
// =============================================================================

/// Binds a sink to the acquisition side and tags readings with the asset.
///
/// The adapter owns the one-time registration slot. It converts a
/// [`NormalizedRecord`] into a [`Reading`] (asset name + generation
/// timestamp) and invokes the registered sink exactly once per record.
#[derive(Default)]
pub struct SinkAdapter {
    sink: OnceLock<Arc<dyn IngestSink>>,
}

impl SinkAdapter {
    /// Creates an adapter with no sink registered.
    pub fn new() -> Self {
        Self {
            sink: OnceLock::new(),
        }
    }

    /// Registers the sink. This is a one-time binding.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::AlreadyRegistered`] if a sink is already bound.
    pub fn register(&self, sink: Arc<dyn IngestSink>) -> Result<(), IngestError> {
        self.sink
            .set(sink)
            .map_err(|_| IngestError::AlreadyRegistered)
    }

    /// Returns `true` if a sink has been registered.
    pub fn is_registered(&self) -> bool {
        self.sink.get().is_some()
    }

    /// Wraps the record with the asset name and delivers it downstream.
    ///
    /// # Errors
    ///
    /// - [`IngestError::NotRegistered`] if no sink was bound (a wiring
    ///   mistake in the host, never silently swallowed)
    /// - [`IngestError::Delivery`] if the sink rejects the reading
    pub fn ingest(&self, asset: &str, record: NormalizedRecord) -> Result<(), IngestError> {
        let sink = self.sink.get().ok_or(IngestError::NotRegistered)?;
        sink.ingest(Reading::new(asset, record))
    }
}

impl std::fmt::Debug for SinkAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkAdapter")
            .field("registered", &self.is_registered())
            .finish()
    }
}

// =============================================================================
// ChannelSink
// =============================================================================

/// A sink backed by a typed single-consumer channel.
///
/// Readings are pushed onto an unbounded tokio mpsc channel, preserving
/// the order in which reads completed. The receiving half is returned to
/// the caller at construction.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Reading>,
}

impl ChannelSink {
    /// Creates a channel sink and returns it together with the receiver.
    pub fn unbounded() -> (Self, mpsc::UnboundedReceiver<Reading>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl IngestSink for ChannelSink {
    fn ingest(&self, reading: Reading) -> Result<(), IngestError> {
        self.tx
            .send(reading)
            .map_err(|_| IngestError::delivery("reading channel closed"))
    }
}

// =============================================================================
// LogSink
// =============================================================================

/// A sink that reports every reading through tracing.
///
/// Useful during commissioning, before a real northbound consumer exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl IngestSink for LogSink {
    fn ingest(&self, reading: Reading) -> Result<(), IngestError> {
        tracing::info!(
            asset = %reading.asset,
            name = reading.record.name,
            value = %reading.record.value,
            "reading"
        );
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordValue;

    fn record() -> NormalizedRecord {
        NormalizedRecord::new("MMS_FLOAT", RecordValue::Float(1.5))
    }

    #[test]
    fn test_ingest_before_registration_fails_loudly() {
        let adapter = SinkAdapter::new();
        assert!(!adapter.is_registered());

        let result = adapter.ingest("asset", record());
        assert_eq!(result, Err(IngestError::NotRegistered));
    }

    #[test]
    fn test_registration_is_one_time() {
        let adapter = SinkAdapter::new();

        adapter.register(Arc::new(LogSink)).unwrap();
        assert!(adapter.is_registered());

        let second = adapter.register(Arc::new(LogSink));
        assert_eq!(second, Err(IngestError::AlreadyRegistered));
    }

    #[tokio::test]
    async fn test_channel_sink_delivers_in_order() {
        let (sink, mut rx) = ChannelSink::unbounded();
        let adapter = SinkAdapter::new();
        adapter.register(Arc::new(sink)).unwrap();

        adapter
            .ingest("a", NormalizedRecord::new("MMS_INTEGER", RecordValue::Integer(1)))
            .unwrap();
        adapter
            .ingest("a", NormalizedRecord::new("MMS_INTEGER", RecordValue::Integer(2)))
            .unwrap();

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.record.value, RecordValue::Integer(1));
        assert_eq!(second.record.value, RecordValue::Integer(2));
        assert_eq!(first.asset, "a");
    }

    #[tokio::test]
    async fn test_channel_sink_reports_closed_receiver() {
        let (sink, rx) = ChannelSink::unbounded();
        drop(rx);

        let result = sink.ingest(Reading::new("a", record()));
        assert!(matches!(result, Err(IngestError::Delivery { .. })));
    }
}
