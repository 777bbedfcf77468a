// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Deterministic simulated IED transport.
//!
//! [`SimTransport`] stands in for a real MMS wire client during tests and
//! commissioning. All connections created by one [`SimTransportFactory`]
//! share a [`SimServer`]: a value store plus failure-injection knobs and a
//! recorded operation log, so tests can script connect failures and
//! connection drops and then verify exactly which operations the
//! acquisition side performed, in order.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use siphon_core::ConnectionState;

use crate::error::IedClientError;
use crate::types::{Endpoint, FunctionalConstraint, MmsValue};

use super::transport::{MmsTransport, TransportFactory};

// =============================================================================
// SimOp
// =============================================================================

/// One recorded transport operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimOp {
    /// A connection attempt and whether it succeeded.
    Connect {
        /// `true` if the attempt succeeded.
        ok: bool,
    },
    /// A read of the given reference.
    Read {
        /// The object reference that was read.
        reference: String,
    },
    /// A close of an open connection.
    Close,
}

// =============================================================================
// SimServer
// =============================================================================

/// Shared state of the simulated IED.
///
/// Cloning the `Arc` handed out by [`SimTransportFactory::server`] lets a
/// test mutate values and failure behavior while an acquisition loop is
/// running against it.
#[derive(Default)]
pub struct SimServer {
    values: RwLock<HashMap<String, MmsValue>>,
    refuse_connects: AtomicU32,
    drop_after_reads: AtomicU32,
    ops: Mutex<Vec<SimOp>>,
}

impl SimServer {
    /// Creates an empty simulated server.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value served for a reference.
    pub fn set_value(&self, reference: impl Into<String>, value: MmsValue) {
        self.values.write().insert(reference.into(), value);
    }

    /// Removes the value for a reference (subsequent reads report no data).
    pub fn clear_value(&self, reference: &str) {
        self.values.write().remove(reference);
    }

    /// Makes the next `count` connection attempts fail with
    /// `connection rejected`.
    pub fn refuse_connects(&self, count: u32) {
        self.refuse_connects.store(count, Ordering::SeqCst);
    }

    /// Drops every connection after it has served `count` reads
    /// (0 disables dropping).
    pub fn drop_after_reads(&self, count: u32) {
        self.drop_after_reads.store(count, Ordering::SeqCst);
    }

    /// Returns a snapshot of all recorded operations.
    pub fn ops(&self) -> Vec<SimOp> {
        self.ops.lock().clone()
    }

    /// Returns the number of recorded operations.
    pub fn op_count(&self) -> usize {
        self.ops.lock().len()
    }

    /// Returns the references of all recorded reads, in order.
    pub fn read_references(&self) -> Vec<String> {
        self.ops
            .lock()
            .iter()
            .filter_map(|op| match op {
                SimOp::Read { reference } => Some(reference.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, op: SimOp) {
        self.ops.lock().push(op);
    }

    fn take_refusal(&self) -> bool {
        self.refuse_connects
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl std::fmt::Debug for SimServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimServer")
            .field("values", &self.values.read().len())
            .field("ops", &self.op_count())
            .finish()
    }
}

// =============================================================================
// SimTransport
// =============================================================================

/// One simulated connection to the shared [`SimServer`].
pub struct SimTransport {
    server: Arc<SimServer>,
    state: ConnectionState,
    endpoint: Option<Endpoint>,
    reads_this_connection: u32,
}

impl SimTransport {
    /// Creates a disconnected transport bound to the given server.
    pub fn new(server: Arc<SimServer>) -> Self {
        Self {
            server,
            state: ConnectionState::Disconnected,
            endpoint: None,
            reads_this_connection: 0,
        }
    }
}

#[async_trait]
impl MmsTransport for SimTransport {
    async fn connect(&mut self, endpoint: &Endpoint) -> Result<(), IedClientError> {
        self.state = ConnectionState::Connecting;

        if self.server.take_refusal() {
            self.server.record(SimOp::Connect { ok: false });
            self.state = ConnectionState::Error;
            return Err(IedClientError::ConnectionRejected);
        }

        self.server.record(SimOp::Connect { ok: true });
        self.state = ConnectionState::Connected;
        self.endpoint = Some(endpoint.clone());
        self.reads_this_connection = 0;
        Ok(())
    }

    fn state(&self) -> ConnectionState {
        self.state
    }

    async fn read_object(
        &mut self,
        reference: &str,
        _fc: FunctionalConstraint,
    ) -> Result<Option<MmsValue>, IedClientError> {
        if !self.state.is_connected() {
            return Err(IedClientError::NotConnected);
        }

        let drop_after = self.server.drop_after_reads.load(Ordering::SeqCst);
        if drop_after > 0 && self.reads_this_connection >= drop_after {
            self.state = ConnectionState::Error;
            return Err(IedClientError::ConnectionLost);
        }

        self.server.record(SimOp::Read {
            reference: reference.to_string(),
        });
        self.reads_this_connection += 1;

        Ok(self.server.values.read().get(reference).cloned())
    }

    async fn close(&mut self) {
        if self.state == ConnectionState::Disconnected {
            return;
        }
        if self.state.is_connected() || self.state.is_error() {
            self.server.record(SimOp::Close);
        }
        self.state = ConnectionState::Disconnected;
    }

    fn display_name(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => format!("sim IED {}", endpoint),
            None => "sim IED (disconnected)".to_string(),
        }
    }
}

// =============================================================================
// SimTransportFactory
// =============================================================================

/// Creates [`SimTransport`] connections sharing one [`SimServer`].
#[derive(Debug, Default)]
pub struct SimTransportFactory {
    server: Arc<SimServer>,
}

impl SimTransportFactory {
    /// Creates a factory with an empty server.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a factory whose server serves `value` at `reference`.
    pub fn with_value(reference: impl Into<String>, value: MmsValue) -> Self {
        let factory = Self::new();
        factory.server.set_value(reference, value);
        factory
    }

    /// Returns a handle to the shared server state.
    pub fn server(&self) -> Arc<SimServer> {
        self.server.clone()
    }
}

impl TransportFactory for SimTransportFactory {
    fn create(&self) -> Box<dyn MmsTransport> {
        Box::new(SimTransport::new(self.server.clone()))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_read_close_cycle() {
        let factory = SimTransportFactory::with_value("md/n.c.a", MmsValue::Float32(1.5));
        let server = factory.server();
        let mut transport = factory.create();

        assert_eq!(transport.state(), ConnectionState::Disconnected);

        transport.connect(&Endpoint::default()).await.unwrap();
        assert_eq!(transport.state(), ConnectionState::Connected);

        let value = transport
            .read_object("md/n.c.a", FunctionalConstraint::St)
            .await
            .unwrap();
        assert_eq!(value, Some(MmsValue::Float32(1.5)));

        let missing = transport
            .read_object("md/other", FunctionalConstraint::St)
            .await
            .unwrap();
        assert_eq!(missing, None);

        transport.close().await;
        assert_eq!(transport.state(), ConnectionState::Disconnected);

        assert_eq!(
            server.ops(),
            vec![
                SimOp::Connect { ok: true },
                SimOp::Read { reference: "md/n.c.a".into() },
                SimOp::Read { reference: "md/other".into() },
                SimOp::Close,
            ]
        );
    }

    #[tokio::test]
    async fn test_read_requires_connection() {
        let factory = SimTransportFactory::new();
        let mut transport = factory.create();

        let result = transport.read_object("ref", FunctionalConstraint::St).await;
        assert_eq!(result, Err(IedClientError::NotConnected));
    }

    #[tokio::test]
    async fn test_scripted_connect_refusals() {
        let factory = SimTransportFactory::new();
        let server = factory.server();
        server.refuse_connects(2);

        let mut transport = factory.create();
        assert_eq!(
            transport.connect(&Endpoint::default()).await,
            Err(IedClientError::ConnectionRejected)
        );

        let mut transport = factory.create();
        assert_eq!(
            transport.connect(&Endpoint::default()).await,
            Err(IedClientError::ConnectionRejected)
        );

        let mut transport = factory.create();
        assert!(transport.connect(&Endpoint::default()).await.is_ok());
    }

    #[tokio::test]
    async fn test_connection_drop_after_reads() {
        let factory = SimTransportFactory::with_value("r", MmsValue::Boolean(true));
        factory.server().drop_after_reads(2);

        let mut transport = factory.create();
        transport.connect(&Endpoint::default()).await.unwrap();

        assert!(transport.read_object("r", FunctionalConstraint::St).await.is_ok());
        assert!(transport.read_object("r", FunctionalConstraint::St).await.is_ok());
        assert_eq!(
            transport.read_object("r", FunctionalConstraint::St).await,
            Err(IedClientError::ConnectionLost)
        );
        assert_eq!(transport.state(), ConnectionState::Error);
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let factory = SimTransportFactory::new();
        let server = factory.server();
        let mut transport = factory.create();

        transport.connect(&Endpoint::default()).await.unwrap();
        transport.close().await;
        transport.close().await;

        let closes = server
            .ops()
            .iter()
            .filter(|op| matches!(op, SimOp::Close))
            .count();
        assert_eq!(closes, 1);
    }
}
