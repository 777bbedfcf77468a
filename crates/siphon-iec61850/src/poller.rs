// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Acquisition loop.
//!
//! The loop is the state machine at the heart of the client:
//!
//! ```text
//! Idle → Connecting → Polling → (connection loss) → Connecting → … → Stopped
//! ```
//!
//! One dedicated task runs per controller. It connects, polls the single
//! configured object at a fixed interval, decodes and ingests every value,
//! and falls back to reconnecting whenever the session fails. Connect
//! retries are unbounded: on intermittent field links, eventual
//! reconnection beats fail-fast.
//!
//! Cancellation is cooperative through the active flag; `stop` clears the
//! flag and then awaits the task handle, so once it returns no further
//! session or sink call can occur. The session is always closed before its
//! handle is discarded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use siphon_core::SinkAdapter;

use crate::address::ObjectAddress;
use crate::client::TransportFactory;
use crate::decode::{decode, DecodeOutcome};
use crate::session::IedSession;
use crate::types::{Endpoint, FunctionalConstraint, MmsValue};

// =============================================================================
// Poll Timing
// =============================================================================

/// Fixed sleep between successful polls. Bounds the poll rate; there is no
/// adaptive backoff on the happy path.
pub const POLL_INTERVAL: Duration = Duration::from_millis(4);

/// Fixed sleep between connection attempts.
pub const RECONNECT_BACKOFF: Duration = Duration::from_millis(4);

// =============================================================================
// PollContext
// =============================================================================

/// Everything one loop generation needs, snapshotted at start.
///
/// The loop never reads live configuration: the controller hands it an
/// immutable snapshot, so a reconfiguration can only take effect through a
/// stop/start cycle and a read can never observe half-updated fields.
pub struct PollContext {
    /// Server endpoint.
    pub endpoint: Endpoint,
    /// The addressed object.
    pub address: ObjectAddress,
    /// Functional constraint for every read.
    pub fc: FunctionalConstraint,
    /// Asset name stamped on every reading.
    pub asset: String,
    /// Creates one transport per connection attempt.
    pub factory: Arc<dyn TransportFactory>,
    /// Delivers decoded records downstream.
    pub sink: Arc<SinkAdapter>,
}

// =============================================================================
// AcquisitionLoop
// =============================================================================

/// Owns the lifecycle of the background acquisition task.
///
/// At most one task is alive at a time; starting a new generation requires
/// the previous one to have fully terminated. The task handle is stored,
/// never detached, and consumed by [`AcquisitionLoop::stop`].
pub struct AcquisitionLoop {
    active: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl AcquisitionLoop {
    /// Creates the loop in its idle state.
    pub fn idle() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(false)),
            handle: None,
            generation: 0,
        }
    }

    /// Returns `true` if a loop task is running (or not yet joined).
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Returns the current generation number.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Launches a new loop generation.
    ///
    /// Must only be called when no task is running; the controller
    /// serializes start/stop/reconfigure to uphold that.
    pub fn start(&mut self, ctx: PollContext) -> u64 {
        debug_assert!(!self.is_running(), "previous loop generation still alive");

        self.generation += 1;
        // Fresh flag per generation: a stale clone held by a finished task
        // can never deactivate the new one.
        self.active = Arc::new(AtomicBool::new(true));

        let active = Arc::clone(&self.active);
        let generation = self.generation;
        self.handle = Some(tokio::spawn(run(ctx, active, generation)));

        self.generation
    }

    /// Deactivates the loop and waits for the task to fully terminate.
    ///
    /// Join semantics are mandatory: after this returns, no further
    /// session or sink call is made by the stopped generation. A no-op
    /// when idle.
    pub async fn stop(&mut self) {
        self.active.store(false, Ordering::SeqCst);

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "acquisition task terminated abnormally");
            }
        }
    }
}

impl std::fmt::Debug for AcquisitionLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcquisitionLoop")
            .field("running", &self.is_running())
            .field("generation", &self.generation)
            .finish()
    }
}

// =============================================================================
// Loop Body
// =============================================================================

/// The task body: connect, poll, reconnect, until deactivated.
async fn run(ctx: PollContext, active: Arc<AtomicBool>, generation: u64) {
    tracing::info!(
        generation,
        endpoint = %ctx.endpoint,
        reference = %ctx.address,
        fc = %ctx.fc,
        "acquisition loop started"
    );

    while active.load(Ordering::SeqCst) {
        // One fresh connection object per attempt.
        let mut session = IedSession::new(ctx.factory.create());

        match session.connect(&ctx.endpoint).await {
            Ok(()) => {
                tracing::info!(endpoint = %ctx.endpoint, "connected to IED");
                poll_connected(&ctx, &active, &mut session).await;
            }
            Err(e) => {
                tracing::warn!(endpoint = %ctx.endpoint, error = %e, "connection error");
            }
        }

        // Always release the handle before discarding the session.
        session.close().await;

        if active.load(Ordering::SeqCst) {
            tokio::time::sleep(RECONNECT_BACKOFF).await;
        }
    }

    tracing::info!(generation, "acquisition loop stopped");
}

/// Polls the configured object while the session stays connected.
///
/// Read errors break out so the outer loop reconnects; they never
/// terminate the task.
async fn poll_connected(ctx: &PollContext, active: &AtomicBool, session: &mut IedSession) {
    while session.state().is_connected() && active.load(Ordering::SeqCst) {
        match session.read(&ctx.address, ctx.fc).await {
            Ok(Some(value)) => dispatch(ctx, value),
            Ok(None) => tracing::debug!(reference = %ctx.address, "no data to read"),
            Err(e) => {
                tracing::warn!(reference = %ctx.address, error = %e, "read error, reconnecting");
                break;
            }
        }

        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Decodes one value and hands the record to the sink.
///
/// Decode misses are logged and skipped; a failing sink is reported loudly
/// but does not stop acquisition.
fn dispatch(ctx: &PollContext, value: MmsValue) {
    match decode(value) {
        DecodeOutcome::Record(record) => {
            if let Err(e) = ctx.sink.ingest(&ctx.asset, record) {
                tracing::error!(error = %e, "failed to ingest reading");
            }
        }
        DecodeOutcome::AccessError(reason) => {
            tracing::warn!(%reason, "MMS access error, please reconfigure");
        }
        DecodeOutcome::Unsupported(tag) => {
            tracing::warn!(tag, "unsupported MMS data type");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SimTransportFactory;
    use siphon_core::{ChannelSink, RecordValue};

    fn context(factory: &Arc<SimTransportFactory>, sink: Arc<SinkAdapter>) -> PollContext {
        PollContext {
            endpoint: Endpoint::default(),
            address: ObjectAddress::new("simpleIO", "GenericIO", "GGIO1", "SPCSO1", "stVal"),
            fc: FunctionalConstraint::St,
            asset: "iec61850".to_string(),
            factory: Arc::clone(factory) as Arc<dyn TransportFactory>,
            sink,
        }
    }

    #[tokio::test]
    async fn test_loop_polls_and_ingests() {
        let factory = Arc::new(SimTransportFactory::with_value(
            "simpleIOGenericIO/GGIO1.SPCSO1.stVal",
            MmsValue::Float32(12.5),
        ));
        let (sink, mut rx) = ChannelSink::unbounded();
        let adapter = Arc::new(SinkAdapter::new());
        adapter.register(Arc::new(sink)).unwrap();

        let mut acquisition = AcquisitionLoop::idle();
        acquisition.start(context(&factory, adapter));
        assert!(acquisition.is_running());

        let reading = rx.recv().await.expect("a reading should arrive");
        assert_eq!(reading.record.name, "MMS_FLOAT");
        assert_eq!(reading.record.value, RecordValue::Float(12.5));

        acquisition.stop().await;
        assert!(!acquisition.is_running());
    }

    #[tokio::test]
    async fn test_stop_is_noop_when_idle() {
        let mut acquisition = AcquisitionLoop::idle();
        assert!(!acquisition.is_running());
        acquisition.stop().await;
        assert_eq!(acquisition.generation(), 0);
    }

    #[tokio::test]
    async fn test_generation_increments_per_start() {
        let factory = Arc::new(SimTransportFactory::new());
        let adapter = Arc::new(SinkAdapter::new());
        adapter.register(Arc::new(siphon_core::LogSink)).unwrap();

        let mut acquisition = AcquisitionLoop::idle();
        let first = acquisition.start(context(&factory, Arc::clone(&adapter)));
        acquisition.stop().await;
        let second = acquisition.start(context(&factory, adapter));
        acquisition.stop().await;

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }
}
