// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Client controller.
//!
//! [`IedController`] is the externally visible unit: it owns the
//! configuration fields, the composed object address, and the acquisition
//! loop's lifecycle. A single tokio mutex over the inner state is the
//! mutual-exclusion guard demanded by the design: it serializes `start`,
//! `stop` and `reconfigure` against each other, and it is held only across
//! that transition window, never across the loop's own read/sleep cycle.
//! An earlier variant of this design held a lock across the entire cycle,
//! which is safe but serializes every poll; the tightened critical section
//! is deliberate.
//!
//! Reconfiguration sequence:
//!
//! 1. take the guard
//! 2. stop the running loop and wait for full termination (join, not
//!    flag-set: a mid-flight poll may still be reading old fields)
//! 3. apply the new settings field by field
//! 4. recompute the object address as one atomic replacement
//! 5. start a new loop generation
//! 6. release the guard

use std::sync::Arc;

use tokio::sync::Mutex;

use siphon_config::AcquisitionSettings;
use siphon_core::{IngestSink, SinkAdapter};

use crate::address::ObjectAddress;
use crate::client::TransportFactory;
use crate::error::{ClientError, ClientResult};
use crate::poller::{AcquisitionLoop, PollContext};
use crate::types::{Endpoint, FunctionalConstraint};

// =============================================================================
// Controller Inner State
// =============================================================================

/// State protected by the controller's guard.
struct ControllerInner {
    settings: AcquisitionSettings,
    address: ObjectAddress,
    fc: FunctionalConstraint,
    acquisition: AcquisitionLoop,
}

impl ControllerInner {
    fn new(settings: AcquisitionSettings) -> Self {
        let (address, fc) = resolve(&settings);
        Self {
            settings,
            address,
            fc,
            acquisition: AcquisitionLoop::idle(),
        }
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.settings.ip.clone(), self.settings.port)
    }
}

/// Recomputes the derived address and functional constraint from settings.
///
/// Unrecognized functional constraints degrade to the safe default with a
/// warning rather than failing the whole configuration.
fn resolve(settings: &AcquisitionSettings) -> (ObjectAddress, FunctionalConstraint) {
    let address = ObjectAddress::new(
        &settings.ied_model,
        &settings.logical_device,
        &settings.logical_node,
        &settings.cdc,
        &settings.attribute,
    );

    let fc = match settings.functional_constraint.parse() {
        Ok(fc) => fc,
        Err(e) => {
            tracing::warn!(
                error = %e,
                default = %FunctionalConstraint::default(),
                "invalid functional constraint, using default"
            );
            FunctionalConstraint::default()
        }
    };

    (address, fc)
}

// =============================================================================
// IedController
// =============================================================================

/// Owns one acquisition client: configuration, sink binding and loop
/// lifecycle.
///
/// All public methods are safe to call from any task or thread; the inner
/// guard serializes lifecycle transitions. The transport factory and the
/// sink adapter are shared with running loop generations through `Arc`s.
pub struct IedController {
    inner: Mutex<ControllerInner>,
    factory: Arc<dyn TransportFactory>,
    sink: Arc<SinkAdapter>,
}

impl IedController {
    /// Creates a controller with the given settings and transport factory.
    ///
    /// The object address is composed immediately; the loop stays idle
    /// until [`IedController::start`].
    pub fn new(settings: AcquisitionSettings, factory: Arc<dyn TransportFactory>) -> Self {
        Self {
            inner: Mutex::new(ControllerInner::new(settings)),
            factory,
            sink: Arc::new(SinkAdapter::new()),
        }
    }

    /// Registers the ingestion sink. One-time binding; must happen before
    /// the first `start`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Ingest`] when a sink is already registered.
    pub fn register_sink(&self, sink: Arc<dyn IngestSink>) -> ClientResult<()> {
        self.sink.register(sink)?;
        Ok(())
    }

    /// Starts the acquisition loop.
    ///
    /// # Errors
    ///
    /// - [`ClientError::AlreadyRunning`] if a loop generation is alive
    /// - [`ClientError::SinkNotRegistered`] if no sink was bound; failing
    ///   loudly here beats dropping readings later
    pub async fn start(&self) -> ClientResult<()> {
        let mut inner = self.inner.lock().await;
        self.start_locked(&mut inner)
    }

    /// Stops the acquisition loop and waits for full termination.
    ///
    /// After this returns, no further session or sink call occurs. A
    /// no-op when the loop is idle.
    pub async fn stop(&self) {
        let mut inner = self.inner.lock().await;
        inner.acquisition.stop().await;
    }

    /// Applies a new configuration atomically and restarts acquisition.
    ///
    /// The settings must already be parsed and validated: malformed input
    /// is rejected by the configuration layer before any running loop is
    /// disturbed. No concurrent `reconfigure`, `start` or `stop` can
    /// interleave with this sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::SinkNotRegistered`] if no sink was ever
    /// bound; the loop is left stopped in that case.
    pub async fn reconfigure(&self, settings: AcquisitionSettings) -> ClientResult<()> {
        let mut inner = self.inner.lock().await;

        inner.acquisition.stop().await;

        let (address, fc) = resolve(&settings);
        inner.settings = settings;
        inner.address = address;
        inner.fc = fc;

        tracing::info!(
            endpoint = %inner.endpoint(),
            reference = %inner.address,
            fc = %inner.fc,
            "configuration applied"
        );

        self.start_locked(&mut inner)
    }

    /// Returns `true` if a loop generation is currently running.
    pub async fn is_running(&self) -> bool {
        self.inner.lock().await.acquisition.is_running()
    }

    /// Returns the endpoint acquisition connects to.
    pub async fn endpoint(&self) -> Endpoint {
        self.inner.lock().await.endpoint()
    }

    /// Returns the composed object reference.
    pub async fn object_reference(&self) -> String {
        self.inner.lock().await.address.reference().to_string()
    }

    /// Returns the effective functional constraint.
    pub async fn functional_constraint(&self) -> FunctionalConstraint {
        self.inner.lock().await.fc
    }

    /// Returns a copy of the current settings.
    pub async fn settings(&self) -> AcquisitionSettings {
        self.inner.lock().await.settings.clone()
    }

    fn start_locked(&self, inner: &mut ControllerInner) -> ClientResult<()> {
        if inner.acquisition.is_running() {
            return Err(ClientError::AlreadyRunning);
        }
        if !self.sink.is_registered() {
            return Err(ClientError::SinkNotRegistered);
        }

        let ctx = PollContext {
            endpoint: inner.endpoint(),
            address: inner.address.clone(),
            fc: inner.fc,
            asset: inner.settings.asset.clone(),
            factory: Arc::clone(&self.factory),
            sink: Arc::clone(&self.sink),
        };

        let generation = inner.acquisition.start(ctx);
        tracing::debug!(generation, "acquisition loop generation launched");
        Ok(())
    }
}

impl std::fmt::Debug for IedController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IedController")
            .field("sink_registered", &self.sink.is_registered())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
