// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Acquisition runtime orchestration.
//!
//! The runtime plays the host framework's role around the controller:
//! build it from settings, register the ingestion sink, start acquisition,
//! forward readings until shutdown is signaled, then stop with full join
//! semantics. On Unix, SIGHUP reloads the configuration file and applies
//! it through `reconfigure` without restarting the process.
//!
//! Until a real MMS transport implementation is wired in, the runtime
//! connects against the built-in simulated IED, which serves a configured
//! float at the composed object reference.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use siphon_config::AcquisitionSettings;
use siphon_core::ChannelSink;
use siphon_iec61850::client::{SimTransportFactory, TransportFactory};
use siphon_iec61850::{IedController, MmsValue, ObjectAddress};

use crate::error::BinResult;
use crate::shutdown::ShutdownCoordinator;

// =============================================================================
// AcquisitionRuntime
// =============================================================================

/// Orchestrates one acquisition client from start to graceful shutdown.
pub struct AcquisitionRuntime {
    settings: AcquisitionSettings,
    shutdown: ShutdownCoordinator,
    sim_value: f32,
    config_path: Option<PathBuf>,
}

impl AcquisitionRuntime {
    /// Creates a runtime for the given settings.
    pub fn new(settings: AcquisitionSettings) -> Self {
        Self {
            settings,
            shutdown: ShutdownCoordinator::new(),
            sim_value: crate::cli::DEFAULT_SIM_VALUE,
            config_path: None,
        }
    }

    /// Sets the value served by the simulated IED.
    pub fn with_sim_value(mut self, value: f32) -> Self {
        self.sim_value = value;
        self
    }

    /// Sets the configuration file reloaded on SIGHUP.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Returns a handle for triggering shutdown programmatically.
    pub fn shutdown_handle(&self) -> ShutdownCoordinator {
        self.shutdown.clone()
    }

    /// Runs the client until a shutdown signal arrives.
    pub async fn run(self) -> BinResult<()> {
        info!("Starting SIPHON v{}", siphon_iec61850::VERSION);

        let factory = self.build_transport_factory();
        let controller = Arc::new(IedController::new(self.settings, factory));

        // One-time sink binding, before the first start.
        let (sink, mut rx) = ChannelSink::unbounded();
        controller.register_sink(Arc::new(sink))?;

        let forwarder = tokio::spawn(async move {
            let mut delivered: u64 = 0;
            while let Some(reading) = rx.recv().await {
                delivered += 1;
                debug!(reading = %reading, "forwarded");
                if delivered % 1000 == 0 {
                    info!(delivered, "readings forwarded");
                }
            }
            delivered
        });

        controller.start().await?;
        let endpoint = controller.endpoint().await;
        let reference = controller.object_reference().await;
        info!(
            endpoint = %endpoint,
            reference = %reference,
            "SIPHON acquisition running"
        );

        let reload_task = spawn_reload_listener(Arc::clone(&controller), self.config_path);

        self.shutdown.wait_for_shutdown().await;

        info!("Shutdown initiated, stopping acquisition...");
        if let Some(task) = reload_task {
            task.abort();
        }
        controller.stop().await;

        // The sink adapter keeps the sender alive, so reap the forwarder
        // instead of waiting for channel close.
        forwarder.abort();
        if let Ok(delivered) = forwarder.await {
            info!(delivered, "readings forwarded in total");
        }

        info!("SIPHON shutdown complete");
        Ok(())
    }

    /// Builds the transport factory and seeds the simulated IED with a
    /// value at the configured reference.
    fn build_transport_factory(&self) -> Arc<dyn TransportFactory> {
        let address = ObjectAddress::new(
            &self.settings.ied_model,
            &self.settings.logical_device,
            &self.settings.logical_node,
            &self.settings.cdc,
            &self.settings.attribute,
        );

        info!(
            reference = %address,
            value = self.sim_value,
            "using built-in simulated IED transport"
        );

        Arc::new(SimTransportFactory::with_value(
            address.reference().to_string(),
            MmsValue::Float32(self.sim_value),
        ))
    }
}

// =============================================================================
// Configuration Reload
// =============================================================================

/// Spawns a SIGHUP listener that reloads the configuration file and
/// applies it through `reconfigure`.
///
/// A reload that fails to parse leaves the running configuration
/// untouched; acquisition is never interrupted by a bad file.
#[cfg(unix)]
fn spawn_reload_listener(
    controller: Arc<IedController>,
    config_path: Option<PathBuf>,
) -> Option<tokio::task::JoinHandle<()>> {
    let path = config_path?;

    let handle = tokio::spawn(async move {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sighup = match signal(SignalKind::hangup()) {
            Ok(stream) => stream,
            Err(e) => {
                warn!(error = %e, "failed to register SIGHUP handler, reload disabled");
                return;
            }
        };

        while sighup.recv().await.is_some() {
            info!(path = %path.display(), "SIGHUP received, reloading configuration");

            match crate::commands::load_settings(&path) {
                Ok(settings) => {
                    if let Err(e) = controller.reconfigure(settings).await {
                        warn!(error = %e, "reconfiguration failed");
                    } else {
                        let reference = controller.object_reference().await;
                        info!(
                            reference = %reference,
                            "reconfiguration applied"
                        );
                    }
                }
                Err(e) => {
                    warn!(error = %e, "reload rejected, keeping previous configuration");
                }
            }
        }
    });

    Some(handle)
}

#[cfg(not(unix))]
fn spawn_reload_listener(
    _controller: Arc<IedController>,
    _config_path: Option<PathBuf>,
) -> Option<tokio::task::JoinHandle<()>> {
    None
}

// =============================================================================
// Tests
// =============================================================================
