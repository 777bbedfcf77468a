// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! MMS transport abstraction.
//!
//! This trait is the complete surface SIPHON requires from the external
//! MMS client library: create a connection object, connect it, query its
//! state, read one object, close. Everything protocol-internal (handshake,
//! encoding, timeouts) stays behind the implementation.

use async_trait::async_trait;

use siphon_core::ConnectionState;

use crate::error::IedClientError;
use crate::types::{Endpoint, FunctionalConstraint, MmsValue};

// =============================================================================
// MmsTransport Trait
// =============================================================================

/// One transport-level connection to an IED.
///
/// A transport instance corresponds to one connection object of the wire
/// client: it is created fresh for every connection attempt and discarded
/// after `close`. Implementations must be `Send + Sync`.
///
/// # Lifecycle
///
/// 1. Created by a [`TransportFactory`]
/// 2. `connect` establishes the connection
/// 3. `read_object` is called strictly sequentially while connected
/// 4. `close` releases the connection; it must be idempotent
#[async_trait]
pub trait MmsTransport: Send + Sync {
    /// Establishes a connection to the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns the wire client's error code on failure; the transport is
    /// left disconnected.
    async fn connect(&mut self, endpoint: &Endpoint) -> Result<(), IedClientError>;

    /// Returns the current connection state. Non-blocking, side-effect-free.
    fn state(&self) -> ConnectionState;

    /// Reads one object by reference under the given functional constraint.
    ///
    /// Returns `Ok(None)` when the server reports no data for the
    /// reference, which is distinct from a failed read.
    ///
    /// # Errors
    ///
    /// Returns the wire client's error code; connection-level codes mean
    /// the transport is no longer usable.
    async fn read_object(
        &mut self,
        reference: &str,
        fc: FunctionalConstraint,
    ) -> Result<Option<MmsValue>, IedClientError>;

    /// Closes the connection and releases the underlying handle.
    ///
    /// Idempotent: closing an already closed transport is a no-op. Must be
    /// called before the transport is discarded.
    async fn close(&mut self);

    /// Returns a display name for logging.
    fn display_name(&self) -> String;
}

// =============================================================================
// TransportFactory
// =============================================================================

/// Creates one transport per connection attempt.
///
/// The wire client hands out a fresh connection object for every connect;
/// the factory models that: the acquisition loop asks for a new transport
/// each time it (re)connects and never reuses a closed one.
pub trait TransportFactory: Send + Sync {
    /// Creates a new, disconnected transport.
    fn create(&self) -> Box<dyn MmsTransport>;
}
