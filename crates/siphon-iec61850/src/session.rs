// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Connection session.
//!
//! An [`IedSession`] owns exactly one transport for one connection
//! lifetime. It encapsulates the wire client's error codes behind a
//! connection-state query: callers poll [`IedSession::state`] instead of
//! inspecting codes, and the session demotes itself to `Error` when the
//! transport reports a connection-level failure.
//!
//! Sessions are not reused across connection losses; the acquisition loop
//! closes a failed session and builds a fresh one from the factory.

use siphon_core::ConnectionState;

use crate::address::ObjectAddress;
use crate::client::MmsTransport;
use crate::error::{ConnectError, ReadError};
use crate::types::{Endpoint, FunctionalConstraint, MmsValue};

// =============================================================================
// IedSession
// =============================================================================

/// One connection lifetime against a remote IED.
pub struct IedSession {
    transport: Box<dyn MmsTransport>,
    state: ConnectionState,
}

impl IedSession {
    /// Wraps a freshly created transport. The session starts disconnected.
    pub fn new(transport: Box<dyn MmsTransport>) -> Self {
        Self {
            transport,
            state: ConnectionState::Disconnected,
        }
    }

    /// Attempts a transport-level connection.
    ///
    /// On success the state transitions to `Connected`; on failure it is
    /// left in `Error` and the mapped [`ConnectError`] is returned. Callers
    /// must treat the state query as authoritative rather than assume
    /// success from the absence of an error.
    pub async fn connect(&mut self, endpoint: &Endpoint) -> Result<(), ConnectError> {
        self.state = ConnectionState::Connecting;

        match self.transport.connect(endpoint).await {
            Ok(()) => {
                self.state = ConnectionState::Connected;
                tracing::debug!(endpoint = %endpoint, transport = %self.transport.display_name(), "session connected");
                Ok(())
            }
            Err(code) => {
                self.state = ConnectionState::Error;
                Err(ConnectError::from_code(endpoint, code))
            }
        }
    }

    /// Reads the addressed object under the given functional constraint.
    ///
    /// Valid only while connected. `Ok(None)` means the server reported no
    /// data for the reference, which is distinct from a failed read.
    /// Connection-level failures demote the session to `Error`.
    pub async fn read(
        &mut self,
        address: &ObjectAddress,
        fc: FunctionalConstraint,
    ) -> Result<Option<MmsValue>, ReadError> {
        if !self.state.is_connected() {
            return Err(ReadError::NotConnected);
        }

        match self.transport.read_object(address.reference(), fc).await {
            Ok(value) => Ok(value),
            Err(code) => {
                if code.is_connection_error() {
                    self.state = ConnectionState::Error;
                }
                Err(ReadError::from_code(address.reference(), code))
            }
        }
    }

    /// Closes the session and releases the transport handle.
    ///
    /// Idempotent: calling `close` on an already closed session is a
    /// no-op, and the underlying handle is released exactly once.
    pub async fn close(&mut self) {
        if self.state == ConnectionState::Disconnected {
            return;
        }
        self.transport.close().await;
        self.state = ConnectionState::Disconnected;
    }

    /// Returns the current connection state. Non-blocking, side-effect-free.
    pub fn state(&self) -> ConnectionState {
        self.state
    }
}

impl std::fmt::Debug for IedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IedSession")
            .field("transport", &self.transport.display_name())
            .field("state", &self.state)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
