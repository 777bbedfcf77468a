// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Wire-client abstraction layer.
//!
//! The actual MMS handshake, encoding and connection object belong to an
//! external wire-protocol client library; this module defines the narrow
//! surface SIPHON depends on ([`MmsTransport`] / [`TransportFactory`])
//! and ships a deterministic in-process implementation ([`SimTransport`])
//! for tests and commissioning.

pub mod sim;
pub mod transport;

pub use sim::{SimOp, SimServer, SimTransport, SimTransportFactory};
pub use transport::{MmsTransport, TransportFactory};
