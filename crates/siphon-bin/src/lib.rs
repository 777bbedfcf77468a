// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # siphon-bin
//!
//! Command-line host for the SIPHON acquisition client.
//!
//! The binary plays the host framework's role: it loads configuration,
//! builds the controller, registers the ingestion sink, starts
//! acquisition and coordinates graceful shutdown on SIGTERM/SIGINT.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod shutdown;

pub use cli::{Cli, Commands};
pub use error::{BinError, BinResult};
pub use runtime::AcquisitionRuntime;
pub use shutdown::ShutdownCoordinator;
