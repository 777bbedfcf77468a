// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The `version` command: show component versions.

/// Executes the version command.
pub fn execute() {
    println!("siphon {}", siphon_iec61850::VERSION);
    println!("  siphon-core     {}", siphon_core::VERSION);
    println!("  siphon-config   {}", siphon_config::VERSION);
    println!("  siphon-iec61850 {}", siphon_iec61850::VERSION);
}
