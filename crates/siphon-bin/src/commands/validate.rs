// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The `validate` command: check a configuration file without starting.

use siphon_iec61850::ObjectAddress;

use crate::cli::{Cli, ValidateArgs};
use crate::error::{BinError, BinResult};

/// Executes the validate command.
pub fn execute(cli: &Cli, args: &ValidateArgs) -> BinResult<()> {
    let settings = super::load_settings(&cli.config)?;

    let address = ObjectAddress::new(
        &settings.ied_model,
        &settings.logical_device,
        &settings.logical_node,
        &settings.cdc,
        &settings.attribute,
    );

    println!("Configuration OK: {}", cli.config.display());
    println!("  endpoint:   {}:{}", settings.ip, settings.port);
    println!("  reference:  {}", address);
    println!("  fc:         {}", settings.functional_constraint);
    println!("  asset:      {}", settings.asset);

    if args.show_config {
        let json = serde_json::to_string_pretty(&settings)
            .map_err(|e| BinError::init(format!("failed to render settings: {}", e)))?;
        println!("{}", json);
    }

    Ok(())
}
