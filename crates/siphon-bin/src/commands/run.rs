// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The `run` command: start the acquisition client.

use tracing::warn;

use siphon_config::AcquisitionSettings;

use crate::cli::{Cli, RunArgs};
use crate::error::BinResult;
use crate::runtime::AcquisitionRuntime;

/// Executes the run command.
///
/// A missing configuration file is not fatal: acquisition starts with the
/// documented defaults, matching how the host framework behaves when no
/// item overrides are supplied. SIGHUP reloads the file and applies it
/// live.
pub async fn execute(cli: &Cli, args: RunArgs) -> BinResult<()> {
    let settings = if cli.config.exists() {
        super::load_settings(&cli.config)?
    } else {
        warn!(
            path = %cli.config.display(),
            "configuration file not found, using defaults"
        );
        AcquisitionSettings::default()
    };

    AcquisitionRuntime::new(settings)
        .with_sim_value(args.sim_value)
        .with_config_path(cli.config.clone())
        .run()
        .await
}
