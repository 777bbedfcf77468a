// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! SIPHON - southbound IEC 61850 acquisition client.
//!
//! Main binary entry point.

use clap::Parser;

use siphon_bin::cli::{Cli, Commands, RunArgs};
use siphon_bin::error::report_error_and_exit;
use siphon_bin::{commands, logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_logging(&cli.log_level, cli.log_format);

    let command = cli
        .command
        .clone()
        .unwrap_or(Commands::Run(RunArgs::default()));

    let result = match command {
        Commands::Run(args) => commands::run::execute(&cli, args).await,
        Commands::Validate(args) => commands::validate::execute(&cli, &args),
        Commands::Version => {
            commands::version::execute();
            Ok(())
        }
    };

    if let Err(error) = result {
        report_error_and_exit(error);
    }
}
