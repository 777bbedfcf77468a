// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI argument parsing and command definitions.
//!
//! Subcommands:
//!
//! - `run`: start the acquisition client (default)
//! - `validate`: validate a configuration file without starting
//! - `version`: show component versions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Value served by the built-in simulated IED when none is configured.
pub const DEFAULT_SIM_VALUE: f32 = 24.5;

// =============================================================================
// Main CLI Structure
// =============================================================================

/// SIPHON - southbound IEC 61850 acquisition client
///
/// Polls one addressed data attribute on a remote IED and forwards
/// decoded readings to an ingestion sink.
#[derive(Parser, Debug)]
#[command(
    name = "siphon",
    author = "Sylvex <contact@sylvex.io>",
    version = siphon_iec61850::VERSION,
    about = "Southbound IEC 61850 (MMS) acquisition client",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        default_value = "siphon.json",
        env = "SIPHON_CONFIG",
        global = true
    )]
    pub config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        default_value = "info",
        env = "SIPHON_LOG_LEVEL",
        global = true
    )]
    pub log_level: String,

    /// Log format (text, json, compact)
    #[arg(long, default_value = "text", env = "SIPHON_LOG_FORMAT", global = true)]
    pub log_format: LogFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// =============================================================================
// Subcommands
// =============================================================================

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the acquisition client
    ///
    /// This is the default command when no subcommand is given. The client
    /// connects against the built-in simulated IED until a real MMS
    /// transport is wired in.
    Run(RunArgs),

    /// Validate the configuration file
    ///
    /// Parses and validates the configuration without starting
    /// acquisition. Useful for checking a deployment before rollout.
    Validate(ValidateArgs),

    /// Show detailed version information
    Version,
}

// =============================================================================
// Command Arguments
// =============================================================================

/// Arguments for the `run` command.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Float value served by the simulated IED at the configured reference
    #[arg(long, default_value_t = DEFAULT_SIM_VALUE)]
    pub sim_value: f32,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            sim_value: DEFAULT_SIM_VALUE,
        }
    }
}

/// Arguments for the `validate` command.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Show the parsed configuration after validation
    #[arg(short, long)]
    pub show_config: bool,
}

// =============================================================================
// LogFormat
// =============================================================================

/// Log output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text output.
    Text,
    /// Structured JSON output for log aggregation.
    Json,
    /// Minimal compact output.
    Compact,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_arguments() {
        let cli = Cli::try_parse_from(["siphon"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("siphon.json"));
        assert_eq!(cli.log_level, "info");
        assert_eq!(cli.log_format, LogFormat::Text);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_validate_subcommand() {
        let cli = Cli::try_parse_from(["siphon", "validate", "--show-config"]).unwrap();
        match cli.command {
            Some(Commands::Validate(args)) => assert!(args.show_config),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_run_sim_value() {
        let cli = Cli::try_parse_from(["siphon", "run", "--sim-value", "1.5"]).unwrap();
        match cli.command {
            Some(Commands::Run(args)) => assert_eq!(args.sim_value, 1.5),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
