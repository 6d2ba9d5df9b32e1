// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # rrlog CLI
//!
//! Command-line tool for inspecting RRLog telemetry files.
//!
//! ## Usage
//!
//! ```sh
//! # Show file summary
//! rrlog info run.rrlog
//!
//! # Print the schema of one channel
//! rrlog schema run.rrlog pose
//!
//! # Dump the first 10 messages of a channel as JSON
//! rrlog dump run.rrlog --channel pose --limit 10 --json
//!
//! # Pose table sorted by timestamp
//! rrlog poses run.rrlog pose
//!
//! # Pose closest to a timestamp
//! rrlog poses run.rrlog pose --at 1700000000
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{ChannelsCmd, DumpCmd, InfoCmd, PosesCmd, SchemaCmd};
use common::Result;
use rrlog::RRLogError;

/// rrlog - RRLog telemetry decoder
///
/// Decode self-describing RRLog files and print their channels, schemas
/// and messages.
#[derive(Parser, Clone)]
#[command(name = "rrlog")]
#[command(about = "Decoder for RRLog telemetry files", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Show a file summary with per-channel schemas and message counts
    Info(InfoCmd),

    /// List channels with their index and message count
    Channels(ChannelsCmd),

    /// Show channel schemas
    Schema(SchemaCmd),

    /// Print decoded messages
    Dump(DumpCmd),

    /// Print the pose table of a pose channel
    Poses(PosesCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    common::init_logging(cli.verbose);

    match cli.command {
        Commands::Info(cmd) => cmd.run(),
        Commands::Channels(cmd) => cmd.run(),
        Commands::Schema(cmd) => cmd.run(),
        Commands::Dump(cmd) => cmd.run(),
        Commands::Poses(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        if let Some(err) = e.downcast_ref::<RRLogError>() {
            for (field, value) in err.log_fields() {
                tracing::debug!(field, value = %value, "decode error detail");
            }
        }
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
