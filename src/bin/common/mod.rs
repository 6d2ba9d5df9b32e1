// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::Path;

use anyhow::Context as _;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use rrlog::{Channel, LogFile, RRLogError, ReaderBuilder};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// A decoded log together with the number of bytes consumed.
pub struct OpenedLog {
    pub log: LogFile,
    pub bytes_read: u64,
    pub version: i16,
}

/// Install the stderr subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity flag.
pub fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Decode a whole log file.
pub fn open_log(path: &Path, strict: bool) -> Result<OpenedLog> {
    let mut reader = ReaderBuilder::new()
        .strict(strict)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    while reader
        .next_entry()
        .with_context(|| format!("Failed to decode {}", path.display()))?
        .is_some()
    {}

    Ok(OpenedLog {
        bytes_read: reader.bytes_read(),
        version: reader.version(),
        log: reader.into_log(),
    })
}

/// Look up a channel by name.
pub fn find_channel<'a>(log: &'a LogFile, name: &str) -> Result<&'a Channel> {
    Ok(log
        .channel(name)
        .ok_or_else(|| RRLogError::channel_not_found(name))?)
}

/// Print `value` as pretty JSON, or run the human-readable printer.
pub fn output_json_or<T>(json: bool, value: &T, human_fn: impl FnOnce()) -> Result<()>
where
    T: Serialize + ?Sized,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human_fn();
    }
    Ok(())
}

/// Pluralize a count for human output.
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
