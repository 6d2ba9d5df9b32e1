// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect commands - file summary and channel listing.

use std::path::PathBuf;

use clap::Args;

use crate::common::{open_log, plural, Result};

/// Show a file summary.
#[derive(Args, Clone, Debug)]
pub struct InfoCmd {
    /// Input RRLog file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Fail if the file ends in the middle of an entry
    #[arg(long)]
    strict: bool,
}

impl InfoCmd {
    pub fn run(self) -> Result<()> {
        let opened = open_log(&self.input, self.strict)?;
        let log = &opened.log;

        println!("=== {} ===", self.input.display());
        println!("Format version: {}", opened.version);
        println!("Bytes: {}", opened.bytes_read);
        println!("Channels: {}", log.len());
        println!("Messages: {}", log.message_count());

        if !log.is_empty() {
            println!();
            println!("Channels:");
            for (index, channel) in log.iter().enumerate() {
                println!(
                    "  [{}] {} | {} | {}",
                    index,
                    channel.name,
                    channel.schema,
                    plural(channel.message_count(), "message")
                );
            }
        }

        Ok(())
    }
}

/// List channels, one per line.
#[derive(Args, Clone, Debug)]
pub struct ChannelsCmd {
    /// Input RRLog file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Fail if the file ends in the middle of an entry
    #[arg(long)]
    strict: bool,
}

impl ChannelsCmd {
    pub fn run(self) -> Result<()> {
        let opened = open_log(&self.input, self.strict)?;

        for (index, channel) in opened.log.iter().enumerate() {
            println!(
                "[{}] {} ({})",
                index,
                channel.name,
                plural(channel.message_count(), "message")
            );
        }

        Ok(())
    }
}
