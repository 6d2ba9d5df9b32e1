// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Dump command - print decoded messages.

use std::path::PathBuf;

use clap::Args;
use indexmap::IndexMap;

use crate::common::{find_channel, open_log, output_json_or, plural, Result};
use rrlog::{Channel, DecodedValue};

/// Print decoded messages.
#[derive(Args, Clone, Debug)]
pub struct DumpCmd {
    /// Input RRLog file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Only dump this channel
    #[arg(short, long, value_name = "NAME")]
    channel: Option<String>,

    /// Maximum messages per channel
    #[arg(short = 'n', long, value_name = "N")]
    limit: Option<usize>,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Fail if the file ends in the middle of an entry
    #[arg(long)]
    strict: bool,
}

impl DumpCmd {
    pub fn run(self) -> Result<()> {
        let opened = open_log(&self.input, self.strict)?;
        let log = &opened.log;

        let channels: Vec<&Channel> = match &self.channel {
            Some(name) => vec![find_channel(log, name)?],
            None => log.iter().collect(),
        };

        let limit = self.limit.unwrap_or(usize::MAX);
        let messages: IndexMap<&str, &[DecodedValue]> = channels
            .iter()
            .map(|channel| {
                let shown = channel.messages.len().min(limit);
                (channel.name.as_str(), &channel.messages[..shown])
            })
            .collect();

        output_json_or(self.json, &messages, || {
            for channel in &channels {
                let shown = messages.get(channel.name.as_str()).map_or(0, |m| m.len());
                println!(
                    "=== {} ({}) ===",
                    channel.name,
                    plural(channel.message_count(), "message")
                );
                for (index, message) in channel.messages[..shown].iter().enumerate() {
                    println!("[{index}] {}", message.pretty());
                }
                if shown < channel.message_count() {
                    println!("... {} more", channel.message_count() - shown);
                }
                println!();
            }
        })
    }
}
