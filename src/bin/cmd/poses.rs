// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Poses command - print a pose channel as a table.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;

use crate::common::{find_channel, open_log, output_json_or, Result};
use rrlog::PoseWithTime;

/// Print the pose table of a channel, sorted by timestamp.
#[derive(Args, Clone, Debug)]
pub struct PosesCmd {
    /// Input RRLog file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Pose channel name
    #[arg(value_name = "CHANNEL")]
    channel: String,

    /// Only show the pose closest in time to TIMESTAMP
    #[arg(long, value_name = "TIMESTAMP", allow_hyphen_values = true)]
    at: Option<i64>,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Fail if the file ends in the middle of an entry
    #[arg(long)]
    strict: bool,
}

impl PosesCmd {
    pub fn run(self) -> Result<()> {
        let opened = open_log(&self.input, self.strict)?;
        let channel = find_channel(&opened.log, &self.channel)?;
        let mut poses = PoseWithTime::from_channel(channel)
            .with_context(|| format!("Channel '{}' does not carry poses", self.channel))?;

        if let Some(timestamp) = self.at {
            let nearest = PoseWithTime::nearest(&poses, timestamp)
                .copied()
                .with_context(|| format!("Channel '{}' has no poses", self.channel))?;
            poses = vec![nearest];
        }

        output_json_or(self.json, &poses, || {
            println!(
                "{:>16} {:>12} {:>12} {:>10}",
                "timestamp", "x", "y", "heading"
            );
            for pose in &poses {
                println!(
                    "{:>16} {:>12.3} {:>12.3} {:>10.3}",
                    pose.timestamp, pose.x, pose.y, pose.heading
                );
            }
        })
    }
}
