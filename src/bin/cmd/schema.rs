// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema command - show channel schemas.

use std::path::PathBuf;

use clap::Args;
use indexmap::IndexMap;

use crate::common::{find_channel, open_log, output_json_or, Result};
use rrlog::MessageSchema;

/// Show channel schemas.
#[derive(Args, Clone, Debug)]
pub struct SchemaCmd {
    /// Input RRLog file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Channel to show (shows all if not specified)
    #[arg(value_name = "CHANNEL")]
    channel: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Fail if the file ends in the middle of an entry
    #[arg(long)]
    strict: bool,
}

impl SchemaCmd {
    pub fn run(self) -> Result<()> {
        let opened = open_log(&self.input, self.strict)?;
        let log = &opened.log;

        let schemas: IndexMap<&str, &MessageSchema> = match &self.channel {
            Some(name) => {
                let channel = find_channel(log, name)?;
                IndexMap::from([(channel.name.as_str(), &channel.schema)])
            }
            None => log
                .iter()
                .map(|channel| (channel.name.as_str(), &channel.schema))
                .collect(),
        };

        output_json_or(self.json, &schemas, || {
            for (name, schema) in &schemas {
                println!("=== {name} ===");
                println!("{}", schema.pretty());
                println!();
            }
        })
    }
}
