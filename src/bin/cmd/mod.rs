// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod dump;
mod inspect;
mod poses;
mod schema;

pub use dump::DumpCmd;
pub use inspect::{ChannelsCmd, InfoCmd};
pub use poses::PosesCmd;
pub use schema::SchemaCmd;
