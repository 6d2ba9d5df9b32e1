// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! I/O layer for RRLog streams.
//!
//! - [`log_file`] - Decoded log model (channels and their messages)
//! - [`reader`] - Header validation and entry framing

pub mod log_file;
pub mod reader;

pub use log_file::{Channel, LogFile};
pub use reader::{
    decode_bytes, decode_file, decode_log, Entries, Entry, LogReader, ParsePolicyError,
    ReaderBuilder, ReaderConfig, TruncationPolicy,
};
