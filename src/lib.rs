// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # rrlog
//!
//! Decoder for RRLog, the binary telemetry log written by a robotics
//! motion-planning stack.
//!
//! An RRLog stream is self-describing: every channel declares a recursive
//! value schema once, and each message on that channel is encoded against it.
//! The library is organized bottom-up:
//! - `core/` - Error taxonomy and the decoded value model
//! - `schema/` - Schema sum type and its binary grammar
//! - `encoding/` - Big-endian cursor and the schema-driven decoder
//! - `io/` - Stream framing, reader configuration and the decoded log
//! - `pose` - Typed pose extraction for pose channels
//!
//! ## Example: Decoding a file
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let log = rrlog::decode_file("run.rrlog")?;
//! for channel in &log {
//!     println!("{}: {} ({} messages)", channel.name, channel.schema, channel.message_count());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Strict streaming read
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use rrlog::{Entry, ReaderBuilder, TruncationPolicy};
//!
//! let mut reader = ReaderBuilder::new()
//!     .truncation(TruncationPolicy::Strict)
//!     .open("run.rrlog")?;
//! while let Some(entry) = reader.next_entry()? {
//!     if let Entry::ChannelDeclared { name, .. } = entry {
//!         println!("channel {name}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use crate::core::{DecodedMessage, DecodedValue, RRLogError, Result};

// Schema grammar
pub mod schema;

pub use schema::{EnumSchema, MessageSchema, PrimitiveType, StructSchema};

// Binary decoding
pub mod encoding;

// Stream framing and the decoded log
pub mod io;

pub use io::{
    decode_bytes, decode_file, decode_log, Channel, Entry, LogFile, LogReader, ReaderBuilder,
    ReaderConfig, TruncationPolicy,
};

// Pose extraction
pub mod pose;

pub use pose::PoseWithTime;
