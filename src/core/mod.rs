// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout rrlog.
//!
//! This module provides the foundational types for the library:
//! - [`RRLogError`] - Error taxonomy for a decode pass
//! - [`DecodedValue`] - Schema-shaped decoded value

pub mod error;
pub mod value;

pub use error::{RRLogError, Result};
pub use value::{DecodedMessage, DecodedValue};

/// Magic bytes at the start of every RRLog stream.
pub const MAGIC: &[u8; 2] = b"RR";

/// The only format version this crate decodes.
pub const FORMAT_VERSION: i16 = 0;
