// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Binary decoding primitives for RRLog.
//!
//! - [`cursor`] - Big-endian byte cursor with a running byte count
//! - [`decoder`] - Schema-driven recursive message decoder

pub mod cursor;
pub mod decoder;

pub use cursor::RRCursor;
pub use decoder::{decode_message, decode_primitive};
