// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Channel schemas and the binary schema grammar.
//!
//! - [`ast`] - Schema sum type ([`MessageSchema`]) and its parts
//! - [`parser`] - Parser for the tag-based binary grammar

pub mod ast;
pub mod parser;

pub use ast::{EnumSchema, MessageSchema, PrimitiveType, StructSchema};
pub use parser::{parse_schema, MAX_SCHEMA_DEPTH};
