// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Parser for the binary schema grammar in channel declarations.
//!
//! A schema starts with an `i32` tag:
//!
//! | tag | schema  | followed by                                   |
//! |-----|---------|-----------------------------------------------|
//! | 0   | struct  | `i32` field count, then (name, schema) pairs  |
//! | 1   | int32   |                                               |
//! | 2   | int64   |                                               |
//! | 3   | float64 |                                               |
//! | 4   | string  |                                               |
//! | 5   | bool    |                                               |
//! | 6   | enum    | `i32` constant count, then constant strings   |

use std::io::BufRead;

use indexmap::IndexMap;
use tracing::warn;

use crate::core::{RRLogError, Result};
use crate::encoding::RRCursor;

use super::ast::{EnumSchema, MessageSchema, PrimitiveType, StructSchema};

/// Schema tag for a struct.
pub const TAG_STRUCT: i32 = 0;

/// Schema tag for an enum.
pub const TAG_ENUM: i32 = 6;

/// Deepest struct nesting accepted in a schema.
pub const MAX_SCHEMA_DEPTH: usize = 64;

/// Parse one schema from the cursor.
///
/// Consumes exactly the bytes of the schema; field and constant order is
/// preserved as read.
///
/// # Errors
///
/// - [`RRLogError::UnknownSchemaTag`] for a tag outside the grammar
/// - [`RRLogError::InvalidLength`] for a negative count or name length
/// - [`RRLogError::SchemaTooDeep`] past [`MAX_SCHEMA_DEPTH`] nested structs
/// - [`RRLogError::Truncated`] if the input ends inside the schema
///
/// # Example
///
/// ```
/// use rrlog::encoding::RRCursor;
/// use rrlog::schema::{parse_schema, MessageSchema, PrimitiveType};
///
/// let data = 5i32.to_be_bytes();
/// let mut cursor = RRCursor::new(&data[..]);
/// let schema = parse_schema(&mut cursor).unwrap();
/// assert_eq!(schema, MessageSchema::Primitive(PrimitiveType::Bool));
/// ```
pub fn parse_schema<R: BufRead>(cursor: &mut RRCursor<R>) -> Result<MessageSchema> {
    parse_at_depth(cursor, 0)
}

fn parse_at_depth<R: BufRead>(cursor: &mut RRCursor<R>, depth: usize) -> Result<MessageSchema> {
    if depth > MAX_SCHEMA_DEPTH {
        return Err(RRLogError::SchemaTooDeep {
            max_depth: MAX_SCHEMA_DEPTH,
            position: cursor.position(),
        });
    }

    let position = cursor.position();
    let tag = cursor.read_i32("schema tag")?;

    match tag {
        TAG_STRUCT => parse_struct(cursor, depth).map(MessageSchema::Struct),
        TAG_ENUM => parse_enum(cursor).map(MessageSchema::Enum),
        other => PrimitiveType::from_tag(other)
            .map(MessageSchema::Primitive)
            .ok_or(RRLogError::UnknownSchemaTag {
                tag: other,
                position,
            }),
    }
}

fn parse_struct<R: BufRead>(cursor: &mut RRCursor<R>, depth: usize) -> Result<StructSchema> {
    let count = cursor.read_len("struct field count")?;
    let mut fields = IndexMap::new();

    for _ in 0..count {
        let name = cursor.read_string("field name")?;
        let field = parse_at_depth(cursor, depth + 1)?;
        // Later definitions win but keep the first slot.
        if fields.insert(name.clone(), field).is_some() {
            warn!(field = %name, "duplicate field name in struct schema");
        }
    }

    Ok(StructSchema { fields })
}

fn parse_enum<R: BufRead>(cursor: &mut RRCursor<R>) -> Result<EnumSchema> {
    let count = cursor.read_len("enum constant count")?;
    let mut constants = Vec::new();

    for _ in 0..count {
        constants.push(cursor.read_string("enum constant")?);
    }

    Ok(EnumSchema { constants })
}
