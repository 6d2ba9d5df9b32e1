// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema-driven message decoder.
//!
//! The decoder makes no decisions of its own: the schema shape fully
//! determines which bytes are read and what value they produce.

use std::io::BufRead;

use crate::core::{DecodedMessage, DecodedValue, RRLogError, Result};
use crate::schema::{EnumSchema, MessageSchema, PrimitiveType, StructSchema};

use super::cursor::RRCursor;

/// Decode one message shaped by `schema`.
///
/// # Errors
///
/// - [`RRLogError::OrdinalOutOfRange`] for an enum ordinal outside the constants
/// - [`RRLogError::Truncated`] if the input ends inside the message
///
/// # Example
///
/// ```
/// use rrlog::core::DecodedValue;
/// use rrlog::encoding::{decode_message, RRCursor};
/// use rrlog::schema::{MessageSchema, PrimitiveType, StructSchema};
///
/// let schema: MessageSchema = StructSchema::new()
///     .with_field("a", PrimitiveType::Int32)
///     .with_field("ok", PrimitiveType::Bool)
///     .into();
/// let data: [u8; 5] = [0, 0, 0, 7, 1];
/// let value = decode_message(&mut RRCursor::new(&data[..]), &schema).unwrap();
/// assert_eq!(value.get("a"), Some(&DecodedValue::Int32(7)));
/// assert_eq!(value.get("ok"), Some(&DecodedValue::Bool(true)));
/// ```
pub fn decode_message<R: BufRead>(
    cursor: &mut RRCursor<R>,
    schema: &MessageSchema,
) -> Result<DecodedValue> {
    match schema {
        MessageSchema::Struct(s) => decode_struct(cursor, s).map(DecodedValue::Struct),
        MessageSchema::Primitive(p) => decode_primitive(cursor, *p),
        MessageSchema::Enum(e) => decode_enum(cursor, e),
    }
}

fn decode_struct<R: BufRead>(
    cursor: &mut RRCursor<R>,
    schema: &StructSchema,
) -> Result<DecodedMessage> {
    let mut fields = DecodedMessage::with_capacity(schema.fields.len());
    for (name, field) in &schema.fields {
        let value = decode_message(cursor, field)?;
        fields.insert(name.clone(), value);
    }
    Ok(fields)
}

/// Decode a single primitive value.
pub fn decode_primitive<R: BufRead>(
    cursor: &mut RRCursor<R>,
    primitive: PrimitiveType,
) -> Result<DecodedValue> {
    let value = match primitive {
        PrimitiveType::Int32 => DecodedValue::Int32(cursor.read_i32("int32 value")?),
        PrimitiveType::Int64 => DecodedValue::Int64(cursor.read_i64("int64 value")?),
        PrimitiveType::Float64 => DecodedValue::Float64(cursor.read_f64("float64 value")?),
        PrimitiveType::String => DecodedValue::String(cursor.read_string("string value")?),
        // Only 1 is true; other non-zero bytes read as false.
        PrimitiveType::Bool => DecodedValue::Bool(cursor.read_u8("bool value")? == 1),
    };
    Ok(value)
}

fn decode_enum<R: BufRead>(cursor: &mut RRCursor<R>, schema: &EnumSchema) -> Result<DecodedValue> {
    let position = cursor.position();
    let ordinal = cursor.read_i32("enum ordinal")?;
    schema
        .constant(ordinal)
        .map(|label| DecodedValue::Enum(label.to_string()))
        .ok_or(RRLogError::OrdinalOutOfRange {
            ordinal,
            count: schema.constants.len(),
            position,
        })
}
