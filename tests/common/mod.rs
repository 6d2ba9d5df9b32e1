// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.
//!
//! [`LogBuilder`] writes RRLog bytes so fixtures can be built in code.

#![allow(dead_code)]

use rrlog::{DecodedMessage, DecodedValue, EnumSchema, MessageSchema, PrimitiveType, StructSchema};

pub const ENTRY_CHANNEL: i32 = 0;
pub const ENTRY_MESSAGE: i32 = 1;

// ============================================================================
// Wire Encoding
// ============================================================================

pub fn push_i32(out: &mut Vec<u8>, v: i32) {
    out.extend_from_slice(&v.to_be_bytes());
}

/// Length-prefixed UTF-8 string.
pub fn push_pstring(out: &mut Vec<u8>, s: &str) {
    push_i32(out, s.len() as i32);
    out.extend_from_slice(s.as_bytes());
}

pub fn encode_schema(out: &mut Vec<u8>, schema: &MessageSchema) {
    push_i32(out, schema.tag());
    match schema {
        MessageSchema::Struct(s) => {
            push_i32(out, s.fields.len() as i32);
            for (name, field) in &s.fields {
                push_pstring(out, name);
                encode_schema(out, field);
            }
        }
        MessageSchema::Primitive(_) => {}
        MessageSchema::Enum(e) => {
            push_i32(out, e.constants.len() as i32);
            for constant in &e.constants {
                push_pstring(out, constant);
            }
        }
    }
}

/// Encode `value` against `schema`. Panics on a shape mismatch.
pub fn encode_value(out: &mut Vec<u8>, schema: &MessageSchema, value: &DecodedValue) {
    match (schema, value) {
        (MessageSchema::Struct(s), DecodedValue::Struct(fields)) => {
            for (name, field) in &s.fields {
                let field_value = fields
                    .get(name)
                    .unwrap_or_else(|| panic!("missing field {name}"));
                encode_value(out, field, field_value);
            }
        }
        (MessageSchema::Primitive(PrimitiveType::Int32), DecodedValue::Int32(v)) => {
            out.extend_from_slice(&v.to_be_bytes())
        }
        (MessageSchema::Primitive(PrimitiveType::Int64), DecodedValue::Int64(v)) => {
            out.extend_from_slice(&v.to_be_bytes())
        }
        (MessageSchema::Primitive(PrimitiveType::Float64), DecodedValue::Float64(v)) => {
            out.extend_from_slice(&v.to_be_bytes())
        }
        (MessageSchema::Primitive(PrimitiveType::String), DecodedValue::String(v)) => {
            push_pstring(out, v)
        }
        (MessageSchema::Primitive(PrimitiveType::Bool), DecodedValue::Bool(v)) => {
            out.push(u8::from(*v))
        }
        (MessageSchema::Enum(e), DecodedValue::Enum(label)) => {
            let ordinal = e
                .ordinal(label)
                .unwrap_or_else(|| panic!("unknown enum label {label}"));
            push_i32(out, ordinal as i32);
        }
        (schema, value) => panic!("value {value} does not match schema {schema}"),
    }
}

// ============================================================================
// Log Builder
// ============================================================================

/// Builds an RRLog byte stream entry by entry.
#[derive(Debug, Clone)]
pub struct LogBuilder {
    bytes: Vec<u8>,
    schemas: Vec<MessageSchema>,
}

impl Default for LogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LogBuilder {
    /// Start with a valid header.
    pub fn new() -> Self {
        let mut bytes = b"RR".to_vec();
        bytes.extend_from_slice(&0i16.to_be_bytes());
        Self {
            bytes,
            schemas: Vec::new(),
        }
    }

    /// Declare a new channel at the next index.
    pub fn channel(mut self, name: &str, schema: &MessageSchema) -> Self {
        push_i32(&mut self.bytes, ENTRY_CHANNEL);
        push_pstring(&mut self.bytes, name);
        encode_schema(&mut self.bytes, schema);
        self.schemas.push(schema.clone());
        self
    }

    /// Append a message to the channel declared at `index`.
    pub fn message(mut self, index: usize, value: &DecodedValue) -> Self {
        let schema = self.schemas[index].clone();
        push_i32(&mut self.bytes, ENTRY_MESSAGE);
        push_i32(&mut self.bytes, index as i32);
        encode_value(&mut self.bytes, &schema, value);
        self
    }

    /// Append raw bytes.
    pub fn raw(mut self, data: &[u8]) -> Self {
        self.bytes.extend_from_slice(data);
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn pose_schema() -> MessageSchema {
    StructSchema::new()
        .with_field("x", PrimitiveType::Float64)
        .with_field("y", PrimitiveType::Float64)
        .with_field("heading", PrimitiveType::Float64)
        .with_field("timestamp", PrimitiveType::Int64)
        .into()
}

pub fn pose(x: f64, y: f64, heading: f64, timestamp: i64) -> DecodedValue {
    let mut fields = DecodedMessage::new();
    fields.insert("x".to_string(), DecodedValue::Float64(x));
    fields.insert("y".to_string(), DecodedValue::Float64(y));
    fields.insert("heading".to_string(), DecodedValue::Float64(heading));
    fields.insert("timestamp".to_string(), DecodedValue::Int64(timestamp));
    DecodedValue::Struct(fields)
}

pub fn status_schema() -> MessageSchema {
    StructSchema::new()
        .with_field("mode", EnumSchema::new(["IDLE", "DRIVE"]))
        .with_field("note", PrimitiveType::String)
        .into()
}

pub fn status(mode: &str, note: &str) -> DecodedValue {
    let mut fields = DecodedMessage::new();
    fields.insert("mode".to_string(), DecodedValue::Enum(mode.to_string()));
    fields.insert("note".to_string(), DecodedValue::String(note.to_string()));
    DecodedValue::Struct(fields)
}

/// A pose channel (3 messages, out of time order) and a status channel
/// (1 message).
pub fn sample_log() -> Vec<u8> {
    LogBuilder::new()
        .channel("pose", &pose_schema())
        .channel("status", &status_schema())
        .message(0, &pose(2.0, 0.5, 0.1, 200))
        .message(1, &status("DRIVE", "go"))
        .message(0, &pose(1.0, 0.25, 0.0, 100))
        .message(0, &pose(3.0, 0.75, 0.2, 300))
        .build()
}
