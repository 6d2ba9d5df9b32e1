// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decoded value type system.
//!
//! A [`DecodedValue`] mirrors the shape of the schema it was decoded with:
//! struct schemas produce [`DecodedValue::Struct`], primitives produce the
//! matching scalar, and enums produce the selected constant label.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// Decoded struct as field name -> value mapping, in schema field order.
pub type DecodedMessage = IndexMap<String, DecodedValue>;

/// Value decoded from one RRLog message.
///
/// Serializes untagged, so enum labels and strings (or `Int32` and `Int64`)
/// look the same in JSON. Values are written, never read back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DecodedValue {
    /// 32-bit signed integer
    Int32(i32),
    /// 64-bit signed integer
    Int64(i64),
    /// 64-bit IEEE-754 float
    Float64(f64),
    /// UTF-8 string
    String(String),
    /// Boolean
    Bool(bool),
    /// Label of the enum constant selected by the encoded ordinal
    Enum(String),
    /// Nested struct, fields in schema order
    Struct(DecodedMessage),
}

impl DecodedValue {
    /// Try to get the inner `i32`.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            DecodedValue::Int32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get an `i64`, widening `Int32`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DecodedValue::Int32(v) => Some(i64::from(*v)),
            DecodedValue::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get the inner `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DecodedValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get a string, either a string value or an enum label.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DecodedValue::String(s) | DecodedValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner `bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DecodedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the inner struct.
    pub fn as_struct(&self) -> Option<&DecodedMessage> {
        match self {
            DecodedValue::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Look up a field of a struct value.
    pub fn get(&self, field: &str) -> Option<&DecodedValue> {
        self.as_struct().and_then(|fields| fields.get(field))
    }

    /// Get the type name of this value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            DecodedValue::Int32(_) => "int32",
            DecodedValue::Int64(_) => "int64",
            DecodedValue::Float64(_) => "float64",
            DecodedValue::String(_) => "string",
            DecodedValue::Bool(_) => "bool",
            DecodedValue::Enum(_) => "enum",
            DecodedValue::Struct(_) => "struct",
        }
    }

    /// Render the value as an indented tree, one struct field per line.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, 0);
        out
    }

    fn write_tree(&self, out: &mut String, indent: usize) {
        match self {
            DecodedValue::Struct(fields) if !fields.is_empty() => {
                out.push('{');
                for (name, value) in fields {
                    out.push('\n');
                    out.push_str(&"  ".repeat(indent + 1));
                    out.push_str(name);
                    out.push_str(": ");
                    value.write_tree(out, indent + 1);
                }
                out.push('\n');
                out.push_str(&"  ".repeat(indent));
                out.push('}');
            }
            scalar => out.push_str(&scalar.to_string()),
        }
    }
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedValue::Int32(v) => write!(f, "{v}"),
            DecodedValue::Int64(v) => write!(f, "{v}"),
            DecodedValue::Float64(v) => write!(f, "{v}"),
            DecodedValue::String(v) => write!(f, "{v:?}"),
            DecodedValue::Bool(v) => write!(f, "{v}"),
            DecodedValue::Enum(v) => write!(f, "{v}"),
            DecodedValue::Struct(fields) => {
                write!(f, "{{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, " {name}: {value}")?;
                }
                if fields.is_empty() {
                    write!(f, "}}")
                } else {
                    write!(f, " }}")
                }
            }
        }
    }
}

impl From<bool> for DecodedValue {
    fn from(v: bool) -> Self {
        DecodedValue::Bool(v)
    }
}

impl From<i32> for DecodedValue {
    fn from(v: i32) -> Self {
        DecodedValue::Int32(v)
    }
}

impl From<i64> for DecodedValue {
    fn from(v: i64) -> Self {
        DecodedValue::Int64(v)
    }
}

impl From<f64> for DecodedValue {
    fn from(v: f64) -> Self {
        DecodedValue::Float64(v)
    }
}

impl From<String> for DecodedValue {
    fn from(v: String) -> Self {
        DecodedValue::String(v)
    }
}

impl From<&str> for DecodedValue {
    fn from(v: &str) -> Self {
        DecodedValue::String(v.to_string())
    }
}
