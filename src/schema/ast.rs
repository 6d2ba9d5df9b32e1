// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema types declared by RRLog channels.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// Recursive description of the binary shape of a channel's messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageSchema {
    /// Ordered named fields
    Struct(StructSchema),
    /// Fixed- or length-prefixed scalar
    Primitive(PrimitiveType),
    /// Ordinal-encoded string constants
    Enum(EnumSchema),
}

/// Struct schema. Field order is the on-wire order, so equality is
/// order-sensitive.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct StructSchema {
    /// Fields by name, in declaration order
    pub fields: IndexMap<String, MessageSchema>,
}

/// Enum schema. A constant's ordinal is its index in `constants`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnumSchema {
    /// Constant labels in declaration order
    pub constants: Vec<String>,
}

/// Primitive RRLog types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 64-bit IEEE-754 float
    Float64,
    /// Length-prefixed UTF-8 string
    String,
    /// Single byte, `1` is true
    Bool,
}

impl PrimitiveType {
    /// Schema tag that declares this primitive on the wire.
    pub const fn tag(self) -> i32 {
        match self {
            PrimitiveType::Int32 => 1,
            PrimitiveType::Int64 => 2,
            PrimitiveType::Float64 => 3,
            PrimitiveType::String => 4,
            PrimitiveType::Bool => 5,
        }
    }

    /// Map a schema tag to a primitive, if it names one.
    pub const fn from_tag(tag: i32) -> Option<Self> {
        match tag {
            1 => Some(PrimitiveType::Int32),
            2 => Some(PrimitiveType::Int64),
            3 => Some(PrimitiveType::Float64),
            4 => Some(PrimitiveType::String),
            5 => Some(PrimitiveType::Bool),
            _ => None,
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PrimitiveType::Int32 => write!(f, "int32"),
            PrimitiveType::Int64 => write!(f, "int64"),
            PrimitiveType::Float64 => write!(f, "float64"),
            PrimitiveType::String => write!(f, "string"),
            PrimitiveType::Bool => write!(f, "bool"),
        }
    }
}

impl MessageSchema {
    /// Schema tag that declares this schema on the wire.
    pub fn tag(&self) -> i32 {
        match self {
            MessageSchema::Struct(_) => 0,
            MessageSchema::Primitive(p) => p.tag(),
            MessageSchema::Enum(_) => 6,
        }
    }

    /// Get the struct schema, if this is one.
    pub fn as_struct(&self) -> Option<&StructSchema> {
        match self {
            MessageSchema::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Render the schema as an indented tree.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, 0);
        out
    }

    fn write_tree(&self, out: &mut String, indent: usize) {
        match self {
            MessageSchema::Struct(s) if !s.fields.is_empty() => {
                out.push_str("struct {");
                for (name, field) in &s.fields {
                    out.push('\n');
                    out.push_str(&"  ".repeat(indent + 1));
                    out.push_str(name);
                    out.push_str(": ");
                    field.write_tree(out, indent + 1);
                }
                out.push('\n');
                out.push_str(&"  ".repeat(indent));
                out.push('}');
            }
            other => out.push_str(&other.to_string()),
        }
    }
}

impl fmt::Display for MessageSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageSchema::Struct(s) => {
                write!(f, "struct {{")?;
                for (i, (name, field)) in s.fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, " {name}: {field}")?;
                }
                if s.fields.is_empty() {
                    write!(f, "}}")
                } else {
                    write!(f, " }}")
                }
            }
            MessageSchema::Primitive(p) => write!(f, "{p}"),
            MessageSchema::Enum(e) => write!(f, "enum [{}]", e.constants.join(", ")),
        }
    }
}

impl From<PrimitiveType> for MessageSchema {
    fn from(p: PrimitiveType) -> Self {
        MessageSchema::Primitive(p)
    }
}

impl StructSchema {
    /// Create an empty struct schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, builder style.
    pub fn with_field(mut self, name: impl Into<String>, schema: impl Into<MessageSchema>) -> Self {
        self.fields.insert(name.into(), schema.into());
        self
    }

    /// Look up a field schema by name.
    pub fn field(&self, name: &str) -> Option<&MessageSchema> {
        self.fields.get(name)
    }
}

impl PartialEq for StructSchema {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len() && self.fields.iter().eq(other.fields.iter())
    }
}

impl Eq for StructSchema {}

impl From<StructSchema> for MessageSchema {
    fn from(s: StructSchema) -> Self {
        MessageSchema::Struct(s)
    }
}

impl EnumSchema {
    /// Create an enum schema from its constants, in ordinal order.
    pub fn new<I, S>(constants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            constants: constants.into_iter().map(Into::into).collect(),
        }
    }

    /// Constant selected by `ordinal`, if in range.
    pub fn constant(&self, ordinal: i32) -> Option<&str> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| self.constants.get(i))
            .map(String::as_str)
    }

    /// Ordinal of a constant label.
    pub fn ordinal(&self, label: &str) -> Option<usize> {
        self.constants.iter().position(|c| c == label)
    }
}

impl From<EnumSchema> for MessageSchema {
    fn from(e: EnumSchema) -> Self {
        MessageSchema::Enum(e)
    }
}
