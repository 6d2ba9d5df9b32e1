// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for rrlog.
//!
//! Every variant is fatal to the decode pass that produced it. Positions are
//! byte offsets from the start of the stream, as counted by the cursor.

/// Errors that can occur while decoding an RRLog stream.
#[derive(Debug, thiserror::Error)]
pub enum RRLogError {
    /// The stream does not start with `"RR"`.
    #[error("Not an RRLog file: expected magic \"RR\", found {found:02x?}")]
    BadMagic {
        /// The bytes found where the magic was expected
        found: Vec<u8>,
    },

    /// Format version is not 0.
    #[error("Unsupported RRLog version {version} (expected version 0)")]
    UnsupportedVersion {
        /// Version read from the header
        version: i16,
    },

    /// Entry type is neither a channel declaration nor a message.
    #[error("Unknown entry type {entry_type} at byte {position}")]
    UnknownEntryType {
        /// The entry type read from the stream
        entry_type: i32,
        /// Byte offset of the entry type
        position: u64,
    },

    /// Schema tag outside the 0..=6 grammar.
    #[error("Unknown schema tag {tag} at byte {position}")]
    UnknownSchemaTag {
        /// The tag read from the stream
        tag: i32,
        /// Byte offset of the tag
        position: u64,
    },

    /// A message references a channel that has not been declared.
    #[error("Unknown channel index {index} at byte {position} ({channel_count} channels declared)")]
    UnknownChannelIndex {
        /// Index read from the message entry
        index: i32,
        /// Channels declared so far
        channel_count: usize,
        /// Byte offset of the index
        position: u64,
    },

    /// Enum ordinal does not select one of the declared constants.
    #[error("Enum ordinal {ordinal} out of range at byte {position} ({count} constants)")]
    OrdinalOutOfRange {
        /// Ordinal read from the stream
        ordinal: i32,
        /// Number of constants in the enum schema
        count: usize,
        /// Byte offset of the ordinal
        position: u64,
    },

    /// Schema shape the decoder has no rule for.
    #[error("Unknown schema: {description}")]
    UnknownSchema {
        /// Human-readable description of the schema
        description: String,
    },

    /// End of input in the middle of an entry (strict mode only).
    #[error("Stream truncated while reading {context} at byte {position}")]
    Truncated {
        /// What was being read
        context: String,
        /// Bytes consumed before the stream ran out
        position: u64,
    },

    /// Negative string length or element count.
    #[error("Invalid {what} {length} at byte {position}")]
    InvalidLength {
        /// What the length describes
        what: &'static str,
        /// The value read from the stream
        length: i32,
        /// Byte offset of the length
        position: u64,
    },

    /// Schema nesting deeper than the parser accepts.
    #[error("Schema nesting exceeds {max_depth} levels at byte {position}")]
    SchemaTooDeep {
        /// Maximum accepted depth
        max_depth: usize,
        /// Byte offset where the limit was hit
        position: u64,
    },

    /// A decoded struct lacks a required field.
    #[error("Field '{field}' missing from message")]
    FieldMissing {
        /// Field name
        field: String,
    },

    /// A decoded field has an unexpected type.
    #[error("Field '{field}' has type {actual}, expected {expected}")]
    FieldType {
        /// Field name
        field: String,
        /// Type the caller asked for
        expected: &'static str,
        /// Type found in the message
        actual: &'static str,
    },

    /// No channel with the given name.
    #[error("Channel not found: '{name}'")]
    ChannelNotFound {
        /// Requested channel name
        name: String,
    },

    /// Underlying I/O failure other than end of input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RRLogError {
    /// Create a truncation error.
    pub fn truncated(context: impl Into<String>, position: u64) -> Self {
        RRLogError::Truncated {
            context: context.into(),
            position,
        }
    }

    /// Create a "field missing" error.
    pub fn field_missing(field: impl Into<String>) -> Self {
        RRLogError::FieldMissing {
            field: field.into(),
        }
    }

    /// Create a "channel not found" error.
    pub fn channel_not_found(name: impl Into<String>) -> Self {
        RRLogError::ChannelNotFound { name: name.into() }
    }

    /// Whether this error reports input that ended early.
    pub fn is_truncation(&self) -> bool {
        matches!(self, RRLogError::Truncated { .. })
    }

    /// Byte offset the error refers to, when it has one.
    pub fn position(&self) -> Option<u64> {
        match self {
            RRLogError::UnknownEntryType { position, .. }
            | RRLogError::UnknownSchemaTag { position, .. }
            | RRLogError::UnknownChannelIndex { position, .. }
            | RRLogError::OrdinalOutOfRange { position, .. }
            | RRLogError::Truncated { position, .. }
            | RRLogError::InvalidLength { position, .. }
            | RRLogError::SchemaTooDeep { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            RRLogError::BadMagic { found } => vec![("found", format!("{found:02x?}"))],
            RRLogError::UnsupportedVersion { version } => {
                vec![("version", version.to_string())]
            }
            RRLogError::UnknownEntryType {
                entry_type,
                position,
            } => vec![
                ("entry_type", entry_type.to_string()),
                ("position", position.to_string()),
            ],
            RRLogError::UnknownSchemaTag { tag, position } => vec![
                ("tag", tag.to_string()),
                ("position", position.to_string()),
            ],
            RRLogError::UnknownChannelIndex {
                index,
                channel_count,
                position,
            } => vec![
                ("index", index.to_string()),
                ("channel_count", channel_count.to_string()),
                ("position", position.to_string()),
            ],
            RRLogError::OrdinalOutOfRange {
                ordinal,
                count,
                position,
            } => vec![
                ("ordinal", ordinal.to_string()),
                ("count", count.to_string()),
                ("position", position.to_string()),
            ],
            RRLogError::UnknownSchema { description } => {
                vec![("schema", description.clone())]
            }
            RRLogError::Truncated { context, position } => vec![
                ("context", context.clone()),
                ("position", position.to_string()),
            ],
            RRLogError::InvalidLength {
                what,
                length,
                position,
            } => vec![
                ("what", what.to_string()),
                ("length", length.to_string()),
                ("position", position.to_string()),
            ],
            RRLogError::SchemaTooDeep {
                max_depth,
                position,
            } => vec![
                ("max_depth", max_depth.to_string()),
                ("position", position.to_string()),
            ],
            RRLogError::FieldMissing { field } => vec![("field", field.clone())],
            RRLogError::FieldType {
                field,
                expected,
                actual,
            } => vec![
                ("field", field.clone()),
                ("expected", expected.to_string()),
                ("actual", actual.to_string()),
            ],
            RRLogError::ChannelNotFound { name } => vec![("channel", name.clone())],
            RRLogError::Io(err) => vec![("message", err.to_string())],
        }
    }
}

/// Result type for rrlog operations.
pub type Result<T> = std::result::Result<T, RRLogError>;
