// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Sequential RRLog stream reader.
//!
//! [`LogReader`] validates the header on construction, then walks the entry
//! stream one entry at a time. Channel declarations extend the channel table;
//! messages are decoded with their channel's schema and appended to it.

pub mod builder;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::core::{RRLogError, Result, FORMAT_VERSION, MAGIC};
use crate::encoding::{decode_message, RRCursor};
use crate::schema::parse_schema;

use super::log_file::LogFile;

pub use builder::{ParsePolicyError, ReaderBuilder, ReaderConfig, TruncationPolicy};

/// Entry type of a channel declaration.
pub const ENTRY_CHANNEL: i32 = 0;

/// Entry type of a message.
pub const ENTRY_MESSAGE: i32 = 1;

/// One entry consumed from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A channel was declared (or re-declared) at `index`.
    ChannelDeclared {
        /// Declaration position of the channel
        index: usize,
        /// Channel name
        name: String,
        /// Whether an existing channel with this name was replaced
        replaced: bool,
    },
    /// A message was decoded and appended to the channel at `channel_index`.
    Message {
        /// Declaration position of the channel
        channel_index: usize,
    },
}

/// Reads an RRLog stream from any buffered source.
///
/// Generic over `R: BufRead` so tests can use `&[u8]` and files go through
/// `BufReader<File>`.
///
/// # Example
///
/// ```
/// use rrlog::io::LogReader;
///
/// let mut data = b"RR".to_vec();
/// data.extend_from_slice(&0i16.to_be_bytes());
/// let log = LogReader::new(&data[..]).unwrap().read_to_end().unwrap();
/// assert!(log.is_empty());
/// ```
#[derive(Debug)]
pub struct LogReader<R> {
    cursor: RRCursor<R>,
    config: ReaderConfig,
    version: i16,
    log: LogFile,
    finished: bool,
}

impl LogReader<BufReader<File>> {
    /// Open a log file with the default (lenient) configuration.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        ReaderBuilder::new().open(path)
    }
}

impl<R: BufRead> LogReader<R> {
    /// Create a reader with the default configuration, validating the header.
    pub fn new(reader: R) -> Result<Self> {
        Self::with_config(reader, ReaderConfig::default())
    }

    /// Create a reader with `config`, validating the header.
    ///
    /// # Errors
    ///
    /// - [`RRLogError::BadMagic`] if the stream does not start with `"RR"`
    /// - [`RRLogError::UnsupportedVersion`] if the version is not 0
    /// - [`RRLogError::Truncated`] if the stream is shorter than the header
    pub fn with_config(reader: R, config: ReaderConfig) -> Result<Self> {
        let mut cursor = RRCursor::new(reader);

        let magic = cursor.read_bytes(MAGIC.len(), "magic")?;
        if magic[..] != MAGIC[..] {
            return Err(RRLogError::BadMagic { found: magic });
        }

        let version = cursor.read_i16("format version")?;
        if version != FORMAT_VERSION {
            return Err(RRLogError::UnsupportedVersion { version });
        }

        debug!(version, truncation = %config.truncation, "RRLog header accepted");

        Ok(Self {
            cursor,
            config,
            version,
            log: LogFile::new(),
            finished: false,
        })
    }

    /// Format version from the header.
    pub fn version(&self) -> i16 {
        self.version
    }

    /// Configuration the reader was built with.
    pub fn config(&self) -> ReaderConfig {
        self.config
    }

    /// Bytes consumed so far, header included.
    pub fn bytes_read(&self) -> u64 {
        self.cursor.position()
    }

    /// The log decoded so far.
    pub fn log(&self) -> &LogFile {
        &self.log
    }

    /// Give up the reader and return the log decoded so far.
    pub fn into_log(self) -> LogFile {
        self.log
    }

    /// Read the next entry, or `None` once the stream is exhausted.
    ///
    /// In lenient mode, input that ends mid-entry also yields `None` and the
    /// partial entry is dropped. In strict mode it fails with
    /// [`RRLogError::Truncated`]. Any other error is fatal; later calls
    /// return `None`.
    pub fn next_entry(&mut self) -> Result<Option<Entry>> {
        if self.finished {
            return Ok(None);
        }

        if self.cursor.is_at_end()? {
            debug!(
                bytes = self.cursor.position(),
                channels = self.log.len(),
                messages = self.log.message_count(),
                "end of RRLog stream"
            );
            self.finished = true;
            return Ok(None);
        }

        let entry_start = self.cursor.position();
        match self.read_entry() {
            Ok(entry) => Ok(Some(entry)),
            Err(err)
                if err.is_truncation() && self.config.truncation == TruncationPolicy::Lenient =>
            {
                debug!(
                    entry_start,
                    error = %err,
                    "stream ended inside an entry, dropping it"
                );
                self.finished = true;
                Ok(None)
            }
            Err(err) => {
                self.finished = true;
                Err(err)
            }
        }
    }

    /// Iterate over the remaining entries.
    pub fn entries(&mut self) -> Entries<'_, R> {
        Entries { reader: self }
    }

    /// Read every remaining entry and return the complete log.
    pub fn read_to_end(mut self) -> Result<LogFile> {
        while self.next_entry()?.is_some() {}
        Ok(self.log)
    }

    fn read_entry(&mut self) -> Result<Entry> {
        let position = self.cursor.position();
        let entry_type = self.cursor.read_i32("entry type")?;

        match entry_type {
            ENTRY_CHANNEL => {
                let name = self.cursor.read_string("channel name")?;
                let schema = parse_schema(&mut self.cursor)?;
                let (index, replaced) = self.log.declare_channel(name.clone(), schema);
                if replaced {
                    warn!(channel = %name, index, "channel re-declared, replacing it");
                } else {
                    debug!(channel = %name, index, "channel declared");
                }
                Ok(Entry::ChannelDeclared {
                    index,
                    name,
                    replaced,
                })
            }
            ENTRY_MESSAGE => {
                let index_position = self.cursor.position();
                let raw_index = self.cursor.read_i32("channel index")?;
                let channel_count = self.log.len();
                let channel_index = usize::try_from(raw_index)
                    .ok()
                    .filter(|&i| i < channel_count)
                    .ok_or(RRLogError::UnknownChannelIndex {
                        index: raw_index,
                        channel_count,
                        position: index_position,
                    })?;

                let schema = &self.log.channels()[channel_index].schema;
                let value = decode_message(&mut self.cursor, schema)?;
                trace!(channel_index, position, "message decoded");
                self.log.push_message(channel_index, value);
                Ok(Entry::Message { channel_index })
            }
            other => Err(RRLogError::UnknownEntryType {
                entry_type: other,
                position,
            }),
        }
    }
}

/// Iterator adapter over log entries.
pub struct Entries<'a, R> {
    reader: &'a mut LogReader<R>,
}

impl<R: BufRead> Iterator for Entries<'_, R> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.next_entry().transpose()
    }
}

/// Decode a whole stream with the default (lenient) configuration.
pub fn decode_log<R: BufRead>(reader: R) -> Result<LogFile> {
    LogReader::new(reader)?.read_to_end()
}

/// Decode an in-memory log.
pub fn decode_bytes(data: &[u8]) -> Result<LogFile> {
    decode_log(data)
}

/// Decode a log file.
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<LogFile> {
    LogReader::open(path)?.read_to_end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DecodedValue;
    use crate::schema::{MessageSchema, PrimitiveType};

    fn header() -> Vec<u8> {
        let mut data = MAGIC.to_vec();
        data.extend_from_slice(&FORMAT_VERSION.to_be_bytes());
        data
    }

    fn push_i32(data: &mut Vec<u8>, v: i32) {
        data.extend_from_slice(&v.to_be_bytes());
    }

    fn push_str(data: &mut Vec<u8>, s: &str) {
        push_i32(data, s.len() as i32);
        data.extend_from_slice(s.as_bytes());
    }

    #[test]
    fn test_header_only() {
        let log = decode_bytes(&header()).unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn test_bad_magic() {
        let err = decode_bytes(b"RX\x00\x00").unwrap_err();
        match err {
            RRLogError::BadMagic { found } => assert_eq!(found, b"RX"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_version() {
        let err = decode_bytes(b"RR\x00\x01").unwrap_err();
        assert!(matches!(err, RRLogError::UnsupportedVersion { version: 1 }));
    }

    #[test]
    fn test_short_header_is_error() {
        assert!(decode_bytes(b"").unwrap_err().is_truncation());
        assert!(decode_bytes(b"RR\x00").unwrap_err().is_truncation());
    }

    #[test]
    fn test_entries_iterator() {
        let mut data = header();
        push_i32(&mut data, ENTRY_CHANNEL);
        push_str(&mut data, "t");
        push_i32(&mut data, PrimitiveType::Bool.tag());
        push_i32(&mut data, ENTRY_MESSAGE);
        push_i32(&mut data, 0);
        data.push(1);

        let mut reader = LogReader::new(&data[..]).unwrap();
        let entries: Vec<Entry> = reader.entries().collect::<Result<_>>().unwrap();
        assert_eq!(
            entries,
            [
                Entry::ChannelDeclared {
                    index: 0,
                    name: "t".to_string(),
                    replaced: false
                },
                Entry::Message { channel_index: 0 },
            ]
        );
        assert_eq!(reader.bytes_read(), data.len() as u64);
        assert_eq!(
            reader.log().channel("t").unwrap().messages,
            [DecodedValue::Bool(true)]
        );
    }

    #[test]
    fn test_unknown_entry_type_is_fatal() {
        let mut data = header();
        push_i32(&mut data, 2);

        let mut reader = LogReader::new(&data[..]).unwrap();
        let err = reader.next_entry().unwrap_err();
        assert!(matches!(
            err,
            RRLogError::UnknownEntryType {
                entry_type: 2,
                position: 4
            }
        ));
        assert!(reader.next_entry().unwrap().is_none());
        assert!(reader.log().is_empty());
    }

    #[test]
    fn test_strict_mid_entry_truncation() {
        let mut data = header();
        push_i32(&mut data, ENTRY_CHANNEL);
        push_i32(&mut data, 8);
        data.extend_from_slice(b"pos");

        let lenient = decode_bytes(&data).unwrap();
        assert!(lenient.is_empty());

        let err = ReaderBuilder::new()
            .truncation(TruncationPolicy::Strict)
            .from_reader(&data[..])
            .unwrap()
            .read_to_end()
            .unwrap_err();
        assert!(err.is_truncation());
    }

    #[test]
    fn test_negative_channel_index() {
        let mut data = header();
        push_i32(&mut data, ENTRY_CHANNEL);
        push_str(&mut data, "a");
        push_i32(&mut data, PrimitiveType::Int32.tag());
        push_i32(&mut data, ENTRY_MESSAGE);
        push_i32(&mut data, -1);
        push_i32(&mut data, 5);

        let err = decode_bytes(&data).unwrap_err();
        assert!(matches!(
            err,
            RRLogError::UnknownChannelIndex {
                index: -1,
                channel_count: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_schema_is_stored_per_channel() {
        let mut data = header();
        push_i32(&mut data, ENTRY_CHANNEL);
        push_str(&mut data, "n");
        push_i32(&mut data, PrimitiveType::Int64.tag());

        let log = decode_bytes(&data).unwrap();
        assert_eq!(
            log.channel("n").unwrap().schema,
            MessageSchema::Primitive(PrimitiveType::Int64)
        );
    }
}
