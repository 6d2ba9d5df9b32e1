// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Forward-only big-endian cursor over an RRLog byte stream.
//!
//! All multi-byte integers and floats in RRLog are big-endian. Strings are
//! length-prefixed with an `i32`. The cursor keeps a running count of bytes
//! consumed, used only to report positions in errors.

use std::io::{self, BufRead, Read};

use byteorder::{BigEndian, ReadBytesExt};
use tracing::warn;

use crate::core::{RRLogError, Result};

/// Cursor that reads RRLog primitives from a buffered byte source.
///
/// Every read either consumes exactly the bytes it asked for or fails. Running
/// out of input is reported as [`RRLogError::Truncated`] so the stream reader
/// can decide whether that is a clean end or a cut-off entry.
///
/// # Example
///
/// ```
/// use rrlog::encoding::RRCursor;
///
/// let data: [u8; 5] = [0x00, 0x00, 0x00, 0x2A, 0x01];
/// let mut cursor = RRCursor::new(&data[..]);
/// assert_eq!(cursor.read_i32("value").unwrap(), 42);
/// assert_eq!(cursor.read_u8("flag").unwrap(), 1);
/// assert_eq!(cursor.position(), 5);
/// assert!(cursor.is_at_end().unwrap());
/// ```
#[derive(Debug)]
pub struct RRCursor<R> {
    reader: R,
    position: u64,
}

impl<R: BufRead> RRCursor<R> {
    /// Create a cursor positioned at the start of `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            position: 0,
        }
    }

    /// Bytes consumed so far.
    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Check whether the source has no more bytes, without consuming any.
    pub fn is_at_end(&mut self) -> Result<bool> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.is_empty()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Read one raw byte.
    pub fn read_u8(&mut self, context: &str) -> Result<u8> {
        let value = self
            .reader
            .read_u8()
            .map_err(|e| read_error(e, context, self.position))?;
        self.position += 1;
        Ok(value)
    }

    /// Read a big-endian `i16`.
    pub fn read_i16(&mut self, context: &str) -> Result<i16> {
        let value = self
            .reader
            .read_i16::<BigEndian>()
            .map_err(|e| read_error(e, context, self.position))?;
        self.position += 2;
        Ok(value)
    }

    /// Read a big-endian `i32`.
    pub fn read_i32(&mut self, context: &str) -> Result<i32> {
        let value = self
            .reader
            .read_i32::<BigEndian>()
            .map_err(|e| read_error(e, context, self.position))?;
        self.position += 4;
        Ok(value)
    }

    /// Read a big-endian `i64`.
    pub fn read_i64(&mut self, context: &str) -> Result<i64> {
        let value = self
            .reader
            .read_i64::<BigEndian>()
            .map_err(|e| read_error(e, context, self.position))?;
        self.position += 8;
        Ok(value)
    }

    /// Read a big-endian IEEE-754 `f64`.
    pub fn read_f64(&mut self, context: &str) -> Result<f64> {
        let value = self
            .reader
            .read_f64::<BigEndian>()
            .map_err(|e| read_error(e, context, self.position))?;
        self.position += 8;
        Ok(value)
    }

    /// Read an `i32` length or count, rejecting negative values.
    pub fn read_len(&mut self, what: &'static str) -> Result<usize> {
        let position = self.position;
        let length = self.read_i32(what)?;
        usize::try_from(length).map_err(|_| RRLogError::InvalidLength {
            what,
            length,
            position,
        })
    }

    /// Read exactly `len` bytes.
    ///
    /// The buffer grows with the data actually read, so a corrupt length
    /// cannot force a huge up-front allocation.
    pub fn read_bytes(&mut self, len: usize, context: &str) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let read = (&mut self.reader)
            .take(len as u64)
            .read_to_end(&mut buf)
            .map_err(|e| read_error(e, context, self.position))?;
        if read < len {
            return Err(RRLogError::truncated(context, self.position + read as u64));
        }
        self.position += len as u64;
        Ok(buf)
    }

    /// Read a length-prefixed UTF-8 string.
    ///
    /// Invalid UTF-8 is replaced with U+FFFD rather than rejected.
    pub fn read_string(&mut self, context: &str) -> Result<String> {
        let len = self.read_len("string length")?;
        let start = self.position;
        let bytes = self.read_bytes(len, context)?;
        match String::from_utf8(bytes) {
            Ok(s) => Ok(s),
            Err(e) => {
                warn!(
                    context,
                    position = start,
                    "invalid UTF-8 in string, replacing invalid sequences"
                );
                Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
            }
        }
    }
}

/// Map an I/O failure at `position` to the crate error type.
fn read_error(err: io::Error, context: &str, position: u64) -> RRLogError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        RRLogError::truncated(context, position)
    } else {
        RRLogError::Io(err)
    }
}
