// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Builder pattern for creating configured log readers.
//!
//! The `ReaderBuilder` provides a fluent API for choosing how a reader
//! treats input that ends in the middle of an entry.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::core::Result;

use super::LogReader;

/// How end of input in the middle of an entry is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TruncationPolicy {
    /// Treat it like a clean end of log and drop the partial entry.
    #[default]
    Lenient,
    /// Fail with [`RRLogError::Truncated`](crate::RRLogError::Truncated).
    Strict,
}

impl TruncationPolicy {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TruncationPolicy::Lenient => "lenient",
            TruncationPolicy::Strict => "strict",
        }
    }
}

impl fmt::Display for TruncationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a `TruncationPolicy` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsePolicyError {
    _private: (),
}

impl fmt::Display for ParsePolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid truncation policy, expected 'lenient' or 'strict'")
    }
}

impl std::error::Error for ParsePolicyError {}

impl FromStr for TruncationPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(TruncationPolicy::Lenient),
            "strict" => Ok(TruncationPolicy::Strict),
            _ => Err(ParsePolicyError { _private: () }),
        }
    }
}

/// Configuration for creating a reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Handling of input that ends mid-entry
    pub truncation: TruncationPolicy,
}

impl ReaderConfig {
    /// Configuration that fails on mid-entry end of input.
    pub fn strict() -> Self {
        Self {
            truncation: TruncationPolicy::Strict,
        }
    }
}

/// Builder for creating configured log readers.
///
/// # Example
///
/// ```rust,no_run
/// use rrlog::io::{ReaderBuilder, TruncationPolicy};
///
/// let log = ReaderBuilder::new()
///     .truncation(TruncationPolicy::Strict)
///     .open("run.log")?
///     .read_to_end()?;
/// println!("{} channels", log.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReaderBuilder {
    config: ReaderConfig,
}

impl ReaderBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the truncation policy.
    pub fn truncation(mut self, policy: TruncationPolicy) -> Self {
        self.config.truncation = policy;
        self
    }

    /// Shorthand for choosing between strict and lenient truncation handling.
    pub fn strict(self, strict: bool) -> Self {
        self.truncation(if strict {
            TruncationPolicy::Strict
        } else {
            TruncationPolicy::Lenient
        })
    }

    /// The configuration built so far.
    pub fn config(&self) -> ReaderConfig {
        self.config
    }

    /// Build a reader over any buffered byte source, validating the header.
    pub fn from_reader<R: BufRead>(self, reader: R) -> Result<LogReader<R>> {
        LogReader::with_config(reader, self.config)
    }

    /// Open a file and build a reader over it, validating the header.
    pub fn open<P: AsRef<Path>>(self, path: P) -> Result<LogReader<BufReader<File>>> {
        let file = File::open(path.as_ref())?;
        self.from_reader(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_str() {
        assert_eq!("strict".parse::<TruncationPolicy>(), Ok(TruncationPolicy::Strict));
        assert_eq!(
            "LENIENT".parse::<TruncationPolicy>(),
            Ok(TruncationPolicy::Lenient)
        );
        assert!("loose".parse::<TruncationPolicy>().is_err());
    }

    #[test]
    fn test_policy_display_round_trip() {
        for policy in [TruncationPolicy::Lenient, TruncationPolicy::Strict] {
            assert_eq!(policy.to_string().parse::<TruncationPolicy>(), Ok(policy));
        }
    }

    #[test]
    fn test_builder_defaults_to_lenient() {
        assert_eq!(
            ReaderBuilder::new().config().truncation,
            TruncationPolicy::Lenient
        );
        assert_eq!(
            ReaderBuilder::new().strict(true).config(),
            ReaderConfig::strict()
        );
    }

    #[test]
    fn test_open_missing_file() {
        let err = ReaderBuilder::new()
            .open("/nonexistent/dir/run.log")
            .unwrap_err();
        assert!(matches!(err, crate::RRLogError::Io(_)));
    }
}
