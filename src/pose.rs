// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Typed pose extraction from decoded messages.
//!
//! A pose channel carries struct messages with `x`, `y` and `heading` as
//! float64 and `timestamp` as int64. [`PoseWithTime`] pulls those fields out
//! by name and ignores any others.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::core::{DecodedValue, RRLogError, Result};
use crate::io::Channel;

/// A 2D pose stamped with the time it was logged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PoseWithTime {
    /// X position
    pub x: f64,
    /// Y position
    pub y: f64,
    /// Heading in radians
    pub heading: f64,
    /// Log timestamp
    pub timestamp: i64,
}

impl PoseWithTime {
    /// Extract a pose from a struct message.
    ///
    /// # Errors
    ///
    /// - [`RRLogError::FieldMissing`] if a pose field is absent
    /// - [`RRLogError::FieldType`] if the message is not a struct or a field
    ///   has the wrong type
    ///
    /// # Example
    ///
    /// ```
    /// use rrlog::core::{DecodedMessage, DecodedValue};
    /// use rrlog::PoseWithTime;
    ///
    /// let mut fields = DecodedMessage::new();
    /// fields.insert("x".into(), 1.0.into());
    /// fields.insert("y".into(), 2.0.into());
    /// fields.insert("heading".into(), 0.5.into());
    /// fields.insert("timestamp".into(), 42i64.into());
    ///
    /// let pose = PoseWithTime::from_message(&DecodedValue::Struct(fields)).unwrap();
    /// assert_eq!(pose.timestamp, 42);
    /// ```
    pub fn from_message(message: &DecodedValue) -> Result<Self> {
        if message.as_struct().is_none() {
            return Err(RRLogError::FieldType {
                field: "message".to_string(),
                expected: "struct",
                actual: message.type_name(),
            });
        }

        Ok(Self {
            x: float_field(message, "x")?,
            y: float_field(message, "y")?,
            heading: float_field(message, "heading")?,
            timestamp: timestamp_field(message, "timestamp")?,
        })
    }

    /// Extract every pose on a channel, sorted by timestamp.
    ///
    /// Poses with equal timestamps keep their arrival order.
    pub fn from_channel(channel: &Channel) -> Result<Vec<Self>> {
        let mut poses = channel
            .messages
            .iter()
            .map(Self::from_message)
            .collect::<Result<Vec<_>>>()?;
        poses.sort_by_key(|pose| pose.timestamp);
        Ok(poses)
    }

    /// Find the pose closest in time to `timestamp`.
    ///
    /// `poses` must be sorted by timestamp, as returned by
    /// [`from_channel`](Self::from_channel). When two poses are equally
    /// close the earlier one wins. Returns `None` only for an empty slice.
    ///
    /// # Example
    ///
    /// ```
    /// use rrlog::PoseWithTime;
    ///
    /// let at = |timestamp| PoseWithTime { x: 0.0, y: 0.0, heading: 0.0, timestamp };
    /// let poses = [at(100), at(200), at(300)];
    /// assert_eq!(PoseWithTime::nearest(&poses, 240).map(|p| p.timestamp), Some(200));
    /// assert_eq!(PoseWithTime::nearest(&poses, 999).map(|p| p.timestamp), Some(300));
    /// ```
    pub fn nearest(poses: &[PoseWithTime], timestamp: i64) -> Option<&PoseWithTime> {
        let after = poses.partition_point(|pose| pose.timestamp < timestamp);
        match (after.checked_sub(1).map(|i| &poses[i]), poses.get(after)) {
            (Some(before), Some(next)) => {
                if timestamp.abs_diff(before.timestamp) <= next.timestamp.abs_diff(timestamp) {
                    Some(before)
                } else {
                    Some(next)
                }
            }
            (before, next) => before.or(next),
        }
    }
}

fn field<'a>(message: &'a DecodedValue, name: &str) -> Result<&'a DecodedValue> {
    message.get(name).ok_or_else(|| RRLogError::field_missing(name))
}

fn float_field(message: &DecodedValue, name: &str) -> Result<f64> {
    let value = field(message, name)?;
    value.as_f64().ok_or_else(|| RRLogError::FieldType {
        field: name.to_string(),
        expected: "float64",
        actual: value.type_name(),
    })
}

// int32 timestamps are widened.
fn timestamp_field(message: &DecodedValue, name: &str) -> Result<i64> {
    let value = field(message, name)?;
    value.as_i64().ok_or_else(|| RRLogError::FieldType {
        field: name.to_string(),
        expected: "int64",
        actual: value.type_name(),
    })
}

impl PartialOrd for PoseWithTime {
    /// Orders by timestamp first, then by position and heading.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.timestamp.cmp(&other.timestamp) {
            Ordering::Equal => {}
            ord => return Some(ord),
        }
        match self.x.partial_cmp(&other.x)? {
            Ordering::Equal => {}
            ord => return Some(ord),
        }
        match self.y.partial_cmp(&other.y)? {
            Ordering::Equal => {}
            ord => return Some(ord),
        }
        self.heading.partial_cmp(&other.heading)
    }
}

impl fmt::Display for PoseWithTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={} x={:.3} y={:.3} heading={:.3}",
            self.timestamp, self.x, self.y, self.heading
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DecodedMessage;
    use crate::schema::{MessageSchema, PrimitiveType, StructSchema};

    fn pose_value(x: f64, timestamp: DecodedValue) -> DecodedValue {
        let mut fields = DecodedMessage::new();
        fields.insert("timestamp".into(), timestamp);
        fields.insert("x".into(), x.into());
        fields.insert("y".into(), (-x).into());
        fields.insert("heading".into(), 0.25.into());
        fields.insert("mode".into(), DecodedValue::Enum("IDLE".into()));
        DecodedValue::Struct(fields)
    }

    fn pose_schema() -> MessageSchema {
        StructSchema::new()
            .with_field("timestamp", PrimitiveType::Int64)
            .with_field("x", PrimitiveType::Float64)
            .with_field("y", PrimitiveType::Float64)
            .with_field("heading", PrimitiveType::Float64)
            .into()
    }

    #[test]
    fn test_from_message_ignores_extra_fields() {
        let pose = PoseWithTime::from_message(&pose_value(1.5, 100i64.into())).unwrap();
        assert_eq!(
            pose,
            PoseWithTime {
                x: 1.5,
                y: -1.5,
                heading: 0.25,
                timestamp: 100
            }
        );
    }

    #[test]
    fn test_int32_timestamp_is_widened() {
        let pose = PoseWithTime::from_message(&pose_value(0.0, 7i32.into())).unwrap();
        assert_eq!(pose.timestamp, 7);
    }

    #[test]
    fn test_missing_field() {
        let mut value = pose_value(0.0, 1i64.into());
        if let DecodedValue::Struct(fields) = &mut value {
            fields.shift_remove("heading");
        }
        let err = PoseWithTime::from_message(&value).unwrap_err();
        assert!(matches!(err, RRLogError::FieldMissing { field } if field == "heading"));
    }

    #[test]
    fn test_wrong_field_type() {
        let mut value = pose_value(0.0, 1i64.into());
        if let DecodedValue::Struct(fields) = &mut value {
            fields.insert("x".into(), 3i32.into());
        }
        let err = PoseWithTime::from_message(&value).unwrap_err();
        assert!(matches!(
            err,
            RRLogError::FieldType {
                expected: "float64",
                actual: "int32",
                ..
            }
        ));
    }

    #[test]
    fn test_non_struct_message() {
        let err = PoseWithTime::from_message(&DecodedValue::Bool(true)).unwrap_err();
        assert!(matches!(err, RRLogError::FieldType { actual: "bool", .. }));
    }

    #[test]
    fn test_from_channel_sorts_by_timestamp() {
        let mut channel = Channel::new("pose", pose_schema());
        channel.messages = vec![
            pose_value(3.0, 30i64.into()),
            pose_value(1.0, 10i64.into()),
            pose_value(2.0, 20i64.into()),
            pose_value(4.0, 10i64.into()),
        ];

        let poses = PoseWithTime::from_channel(&channel).unwrap();
        let order: Vec<(i64, f64)> = poses.iter().map(|p| (p.timestamp, p.x)).collect();
        assert_eq!(order, [(10, 1.0), (10, 4.0), (20, 2.0), (30, 3.0)]);
    }

    #[test]
    fn test_ordering_by_timestamp() {
        let early = PoseWithTime::from_message(&pose_value(9.0, 1i64.into())).unwrap();
        let late = PoseWithTime::from_message(&pose_value(0.0, 2i64.into())).unwrap();
        assert!(early < late);
        assert_eq!(early.partial_cmp(&early), Some(Ordering::Equal));
    }

    fn at(timestamp: i64) -> PoseWithTime {
        PoseWithTime {
            x: timestamp as f64,
            y: 0.0,
            heading: 0.0,
            timestamp,
        }
    }

    fn nearest_time(poses: &[PoseWithTime], timestamp: i64) -> Option<i64> {
        PoseWithTime::nearest(poses, timestamp).map(|p| p.timestamp)
    }

    #[test]
    fn test_nearest_empty() {
        assert!(PoseWithTime::nearest(&[], 10).is_none());
    }

    #[test]
    fn test_nearest_exact_hit() {
        let poses = [at(100), at(200), at(300)];
        assert_eq!(nearest_time(&poses, 200), Some(200));
        assert_eq!(nearest_time(&poses, 100), Some(100));
        assert_eq!(nearest_time(&poses, 300), Some(300));
    }

    #[test]
    fn test_nearest_between_poses() {
        let poses = [at(100), at(200), at(300)];
        assert_eq!(nearest_time(&poses, 140), Some(100));
        assert_eq!(nearest_time(&poses, 260), Some(300));
        // Equidistant picks the earlier pose.
        assert_eq!(nearest_time(&poses, 150), Some(100));
    }

    #[test]
    fn test_nearest_outside_range() {
        let poses = [at(100), at(200), at(300)];
        assert_eq!(nearest_time(&poses, -50), Some(100));
        assert_eq!(nearest_time(&poses, i64::MIN), Some(100));
        assert_eq!(nearest_time(&poses, 10_000), Some(300));
        assert_eq!(nearest_time(&poses, i64::MAX), Some(300));
        assert_eq!(nearest_time(&[at(7)], 0), Some(7));
    }

    #[test]
    fn test_nearest_matches_linear_scan() {
        let poses = [at(-40), at(-3), at(0), at(0), at(12), at(90)];
        for t in -60..110 {
            let expected = poses
                .iter()
                .min_by_key(|p| p.timestamp.abs_diff(t))
                .map(|p| p.timestamp);
            assert_eq!(nearest_time(&poses, t), expected, "t = {t}");
        }
    }
}
