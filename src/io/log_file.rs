// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decoded log model: channels and their messages.

use std::collections::HashMap;

use serde::Serialize;

use crate::core::DecodedValue;
use crate::schema::MessageSchema;

/// One named channel with its schema and every message decoded for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Channel {
    /// Channel name, unique within a log
    pub name: String,
    /// Schema shared by every message on the channel
    pub schema: MessageSchema,
    /// Messages in arrival order
    pub messages: Vec<DecodedValue>,
}

impl Channel {
    /// Create a channel with no messages.
    pub fn new(name: impl Into<String>, schema: MessageSchema) -> Self {
        Self {
            name: name.into(),
            schema,
            messages: Vec::new(),
        }
    }

    /// Number of messages decoded for this channel.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

/// A fully decoded RRLog stream.
///
/// Channels live in a single arena ordered by first declaration. The name
/// index points into that arena, so lookups by name and by declaration
/// position always agree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LogFile {
    channels: Vec<Channel>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl LogFile {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a channel and return its position.
    ///
    /// Re-declaring an existing name replaces that channel in place: the new
    /// schema takes the original slot and the message list starts empty.
    /// The returned flag is `true` when a channel was replaced.
    pub(crate) fn declare_channel(&mut self, name: String, schema: MessageSchema) -> (usize, bool) {
        if let Some(&slot) = self.index.get(&name) {
            self.channels[slot] = Channel::new(name, schema);
            return (slot, true);
        }

        let slot = self.channels.len();
        self.index.insert(name.clone(), slot);
        self.channels.push(Channel::new(name, schema));
        (slot, false)
    }

    /// Append a message to the channel at `slot`.
    pub(crate) fn push_message(&mut self, slot: usize, value: DecodedValue) {
        self.channels[slot].messages.push(value);
    }

    /// Channels in declaration order.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Iterate over channels in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Channel> {
        self.channels.iter()
    }

    /// Look up a channel by name.
    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.index.get(name).map(|&slot| &self.channels[slot])
    }

    /// Look up a channel by zero-based declaration position.
    pub fn channel_at(&self, index: usize) -> Option<&Channel> {
        self.channels.get(index)
    }

    /// Declaration position of a channel.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Channel names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(|c| c.name.as_str())
    }

    /// Number of channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether no channel was declared.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Total number of messages across all channels.
    pub fn message_count(&self) -> usize {
        self.channels.iter().map(Channel::message_count).sum()
    }

    /// Consume the log, returning channels in declaration order.
    pub fn into_channels(self) -> Vec<Channel> {
        self.channels
    }
}

impl<'a> IntoIterator for &'a LogFile {
    type Item = &'a Channel;
    type IntoIter = std::slice::Iter<'a, Channel>;

    fn into_iter(self) -> Self::IntoIter {
        self.channels.iter()
    }
}
