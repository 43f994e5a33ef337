//! Bounded log of the command lines entered in a session.

use std::collections::VecDeque;

/// Number of lines kept when no capacity is configured.
pub const DEFAULT_HISTORY_SIZE: usize = 100;

/// Fixed-capacity, oldest-first record of raw command lines.
///
/// Once the buffer is full, recording a new line evicts the oldest one, so
/// position 1 in [`HistoryBuffer::list`] is always the oldest line still kept.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<String>,
    capacity: usize,
}

impl HistoryBuffer {
    /// Create an empty buffer holding at most `capacity` lines.
    ///
    /// A zero capacity is bumped to one; [`crate::ShellConfig::validate`]
    /// rejects it before a session is ever built.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Copy `line` into the buffer, evicting the oldest entry when full.
    ///
    /// A single trailing line terminator is not stored.
    pub fn record(&mut self, line: &str) {
        let line = line.strip_suffix('\n').unwrap_or(line);
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line.to_owned());
    }

    /// Entries in insertion order with 1-based display indices.
    pub fn list(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, line)| (i + 1, line.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}
