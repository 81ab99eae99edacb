// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::HISTORY_SIZE_MAX;
use std::collections::VecDeque;

/// Previously submitted lines, most recent first.
///
/// History itself does not filter anything: [`History::unshift`] prepends whatever it is
/// given. Skipping blank lines and repeats of the most recent entry is the job of
/// [`crate::Readline`], which also owns the browsing [`History::cursor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    pub entries: VecDeque<String>,
    pub max_size: usize,
    /// How far back the user has browsed. [`None`] means not browsing.
    pub cursor: Option<usize>,
}

impl Default for History {
    fn default() -> Self { Self::new(HISTORY_SIZE_MAX) }
}

impl History {
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::default(),
            max_size: max_size.max(1),
            cursor: None,
        }
    }

    /// Add `line` to the front. The oldest entry is dropped once there are more than
    /// `max_size` entries.
    pub fn unshift(&mut self, line: impl Into<String>) {
        self.entries.push_front(line.into());

        if self.entries.len() > self.max_size {
            self.entries.pop_back();
        }

        // Keep the browsing cursor in range.
        if self.cursor.is_some_and(|it| it >= self.entries.len()) {
            self.cursor = None;
        }
    }

    /// Negative indices count from the end, so `-1` is the oldest entry. Returns
    /// [`None`] when the resolved index is out of range.
    #[must_use]
    pub fn get(&self, index: isize) -> Option<&str> {
        let resolved = if index < 0 {
            let len = isize::try_from(self.entries.len()).ok()?;
            index + len
        } else {
            index
        };
        let resolved = usize::try_from(resolved).ok()?;
        self.entries.get(resolved).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    #[must_use]
    pub fn is_browsing(&self) -> bool { self.cursor.is_some() }

    /// Snapshot of the entries, most recent first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> { self.entries.iter().cloned().collect() }
}
