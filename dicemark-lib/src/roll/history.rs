use crate::roll;
use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 50;

/// Bounded log of the latest roll results, newest first.
///
/// Recording past capacity silently evicts the oldest entry. The log never
/// locks: callers sharing one across threads serialize access themselves.
#[derive(Debug, Clone)]
pub struct History {
    capacity: usize,
    entries: VecDeque<roll::Result>,
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A zero capacity history records nothing
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::new(),
        }
    }

    pub fn record(&mut self, result: roll::Result) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(result);
    }

    /// Results newest first
    pub fn list(&self) -> impl Iterator<Item = &roll::Result> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&roll::Result> {
        self.entries.front()
    }

    pub fn get(&self, index: usize) -> Option<&roll::Result> {
        self.entries.get(index)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
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

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
