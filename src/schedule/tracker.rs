use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{CalendarDate, Schedule};

/// Date keys (`YYYY-MM-DD`) the user has marked as taken.
///
/// Keys are not validated against any schedule; callers decide whether stale
/// entries survive a regeneration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AcknowledgementSet {
    keys: BTreeSet<String>,
}

impl AcknowledgementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `key` and returns whether it is now marked.
    pub fn toggle(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        let marked = if self.keys.remove(&key) {
            false
        } else {
            self.keys.insert(key.clone());
            true
        };
        tracing::debug!(key = %key, marked, "toggled acknowledgement");
        marked
    }

    pub fn toggle_date(&mut self, date: &CalendarDate) -> bool {
        self.toggle(date.key())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn contains_date(&self, date: &CalendarDate) -> bool {
        self.keys.contains(&date.key())
    }

    pub fn keys(&self) -> &BTreeSet<String> {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Drops keys that no longer belong to `schedule`, returning how many were removed.
    pub fn retain_scheduled(&mut self, schedule: &Schedule) -> usize {
        let before = self.keys.len();
        self.keys.retain(|key| schedule.contains_key(key));
        before - self.keys.len()
    }
}
