/// In-memory journal days keyed by calendar date.
use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

/// Content of a single journal day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Day {
    pub text: String,
    pub tags: BTreeSet<String>,
}

impl Day {
    /// A day with neither text nor tags.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.tags.is_empty()
    }
}

/// All journal days touched in this session.
///
/// Days that become empty are dropped, so `dates()` only lists days with
/// content.
#[derive(Debug, Clone, Default)]
pub struct DayBook {
    days: BTreeMap<NaiveDate, Day>,
}

impl DayBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the day for `date`, if it has content.
    pub fn day(&self, date: NaiveDate) -> Option<&Day> {
        self.days.get(&date)
    }

    /// Returns the text of `date` (empty for untouched days).
    pub fn text(&self, date: NaiveDate) -> &str {
        self.days.get(&date).map_or("", |d| d.text.as_str())
    }

    /// Replaces the text of `date`.
    pub fn set_text(&mut self, date: NaiveDate, text: impl Into<String>) {
        self.days.entry(date).or_default().text = text.into();
        self.prune(date);
    }

    /// Returns the tags of `date`, sorted.
    pub fn tags(&self, date: NaiveDate) -> Vec<String> {
        self.days
            .get(&date)
            .map(|d| d.tags.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether `date` carries `tag`.
    pub fn has_tag(&self, date: NaiveDate, tag: &str) -> bool {
        self.days.get(&date).is_some_and(|d| d.tags.contains(tag))
    }

    /// Adds `tag` to `date`. Returns false if it was already present.
    pub fn add_tag(&mut self, date: NaiveDate, tag: &str) -> bool {
        self.days.entry(date).or_default().tags.insert(tag.to_string())
    }

    /// Removes `tag` from `date`. Returns false if it was not present.
    pub fn remove_tag(&mut self, date: NaiveDate, tag: &str) -> bool {
        let removed = self
            .days
            .get_mut(&date)
            .is_some_and(|d| d.tags.remove(tag));
        self.prune(date);
        removed
    }

    /// Dates that have text or tags, in calendar order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    fn prune(&mut self, date: NaiveDate) {
        if self.days.get(&date).is_some_and(Day::is_empty) {
            self.days.remove(&date);
        }
    }
}
