use crate::errors::InputError;
use crate::models::{Entry, EntryRow, Statistics};
use crate::stats::{build_stats, build_stats_at, Challenge};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;

/// Per-day entries of one challenge, keyed and ordered by date.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    challenge: Challenge,
    days: BTreeMap<NaiveDate, Entry>,
}

impl Ledger {
    pub fn new(challenge: Challenge) -> Self {
        Self {
            challenge,
            days: BTreeMap::new(),
        }
    }

    /// Builds a ledger from decoded entries. Later entries for a date
    /// replace earlier ones.
    pub fn from_entries(challenge: Challenge, entries: impl IntoIterator<Item = Entry>) -> Self {
        let days = entries
            .into_iter()
            .map(|entry| (entry.date, entry))
            .collect();
        Self { challenge, days }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Entry> {
        self.days.get(&date)
    }

    /// Entries in ascending date order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.days.values()
    }

    /// Words written on all days strictly before `date`.
    pub fn cumulative_before(&self, date: NaiveDate) -> u64 {
        self.days
            .range(..date)
            .fold(0u64, |sum, (_, entry)| sum.saturating_add(entry.word_count))
    }

    /// Stores the words written on `date` given the cumulative total reached
    /// that day. Any existing entry for the date is replaced; it does not
    /// count towards the baseline.
    pub fn record_cumulative_entry(
        &mut self,
        date: NaiveDate,
        cumulative_total: u64,
        notes: impl Into<String>,
    ) -> Result<Entry, InputError> {
        let previous = self.cumulative_before(date);
        let Some(delta) = cumulative_total.checked_sub(previous) else {
            return Err(InputError::BelowPrevious {
                total: cumulative_total,
                previous,
            });
        };

        let entry = Entry::new(date, delta, notes);
        self.days.insert(date, entry.clone());
        Ok(entry)
    }

    pub fn delete(&mut self, date: NaiveDate) -> bool {
        self.days.remove(&date).is_some()
    }

    pub fn statistics(&self) -> Statistics {
        build_stats(&self.challenge, self.entries())
    }

    pub fn statistics_at(&self, now: DateTime<Utc>) -> Statistics {
        build_stats_at(now, &self.challenge, self.entries())
    }

    /// Each entry paired with the cumulative total through that entry.
    pub fn running_totals(&self) -> Vec<EntryRow> {
        let mut running_total = 0u64;
        self.entries()
            .map(|entry| {
                running_total = running_total.saturating_add(entry.word_count);
                EntryRow {
                    entry: entry.clone(),
                    running_total,
                }
            })
            .collect()
    }
}
