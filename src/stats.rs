use crate::models::{Entry, Statistics};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// The one writing challenge this tracker measures against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Challenge {
    pub target_words: u64,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Challenge {
    pub fn november_2025() -> Self {
        Self {
            target_words: 50_000,
            start: NaiveDate::from_ymd_opt(2025, 11, 1).expect("valid challenge start"),
            end: NaiveDate::from_ymd_opt(2025, 11, 30).expect("valid challenge end"),
        }
    }

    /// Inclusive length of the window in days.
    pub fn length_days(&self) -> u32 {
        u32::try_from((self.end - self.start).num_days() + 1).unwrap_or(0)
    }

    /// Whole days between `now` and midnight UTC on the start date, in
    /// either direction, rounded up and capped at the window length.
    pub fn days_elapsed_at(&self, now: DateTime<Utc>) -> u32 {
        let started = self.start.and_time(NaiveTime::MIN).and_utc();
        let millis = (now - started).num_milliseconds().unsigned_abs();
        let days = millis.div_ceil(MILLIS_PER_DAY);
        u32::try_from(days)
            .unwrap_or(u32::MAX)
            .min(self.length_days())
    }
}

impl Default for Challenge {
    fn default() -> Self {
        Self::november_2025()
    }
}

pub fn build_stats<'a>(challenge: &Challenge, entries: impl IntoIterator<Item = &'a Entry>) -> Statistics {
    build_stats_at(Utc::now(), challenge, entries)
}

pub fn build_stats_at<'a>(
    now: DateTime<Utc>,
    challenge: &Challenge,
    entries: impl IntoIterator<Item = &'a Entry>,
) -> Statistics {
    let total_words = entries
        .into_iter()
        .fold(0u64, |sum, entry| sum.saturating_add(entry.word_count));
    let words_remaining = challenge.target_words.saturating_sub(total_words);
    let days_elapsed = challenge.days_elapsed_at(now);

    let average_daily = if days_elapsed > 0 {
        (total_words as f64 / f64::from(days_elapsed)).round() as u64
    } else {
        0
    };

    let progress_percentage = if challenge.target_words == 0 {
        100.0
    } else {
        (total_words as f64 / challenge.target_words as f64 * 100.0).min(100.0)
    };

    Statistics {
        total_words,
        words_remaining,
        days_elapsed,
        average_daily,
        progress_percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    #[test]
    fn window_is_thirty_days() {
        assert_eq!(Challenge::default().length_days(), 30);
    }

    #[test]
    fn days_elapsed_rounds_partial_days_up() {
        let challenge = Challenge::default();
        assert_eq!(challenge.days_elapsed_at(at(2025, 11, 1, 0)), 0);
        assert_eq!(challenge.days_elapsed_at(at(2025, 11, 1, 1)), 1);
        assert_eq!(challenge.days_elapsed_at(at(2025, 11, 2, 0)), 1);
        assert_eq!(challenge.days_elapsed_at(at(2025, 11, 2, 12)), 2);
    }

    #[test]
    fn days_elapsed_is_clamped_to_window() {
        let challenge = Challenge::default();
        assert_eq!(challenge.days_elapsed_at(at(2025, 10, 25, 0)), 7);
        assert_eq!(challenge.days_elapsed_at(at(2025, 10, 20, 12)), 12);
        assert_eq!(challenge.days_elapsed_at(at(2025, 6, 1, 0)), 30);
        assert_eq!(challenge.days_elapsed_at(at(2026, 3, 1, 0)), 30);
    }

    #[test]
    fn average_before_start_uses_distance_to_start() {
        let entries = vec![Entry::new(day(1), 700, "early bird")];
        let stats = build_stats_at(at(2025, 10, 25, 0), &Challenge::default(), &entries);
        assert_eq!(stats.days_elapsed, 7);
        assert_eq!(stats.average_daily, 100);
    }

    #[test]
    fn empty_ledger_stats() {
        let stats = build_stats_at(at(2025, 11, 10, 12), &Challenge::default(), &Vec::<Entry>::new());
        assert_eq!(stats.total_words, 0);
        assert_eq!(stats.words_remaining, 50_000);
        assert_eq!(stats.average_daily, 0);
        assert_eq!(stats.progress_percentage, 0.0);
        assert_eq!(stats.days_elapsed, 10);
    }

    #[test]
    fn stats_sum_deltas_and_average_over_elapsed_days() {
        let entries = vec![
            Entry::new(day(1), 1500, ""),
            Entry::new(day(2), 1700, ""),
            Entry::new(day(3), 1801, ""),
        ];
        let stats = build_stats_at(at(2025, 11, 3, 6), &Challenge::default(), &entries);
        assert_eq!(stats.total_words, 5001);
        assert_eq!(stats.words_remaining, 44_999);
        assert_eq!(stats.days_elapsed, 3);
        assert_eq!(stats.average_daily, 1667);
        assert!((stats.progress_percentage - 10.002).abs() < 1e-9);
    }

    #[test]
    fn progress_caps_at_one_hundred() {
        let entries = vec![Entry::new(day(1), 60_000, "sprint")];
        let stats = build_stats_at(at(2025, 11, 30, 0), &Challenge::default(), &entries);
        assert_eq!(stats.words_remaining, 0);
        assert_eq!(stats.progress_percentage, 100.0);
        assert_eq!(stats.average_daily, 2069);
    }
}
