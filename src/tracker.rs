use crate::codec::{decode, encode};
use crate::errors::{InputError, TrackerError};
use crate::gateway::{FallbackStore, Gateway, RemoteStore, SaveOutcome};
use crate::ledger::Ledger;
use crate::models::{Entry, Preview, ProgressForm, ProgressResponse, Statistics};
use crate::stats::Challenge;
use chrono::{Local, NaiveDate};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Owns the ledger for the running process. Every mutation and the save
/// that follows it happen under one lock, so saves never race each other.
pub struct Tracker<P, F> {
    ledger: Mutex<Ledger>,
    gateway: Gateway<P, F>,
}

impl<P: RemoteStore, F: FallbackStore> Tracker<P, F> {
    /// Loads whatever the primary store holds. An unreachable store or an
    /// empty file both start an empty ledger.
    pub async fn start(challenge: Challenge, gateway: Gateway<P, F>) -> Self {
        let ledger = match gateway.load().await {
            Ok(text) => {
                let ledger = Ledger::from_entries(challenge, decode(&text));
                info!(entries = ledger.len(), "loaded progress data");
                ledger
            }
            Err(err) => {
                warn!("could not load existing data, starting fresh: {err}");
                Ledger::new(challenge)
            }
        };

        Self {
            ledger: Mutex::new(ledger),
            gateway,
        }
    }

    pub fn gateway(&self) -> &Gateway<P, F> {
        &self.gateway
    }

    /// Words the typed-in total would imply for `date`, without storing it.
    pub async fn preview(&self, date: &str, total_word_count: &str) -> Result<Preview, TrackerError> {
        let date = parse_date(date)?;
        let total = if total_word_count.trim().is_empty() {
            0
        } else {
            parse_total(total_word_count)?
        };

        let previous_total = self.ledger.lock().await.cumulative_before(date);
        let words_today = i64::try_from(total)
            .ok()
            .zip(i64::try_from(previous_total).ok())
            .and_then(|(total, previous)| total.checked_sub(previous))
            .ok_or_else(|| InputError::WordCount(total_word_count.trim().to_owned()))?;

        Ok(Preview {
            date,
            previous_total,
            words_today,
            below_previous: total < previous_total,
        })
    }

    pub async fn submit(&self, form: &ProgressForm) -> Result<Entry, TrackerError> {
        let date = parse_date(&form.date)?;
        let total = parse_total(&form.total_word_count)?;

        let mut ledger = self.ledger.lock().await;
        let entry = ledger.record_cumulative_entry(date, total, form.notes.trim())?;
        info!(date = %entry.date, words = entry.word_count, "recorded progress");

        self.persist(&ledger).await?;
        Ok(entry)
    }

    /// Removes the entry for `date`. Returns false when there was none, in
    /// which case nothing is saved.
    pub async fn delete(&self, date: &str) -> Result<bool, TrackerError> {
        let date = parse_date(date)?;

        let mut ledger = self.ledger.lock().await;
        if !ledger.delete(date) {
            return Ok(false);
        }
        info!(%date, "deleted progress entry");

        self.persist(&ledger).await?;
        Ok(true)
    }

    pub async fn statistics(&self) -> Statistics {
        self.ledger.lock().await.statistics()
    }

    pub async fn progress(&self) -> ProgressResponse {
        let ledger = self.ledger.lock().await;
        ProgressResponse {
            statistics: ledger.statistics(),
            entries: ledger.running_totals(),
        }
    }

    async fn persist(&self, ledger: &Ledger) -> Result<SaveOutcome, TrackerError> {
        let snapshot: Vec<Entry> = ledger.entries().cloned().collect();
        let csv = encode(&snapshot);

        match self.gateway.save(&csv, &snapshot).await {
            Ok(SaveOutcome::Primary) => {
                info!("progress data saved at {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
                Ok(SaveOutcome::Primary)
            }
            Ok(SaveOutcome::Fallback) => Ok(SaveOutcome::Fallback),
            Err(err) => {
                error!("progress data could not be saved anywhere: {err}");
                Err(err)
            }
        }
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, InputError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| InputError::Date(value.to_owned()))
}

pub fn parse_total(value: &str) -> Result<u64, InputError> {
    let value = value.trim();
    value
        .parse::<u64>()
        .map_err(|_| InputError::WordCount(value.to_owned()))
}
