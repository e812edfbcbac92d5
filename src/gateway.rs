//! Loading and saving the serialized log.
//!
//! Saves go to the primary store first. If that fails, the entries are
//! written once to the fallback key-value store instead; nothing ever
//! reads that copy back on load.

use crate::errors::TrackerError;
use crate::models::Entry;
use crate::storage::{CsvFileStore, JsonKvStore};
use reqwest::{header, Client};
use std::future::Future;
use tracing::warn;

/// Key under which the fallback copy is stored.
pub const FALLBACK_KEY: &str = "nanoWrimoProgress";

pub trait RemoteStore: Send + Sync {
    fn load(&self) -> impl Future<Output = Result<String, TrackerError>> + Send;
    fn save(&self, csv: &str) -> impl Future<Output = Result<(), TrackerError>> + Send;
}

pub trait FallbackStore: Send + Sync {
    fn put(&self, key: &str, entries: &[Entry]) -> impl Future<Output = Result<(), TrackerError>> + Send;
}

/// Which tier ended up holding the data after a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Primary,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct Gateway<P, F> {
    primary: P,
    fallback: F,
}

impl<P: RemoteStore, F: FallbackStore> Gateway<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }

    pub async fn load(&self) -> Result<String, TrackerError> {
        self.primary.load().await
    }

    /// `csv` goes to the primary; `entries` is the structured copy for the
    /// fallback. Fails only when both tiers refuse the write.
    pub async fn save(&self, csv: &str, entries: &[Entry]) -> Result<SaveOutcome, TrackerError> {
        match self.primary.save(csv).await {
            Ok(()) => Ok(SaveOutcome::Primary),
            Err(err) => {
                warn!("error saving data, keeping a local copy instead: {err}");
                self.fallback.put(FALLBACK_KEY, entries).await?;
                Ok(SaveOutcome::Fallback)
            }
        }
    }
}

/// A store server reached over HTTP (`GET /api/load`, `POST /api/save`).
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }
}

impl RemoteStore for HttpStore {
    async fn load(&self) -> Result<String, TrackerError> {
        let response = self
            .client
            .get(format!("{}/api/load", self.base_url))
            .send()
            .await
            .map_err(TrackerError::unavailable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrackerError::Unavailable(format!("load returned {status}")));
        }

        response.text().await.map_err(TrackerError::unavailable)
    }

    async fn save(&self, csv: &str) -> Result<(), TrackerError> {
        let response = self
            .client
            .post(format!("{}/api/save", self.base_url))
            .header(header::CONTENT_TYPE, "text/plain")
            .body(csv.to_owned())
            .send()
            .await
            .map_err(TrackerError::unavailable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrackerError::Unavailable(format!("save returned {status}")));
        }
        Ok(())
    }
}

impl RemoteStore for CsvFileStore {
    async fn load(&self) -> Result<String, TrackerError> {
        self.read().await.map_err(TrackerError::unavailable)
    }

    async fn save(&self, csv: &str) -> Result<(), TrackerError> {
        self.write(csv).await.map_err(TrackerError::unavailable)
    }
}

impl FallbackStore for JsonKvStore {
    async fn put(&self, key: &str, entries: &[Entry]) -> Result<(), TrackerError> {
        self.put_entries(key, entries)
            .await
            .map_err(TrackerError::unavailable)
    }
}

/// Primary store picked at startup from configuration.
#[derive(Debug, Clone)]
pub enum PrimaryStore {
    File(CsvFileStore),
    Http(HttpStore),
}

impl RemoteStore for PrimaryStore {
    async fn load(&self) -> Result<String, TrackerError> {
        match self {
            Self::File(store) => store.load().await,
            Self::Http(store) => store.load().await,
        }
    }

    async fn save(&self, csv: &str) -> Result<(), TrackerError> {
        match self {
            Self::File(store) => store.save(csv).await,
            Self::Http(store) => store.save(csv).await,
        }
    }
}
