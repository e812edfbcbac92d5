use crate::models::Entry;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tokio::fs;
use tracing::error;

/// The progress log as a CSV file on local disk.
#[derive(Debug, Clone)]
pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the whole file. A file that does not exist yet reads as empty.
    pub async fn read(&self) -> Result<String, std::io::Error> {
        match fs::read_to_string(&self.path).await {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(err) => Err(err),
        }
    }

    pub async fn write(&self, csv: &str) -> Result<(), std::io::Error> {
        fs::write(&self.path, csv).await
    }
}

/// A small key-value file holding JSON values, the tracker's last-resort
/// copy of its entries when the primary store rejects a save.
#[derive(Debug, Clone)]
pub struct JsonKvStore {
    path: PathBuf,
}

impl JsonKvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn put_entries(&self, key: &str, entries: &[Entry]) -> Result<(), std::io::Error> {
        let value = serde_json::to_value(entries).map_err(std::io::Error::other)?;
        let mut map = self.read_map().await?;
        map.insert(key.to_owned(), value);
        let payload = serde_json::to_vec_pretty(&map).map_err(std::io::Error::other)?;
        fs::write(&self.path, payload).await
    }

    pub async fn get_entries(&self, key: &str) -> Result<Option<Vec<Entry>>, std::io::Error> {
        let mut map = self.read_map().await?;
        match map.remove(key) {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(std::io::Error::other),
            None => Ok(None),
        }
    }

    async fn read_map(&self) -> Result<Map<String, Value>, std::io::Error> {
        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(map) => Ok(map),
                Err(err) => {
                    error!("failed to parse fallback store, starting over: {err}");
                    Ok(Map::new())
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(err) => Err(err),
        }
    }
}
