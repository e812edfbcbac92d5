use crate::gateway::{HttpStore, PrimaryStore};
use crate::storage::CsvFileStore;
use std::{env, net::SocketAddr, path::PathBuf};

pub const DEFAULT_PORT: u16 = 8000;

/// Process settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub fallback_path: PathBuf,
    pub remote_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            port,
            data_path: path_from_env("TRACKER_DATA_PATH", "data/progress.csv"),
            fallback_path: path_from_env("TRACKER_FALLBACK_PATH", "data/local_storage.json"),
            remote_url: env::var("TRACKER_REMOTE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    /// The tracker's own store: the remote server when one is configured,
    /// the local CSV file otherwise.
    pub fn primary_store(&self) -> PrimaryStore {
        match &self.remote_url {
            Some(url) => PrimaryStore::Http(HttpStore::new(url.clone())),
            None => PrimaryStore::File(CsvFileStore::new(&self.data_path)),
        }
    }
}

fn path_from_env(key: &str, default: &str) -> PathBuf {
    env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}
