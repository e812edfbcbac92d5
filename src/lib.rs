pub mod app;
pub mod codec;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod tracker;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use errors::{InputError, TrackerError};
pub use gateway::{Gateway, HttpStore, PrimaryStore, SaveOutcome};
pub use ledger::Ledger;
pub use state::AppState;
pub use stats::Challenge;
pub use storage::{CsvFileStore, JsonKvStore};
pub use tracker::Tracker;
