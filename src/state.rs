use crate::gateway::PrimaryStore;
use crate::storage::{CsvFileStore, JsonKvStore};
use crate::tracker::Tracker;
use std::sync::Arc;

pub type AppTracker = Tracker<PrimaryStore, JsonKvStore>;

#[derive(Clone)]
pub struct AppState {
    /// File served to remote trackers through `/api/load` and `/api/save`.
    pub store: CsvFileStore,
    pub tracker: Arc<AppTracker>,
}

impl AppState {
    pub fn new(store: CsvFileStore, tracker: AppTracker) -> Self {
        Self {
            store,
            tracker: Arc::new(tracker),
        }
    }
}
