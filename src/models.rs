use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of the log. `word_count` is the words written on `date`, not the
/// cumulative total the writer typed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub date: NaiveDate,
    pub word_count: u64,
    #[serde(default)]
    pub notes: String,
}

impl Entry {
    pub fn new(date: NaiveDate, word_count: u64, notes: impl Into<String>) -> Self {
        Self {
            date,
            word_count,
            notes: notes.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_words: u64,
    pub words_remaining: u64,
    pub days_elapsed: u32,
    pub average_daily: u64,
    pub progress_percentage: f64,
}

/// Raw form values as typed by the writer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressForm {
    pub date: String,
    pub total_word_count: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub date: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewQuery {
    pub date: String,
    #[serde(default)]
    pub total_word_count: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    pub date: NaiveDate,
    pub previous_total: u64,
    pub words_today: i64,
    pub below_previous: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRow {
    #[serde(flatten)]
    pub entry: Entry,
    pub running_total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub statistics: Statistics,
    pub entries: Vec<EntryRow>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub removed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct BannerQuery {
    pub notice: Option<String>,
    pub error: Option<String>,
}
