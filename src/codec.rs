//! Text form of the progress log.
//!
//! ```csv
//! date,wordCount,notes
//! 2025-11-01,1500,""
//! 2025-11-03,1700,"good day, finally"
//! ```

use crate::models::Entry;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::warn;

pub const HEADER: &str = "date,wordCount,notes";

/// Serializes entries in the order given. Notes are always quoted, with
/// embedded quotes doubled; date and word count never are.
pub fn encode<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> String {
    let mut out = String::with_capacity(64);
    out.push_str(HEADER);
    out.push('\n');
    for entry in entries {
        out.push_str(&format!(
            "{},{},\"{}\"\n",
            entry.date.format("%Y-%m-%d"),
            entry.word_count,
            entry.notes.replace('"', "\"\"")
        ));
    }
    out
}

/// Best-effort parse. Never fails: records that lack a usable date or word
/// count are dropped and everything else is kept in file order.
pub fn decode(text: &str) -> Vec<Entry> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let body = match text.split_once('\n') {
        Some((first, rest)) if is_header(first) => rest,
        None if is_header(text) => return Vec::new(),
        _ => text,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(body.as_bytes());

    let mut entries = Vec::new();
    for record in reader.records() {
        match record {
            Ok(record) => {
                if let Some(entry) = entry_from_record(&record) {
                    entries.push(entry);
                }
            }
            Err(err) => warn!("skipping unreadable progress line: {err}"),
        }
    }
    entries
}

fn is_header(line: &str) -> bool {
    line.contains("date") || line.contains("wordCount")
}

fn entry_from_record(record: &StringRecord) -> Option<Entry> {
    let date = record.get(0).map(str::trim).unwrap_or_default();
    let word_count = record.get(1).map(str::trim).unwrap_or_default();
    if date.is_empty() || word_count.is_empty() {
        return None;
    }

    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let word_count = word_count.parse::<u64>().ok()?;
    let notes = record.get(2).unwrap_or_default();

    Some(Entry::new(date, word_count, notes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    #[test]
    fn encode_writes_header_and_quoted_notes() {
        let entries = vec![
            Entry::new(day(1), 1500, ""),
            Entry::new(day(3), 1700, "said \"hi\""),
        ];
        assert_eq!(
            encode(&entries),
            "date,wordCount,notes\n2025-11-01,1500,\"\"\n2025-11-03,1700,\"said \"\"hi\"\"\"\n"
        );
    }

    #[test]
    fn encode_empty_ledger_is_header_only() {
        assert_eq!(encode(&Vec::<Entry>::new()), "date,wordCount,notes\n");
    }

    #[test]
    fn decode_keeps_commas_inside_quotes() {
        let entries = decode("date,wordCount,notes\n2025-11-05,800,\"wrote, then edited\"\n");
        assert_eq!(entries, vec![Entry::new(day(5), 800, "wrote, then edited")]);
    }

    #[test]
    fn decode_blank_input_is_empty() {
        assert!(decode("").is_empty());
        assert!(decode("  \n\n ").is_empty());
        assert!(decode("date,wordCount,notes\n").is_empty());
    }

    #[test]
    fn decode_without_header_reads_first_line() {
        let entries = decode("2025-11-01,1500,\"first\"\n2025-11-02,200,\"\"");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], Entry::new(day(1), 1500, "first"));
    }

    #[test]
    fn decode_skips_malformed_lines() {
        let text = "date,wordCount,notes\n\
                    2025-11-01,1500,\"ok\"\n\
                    ,300,\"no date\"\n\
                    2025-11-02,,\"no count\"\n\
                    2025-11-03,lots,\"not a number\"\n\
                    \n\
                    2025-11-04,400\n";
        let entries = decode(text);
        assert_eq!(
            entries,
            vec![Entry::new(day(1), 1500, "ok"), Entry::new(day(4), 400, "")]
        );
    }

    #[test]
    fn decode_ignores_fields_past_notes() {
        let entries = decode("2025-11-01,1500,\"kept\",extra,\"more\"");
        assert_eq!(entries, vec![Entry::new(day(1), 1500, "kept")]);
    }

    #[test]
    fn decode_handles_crlf_files() {
        let entries = decode("date,wordCount,notes\r\n2025-11-01,1500,\"a\"\r\n2025-11-02,10,\"\"\r\n");
        assert_eq!(
            entries,
            vec![Entry::new(day(1), 1500, "a"), Entry::new(day(2), 10, "")]
        );
    }

    #[test]
    fn encoded_notes_survive_decoding() {
        let entries = vec![
            Entry::new(day(1), 1500, ""),
            Entry::new(day(2), 0, "commas, everywhere, here"),
            Entry::new(day(3), 42, "\"quoted\" and \"\"doubled\"\""),
            Entry::new(day(4), 7, "two\nlines"),
        ];
        assert_eq!(decode(&encode(&entries)), entries);
    }
}
