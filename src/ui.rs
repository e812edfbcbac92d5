use crate::models::{BannerQuery, EntryRow, ProgressResponse};
use chrono::NaiveDate;

pub fn render_index(today: &str, progress: &ProgressResponse, banner: &BannerQuery) -> String {
    let stats = &progress.statistics;
    INDEX_HTML
        .replace("{{BANNER}}", &render_banner(banner))
        .replace("{{TOTAL}}", &format_thousands(stats.total_words))
        .replace("{{REMAINING}}", &format_thousands(stats.words_remaining))
        .replace("{{DAYS}}", &stats.days_elapsed.to_string())
        .replace("{{AVERAGE}}", &format_thousands(stats.average_daily))
        .replace("{{PERCENT}}", &format!("{:.4}", stats.progress_percentage))
        .replace("{{PERCENT_TEXT}}", &format!("{:.1}", stats.progress_percentage))
        .replace("{{DATE}}", today)
        .replace("{{ROWS}}", &render_rows(&progress.entries))
}

fn render_banner(banner: &BannerQuery) -> String {
    if let Some(code) = banner.error.as_deref() {
        let message = match code {
            "below_previous" => "Error: Total word count cannot be less than previous total.",
            "invalid_date" => "Error: Please pick a valid date.",
            "invalid_total" => "Error: Total word count must be a whole number.",
            "unavailable" => "Error adding progress: the store could not be reached.",
            _ => "Something went wrong.",
        };
        return format!(r#"<div class="error-message">{message}</div>"#);
    }

    match banner.notice.as_deref() {
        Some("added") => r#"<div class="success-message">Progress added successfully!</div>"#.to_string(),
        Some("deleted") => r#"<div class="success-message">Entry deleted successfully!</div>"#.to_string(),
        _ => String::new(),
    }
}

fn render_rows(rows: &[EntryRow]) -> String {
    if rows.is_empty() {
        return r#"<tr><td colspan="5" class="empty">No progress entries yet. Add your first entry above!</td></tr>"#
            .to_string();
    }

    rows.iter()
        .map(|row| {
            let date = row.entry.date;
            format!(
                r#"<tr>
          <td>{label}</td>
          <td>{words}</td>
          <td>{running}</td>
          <td>{notes}</td>
          <td>
            <form method="post" action="/progress/delete" onsubmit="return confirm('Are you sure you want to delete this entry?');">
              <input type="hidden" name="date" value="{date}" />
              <button class="delete-btn" type="submit">Delete</button>
            </form>
          </td>
        </tr>"#,
                label = format_day(date),
                words = format_thousands(row.entry.word_count),
                running = format_thousands(row.running_total),
                notes = escape_html(&row.entry.notes),
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

/// `Sat, Nov 1, 2025`
pub fn format_day(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Word Count Tracker</title>
  <style>
    :root {
      --bg: #f4f1ea;
      --ink: #2b2a28;
      --accent: #558b2f;
      --warn: #bf360c;
      --card: #ffffff;
      --muted: #6c757d;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: Georgia, "Times New Roman", serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(920px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .card {
      background: var(--card);
      border-radius: 12px;
      padding: 18px;
      box-shadow: 0 6px 18px rgba(0, 0, 0, 0.08);
    }

    .card .value {
      font-size: 1.8rem;
      font-weight: 600;
    }

    .card .label {
      color: var(--muted);
      font-size: 0.9rem;
    }

    .progress-bar {
      height: 22px;
      background: #e0ddd5;
      border-radius: 11px;
      overflow: hidden;
    }

    .progress-fill {
      height: 100%;
      background: var(--accent);
    }

    form.entry {
      display: grid;
      gap: 10px;
    }

    #wordsToday {
      min-height: 1.2em;
      font-size: 0.95rem;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th, td {
      padding: 8px 10px;
      border-bottom: 1px solid #e0ddd5;
      text-align: left;
    }

    td.empty {
      text-align: center;
      color: var(--muted);
    }

    .success-message, .error-message {
      padding: 12px 16px;
      border-radius: 8px;
    }

    .success-message {
      background: #dcedc8;
      color: #33691e;
    }

    .error-message {
      background: #ffccbc;
      color: var(--warn);
    }

    .delete-btn {
      background: none;
      border: 1px solid var(--warn);
      color: var(--warn);
      border-radius: 6px;
      cursor: pointer;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Word Count Tracker</h1>
      <p>50,000 words in 30 days.</p>
    </header>

    <section class="stats">
      <div class="card"><div class="value" id="totalWords">{{TOTAL}}</div><div class="label">Total words</div></div>
      <div class="card"><div class="value" id="wordsRemaining">{{REMAINING}}</div><div class="label">Words remaining</div></div>
      <div class="card"><div class="value" id="daysElapsed">{{DAYS}}</div><div class="label">Days elapsed</div></div>
      <div class="card"><div class="value" id="averageDaily">{{AVERAGE}}</div><div class="label">Daily average</div></div>
    </section>

    <section>
      <div class="progress-bar"><div class="progress-fill" style="width: {{PERCENT}}%"></div></div>
      <p id="progressText">{{PERCENT_TEXT}}% Complete</p>
    </section>

    <section class="card">
      {{BANNER}}
      <form class="entry" id="progressForm" method="post" action="/progress">
        <label>Date <input type="date" id="date" name="date" value="{{DATE}}" required /></label>
        <label>Total word count <input type="number" id="totalWordCount" name="totalWordCount" min="0" required /></label>
        <div id="wordsToday"></div>
        <label>Notes <input type="text" id="notes" name="notes" /></label>
        <button type="submit">Add progress</button>
      </form>
    </section>

    <section class="card">
      <table>
        <thead>
          <tr><th>Date</th><th>Words that day</th><th>Running total</th><th>Notes</th><th></th></tr>
        </thead>
        <tbody id="progressTableBody">
        {{ROWS}}
        </tbody>
      </table>
    </section>
  </main>

  <script>
    const dateInput = document.getElementById('date');
    const totalInput = document.getElementById('totalWordCount');
    const wordsToday = document.getElementById('wordsToday');

    async function updateWordsToday() {
      const total = parseInt(totalInput.value, 10) || 0;
      if (!dateInput.value || total <= 0) {
        wordsToday.textContent = '';
        return;
      }

      const params = new URLSearchParams({ date: dateInput.value, totalWordCount: String(total) });
      const res = await fetch(`/api/preview?${params}`);
      if (!res.ok) {
        wordsToday.textContent = '';
        return;
      }

      const preview = await res.json();
      if (preview.belowPrevious) {
        wordsToday.textContent = `Warning: This is less than your previous total (${preview.previousTotal.toLocaleString()})`;
        wordsToday.style.color = '#bf360c';
      } else {
        wordsToday.textContent = `Words written today: ${preview.wordsToday.toLocaleString()}`;
        wordsToday.style.color = '#558b2f';
      }
    }

    totalInput.addEventListener('input', updateWordsToday);
    dateInput.addEventListener('change', updateWordsToday);
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entry, Statistics};

    fn progress(entries: Vec<EntryRow>, total: u64) -> ProgressResponse {
        ProgressResponse {
            statistics: Statistics {
                total_words: total,
                words_remaining: 50_000 - total,
                days_elapsed: 3,
                average_daily: total / 3,
                progress_percentage: total as f64 / 500.0,
            },
            entries,
        }
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(50_000), "50,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn day_labels_are_human_readable() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
        assert_eq!(format_day(date), "Sat, Nov 1, 2025");
    }

    #[test]
    fn empty_ledger_shows_placeholder_row() {
        let html = render_index("2025-11-02", &progress(vec![], 0), &BannerQuery::default());
        assert!(html.contains("No progress entries yet"));
        assert!(html.contains(r#"value="2025-11-02""#));
        assert!(html.contains("0.0% Complete"));
    }

    #[test]
    fn rows_show_running_totals_and_escaped_notes() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
        let rows = vec![EntryRow {
            entry: Entry::new(date, 1700, "<b>good</b> day"),
            running_total: 3200,
        }];
        let html = render_index("2025-11-03", &progress(rows, 3200), &BannerQuery::default());
        assert!(html.contains("Mon, Nov 3, 2025"));
        assert!(html.contains("<td>1,700</td>"));
        assert!(html.contains("<td>3,200</td>"));
        assert!(html.contains("&lt;b&gt;good&lt;/b&gt; day"));
        assert!(html.contains("6.4% Complete"));
    }

    #[test]
    fn banners_follow_query() {
        let rejected = BannerQuery {
            notice: None,
            error: Some("below_previous".into()),
        };
        let html = render_index("2025-11-03", &progress(vec![], 0), &rejected);
        assert!(html.contains("cannot be less than previous total"));

        let added = BannerQuery {
            notice: Some("added".into()),
            error: None,
        };
        let html = render_index("2025-11-03", &progress(vec![], 0), &added);
        assert!(html.contains("Progress added successfully!"));
    }
}
