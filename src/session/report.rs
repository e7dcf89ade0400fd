//! Human-readable and JSON summaries of a session document.

use crate::session::persist::{SessionDocument, SessionInfo, Statistics};
use crate::session::stats::PerformanceSnapshot;
use serde::Serialize;
use std::fmt::{self, Write};

/// How many keys the "most used" section lists.
pub const TOP_KEYS: usize = 5;

const RULE: &str = "============================================================";

/// Renders the session analysis text.
///
/// Absent sections are skipped; a missing `statistics` block renders as
/// all-zero counts.
pub fn summarize(doc: &SessionDocument) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_summary(&mut out, doc);
    out
}

fn write_summary(out: &mut impl Write, doc: &SessionDocument) -> fmt::Result {
    let default_stats = Statistics::default();
    let stats = doc.statistics.as_ref().unwrap_or(&default_stats);
    let duration = match (&doc.statistics, &doc.session_info) {
        (Some(s), _) => s.session_duration,
        (None, Some(info)) => info.duration,
        (None, None) => 0.0,
    };

    writeln!(out, "{RULE}")?;
    writeln!(out, "SESSION ANALYSIS")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Duration: {duration:.1} seconds")?;
    writeln!(out, "Total Keypresses: {}", stats.total_keypresses)?;
    writeln!(out, "Total Mouse Clicks: {}", stats.total_mouse_clicks)?;
    writeln!(out, "Total Mouse Moves: {}", stats.total_mouse_moves)?;

    if let Some(perf) = &doc.performance {
        writeln!(out, "\nPERFORMANCE METRICS")?;
        writeln!(out, "   CPS (Clicks/sec): {:.2}", perf.clicks_per_second)?;
        writeln!(out, "   KPS (Keys/sec): {:.2}", perf.keys_per_second)?;
        writeln!(out, "   Avg Key Interval: {:.1}ms", perf.avg_key_interval_ms)?;
        writeln!(out, "   Buffered Events: {}", perf.total_events)?;
    }

    if !stats.key_frequencies.is_empty() {
        writeln!(out, "\nTOP {TOP_KEYS} MOST USED KEYS:")?;
        for (key, count) in stats.key_frequencies.top(TOP_KEYS) {
            writeln!(out, "   {key}: {count} times")?;
        }
    }

    if !stats.click_frequencies.is_empty() {
        writeln!(out, "\nMOUSE BUTTON USAGE:")?;
        for (button, count) in stats.click_frequencies.iter() {
            writeln!(out, "   {button}: {count} clicks")?;
        }
    }
    Ok(())
}

/// Writes the summary sections (everything but the event array) as JSON.
pub fn write_json(doc: &SessionDocument, mut writer: impl std::io::Write) -> serde_json::Result<()> {
    #[derive(Serialize)]
    struct Summary<'a> {
        session_info: Option<&'a SessionInfo>,
        statistics: Option<&'a Statistics>,
        performance: Option<&'a PerformanceSnapshot>,
    }

    let summary = Summary {
        session_info: doc.session_info.as_ref(),
        statistics: doc.statistics.as_ref(),
        performance: doc.performance.as_ref(),
    };
    serde_json::to_writer_pretty(&mut writer, &summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::frequency::FrequencyTable;

    #[test]
    fn empty_document_reports_zero_counts() {
        let text = summarize(&SessionDocument::default());
        assert!(text.contains("Duration: 0.0 seconds"));
        assert!(text.contains("Total Keypresses: 0"));
        assert!(text.contains("Total Mouse Clicks: 0"));
        assert!(text.contains("Total Mouse Moves: 0"));
        assert!(!text.contains("PERFORMANCE METRICS"));
        assert!(!text.contains("MOST USED KEYS"));
        assert!(!text.contains("MOUSE BUTTON USAGE"));
    }

    #[test]
    fn lists_at_most_five_keys_in_order() {
        let keys: FrequencyTable = [
            ("a", 3),
            ("b", 9),
            ("c", 1),
            ("d", 3),
            ("e", 5),
            ("f", 2),
            ("g", 1),
        ]
        .into_iter()
        .collect();
        let doc = SessionDocument {
            statistics: Some(Statistics {
                total_keypresses: 24,
                key_frequencies: keys,
                ..Statistics::default()
            }),
            ..SessionDocument::default()
        };
        let text = summarize(&doc);
        let listed: Vec<_> = text
            .lines()
            .filter(|l| l.ends_with(" times"))
            .map(str::trim)
            .collect();
        assert_eq!(
            listed,
            vec!["b: 9 times", "e: 5 times", "a: 3 times", "d: 3 times", "f: 2 times"]
        );
    }

    #[test]
    fn performance_section_when_present() {
        let doc = SessionDocument {
            performance: Some(PerformanceSnapshot {
                clicks_per_second: 1.5,
                keys_per_second: 4.25,
                avg_key_interval_ms: 180.04,
                total_events: 12,
                session_duration: 8.0,
            }),
            ..SessionDocument::default()
        };
        let text = summarize(&doc);
        assert!(text.contains("CPS (Clicks/sec): 1.50"));
        assert!(text.contains("KPS (Keys/sec): 4.25"));
        assert!(text.contains("Avg Key Interval: 180.0ms"));
    }

    #[test]
    fn duration_falls_back_to_session_info() {
        let doc = SessionDocument {
            session_info: Some(SessionInfo {
                duration: 42.5,
                ..SessionInfo::default()
            }),
            ..SessionDocument::default()
        };
        assert!(summarize(&doc).contains("Duration: 42.5 seconds"));
    }

    #[test]
    fn json_summary_omits_events() {
        let mut buf = Vec::new();
        write_json(&SessionDocument::default(), &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert!(value.get("events").is_none());
        assert!(value.get("statistics").is_some());
    }
}
