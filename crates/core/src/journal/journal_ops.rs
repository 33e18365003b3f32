//! Copy-on-write operations over the journal collection.

use std::cmp::Ordering;

use super::journal_model::{EmotionPoint, JournalEntry, TrendEntry};
use crate::errors::{Error, Result};

/// Appends a new entry. The id must not already exist.
pub fn append_entry(entries: &[JournalEntry], entry: JournalEntry) -> Result<Vec<JournalEntry>> {
    if entries.iter().any(|e| e.id == entry.id) {
        return Err(Error::ConstraintViolation(format!(
            "Journal entry {} already exists",
            entry.id
        )));
    }
    let mut next = entries.to_vec();
    next.push(entry);
    Ok(next)
}

/// Replaces the entry with the same id, keeping its position.
pub fn replace_entry_by_id(
    entries: &[JournalEntry],
    entry: JournalEntry,
) -> Result<Vec<JournalEntry>> {
    let index = entries
        .iter()
        .position(|e| e.id == entry.id)
        .ok_or_else(|| Error::NotFound(format!("Journal entry {}", entry.id)))?;
    let mut next = entries.to_vec();
    next[index] = entry;
    Ok(next)
}

pub fn find_entry<'a>(entries: &'a [JournalEntry], id: &str) -> Option<&'a JournalEntry> {
    entries.iter().find(|e| e.id == id)
}

/// Entries for display: newest timestamp first.
///
/// Entries whose date cannot be parsed go last, in insertion order.
pub fn entries_newest_first(entries: &[JournalEntry]) -> Vec<&JournalEntry> {
    let mut sorted: Vec<&JournalEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| match (a.timestamp(), b.timestamp()) {
        (Some(ta), Some(tb)) => tb.cmp(&ta),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
}

/// The last `limit` analyzed entries, in insertion order.
pub fn emotion_series(entries: &[JournalEntry], limit: usize) -> Vec<EmotionPoint> {
    let analyzed: Vec<EmotionPoint> = entries
        .iter()
        .filter_map(|e| {
            e.analysis.as_ref().map(|a| EmotionPoint {
                date: e.date.clone(),
                emotions: a.emotions,
            })
        })
        .collect();
    let skip = analyzed.len().saturating_sub(limit);
    analyzed.into_iter().skip(skip).collect()
}

/// The last `limit` entries reduced to date, content and themes.
pub fn recent_entries_for_trends(entries: &[JournalEntry], limit: usize) -> Vec<TrendEntry> {
    let skip = entries.len().saturating_sub(limit);
    entries
        .iter()
        .skip(skip)
        .map(|e| TrendEntry {
            date: e.date.clone(),
            content: e.content.clone(),
            themes: e
                .analysis
                .as_ref()
                .map(|a| a.themes.clone())
                .unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::{EmotionScores, EntryAnalysis};

    fn entry(id: &str, date: &str) -> JournalEntry {
        JournalEntry {
            id: id.to_string(),
            date: date.to_string(),
            content: format!("entry {}", id),
            analysis: None,
            ai_comment: None,
        }
    }

    #[test]
    fn test_append_adds_at_end() {
        let entries = vec![entry("a", "2024-06-01T10:00:00.000Z")];
        let next = append_entry(&entries, entry("b", "2024-06-02T10:00:00.000Z")).unwrap();
        assert_eq!(next.len(), 2);
        assert_eq!(next[1].id, "b");
    }

    #[test]
    fn test_append_rejects_duplicate_id() {
        let entries = vec![entry("a", "2024-06-01T10:00:00.000Z")];
        let result = append_entry(&entries, entry("a", "2024-06-05T10:00:00.000Z"));
        assert!(matches!(result, Err(Error::ConstraintViolation(_))));
    }

    #[test]
    fn test_replace_keeps_position_and_length() {
        let entries = vec![
            entry("a", "2024-06-01T10:00:00.000Z"),
            entry("b", "2024-06-02T10:00:00.000Z"),
            entry("c", "2024-06-03T10:00:00.000Z"),
        ];
        let mut edited = entries[1].clone();
        edited.content = "rewritten".to_string();

        let next = replace_entry_by_id(&entries, edited).unwrap();
        assert_eq!(next.len(), 3);
        assert_eq!(next[1].id, "b");
        assert_eq!(next[1].content, "rewritten");
    }

    #[test]
    fn test_replace_unknown_id_fails() {
        let result = replace_entry_by_id(&[], entry("x", ""));
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_newest_first_by_timestamp() {
        let entries = vec![
            entry("old", "2024-01-01T00:00:00.000Z"),
            entry("bad", "not a date"),
            entry("new", "2024-06-01T00:00:00+09:00"),
            entry("mid", "2024-03-01T00:00:00.000Z"),
        ];
        let ids: Vec<&str> = entries_newest_first(&entries)
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["new", "mid", "old", "bad"]);
    }

    #[test]
    fn test_emotion_series_keeps_last_analyzed() {
        let mut entries = Vec::new();
        for i in 0..20 {
            let mut e = entry(&i.to_string(), "2024-06-01T00:00:00.000Z");
            if i % 2 == 0 {
                e.analysis = Some(EntryAnalysis {
                    emotions: EmotionScores {
                        joy: i as f64 / 20.0,
                        ..Default::default()
                    },
                    ..Default::default()
                });
            }
            entries.push(e);
        }
        let series = emotion_series(&entries, 3);
        assert_eq!(series.len(), 3);
        assert!((series[2].emotions.joy - 18.0 / 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_recent_entries_for_trends() {
        let entries: Vec<JournalEntry> = (0..20)
            .map(|i| entry(&i.to_string(), "2024-06-01T00:00:00.000Z"))
            .collect();
        let recent = recent_entries_for_trends(&entries, 15);
        assert_eq!(recent.len(), 15);
        assert_eq!(recent[0].content, "entry 5");
        assert!(recent[0].themes.is_empty());
    }
}
