//! Journal domain models.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Emotion scores extracted from an entry, each in [0, 1].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct EmotionScores {
    pub joy: f64,
    pub anger: f64,
    pub sadness: f64,
    pub anxiety: f64,
    pub calm: f64,
}

/// Annotation attached to an entry by the AI gateway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EntryAnalysis {
    pub emotions: EmotionScores,
    pub themes: Vec<String>,
    pub actions: Vec<String>,
}

/// A single diary entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    /// ISO 8601 timestamp
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<EntryAnalysis>,
    /// One-line encouraging comment from the AI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_comment: Option<String>,
}

impl JournalEntry {
    /// Creates a fresh entry with a new id.
    pub fn new(content: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            date: format_timestamp(now),
            content: content.into(),
            analysis: None,
            ai_comment: None,
        }
    }

    /// Parsed timestamp, if the stored date is valid RFC 3339.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Copy of this entry carrying an analysis and comment.
    pub fn with_analysis(&self, analysis: EntryAnalysis, ai_comment: Option<String>) -> Self {
        Self {
            analysis: Some(analysis),
            ai_comment,
            ..self.clone()
        }
    }

    /// Copy with edited content and/or date; id and analysis are kept.
    pub fn edited(&self, content: Option<String>, date: Option<DateTime<Utc>>) -> Self {
        Self {
            content: content.unwrap_or_else(|| self.content.clone()),
            date: date.map(format_timestamp).unwrap_or_else(|| self.date.clone()),
            ..self.clone()
        }
    }
}

pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// One point of the emotion chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionPoint {
    pub date: String,
    pub emotions: EmotionScores,
}

/// Compact entry shape sent for trend reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendEntry {
    pub date: String,
    pub content: String,
    pub themes: Vec<String>,
}
