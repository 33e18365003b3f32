//! Journal module - diary entries and their AI annotations.

mod journal_model;
mod journal_ops;

pub use journal_model::{
    format_timestamp, EmotionPoint, EmotionScores, EntryAnalysis, JournalEntry, TrendEntry,
};
pub use journal_ops::*;
