/// Asset categories of a fresh document, in display order
pub const DEFAULT_ASSET_CATEGORIES: [&str; 3] = ["現金・預金", "株式・投信", "暗号資産"];

/// Maximum number of strength tags kept on a profile
pub const MAX_STRENGTHS: usize = 5;

/// Number of analyzed entries in the emotion chart
pub const EMOTION_SERIES_LEN: usize = 14;

/// Number of recent entries sent for a journal trend report
pub const TREND_ENTRY_LIMIT: usize = 15;

/// Months of asset history sent for an asset trend report (two years, for year-over-year)
pub const ASSET_HISTORY_MONTHS: usize = 24;

/// Goal progress value of a completed goal
pub const GOAL_DONE_PROGRESS: i64 = 100;

/// Prefix of exported backup files
pub const BACKUP_FILE_PREFIX: &str = "tarushiru_backup_";
