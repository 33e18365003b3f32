use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tarushiru_core::goals::GoalCategory;

#[derive(Debug, Parser)]
#[command(name = "tarushiru", about = "Journal, money and goals in one local file")]
pub(crate) struct Cli {
    /// Data file; overrides TARUSHIRU_DATA_PATH
    #[arg(long, global = true)]
    pub(crate) data: Option<PathBuf>,

    /// Profile password, if one is set
    #[arg(long, global = true, env = "TARUSHIRU_PASSWORD", hide_env_values = true)]
    pub(crate) password: Option<String>,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Log in; the first login creates the profile
    Login(Login),

    #[command(subcommand)]
    Journal(JournalCommand),

    #[command(subcommand)]
    Goals(GoalsCommand),

    #[command(subcommand)]
    Money(MoneyCommand),

    #[command(subcommand)]
    Budget(BudgetCommand),

    #[command(subcommand)]
    Profile(ProfileCommand),

    #[command(subcommand)]
    Backup(BackupCommand),

    /// Delete all data
    Reset(Confirm),
}

#[derive(Debug, Args)]
pub(crate) struct Login {
    #[arg(long)]
    pub(crate) email: String,
}

#[derive(Debug, Args)]
pub(crate) struct Confirm {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub(crate) yes: bool,
}

// ---------------------------------------------------------------------------
// Journal
// ---------------------------------------------------------------------------

#[derive(Debug, Subcommand)]
pub(crate) enum JournalCommand {
    /// Write a new entry; it is analyzed before it is saved
    Add {
        text: String,
        /// Save without AI analysis
        #[arg(long)]
        no_analyze: bool,
    },
    /// Change the text and/or date of an entry
    Edit {
        id: String,
        #[arg(long)]
        content: Option<String>,
        /// RFC 3339 or YYYY-MM-DDTHH:MM (UTC)
        #[arg(long)]
        date: Option<String>,
    },
    /// Entries, newest first
    List,
    /// Re-run the analysis of an entry
    Analyze { id: String },
    /// Report over the recent entries
    Trends,
    /// Emotion scores of the last analyzed entries
    Emotions,
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum CategoryArg {
    Being,
    Life,
    Work,
    WorkShort,
}

impl From<CategoryArg> for GoalCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Being => GoalCategory::Being,
            CategoryArg::Life => GoalCategory::Life,
            CategoryArg::Work => GoalCategory::Work,
            CategoryArg::WorkShort => GoalCategory::WorkShort,
        }
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum GoalsCommand {
    List {
        #[arg(long, value_enum)]
        category: Option<CategoryArg>,
    },
    Add {
        title: String,
        #[arg(long, value_enum, default_value = "work")]
        category: CategoryArg,
    },
    /// Mark done or open again
    Toggle { id: String },
    Rename { id: String, title: String },
    Delete {
        id: String,
        #[command(flatten)]
        confirm: Confirm,
    },
    /// Encouragement for the current goals
    Coach,
}

// ---------------------------------------------------------------------------
// Money and budget
// ---------------------------------------------------------------------------

#[derive(Debug, Subcommand)]
pub(crate) enum MoneyCommand {
    /// Totals, deltas and breakdown for a month
    Show {
        /// YYYY-MM, defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },
    /// Record a category balance
    Set {
        category: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
        #[arg(long)]
        month: Option<String>,
    },
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Monthly totals over time
    Trend,
    /// AI report over the asset history and budget
    Analyze,
}

#[derive(Debug, Subcommand)]
pub(crate) enum CategoryCommand {
    Add {
        name: String,
    },
    Remove {
        name: String,
        #[command(flatten)]
        confirm: Confirm,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum BudgetCommand {
    Show,
    Income { amount: String },
    Variable { amount: String },
    FixedAdd { name: String, amount: String },
    FixedRemove { id: String },
}

// ---------------------------------------------------------------------------
// Profile and backup
// ---------------------------------------------------------------------------

#[derive(Debug, Subcommand)]
pub(crate) enum ProfileCommand {
    Show,
    Set(ProfileFields),
    /// AI reading of MBTI and strengths
    Personality,
    /// AI summary of the career profile
    Summary,
    /// AI resume from the career history
    Resume,
}

#[derive(Debug, Args)]
pub(crate) struct ProfileFields {
    #[arg(long)]
    pub(crate) name: Option<String>,
    #[arg(long)]
    pub(crate) mbti: Option<String>,
    /// Comma-separated, up to five
    #[arg(long)]
    pub(crate) strengths: Option<String>,
    /// Comma-separated
    #[arg(long)]
    pub(crate) skills: Option<String>,
    #[arg(long)]
    pub(crate) history: Option<String>,
    #[arg(long)]
    pub(crate) career_strengths: Option<String>,
    #[arg(long)]
    pub(crate) interests: Option<String>,
    #[arg(long)]
    pub(crate) values: Option<String>,
    #[arg(long)]
    pub(crate) environment: Option<String>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum BackupCommand {
    Export {
        /// Directory for the backup file
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    Import {
        file: PathBuf,
        #[command(flatten)]
        confirm: Confirm,
    },
}
