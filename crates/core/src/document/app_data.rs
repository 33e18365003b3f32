//! The root document.

use serde::{Deserialize, Serialize};

use crate::goals::Goal;
use crate::journal::JournalEntry;
use crate::money::{AssetRecord, BudgetProfile, MoneyConfig};
use crate::profile::UserProfile;

/// Everything the application persists, as one JSON document.
///
/// The document is replaced wholesale on every change and never patched in
/// storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AppData {
    /// `None` until the first login
    pub user: Option<UserProfile>,
    /// Insertion order
    pub journal: Vec<JournalEntry>,
    pub goals: Vec<Goal>,
    /// At most one record per month
    pub assets: Vec<AssetRecord>,
    pub money_config: MoneyConfig,
    pub budget_profile: BudgetProfile,
}

impl AppData {
    pub fn has_user(&self) -> bool {
        self.user.is_some()
    }
}
