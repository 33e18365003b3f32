//! Whole-document mutations.

use log::debug;

use super::app_data::AppData;
use crate::errors::Result;
use crate::goals::Goal;
use crate::journal::{append_entry, replace_entry_by_id, JournalEntry};
use crate::money::{AssetRecord, BudgetProfile, MoneyConfig};
use crate::profile::UserProfile;

/// A change to one top-level field of the document.
///
/// Every screen expresses its edits as one of these; nothing else writes to
/// the document.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SetUser(Option<UserProfile>),
    /// Fails if the id already exists
    AppendJournalEntry(JournalEntry),
    /// Fails if the id does not exist
    ReplaceJournalEntry(JournalEntry),
    ReplaceGoals(Vec<Goal>),
    ReplaceAssets(Vec<AssetRecord>),
    ReplaceMoneyConfig(MoneyConfig),
    ReplaceBudgetProfile(BudgetProfile),
}

impl Mutation {
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::SetUser(_) => "set_user",
            Mutation::AppendJournalEntry(_) => "append_journal_entry",
            Mutation::ReplaceJournalEntry(_) => "replace_journal_entry",
            Mutation::ReplaceGoals(_) => "replace_goals",
            Mutation::ReplaceAssets(_) => "replace_assets",
            Mutation::ReplaceMoneyConfig(_) => "replace_money_config",
            Mutation::ReplaceBudgetProfile(_) => "replace_budget_profile",
        }
    }
}

/// Produces the next document. The input is left untouched and fields the
/// mutation does not name are carried over as they are.
pub fn apply_mutation(data: &AppData, mutation: Mutation) -> Result<AppData> {
    debug!("Applying mutation {}", mutation.name());
    let mut next = data.clone();
    match mutation {
        Mutation::SetUser(user) => next.user = user,
        Mutation::AppendJournalEntry(entry) => next.journal = append_entry(&data.journal, entry)?,
        Mutation::ReplaceJournalEntry(entry) => {
            next.journal = replace_entry_by_id(&data.journal, entry)?
        }
        Mutation::ReplaceGoals(goals) => next.goals = goals,
        Mutation::ReplaceAssets(assets) => next.assets = assets,
        Mutation::ReplaceMoneyConfig(config) => next.money_config = config,
        Mutation::ReplaceBudgetProfile(budget) => next.budget_profile = budget,
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::goals::{add_goal, GoalCategory};
    use chrono::{TimeZone, Utc};

    fn sample() -> AppData {
        AppData {
            user: Some(UserProfile::from_login("kana@example.com", "")),
            goals: add_goal(&[], "Read more", GoalCategory::Life).unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn test_unrelated_fields_are_kept() {
        let data = sample();
        let next = apply_mutation(
            &data,
            Mutation::ReplaceBudgetProfile(BudgetProfile {
                monthly_income: 300_000,
                ..Default::default()
            }),
        )
        .unwrap();

        assert_eq!(next.budget_profile.monthly_income, 300_000);
        assert_eq!(next.user, data.user);
        assert_eq!(next.goals, data.goals);
        assert_eq!(data.budget_profile.monthly_income, 0);
    }

    #[test]
    fn test_append_then_replace_entry() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        let entry = JournalEntry::new("first", now);
        let data = apply_mutation(&sample(), Mutation::AppendJournalEntry(entry.clone())).unwrap();
        assert_eq!(data.journal.len(), 1);

        let edited = entry.edited(Some("second".to_string()), None);
        let data = apply_mutation(&data, Mutation::ReplaceJournalEntry(edited)).unwrap();
        assert_eq!(data.journal.len(), 1);
        assert_eq!(data.journal[0].content, "second");
        assert_eq!(data.journal[0].id, entry.id);
    }

    #[test]
    fn test_replace_missing_entry_fails() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        let result = apply_mutation(
            &sample(),
            Mutation::ReplaceJournalEntry(JournalEntry::new("x", now)),
        );
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_clear_user() {
        let next = apply_mutation(&sample(), Mutation::SetUser(None)).unwrap();
        assert!(!next.has_user());
        assert_eq!(next.goals.len(), 1);
    }
}
