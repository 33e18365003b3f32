use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::annotations::{AnnotationTarget, InFlightRequests, RequestToken};
use crate::document::{AppData, Mutation};
use crate::errors::{AuthError, Error, Result};
use crate::goals::Goal;
use crate::journal::{find_entry, EntryAnalysis, JournalEntry};
use crate::money::{self, MonthKey};
use crate::profile::UserProfile;
use crate::store::AppStore;

/// Screens of the application. Only `Auth` is reachable while logged out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Auth,
    Journal,
    Money,
    Goals,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// First login; a profile was created
    Created,
    Authenticated,
}

/// Owns the document and dispatches every user intent to the store.
///
/// Intents that change data go through [`AppStore::apply`] and are therefore
/// persisted before they become visible.
pub struct ViewController {
    store: AppStore,
    screen: Screen,
    authenticated: bool,
    in_flight: InFlightRequests,
}

impl ViewController {
    pub fn new(store: AppStore) -> Self {
        Self {
            store,
            screen: Screen::Auth,
            authenticated: false,
            in_flight: InFlightRequests::new(),
        }
    }

    pub fn data(&self) -> &AppData {
        self.store.get()
    }

    pub fn store(&self) -> &AppStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut AppStore {
        &mut self.store
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn in_flight(&self) -> &InFlightRequests {
        &self.in_flight
    }

    // ------------------------------------------------------------------
    // Authentication and navigation
    // ------------------------------------------------------------------

    /// Soft login. The first login creates the profile; later logins only
    /// check the password when one is set.
    pub fn login(&mut self, email: &str, password: &str) -> Result<LoginOutcome> {
        let password_ok = self
            .data()
            .user
            .as_ref()
            .map(|user| user.check_password(password));
        let outcome = match password_ok {
            None => {
                let user = UserProfile::from_login(email, password);
                info!("Creating profile for {}", user.name);
                self.store.apply(Mutation::SetUser(Some(user)))?;
                LoginOutcome::Created
            }
            Some(true) => LoginOutcome::Authenticated,
            Some(false) => return Err(AuthError::WrongPassword.into()),
        };
        self.authenticated = true;
        self.screen = Screen::Journal;
        Ok(outcome)
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
        self.screen = Screen::Auth;
    }

    /// Switches screens. The document is not touched.
    pub fn navigate(&mut self, screen: Screen) -> Result<()> {
        if screen != Screen::Auth && !self.authenticated {
            return Err(AuthError::NotLoggedIn.into());
        }
        debug!("Navigating to {:?}", screen);
        self.screen = screen;
        Ok(())
    }

    /// Deletes everything and returns to the login screen.
    pub fn reset_data(&mut self) -> Result<()> {
        self.store.reset()?;
        self.in_flight.clear();
        self.logout();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Journal, goals and profile
    // ------------------------------------------------------------------

    /// Saves an entry: replaced in place when its id exists, appended otherwise.
    pub fn submit_entry(&mut self, entry: JournalEntry) -> Result<&AppData> {
        self.require_auth()?;
        let mutation = if find_entry(&self.data().journal, &entry.id).is_some() {
            Mutation::ReplaceJournalEntry(entry)
        } else {
            Mutation::AppendJournalEntry(entry)
        };
        self.store.apply(mutation)
    }

    /// Edits content and/or date of an existing entry, keeping its analysis.
    pub fn edit_entry(
        &mut self,
        id: &str,
        content: Option<String>,
        date: Option<DateTime<Utc>>,
    ) -> Result<&AppData> {
        self.require_auth()?;
        let edited = find_entry(&self.data().journal, id)
            .ok_or_else(|| Error::NotFound(format!("Journal entry {}", id)))?
            .edited(content, date);
        self.store.apply(Mutation::ReplaceJournalEntry(edited))
    }

    pub fn set_goals(&mut self, goals: Vec<Goal>) -> Result<&AppData> {
        self.require_auth()?;
        self.store.apply(Mutation::ReplaceGoals(goals))
    }

    pub fn update_profile(&mut self, profile: UserProfile) -> Result<&AppData> {
        self.require_auth()?;
        self.store.apply(Mutation::SetUser(Some(profile)))
    }

    /// The current profile. Fails before the first login.
    pub fn profile(&self) -> Result<&UserProfile> {
        self.data()
            .user
            .as_ref()
            .ok_or_else(|| AuthError::NoProfile.into())
    }

    // ------------------------------------------------------------------
    // Money
    // ------------------------------------------------------------------

    pub fn set_asset_value(
        &mut self,
        month: &MonthKey,
        category: &str,
        value: i64,
    ) -> Result<&AppData> {
        self.require_auth()?;
        let assets = money::set_asset_value(&self.data().assets, month, category, value);
        self.store.apply(Mutation::ReplaceAssets(assets))
    }

    pub fn add_asset_category(&mut self, name: &str) -> Result<&AppData> {
        self.require_auth()?;
        let config = money::add_asset_category(&self.data().money_config, name);
        self.store.apply(Mutation::ReplaceMoneyConfig(config))
    }

    /// Removes a category from the configuration; recorded values are kept.
    pub fn remove_asset_category(&mut self, name: &str) -> Result<&AppData> {
        self.require_auth()?;
        let config = money::remove_asset_category(&self.data().money_config, name)?;
        self.store.apply(Mutation::ReplaceMoneyConfig(config))
    }

    pub fn add_fixed_cost(&mut self, name: &str, amount: i64) -> Result<&AppData> {
        self.require_auth()?;
        let budget = money::add_fixed_cost(&self.data().budget_profile, name, amount)?;
        self.store.apply(Mutation::ReplaceBudgetProfile(budget))
    }

    pub fn remove_fixed_cost(&mut self, id: &str) -> Result<&AppData> {
        self.require_auth()?;
        let budget = money::remove_fixed_cost(&self.data().budget_profile, id)?;
        self.store.apply(Mutation::ReplaceBudgetProfile(budget))
    }

    pub fn set_monthly_income(&mut self, amount: i64) -> Result<&AppData> {
        self.require_auth()?;
        let budget = money::with_monthly_income(&self.data().budget_profile, amount);
        self.store.apply(Mutation::ReplaceBudgetProfile(budget))
    }

    pub fn set_variable_budget(&mut self, amount: i64) -> Result<&AppData> {
        self.require_auth()?;
        let budget = money::with_variable_budget(&self.data().budget_profile, amount);
        self.store.apply(Mutation::ReplaceBudgetProfile(budget))
    }

    // ------------------------------------------------------------------
    // AI annotations
    // ------------------------------------------------------------------

    /// Registers an outgoing AI request for `target`.
    pub fn begin_annotation(&mut self, target: AnnotationTarget) -> RequestToken {
        self.in_flight.issue(target)
    }

    /// Attaches an analysis to the stored entry unless a newer request
    /// superseded it.
    ///
    /// The analysis lands on the entry as currently stored, so edits made
    /// while the request was running are kept. `draft` is appended only
    /// when no entry with its id exists yet. Returns `Ok(false)` when the
    /// result was discarded.
    pub fn complete_entry_analysis(
        &mut self,
        token: RequestToken,
        draft: &JournalEntry,
        analysis: EntryAnalysis,
        ai_comment: Option<String>,
    ) -> Result<bool> {
        let target = AnnotationTarget::JournalEntry(draft.id.clone());
        if !self.in_flight.complete(&target, token) {
            return Ok(false);
        }
        self.require_auth()?;
        let mutation = match find_entry(&self.data().journal, &draft.id) {
            Some(current) => {
                Mutation::ReplaceJournalEntry(current.with_analysis(analysis, ai_comment))
            }
            None => Mutation::AppendJournalEntry(draft.with_analysis(analysis, ai_comment)),
        };
        self.store.apply(mutation)?;
        Ok(true)
    }

    /// Stores a generated profile text unless a newer request superseded it.
    pub fn complete_profile_annotation(
        &mut self,
        target: AnnotationTarget,
        token: RequestToken,
        text: String,
    ) -> Result<bool> {
        if !self.in_flight.complete(&target, token) {
            return Ok(false);
        }
        let mut profile = self.profile()?.clone();
        match target {
            AnnotationTarget::Resume => profile.resume_markdown = Some(text),
            AnnotationTarget::PersonalityAnalysis => profile.personality_analysis = Some(text),
            AnnotationTarget::CareerSummary => profile.career_summary = Some(text),
            AnnotationTarget::JournalEntry(id) => {
                return Err(Error::Unexpected(format!(
                    "Journal entry {} is not a profile annotation",
                    id
                )))
            }
        }
        self.update_profile(profile)?;
        Ok(true)
    }

    fn require_auth(&self) -> Result<()> {
        if self.authenticated {
            Ok(())
        } else {
            Err(AuthError::NotLoggedIn.into())
        }
    }
}
