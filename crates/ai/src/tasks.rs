//! The catalogue of annotation tasks and the requests built for them.
//!
//! A request carries the task and the relevant slice of the document,
//! serialized as JSON text. Constructors refuse to build requests the
//! provider could not do anything useful with (blank entry, no history...).

use serde::Serialize;

use tarushiru_core::constants::{ASSET_HISTORY_MONTHS, TREND_ENTRY_LIMIT};
use tarushiru_core::goals::Goal;
use tarushiru_core::journal::{recent_entries_for_trends, JournalEntry};
use tarushiru_core::money::{budget_summary, recent_asset_history, AssetRecord, BudgetProfile};
use tarushiru_core::profile::UserProfile;

use crate::error::AiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationTask {
    /// Emotions, themes and actions of one entry
    AnalyzeEntry,
    /// Report over recent entries
    SummarizeJournalTrends,
    /// Markdown resume from the career history
    GenerateResume,
    /// Integrated summary of the career profile
    SummarizeCareer,
    /// MBTI and strengths reading
    AnalyzePersonality,
    /// Report over the asset history and budget
    AnalyzeAssetTrends,
    /// Short encouragement for the goal list
    CoachGoals,
}

/// Shape of the provider's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// A JSON object, parsed by `response::parse_entry_analysis`
    Structured,
    /// Free text, usually Markdown, shown as-is
    Text,
}

impl AnnotationTask {
    pub fn response_kind(&self) -> ResponseKind {
        match self {
            AnnotationTask::AnalyzeEntry => ResponseKind::Structured,
            _ => ResponseKind::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationTask::AnalyzeEntry => "analyze_entry",
            AnnotationTask::SummarizeJournalTrends => "summarize_journal_trends",
            AnnotationTask::GenerateResume => "generate_resume",
            AnnotationTask::SummarizeCareer => "summarize_career",
            AnnotationTask::AnalyzePersonality => "analyze_personality",
            AnnotationTask::AnalyzeAssetTrends => "analyze_asset_trends",
            AnnotationTask::CoachGoals => "coach_goals",
        }
    }
}

/// A task plus its serialized payload.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationRequest {
    pub task: AnnotationTask,
    pub payload: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EntryPayload<'a> {
    content: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersonalityPayload<'a> {
    mbti: &'a str,
    strengths: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CareerPayload<'a> {
    mbti: &'a str,
    strengths: Vec<String>,
    skills: &'a [String],
    history: &'a str,
    career_strengths: &'a str,
    interests: &'a str,
    values: &'a str,
    environment: &'a str,
}

impl<'a> CareerPayload<'a> {
    fn from_profile(profile: &'a UserProfile) -> Self {
        Self {
            mbti: &profile.mbti,
            strengths: profile.valid_strengths(),
            skills: &profile.skills,
            history: &profile.history,
            career_strengths: &profile.career_strengths,
            interests: &profile.interests,
            values: &profile.values,
            environment: &profile.environment,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AssetPayload {
    assets: Vec<AssetRecord>,
    budget: tarushiru_core::money::BudgetSummary,
}

impl AnnotationRequest {
    fn new<T: Serialize>(task: AnnotationTask, payload: &T) -> Result<Self, AiError> {
        let payload = serde_json::to_string(payload)
            .map_err(|e| AiError::Internal(format!("Failed to serialize payload: {}", e)))?;
        Ok(Self { task, payload })
    }

    pub fn analyze_entry(content: &str) -> Result<Self, AiError> {
        if content.trim().is_empty() {
            return Err(AiError::invalid_input("Journal entry is empty"));
        }
        Self::new(AnnotationTask::AnalyzeEntry, &EntryPayload { content })
    }

    /// The most recent entries, reduced to date, content and themes.
    pub fn journal_trends(entries: &[JournalEntry]) -> Result<Self, AiError> {
        if entries.is_empty() {
            return Err(AiError::invalid_input("No journal entries to analyze"));
        }
        let recent = recent_entries_for_trends(entries, TREND_ENTRY_LIMIT);
        Self::new(AnnotationTask::SummarizeJournalTrends, &recent)
    }

    pub fn resume(profile: &UserProfile) -> Result<Self, AiError> {
        if profile.history.trim().is_empty() {
            return Err(AiError::invalid_input("Career history is empty"));
        }
        Self::new(
            AnnotationTask::GenerateResume,
            &CareerPayload::from_profile(profile),
        )
    }

    pub fn career_summary(profile: &UserProfile) -> Result<Self, AiError> {
        Self::new(
            AnnotationTask::SummarizeCareer,
            &CareerPayload::from_profile(profile),
        )
    }

    /// Needs an MBTI code and at least one non-blank strength.
    pub fn personality(mbti: &str, strengths: &[String]) -> Result<Self, AiError> {
        let mbti = mbti.trim();
        let strengths: Vec<String> = strengths
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if mbti.is_empty() || strengths.is_empty() {
            return Err(AiError::invalid_input(
                "An MBTI type and at least one strength are required",
            ));
        }
        Self::new(
            AnnotationTask::AnalyzePersonality,
            &PersonalityPayload { mbti, strengths },
        )
    }

    /// The last two years of records, ascending, plus the budget summary.
    pub fn asset_trends(assets: &[AssetRecord], budget: &BudgetProfile) -> Result<Self, AiError> {
        if assets.is_empty() {
            return Err(AiError::invalid_input("No asset records to analyze"));
        }
        Self::new(
            AnnotationTask::AnalyzeAssetTrends,
            &AssetPayload {
                assets: recent_asset_history(assets, ASSET_HISTORY_MONTHS),
                budget: budget_summary(budget),
            },
        )
    }

    pub fn goal_coaching(goals: &[Goal]) -> Result<Self, AiError> {
        if goals.is_empty() {
            return Err(AiError::invalid_input("No goals to coach on"));
        }
        Self::new(AnnotationTask::CoachGoals, &goals)
    }
}
