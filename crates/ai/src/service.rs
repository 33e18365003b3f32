//! Typed entry points over an annotation gateway.
//!
//! Failures are logged and returned to the caller once; nothing is retried.

use std::sync::Arc;

use log::{debug, warn};

use tarushiru_core::goals::Goal;
use tarushiru_core::journal::JournalEntry;
use tarushiru_core::money::{AssetRecord, BudgetProfile};
use tarushiru_core::profile::UserProfile;

use crate::error::AiError;
use crate::gateway::AnnotationGatewayTrait;
use crate::response::{clean_text_response, parse_entry_analysis, AnalyzedEntry};
use crate::tasks::AnnotationRequest;

/// Shown when goal coaching comes back empty.
pub const COACHING_FALLBACK: &str = "Keep going, one small step at a time.";

pub struct AnnotationService<G: AnnotationGatewayTrait> {
    gateway: Arc<G>,
}

impl<G: AnnotationGatewayTrait> AnnotationService<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    async fn send(&self, request: AnnotationRequest) -> Result<String, AiError> {
        let task = request.task.as_str();
        match self.gateway.complete(&request).await {
            Ok(answer) => {
                debug!("{} answered with {} bytes", task, answer.len());
                Ok(answer)
            }
            Err(e) => {
                warn!("{} failed [{}]: {}", task, e.code(), e);
                Err(e)
            }
        }
    }

    async fn send_text(&self, request: AnnotationRequest) -> Result<String, AiError> {
        let task = request.task.as_str();
        let answer = self.send(request).await?;
        clean_text_response(&answer).ok_or_else(|| {
            warn!("{} returned an empty answer", task);
            AiError::malformed("empty response")
        })
    }

    /// Emotions, themes, actions and a comment for one entry's text.
    pub async fn analyze_entry(&self, content: &str) -> Result<AnalyzedEntry, AiError> {
        let answer = self.send(AnnotationRequest::analyze_entry(content)?).await?;
        parse_entry_analysis(&answer).inspect_err(|e| warn!("analyze_entry: {}", e))
    }

    pub async fn summarize_trends(&self, entries: &[JournalEntry]) -> Result<String, AiError> {
        self.send_text(AnnotationRequest::journal_trends(entries)?)
            .await
    }

    pub async fn generate_resume(&self, profile: &UserProfile) -> Result<String, AiError> {
        self.send_text(AnnotationRequest::resume(profile)?).await
    }

    pub async fn summarize_career(&self, profile: &UserProfile) -> Result<String, AiError> {
        self.send_text(AnnotationRequest::career_summary(profile)?)
            .await
    }

    pub async fn analyze_personality(
        &self,
        mbti: &str,
        strengths: &[String],
    ) -> Result<String, AiError> {
        self.send_text(AnnotationRequest::personality(mbti, strengths)?)
            .await
    }

    pub async fn analyze_assets(
        &self,
        assets: &[AssetRecord],
        budget: &BudgetProfile,
    ) -> Result<String, AiError> {
        self.send_text(AnnotationRequest::asset_trends(assets, budget)?)
            .await
    }

    /// Coaching text; an empty answer falls back to [`COACHING_FALLBACK`].
    pub async fn coach_goals(&self, goals: &[Goal]) -> Result<String, AiError> {
        let answer = self.send(AnnotationRequest::goal_coaching(goals)?).await?;
        Ok(clean_text_response(&answer).unwrap_or_else(|| COACHING_FALLBACK.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::FakeGateway;
    use crate::tasks::AnnotationTask;
    use tarushiru_core::goals::{add_goal, GoalCategory};

    fn service(gateway: FakeGateway) -> AnnotationService<FakeGateway> {
        AnnotationService::new(Arc::new(gateway))
    }

    #[tokio::test]
    async fn test_analyze_entry() {
        let svc = service(FakeGateway::new().with_response(
            AnnotationTask::AnalyzeEntry,
            r#"{"emotions":{"joy":0.9},"themes":["family"],"actions":[],"aiComment":"Lovely"}"#,
        ));
        let analyzed = svc.analyze_entry("Dinner with my parents").await.unwrap();

        assert_eq!(analyzed.analysis.themes, vec!["family".to_string()]);
        assert_eq!(analyzed.ai_comment.as_deref(), Some("Lovely"));
    }

    #[tokio::test]
    async fn test_blank_entry_never_reaches_gateway() {
        let svc = service(FakeGateway::new());
        assert!(svc.analyze_entry("   ").await.is_err());
        assert!(svc.gateway().requests().is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_is_returned() {
        let svc = service(FakeGateway::failing("quota exceeded"));
        let err = svc.analyze_entry("hello").await.unwrap_err();
        assert_eq!(err.code(), "PROVIDER_ERROR");
        assert_eq!(svc.gateway().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_text_answer_is_an_error() {
        let svc = service(FakeGateway::new());
        let mut profile = UserProfile::from_login("a@b.c", "");
        profile.history = "Engineer since 2015".to_string();
        let err = svc.generate_resume(&profile).await.unwrap_err();
        assert_eq!(err.code(), "MALFORMED_RESPONSE");
    }

    #[tokio::test]
    async fn test_coaching_falls_back_on_empty_answer() {
        let svc = service(FakeGateway::new());
        let goals = add_goal(&[], "Walk daily", GoalCategory::Being).unwrap();
        assert_eq!(svc.coach_goals(&goals).await.unwrap(), COACHING_FALLBACK);
    }

    #[tokio::test]
    async fn test_text_answer_is_trimmed() {
        let svc = service(
            FakeGateway::new().with_response(AnnotationTask::AnalyzePersonality, "\n Insight \n"),
        );
        let text = svc
            .analyze_personality("ENFP", &["Woo".to_string()])
            .await
            .unwrap();
        assert_eq!(text, "Insight");
    }
}
