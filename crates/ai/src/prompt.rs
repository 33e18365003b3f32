//! Prompt rendering.
//!
//! Each task gets a fixed instruction block followed by the JSON payload.

use crate::tasks::{AnnotationRequest, AnnotationTask};

/// Answers are written in the language the journal is kept in.
const LANGUAGE_RULE: &str = "Answer in Japanese.";

const ENTRY_ANALYSIS_FORMAT: &str = r#"Return ONLY a JSON object of this shape, with no surrounding text:
{"emotions":{"joy":0.0,"anger":0.0,"sadness":0.0,"anxiety":0.0,"calm":0.0},"themes":["..."],"actions":["..."],"aiComment":"..."}
Each emotion is a score between 0.0 and 1.0. "aiComment" is one short, warm sentence."#;

fn instructions(task: AnnotationTask) -> &'static str {
    match task {
        AnnotationTask::AnalyzeEntry => {
            "Analyze the diary entry below. Score the writer's emotions, list the main \
             themes, and list the concrete actions the writer took or plans to take."
        }
        AnnotationTask::SummarizeJournalTrends => {
            "You support the user's wellbeing and growth. Read the recent diary entries \
             below in chronological order and write a monthly-report style review: the \
             dominant emotions and how they changed, recurring themes, and concrete \
             advice for the coming month. Use a warm tone and Markdown headings."
        }
        AnnotationTask::GenerateResume => {
            "You are a professional career consultant. Turn the profile below into a \
             formal resume in Markdown. The history may be loose notes: order it by \
             time and structure it as company, period, role, duties and achievements, \
             using placeholders for unknown dates. Add a self-introduction that links \
             the MBTI type, strengths and values to the concrete experience."
        }
        AnnotationTask::SummarizeCareer => {
            "Act as a career coach. Combine the fragments of the profile below into one \
             integrated summary of who this person is and in which environment they \
             shine, in 300 to 400 characters. Point out where strengths and values \
             meet, and end with one hint about suitable roles or ways of working."
        }
        AnnotationTask::AnalyzePersonality => {
            "Act as an expert in psychology and career development. Explain how the \
             StrengthsFinder themes below interact with the basic traits of the MBTI \
             type, and how to use them at work. Keep it positive, insightful and under \
             300 characters."
        }
        AnnotationTask::AnalyzeAssetTrends => {
            "You are a financial planner. Review the monthly asset history (up to 24 \
             months) and the budget below and write a Markdown report: the long-term \
             trend, the change against the same month last year when available, the \
             balance between cash and investments, and encouragement or a caution on \
             sharp drops. Do not recommend specific securities."
        }
        AnnotationTask::CoachGoals => {
            "You are a supportive life coach. Look at the goal list below and give a \
             short encouraging summary plus one concrete piece of advice for moving \
             forward, in under 200 characters."
        }
    }
}

/// Full prompt text for a request.
pub fn render_prompt(request: &AnnotationRequest) -> String {
    let mut prompt = String::new();
    prompt.push_str(instructions(request.task));
    prompt.push('\n');
    prompt.push_str(LANGUAGE_RULE);
    if request.task == AnnotationTask::AnalyzeEntry {
        prompt.push_str("\n\n");
        prompt.push_str(ENTRY_ANALYSIS_FORMAT);
    }
    prompt.push_str("\n\nData:\n");
    prompt.push_str(&request.payload);
    prompt
}
