use anyhow::{anyhow, bail};
use chrono::Utc;
use tracing::info;

use tarushiru_ai::AnnotationService;
use tarushiru_ai::GeminiGateway;
use tarushiru_core::annotations::AnnotationTarget;
use tarushiru_core::constants::EMOTION_SERIES_LEN;
use tarushiru_core::journal::{emotion_series, entries_newest_first, find_entry, JournalEntry};
use tarushiru_core::ViewController;

use super::parse_datetime;
use crate::config::Config;
use crate::main_lib::annotation_service;
use crate::opt::JournalCommand;

pub(crate) async fn run(
    vc: &mut ViewController,
    config: &Config,
    cmd: JournalCommand,
) -> anyhow::Result<()> {
    match cmd {
        JournalCommand::Add { text, no_analyze } => {
            if text.trim().is_empty() {
                bail!("Entry is empty");
            }
            let entry = JournalEntry::new(text, Utc::now());
            if no_analyze {
                vc.submit_entry(entry.clone())?;
            } else {
                let service = annotation_service(config);
                analyze_and_save(vc, &service, entry.clone()).await?;
            }
            info!("Saved journal entry {}", entry.id);
            println!("Saved entry {}", entry.id);
            print_comment(vc, &entry.id);
            Ok(())
        }
        JournalCommand::Edit { id, content, date } => {
            if content.is_none() && date.is_none() {
                bail!("Nothing to change; pass --content and/or --date");
            }
            let date = date.as_deref().map(parse_datetime).transpose()?;
            vc.edit_entry(&id, content, date)?;
            println!("Updated entry {}", id);
            Ok(())
        }
        JournalCommand::List => {
            let journal = &vc.data().journal;
            if journal.is_empty() {
                println!("No entries yet.");
            }
            for entry in entries_newest_first(journal) {
                println!("{}  {}", entry.date, entry.id);
                println!("  {}", entry.content.replace('\n', "\n  "));
                if let Some(analysis) = &entry.analysis {
                    if !analysis.themes.is_empty() {
                        println!("  themes: {}", analysis.themes.join(", "));
                    }
                }
                if let Some(comment) = &entry.ai_comment {
                    println!("  > {}", comment);
                }
            }
            Ok(())
        }
        JournalCommand::Analyze { id } => {
            let entry = find_entry(&vc.data().journal, &id)
                .cloned()
                .ok_or_else(|| anyhow!("Journal entry {} not found", id))?;
            let service = annotation_service(config);
            analyze_and_save(vc, &service, entry).await?;
            print_comment(vc, &id);
            Ok(())
        }
        JournalCommand::Trends => {
            let service = annotation_service(config);
            let report = service
                .summarize_trends(&vc.data().journal)
                .await
                .map_err(|e| anyhow!("Trend analysis failed: {}", e))?;
            println!("{}", report);
            Ok(())
        }
        JournalCommand::Emotions => {
            let series = emotion_series(&vc.data().journal, EMOTION_SERIES_LEN);
            if series.is_empty() {
                println!("No analyzed entries yet.");
            }
            println!("{:<25} {:>5} {:>5} {:>5} {:>5} {:>5}", "date", "joy", "anger", "sad", "anx", "calm");
            for point in series {
                let e = point.emotions;
                println!(
                    "{:<25} {:>5.2} {:>5.2} {:>5.2} {:>5.2} {:>5.2}",
                    point.date, e.joy, e.anger, e.sadness, e.anxiety, e.calm
                );
            }
            Ok(())
        }
    }
}

/// Analyzes the entry and saves it with the result. Nothing is saved when
/// the analysis fails.
async fn analyze_and_save(
    vc: &mut ViewController,
    service: &AnnotationService<GeminiGateway>,
    entry: JournalEntry,
) -> anyhow::Result<()> {
    let token = vc.begin_annotation(AnnotationTarget::JournalEntry(entry.id.clone()));
    let analyzed = service
        .analyze_entry(&entry.content)
        .await
        .map_err(|e| anyhow!("Analysis failed: {}", e))?;
    if !vc.complete_entry_analysis(token, &entry, analyzed.analysis, analyzed.ai_comment)? {
        bail!("Analysis result was superseded by a newer request");
    }
    Ok(())
}

fn print_comment(vc: &ViewController, id: &str) {
    if let Some(comment) = find_entry(&vc.data().journal, id).and_then(|e| e.ai_comment.as_ref()) {
        println!("> {}", comment);
    }
}
