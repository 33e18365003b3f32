use anyhow::{anyhow, bail};

use tarushiru_core::annotations::AnnotationTarget;
use tarushiru_core::profile::{parse_tag_list, UserProfile};
use tarushiru_core::ViewController;

use crate::config::Config;
use crate::main_lib::annotation_service;
use crate::opt::{ProfileCommand, ProfileFields};

pub(crate) async fn run(
    vc: &mut ViewController,
    config: &Config,
    cmd: ProfileCommand,
) -> anyhow::Result<()> {
    match cmd {
        ProfileCommand::Show => {
            print_profile(vc.profile()?);
            Ok(())
        }
        ProfileCommand::Set(fields) => {
            let profile = apply_fields(vc.profile()?, fields);
            vc.update_profile(profile)?;
            println!("Profile updated.");
            Ok(())
        }
        ProfileCommand::Personality => {
            let profile = vc.profile()?.clone();
            let target = AnnotationTarget::PersonalityAnalysis;
            let token = vc.begin_annotation(target.clone());
            let text = annotation_service(config)
                .analyze_personality(&profile.mbti, &profile.strengths)
                .await
                .map_err(|e| anyhow!("Personality analysis failed: {}", e))?;
            store_annotation(vc, target, token, text)
        }
        ProfileCommand::Summary => {
            let profile = vc.profile()?.clone();
            let target = AnnotationTarget::CareerSummary;
            let token = vc.begin_annotation(target.clone());
            let text = annotation_service(config)
                .summarize_career(&profile)
                .await
                .map_err(|e| anyhow!("Career summary failed: {}", e))?;
            store_annotation(vc, target, token, text)
        }
        ProfileCommand::Resume => {
            let profile = vc.profile()?.clone();
            let target = AnnotationTarget::Resume;
            let token = vc.begin_annotation(target.clone());
            let text = annotation_service(config)
                .generate_resume(&profile)
                .await
                .map_err(|e| anyhow!("Resume generation failed: {}", e))?;
            store_annotation(vc, target, token, text)
        }
    }
}

fn store_annotation(
    vc: &mut ViewController,
    target: AnnotationTarget,
    token: tarushiru_core::annotations::RequestToken,
    text: String,
) -> anyhow::Result<()> {
    if !vc.complete_profile_annotation(target, token, text.clone())? {
        bail!("Result was superseded by a newer request");
    }
    println!("{}", text);
    Ok(())
}

fn apply_fields(profile: &UserProfile, fields: ProfileFields) -> UserProfile {
    let mut next = match &fields.strengths {
        Some(list) => profile.with_strengths(parse_tag_list(list)),
        None => profile.clone(),
    };
    if let Some(skills) = &fields.skills {
        next = next.with_skills_csv(skills);
    }
    let text_fields = [
        (fields.name, &mut next.name),
        (fields.mbti.map(|m| m.trim().to_uppercase()), &mut next.mbti),
        (fields.history, &mut next.history),
        (fields.career_strengths, &mut next.career_strengths),
        (fields.interests, &mut next.interests),
        (fields.values, &mut next.values),
        (fields.environment, &mut next.environment),
    ];
    for (value, slot) in text_fields {
        if let Some(value) = value {
            *slot = value;
        }
    }
    next
}

fn print_profile(profile: &UserProfile) {
    println!("{} <{}>", profile.name, profile.email);
    let rows = [
        ("MBTI", profile.mbti.clone()),
        ("Strengths", profile.valid_strengths().join(", ")),
        ("Skills", profile.skills.join(", ")),
        ("History", profile.history.clone()),
        ("Career strengths", profile.career_strengths.clone()),
        ("Interests", profile.interests.clone()),
        ("Values", profile.values.clone()),
        ("Environment", profile.environment.clone()),
    ];
    for (label, value) in rows {
        if !value.is_empty() {
            println!("{:<17} {}", label, value);
        }
    }
    for (label, text) in [
        ("Personality", &profile.personality_analysis),
        ("Career summary", &profile.career_summary),
        ("Resume", &profile.resume_markdown),
    ] {
        if let Some(text) = text {
            println!("\n## {}\n{}", label, text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_fields() -> ProfileFields {
        ProfileFields {
            name: None,
            mbti: None,
            strengths: None,
            skills: None,
            history: None,
            career_strengths: None,
            interests: None,
            values: None,
            environment: None,
        }
    }

    #[test]
    fn test_apply_fields_only_touches_given_fields() {
        let mut profile = UserProfile::from_login("kana@example.com", "");
        profile.history = "Sales".to_string();

        let next = apply_fields(
            &profile,
            ProfileFields {
                mbti: Some(" infj ".to_string()),
                strengths: Some("Learner, Input、Focus".to_string()),
                ..empty_fields()
            },
        );

        assert_eq!(next.mbti, "INFJ");
        assert_eq!(next.strengths, vec!["Learner", "Input", "Focus"]);
        assert_eq!(next.history, "Sales");
        assert_eq!(next.name, "kana");
    }
}
