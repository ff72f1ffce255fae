//! Resume & Cover Letter Generation — the calls that go out to the text
//! generation service, each with its failure policy.
//!
//! Fatal calls (summary, cover letter) return `Result<_, AppError>`.
//! Everything else returns `Degradable<_>` and logs a warning when the
//! fallback is used. No call is ever retried.

use chrono::Utc;
use futures::future::join_all;
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::outcome::Degradable;
use crate::generation::prompt_builder::{
    build_bullets_prompt, build_cover_letter_prompt, build_customize_prompt,
    build_job_match_prompt, build_suggestions_prompt, build_summary_prompt,
};
use crate::llm_client::{generate_json, GenerationRequest, TextGenerator};
use crate::models::documents::{
    EnhancedExperience, GeneratedCoverLetter, GeneratedResume, JobInfo, JobMatchAnalysis,
    OrganizedSkills, SkillGroup,
};
use crate::models::profile::{skill_names, CareerProfile, SkillCategory, SkillEntry, WorkExperience};
use crate::templates::TemplateName;

// ────────────────────────────────────────────────────────────────────────────
// Service reply shapes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct BulletsReply {
    #[serde(default)]
    bullet_points: Vec<String>,
}

/// Match reply as the model writes it. The score may come back as a float
/// or out of range, so it is clamped before it reaches `JobMatchAnalysis`.
#[derive(Debug, Deserialize)]
struct MatchReply {
    match_percentage: f64,
    #[serde(default)]
    matching_skills: Vec<String>,
    #[serde(default)]
    missing_skills: Vec<String>,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    recommendations: Vec<String>,
}

impl From<MatchReply> for JobMatchAnalysis {
    fn from(reply: MatchReply) -> Self {
        let score = if reply.match_percentage.is_finite() {
            reply.match_percentage.round().clamp(0.0, 100.0) as u8
        } else {
            JobMatchAnalysis::NEUTRAL_SCORE
        };
        JobMatchAnalysis {
            match_percentage: score,
            matching_skills: reply.matching_skills,
            missing_skills: reply.missing_skills,
            strengths: reply.strengths,
            recommendations: reply.recommendations,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SuggestionsReply {
    #[serde(default)]
    suggestions: Vec<String>,
}

fn non_blank(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Fatal calls
// ────────────────────────────────────────────────────────────────────────────

async fn generate_text(
    generator: &dyn TextGenerator,
    prompt: String,
    what: &str,
) -> Result<String, AppError> {
    let text = generator
        .generate(&GenerationRequest::text(prompt))
        .await
        .map_err(|e| AppError::Generation(format!("Failed to generate {what}: {e}")))?;
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::Generation(format!(
            "Failed to generate {what}: empty response"
        )));
    }
    Ok(text.to_string())
}

/// Writes a 3-4 sentence professional summary.
pub async fn generate_summary(
    generator: &dyn TextGenerator,
    profile: &CareerProfile,
) -> Result<String, AppError> {
    let prompt = build_summary_prompt(profile)?;
    generate_text(generator, prompt, "professional summary").await
}

/// Writes a complete cover letter for `job`.
pub async fn generate_cover_letter(
    generator: &dyn TextGenerator,
    profile: &CareerProfile,
    job: JobInfo,
) -> Result<GeneratedCoverLetter, AppError> {
    let prompt = build_cover_letter_prompt(profile, &job)?;
    let content = generate_text(generator, prompt, "cover letter").await?;
    info!(
        "Generated cover letter for {} at {} ({} chars, tone {})",
        job.job_title,
        job.company_name,
        content.len(),
        job.tone.label()
    );
    Ok(GeneratedCoverLetter {
        content,
        job_info: job,
        generated_at: Utc::now(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Degradable calls
// ────────────────────────────────────────────────────────────────────────────

/// Rewrites one description as bullet points. Falls back to the unedited
/// description as a single bullet.
pub async fn enhance_experience(
    generator: &dyn TextGenerator,
    experience: &WorkExperience,
) -> Degradable<Vec<String>> {
    let fallback = || vec![experience.description.clone()];
    match generate_json::<BulletsReply>(generator, build_bullets_prompt(experience)).await {
        Ok(reply) => {
            let bullets = non_blank(reply.bullet_points);
            if bullets.is_empty() {
                Degradable::degraded(fallback(), "Service returned no bullet points")
            } else {
                Degradable::generated(bullets)
            }
        }
        Err(e) => Degradable::degraded(fallback(), e.to_string()),
    }
}

/// One independent enhancement call per entry, issued concurrently.
/// Always returns exactly one outcome per entry, in input order.
pub async fn enhance_work_experience(
    generator: &dyn TextGenerator,
    entries: &[WorkExperience],
) -> Vec<Degradable<Vec<String>>> {
    let outcomes = join_all(entries.iter().map(|e| enhance_experience(generator, e))).await;
    for (entry, outcome) in entries.iter().zip(&outcomes) {
        if let Some(reason) = outcome.reason() {
            warn!(
                "Bullet enhancement degraded for '{}' at '{}': {}",
                entry.job_title, entry.company, reason
            );
        }
    }
    outcomes
}

pub async fn analyze_job_match(
    generator: &dyn TextGenerator,
    profile: &CareerProfile,
    job_description: &str,
) -> Degradable<JobMatchAnalysis> {
    let prompt = build_job_match_prompt(profile, job_description);
    match generate_json::<MatchReply>(generator, prompt).await {
        Ok(reply) => Degradable::generated(reply.into()),
        Err(e) => {
            warn!("Job match analysis degraded: {e}");
            Degradable::degraded(
                JobMatchAnalysis::neutral(format!("Analysis failed: {e}")),
                e.to_string(),
            )
        }
    }
}

pub async fn suggest_improvements(
    generator: &dyn TextGenerator,
    resume: &GeneratedResume,
    job_description: &str,
) -> Degradable<Vec<String>> {
    let prompt = match build_suggestions_prompt(resume, job_description) {
        Ok(prompt) => prompt,
        Err(e) => {
            return Degradable::degraded(
                vec![format!("Unable to generate suggestions: {e}")],
                e.to_string(),
            )
        }
    };
    let outcome = match generate_json::<SuggestionsReply>(generator, prompt).await {
        Ok(reply) => {
            let suggestions = non_blank(reply.suggestions);
            if suggestions.is_empty() {
                Degradable::degraded(
                    vec!["Unable to generate suggestions: empty response".to_string()],
                    "Service returned no suggestions",
                )
            } else {
                Degradable::generated(suggestions)
            }
        }
        Err(e) => Degradable::degraded(
            vec![format!("Unable to generate suggestions: {e}")],
            e.to_string(),
        ),
    };
    if let Some(reason) = outcome.reason() {
        warn!("Resume suggestions degraded: {reason}");
    }
    outcome
}

/// Adapts a letter to an industry. Falls back to the letter unchanged.
pub async fn customize_for_industry(
    generator: &dyn TextGenerator,
    cover_letter: &str,
    industry: &str,
) -> Degradable<String> {
    let prompt = build_customize_prompt(cover_letter, industry);
    match generator.generate(&GenerationRequest::text(prompt)).await {
        Ok(text) if !text.trim().is_empty() => Degradable::generated(text.trim().to_string()),
        Ok(_) => Degradable::degraded(cover_letter.to_string(), "Service returned empty text"),
        Err(e) => {
            warn!("Industry customization for '{industry}' degraded: {e}");
            Degradable::degraded(cover_letter.to_string(), e.to_string())
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resume assembly
// ────────────────────────────────────────────────────────────────────────────

/// Groups skills by category in display order, dropping empty categories.
pub fn organize_skills(skills: &[SkillEntry]) -> OrganizedSkills {
    OrganizedSkills(
        SkillCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let names: Vec<String> = skill_names(skills, category)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                (!names.is_empty()).then_some(SkillGroup {
                    category,
                    skills: names,
                })
            })
            .collect(),
    )
}

/// Produces a complete resume snapshot.
///
/// A summary the user wrote is kept as-is; otherwise one is generated, and a
/// failure there fails the whole call. Bullet enhancement never fails it.
pub async fn generate_resume(
    generator: &dyn TextGenerator,
    profile: &CareerProfile,
    template: TemplateName,
) -> Result<GeneratedResume, AppError> {
    let summary = async {
        match profile.personal_info.summary() {
            Some(own) => Ok(own.to_string()),
            None => generate_summary(generator, profile).await,
        }
    };
    let enhancement = enhance_work_experience(generator, &profile.work_experience);
    let (summary, outcomes) = futures::join!(summary, enhancement);
    let professional_summary = summary?;

    let degraded = outcomes.iter().filter(|o| o.is_degraded()).count();
    let work_experience: Vec<EnhancedExperience> = profile
        .work_experience
        .iter()
        .cloned()
        .zip(outcomes)
        .map(|(experience, outcome)| EnhancedExperience {
            experience,
            enhanced_description: outcome.into_inner(),
        })
        .collect();

    info!(
        "Generated resume for {} using {} template ({} entries, {} degraded)",
        profile.personal_info.full_name(),
        template.as_str(),
        work_experience.len(),
        degraded
    );

    Ok(GeneratedResume {
        personal_info: profile.personal_info.clone(),
        professional_summary,
        work_experience,
        education: profile.education.clone(),
        skills: organize_skills(&profile.skills),
        template,
        generated_at: Utc::now(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::generation::tone::Tone;
    use crate::llm_client::fake::FnGenerator;
    use crate::llm_client::{LlmError, ResponseFormat};
    use crate::models::profile::{EndDate, PersonalInfo};

    fn entry(title: &str) -> WorkExperience {
        WorkExperience {
            job_title: title.to_string(),
            company: "Initech".to_string(),
            location: String::new(),
            start_date: NaiveDate::from_ymd_opt(2019, 3, 1).unwrap(),
            end_date: EndDate::On(NaiveDate::from_ymd_opt(2021, 6, 30).unwrap()),
            description: format!("{title} raw description"),
        }
    }

    fn profile(entries: Vec<WorkExperience>) -> CareerProfile {
        CareerProfile {
            personal_info: PersonalInfo {
                first_name: "Sam".to_string(),
                last_name: "Lee".to_string(),
                email: "sam@example.com".to_string(),
                ..PersonalInfo::default()
            },
            work_experience: entries,
            education: vec![],
            skills: vec![
                SkillEntry::new("Python", SkillCategory::Technical),
                SkillEntry::new("English", SkillCategory::Language),
            ],
        }
    }

    fn failure() -> LlmError {
        LlmError::Api {
            status: 503,
            message: "overloaded".to_string(),
        }
    }

    fn job_info() -> JobInfo {
        JobInfo {
            company_name: "Hooli".to_string(),
            job_title: "Data Engineer".to_string(),
            hiring_manager: Some("Gavin".to_string()),
            company_info: None,
            job_description: "Build pipelines".to_string(),
            tone: Tone::Creative,
        }
    }

    #[tokio::test]
    async fn test_second_of_three_enhancements_fails_in_isolation() {
        let generator = FnGenerator(|req: &GenerationRequest| {
            if req.prompt.contains("Job Title: Second") {
                Err(failure())
            } else {
                Ok(r#"{"bullet_points": ["Led launches", "Cut costs"]}"#.to_string())
            }
        });
        let entries = vec![entry("First"), entry("Second"), entry("Third")];

        let outcomes = enhance_work_experience(&generator, &entries).await;

        assert_eq!(outcomes.len(), 3);
        assert!(!outcomes[0].is_degraded());
        assert!(outcomes[1].is_degraded());
        assert!(!outcomes[2].is_degraded());
        assert_eq!(outcomes[1].value(), &vec!["Second raw description".to_string()]);
        assert_eq!(outcomes[2].value().len(), 2);
    }

    #[tokio::test]
    async fn test_enhancement_with_unparseable_reply_falls_back() {
        let generator = FnGenerator(|_: &GenerationRequest| Ok("Sure! Here you go".to_string()));
        let outcome = enhance_experience(&generator, &entry("Dev")).await;
        assert!(outcome.is_degraded());
        assert_eq!(outcome.into_inner(), vec!["Dev raw description".to_string()]);
    }

    #[tokio::test]
    async fn test_enhancement_with_empty_list_falls_back() {
        let generator =
            FnGenerator(|_: &GenerationRequest| Ok(r#"{"bullet_points": ["  "]}"#.to_string()));
        let outcome = enhance_experience(&generator, &entry("Dev")).await;
        assert!(outcome.is_degraded());
    }

    #[tokio::test]
    async fn test_enhancement_requests_json_mode() {
        let generator = FnGenerator(|req: &GenerationRequest| {
            assert_eq!(req.format, ResponseFormat::Json);
            Ok(r#"{"bullet_points": ["Did it"]}"#.to_string())
        });
        let outcome = enhance_experience(&generator, &entry("Dev")).await;
        assert_eq!(outcome, Degradable::generated(vec!["Did it".to_string()]));
    }

    #[test]
    fn test_organize_skills_omits_empty_categories() {
        let organized = organize_skills(&profile(vec![]).skills);
        let value = serde_json::to_value(&organized).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"Technical Skills": ["Python"], "Languages": ["English"]})
        );
        assert!(organized.get(SkillCategory::Soft).is_none());
        assert!(organized.get(SkillCategory::Certification).is_none());
    }

    #[tokio::test]
    async fn test_summary_failure_is_fatal() {
        let generator = FnGenerator(|_: &GenerationRequest| Err(failure()));
        let result = generate_summary(&generator, &profile(vec![])).await;
        assert!(matches!(result, Err(AppError::Generation(_))));
    }

    #[tokio::test]
    async fn test_blank_summary_is_fatal() {
        let generator = FnGenerator(|_: &GenerationRequest| Ok("   ".to_string()));
        let result = generate_summary(&generator, &profile(vec![])).await;
        assert!(matches!(result, Err(AppError::Generation(_))));
    }

    #[tokio::test]
    async fn test_resume_keeps_user_summary_and_survives_failed_enhancement() {
        let generator = FnGenerator(|req: &GenerationRequest| {
            assert_eq!(req.format, ResponseFormat::Json, "summary must not be generated");
            Err(failure())
        });
        let mut profile = profile(vec![entry("Analyst")]);
        profile.personal_info.professional_summary = Some("My own words.".to_string());

        let resume = generate_resume(&generator, &profile, TemplateName::Modern)
            .await
            .unwrap();

        assert_eq!(resume.professional_summary, "My own words.");
        assert_eq!(
            resume.work_experience[0].enhanced_description,
            vec!["Analyst raw description".to_string()]
        );
        assert_eq!(resume.template, TemplateName::Modern);
    }

    #[tokio::test]
    async fn test_resume_without_experience_makes_one_call() {
        let generator = FnGenerator(|req: &GenerationRequest| {
            assert!(req.prompt.contains("No formal work experience yet"));
            Ok("Recent graduate ready to contribute.".to_string())
        });
        let resume = generate_resume(&generator, &profile(vec![]), TemplateName::Professional)
            .await
            .unwrap();
        assert!(resume.work_experience.is_empty());
        assert_eq!(resume.professional_summary, "Recent graduate ready to contribute.");
    }

    #[tokio::test]
    async fn test_cover_letter_keeps_job_info() {
        let generator = FnGenerator(|req: &GenerationRequest| {
            assert!(req.prompt.contains("Hiring Manager: Gavin"));
            Ok("Dear Gavin,\n\nI am writing...".to_string())
        });
        let letter = generate_cover_letter(&generator, &profile(vec![]), job_info())
            .await
            .unwrap();
        assert!(letter.content.starts_with("Dear Gavin"));
        assert_eq!(letter.job_info.company_name, "Hooli");
    }

    #[tokio::test]
    async fn test_cover_letter_failure_is_fatal() {
        let generator = FnGenerator(|_: &GenerationRequest| Err(LlmError::EmptyContent));
        let result = generate_cover_letter(&generator, &profile(vec![]), job_info()).await;
        assert!(matches!(result, Err(AppError::Generation(_))));
    }

    #[tokio::test]
    async fn test_job_match_failure_is_neutral() {
        let generator = FnGenerator(|_: &GenerationRequest| Err(failure()));
        let outcome = analyze_job_match(&generator, &profile(vec![]), "Rust").await;
        assert!(outcome.is_degraded());
        let analysis = outcome.into_inner();
        assert_eq!(analysis.match_percentage, 50);
        assert!(analysis.recommendations[0].starts_with("Analysis failed"));
    }

    #[tokio::test]
    async fn test_job_match_score_is_clamped() {
        let generator = FnGenerator(|_: &GenerationRequest| {
            Ok(r#"{"match_percentage": 130.4, "matching_skills": ["Python"]}"#.to_string())
        });
        let outcome = analyze_job_match(&generator, &profile(vec![]), "Python").await;
        let analysis = outcome.into_inner();
        assert_eq!(analysis.match_percentage, 100);
        assert_eq!(analysis.matching_skills, vec!["Python".to_string()]);
    }

    #[tokio::test]
    async fn test_suggestions_fall_back_to_single_note() {
        let generator = FnGenerator(|_: &GenerationRequest| Ok("[]".to_string()));
        let resume = GeneratedResume {
            personal_info: PersonalInfo::default(),
            professional_summary: "Summary".to_string(),
            work_experience: vec![],
            education: vec![],
            skills: OrganizedSkills::default(),
            template: TemplateName::Professional,
            generated_at: Utc::now(),
        };
        let outcome = suggest_improvements(&generator, &resume, "Go").await;
        assert!(outcome.is_degraded());
        let notes = outcome.into_inner();
        assert_eq!(notes.len(), 1);
        assert!(notes[0].starts_with("Unable to generate suggestions"));
    }

    #[tokio::test]
    async fn test_customize_failure_returns_original_letter() {
        let generator = FnGenerator(|_: &GenerationRequest| Err(failure()));
        let outcome = customize_for_industry(&generator, "Dear team,", "Healthcare").await;
        assert!(outcome.is_degraded());
        assert_eq!(outcome.into_inner(), "Dear team,");
    }
}
