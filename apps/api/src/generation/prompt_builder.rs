//! Prompt Builder — deterministic serialization of profile data and job
//! metadata into instruction blocks.
//!
//! Builders hold no state. Each one selects a bounded slice of the profile
//! and embeds structured parts (experience, education) as JSON so the model
//! can quote exact facts.

use serde::Serialize;

use crate::errors::AppError;
use crate::generation::prompts::{
    BULLETS_PROMPT_TEMPLATE, COVER_LETTER_PROMPT_TEMPLATE, CUSTOMIZE_PROMPT_TEMPLATE,
    JOB_MATCH_PROMPT_TEMPLATE, SUGGESTIONS_PROMPT_TEMPLATE, SUMMARY_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::{ATS_INSTRUCTION, GROUNDING_INSTRUCTION, JSON_ONLY_INSTRUCTION};
use crate::models::documents::{GeneratedResume, JobInfo};
use crate::models::profile::{skill_names, CareerProfile, SkillCategory, WorkExperience};

/// Cover letters only see the most recent positions.
pub const MAX_COVER_LETTER_EXPERIENCES: usize = 3;

/// Replaces `{key}` placeholders in one pass. Braces that do not name a
/// known key are copied through untouched.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substitution = after.find('}').and_then(|end| {
            let key = &after[..end];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (end, *value))
        });
        match substitution {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn to_json<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String, AppError> {
    serde_json::to_string(value)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize {what}: {e}")))
}

/// (a) Professional summary. Wording branches on whether any work history exists.
pub fn build_summary_prompt(profile: &CareerProfile) -> Result<String, AppError> {
    let has_experience = profile.has_work_experience();

    let (experience_context, summary_focus, first_point, last_point) = if has_experience {
        (
            "professional work experience",
            "years of experience and professional accomplishments",
            "Highlights years of experience and key accomplishments",
            "Keep it professional and achievement-focused",
        )
    } else {
        (
            "education, skills, and academic/personal projects",
            "educational background, technical skills, and potential",
            "Starts with educational level or recent graduate status",
            "Focus on potential, enthusiasm, and readiness to contribute",
        )
    };

    let work_experience = if has_experience {
        to_json(&profile.work_experience, "work experience")?
    } else {
        "No formal work experience yet".to_string()
    };
    let education = to_json(&profile.education, "education")?;
    let skills = skill_names(&profile.skills, SkillCategory::Technical).join(", ");

    Ok(fill_template(
        SUMMARY_PROMPT_TEMPLATE,
        &[
            ("experience_context", experience_context),
            ("summary_focus", summary_focus),
            ("work_experience", &work_experience),
            ("education", &education),
            ("skills", &skills),
            ("first_point", first_point),
            ("last_point", last_point),
            ("grounding_instruction", GROUNDING_INSTRUCTION),
        ],
    ))
}

/// (b) Bullet enhancement for one entry.
pub fn build_bullets_prompt(experience: &WorkExperience) -> String {
    fill_template(
        BULLETS_PROMPT_TEMPLATE,
        &[
            ("job_title", &experience.job_title),
            ("company", &experience.company),
            ("description", &experience.description),
            ("json_only_instruction", JSON_ONLY_INSTRUCTION),
        ],
    )
}

/// (c) Full cover letter. Uses at most the first three positions and the
/// first (latest) education entry.
pub fn build_cover_letter_prompt(
    profile: &CareerProfile,
    job: &JobInfo,
) -> Result<String, AppError> {
    let info = &profile.personal_info;
    let recent_experience: Vec<&WorkExperience> = profile
        .work_experience
        .iter()
        .take(MAX_COVER_LETTER_EXPERIENCES)
        .collect();

    let name = info.full_name();
    let work_experience = to_json(&recent_experience, "work experience")?;
    let technical_skills = skill_names(&profile.skills, SkillCategory::Technical).join(", ");
    let education = to_json(&profile.education.first(), "education")?;

    Ok(fill_template(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("name", &name),
            ("email", &info.email),
            ("location", &info.location),
            ("work_experience", &work_experience),
            ("technical_skills", &technical_skills),
            ("education", &education),
            ("company_name", &job.company_name),
            ("job_title", &job.job_title),
            ("hiring_manager", job.addressee()),
            ("company_info", job.company_info.as_deref().unwrap_or("")),
            ("job_description", &job.job_description),
            ("tone_instruction", job.tone.instructions()),
            ("grounding_instruction", GROUNDING_INSTRUCTION),
            ("ats_instruction", ATS_INSTRUCTION),
        ],
    ))
}

/// (d) Job match analysis over every skill and every experience description.
pub fn build_job_match_prompt(profile: &CareerProfile, job_description: &str) -> String {
    let skills = profile
        .skills
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let experience = profile
        .work_experience
        .iter()
        .map(|e| e.description.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    fill_template(
        JOB_MATCH_PROMPT_TEMPLATE,
        &[
            ("skills", &skills),
            ("experience", &experience),
            ("job_description", job_description),
            ("json_only_instruction", JSON_ONLY_INSTRUCTION),
        ],
    )
}

/// (e) Improvement suggestions for a generated resume.
pub fn build_suggestions_prompt(
    resume: &GeneratedResume,
    job_description: &str,
) -> Result<String, AppError> {
    let resume_json = to_json(resume, "resume")?;
    Ok(fill_template(
        SUGGESTIONS_PROMPT_TEMPLATE,
        &[
            ("resume_json", &resume_json),
            ("job_description", job_description),
            ("json_only_instruction", JSON_ONLY_INSTRUCTION),
        ],
    ))
}

/// (f) Industry customization of an existing letter.
pub fn build_customize_prompt(cover_letter: &str, industry: &str) -> String {
    fill_template(
        CUSTOMIZE_PROMPT_TEMPLATE,
        &[("industry", industry), ("cover_letter", cover_letter)],
    )
}
