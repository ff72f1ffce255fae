//! Generated artifacts. Each is an immutable snapshot: a new generation call
//! replaces the whole record, never a field of it.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::generation::tone::Tone;
use crate::models::profile::{EducationEntry, PersonalInfo, SkillCategory, WorkExperience};
use crate::templates::TemplateName;

/// A work-experience entry paired with its resume bullets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedExperience {
    #[serde(flatten)]
    pub experience: WorkExperience,
    /// Model-written bullets, or `[description]` when enhancement degraded.
    pub enhanced_description: Vec<String>,
}

impl EnhancedExperience {
    /// Bullets to print. Falls back to the raw description when the list is empty.
    pub fn bullets(&self) -> Vec<&str> {
        let bullets: Vec<&str> = self
            .enhanced_description
            .iter()
            .map(|b| b.trim())
            .filter(|b| !b.is_empty())
            .collect();
        if bullets.is_empty() {
            vec![self.experience.description.trim()]
        } else {
            bullets
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: SkillCategory,
    pub skills: Vec<String>,
}

/// Skills grouped by category in display order. Empty categories are never stored.
///
/// Serializes as a map from section heading to skill names, e.g.
/// `{"Technical Skills": ["Python"], "Languages": ["English"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizedSkills(pub Vec<SkillGroup>);

impl OrganizedSkills {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn groups(&self) -> &[SkillGroup] {
        &self.0
    }

    pub fn get(&self, category: SkillCategory) -> Option<&[String]> {
        self.0
            .iter()
            .find(|g| g.category == category)
            .map(|g| g.skills.as_slice())
    }
}

impl Serialize for OrganizedSkills {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for group in &self.0 {
            map.serialize_entry(group.category.heading(), &group.skills)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedResume {
    pub personal_info: PersonalInfo,
    pub professional_summary: String,
    pub work_experience: Vec<EnhancedExperience>,
    pub education: Vec<EducationEntry>,
    pub skills: OrganizedSkills,
    pub template: TemplateName,
    pub generated_at: DateTime<Utc>,
}

/// Job-specific input for cover letters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobInfo {
    pub company_name: String,
    pub job_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hiring_manager: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_info: Option<String>,
    pub job_description: String,
    #[serde(default)]
    pub tone: Tone,
}

impl JobInfo {
    pub fn addressee(&self) -> &str {
        self.hiring_manager
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Hiring Manager")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedCoverLetter {
    pub content: String,
    pub job_info: JobInfo,
    pub generated_at: DateTime<Utc>,
}

/// Candidate-vs-job analysis returned by the match call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatchAnalysis {
    pub match_percentage: u8,
    #[serde(default)]
    pub matching_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl JobMatchAnalysis {
    pub const NEUTRAL_SCORE: u8 = 50;

    /// The neutral result used when the analysis cannot be completed.
    pub fn neutral(note: impl Into<String>) -> Self {
        Self {
            match_percentage: Self::NEUTRAL_SCORE,
            matching_skills: vec![],
            missing_skills: vec![],
            strengths: vec![],
            recommendations: vec![note.into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    use crate::models::profile::EndDate;

    fn experience(description: &str) -> WorkExperience {
        WorkExperience {
            job_title: "Engineer".to_string(),
            company: "Acme".to_string(),
            location: String::new(),
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            end_date: EndDate::Present,
            description: description.to_string(),
        }
    }

    #[test]
    fn test_bullets_fall_back_to_description_when_empty() {
        let enhanced = EnhancedExperience {
            experience: experience("Kept the lights on"),
            enhanced_description: vec![],
        };
        assert_eq!(enhanced.bullets(), vec!["Kept the lights on"]);
    }

    #[test]
    fn test_organized_skills_serialize_as_heading_map() {
        let skills = OrganizedSkills(vec![
            SkillGroup {
                category: SkillCategory::Technical,
                skills: vec!["Python".to_string()],
            },
            SkillGroup {
                category: SkillCategory::Language,
                skills: vec!["English".to_string()],
            },
        ]);
        assert_eq!(
            serde_json::to_value(&skills).unwrap(),
            json!({"Technical Skills": ["Python"], "Languages": ["English"]})
        );
    }

    #[test]
    fn test_job_info_tone_defaults_to_professional() {
        let info: JobInfo = serde_json::from_value(json!({
            "company_name": "Acme",
            "job_title": "Engineer",
            "job_description": "Build things"
        }))
        .unwrap();
        assert_eq!(info.tone, Tone::Professional);
        assert_eq!(info.addressee(), "Hiring Manager");
    }

    #[test]
    fn test_neutral_match_uses_fifty_percent() {
        let analysis = JobMatchAnalysis::neutral("Analysis could not be completed.");
        assert_eq!(analysis.match_percentage, 50);
        assert_eq!(analysis.recommendations.len(), 1);
    }
}
