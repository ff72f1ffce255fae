//! Career profile records entered by the user: personal info, work history,
//! education and skills.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Date format used for every stored date in the profile and in exports.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Contact details and optional links. Replaced wholesale on every save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// User-written summary. When absent, resume generation asks the model for one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_summary: Option<String>,
}

impl PersonalInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Summary text, if the user wrote a non-blank one.
    pub fn summary(&self) -> Option<&str> {
        self.professional_summary
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Labelled links in display order, skipping blank ones.
    pub fn links(&self) -> Vec<(&'static str, &str)> {
        [
            ("LinkedIn", &self.linkedin),
            ("GitHub", &self.github),
            ("Website", &self.website),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (label, v))
        })
        .collect()
    }
}

/// End of a work-experience period. `Present` marks the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndDate {
    Present,
    On(NaiveDate),
}

impl EndDate {
    #[cfg(test)]
    pub fn is_present(&self) -> bool {
        matches!(self, EndDate::Present)
    }

    /// Resolves `Present` against `today`.
    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match self {
            EndDate::Present => today,
            EndDate::On(date) => *date,
        }
    }
}

impl fmt::Display for EndDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndDate::Present => f.write_str("Present"),
            EndDate::On(date) => write!(f, "{}", date.format(DATE_FORMAT)),
        }
    }
}

impl Serialize for EndDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EndDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("present") || trimmed.eq_ignore_ascii_case("current") {
            return Ok(EndDate::Present);
        }
        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(EndDate::On)
            .map_err(|e| {
                serde::de::Error::custom(format!(
                    "end_date must be 'Present' or YYYY-MM-DD, got '{trimmed}': {e}"
                ))
            })
    }
}

/// One position in the work history. Entries are independent of each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub job_title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: EndDate,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    #[serde(default)]
    pub major: String,
    pub school: String,
    #[serde(default)]
    pub location: String,
    pub graduation_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<String>,
}

/// The closed set of skill categories. Unknown labels are rejected when
/// deserializing, so downstream code never sees an untagged skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillCategory {
    Technical,
    Soft,
    Language,
    Certification,
}

impl SkillCategory {
    /// All categories in resume display order.
    pub const ALL: [SkillCategory; 4] = [
        SkillCategory::Technical,
        SkillCategory::Soft,
        SkillCategory::Language,
        SkillCategory::Certification,
    ];

    /// Section heading used on the rendered resume.
    pub fn heading(&self) -> &'static str {
        match self {
            SkillCategory::Technical => "Technical Skills",
            SkillCategory::Soft => "Soft Skills",
            SkillCategory::Language => "Languages",
            SkillCategory::Certification => "Certifications",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    pub category: SkillCategory,
}

impl SkillEntry {
    pub fn new(name: impl Into<String>, category: SkillCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

/// Names of all skills in `category`, in entry order.
pub fn skill_names(skills: &[SkillEntry], category: SkillCategory) -> Vec<&str> {
    skills
        .iter()
        .filter(|s| s.category == category)
        .map(|s| s.name.as_str())
        .collect()
}

/// Everything the user has entered, as one borrowable snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CareerProfile {
    pub personal_info: PersonalInfo,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<SkillEntry>,
}

impl CareerProfile {
    pub fn has_work_experience(&self) -> bool {
        !self.work_experience.is_empty()
    }
}
