//! Read-only guidance derived from the template catalog: which templates suit
//! an industry, how emphasis shifts with experience level, ATS tips, and a
//! section check of a generated resume against its template.

use serde::Serialize;

use crate::insights::experience::ExperienceLevel;
use crate::models::documents::GeneratedResume;
use crate::models::profile::SkillCategory;
use crate::templates::{template_structure, TemplateName};

use TemplateName::*;

const INDUSTRY_TEMPLATES: &[(&str, &[TemplateName])] = &[
    ("Technology", &[Technical, Modern, Professional]),
    ("Finance", &[Professional, Executive, Modern]),
    ("Healthcare", &[Professional, Executive, Technical]),
    ("Legal", &[Professional, Executive]),
    ("Education", &[Professional, Modern]),
    ("Marketing", &[Modern, Creative, Professional]),
    ("Design", &[Creative, Modern, Professional]),
    ("Engineering", &[Technical, Professional, Modern]),
    ("Consulting", &[Executive, Professional, Modern]),
    ("Startups", &[Modern, Technical, Creative]),
    ("Non-profit", &[Professional, Modern]),
    ("Government", &[Professional, Executive]),
    ("Manufacturing", &[Professional, Technical]),
    ("Retail", &[Professional, Modern]),
    ("Media", &[Creative, Modern, Professional]),
];

/// Industries the catalog knows about, in table order.
pub fn known_industries() -> Vec<&'static str> {
    INDUSTRY_TEMPLATES.iter().map(|(name, _)| *name).collect()
}

/// Recommended templates for an industry (case-insensitive). Unknown
/// industries get the Professional template alone.
pub fn recommend_for_industry(industry: &str) -> Vec<TemplateName> {
    let industry = industry.trim();
    INDUSTRY_TEMPLATES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(industry))
        .map(|(_, templates)| templates.to_vec())
        .unwrap_or_else(|| vec![Professional])
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelCustomization {
    pub emphasis: &'static [&'static str],
    pub de_emphasize: &'static [&'static str],
    pub sections_to_add: &'static [&'static str],
    pub summary_style: &'static str,
}

pub fn customize_for_experience_level(level: ExperienceLevel) -> LevelCustomization {
    match level {
        ExperienceLevel::EntryLevel => LevelCustomization {
            emphasis: &["education", "skills", "projects", "internships"],
            de_emphasize: &["executive_summary", "leadership_achievements"],
            sections_to_add: &["relevant_coursework", "academic_projects"],
            summary_style: "objective_focused",
        },
        ExperienceLevel::MidLevel => LevelCustomization {
            emphasis: &["work_experience", "skills", "achievements"],
            de_emphasize: &["academic_projects", "coursework"],
            sections_to_add: &["professional_development"],
            summary_style: "experience_focused",
        },
        ExperienceLevel::SeniorLevel => LevelCustomization {
            emphasis: &[
                "leadership_experience",
                "strategic_achievements",
                "team_management",
            ],
            de_emphasize: &["technical_details", "individual_contributions"],
            sections_to_add: &["leadership_achievements", "strategic_initiatives"],
            summary_style: "leadership_focused",
        },
        ExperienceLevel::Executive => LevelCustomization {
            emphasis: &[
                "strategic_vision",
                "organizational_impact",
                "board_experience",
            ],
            de_emphasize: &["technical_skills", "day_to_day_tasks"],
            sections_to_add: &[
                "board_positions",
                "speaking_engagements",
                "thought_leadership",
            ],
            summary_style: "executive_focused",
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtsTips {
    pub formatting: &'static [&'static str],
    pub content: &'static [&'static str],
    pub sections: &'static [&'static str],
    pub keywords: &'static [&'static str],
}

pub const ATS_TIPS: AtsTips = AtsTips {
    formatting: &[
        "Use standard fonts (Arial, Calibri, Times New Roman)",
        "Avoid images, graphics, and complex formatting",
        "Use standard section headers (Experience, Education, Skills)",
        "Save as both PDF and Word formats",
        "Avoid tables, text boxes, and columns",
        "Use bullet points for easy scanning",
    ],
    content: &[
        "Include relevant keywords from job descriptions",
        "Use standard job titles and industry terminology",
        "Spell out acronyms (e.g., 'Search Engine Optimization (SEO)')",
        "Include both hard and soft skills",
        "Use action verbs to start bullet points",
        "Quantify achievements with numbers and percentages",
    ],
    sections: &[
        "Always include Contact Information",
        "Professional Summary or Objective",
        "Work Experience with dates",
        "Education with degrees and dates",
        "Relevant Skills section",
        "Certifications if applicable",
    ],
    keywords: &[
        "Research job-specific keywords",
        "Include industry-standard terminology",
        "Match skills mentioned in job postings",
        "Use both spelled-out and abbreviated versions",
        "Include relevant software and tools",
        "Add location-specific keywords if relevant",
    ],
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateCheck {
    pub valid: bool,
    pub missing_sections: Vec<&'static str>,
    pub recommendations: Vec<&'static str>,
}

/// Section ids a generated resume actually fills.
fn present_sections(resume: &GeneratedResume) -> Vec<&'static str> {
    let mut present = vec!["contact_info"];
    if !resume.professional_summary.trim().is_empty() {
        present.extend([
            "professional_summary",
            "executive_summary",
            "technical_summary",
            "creative_summary",
        ]);
    }
    if !resume.work_experience.is_empty() {
        present.extend(["work_experience", "professional_experience"]);
    }
    if !resume.education.is_empty() {
        present.push("education");
    }
    if !resume.skills.is_empty() {
        present.extend(["skills", "core_skills", "core_competencies"]);
    }
    if resume.skills.get(SkillCategory::Technical).is_some() {
        present.extend(["technical_skills", "programming_languages"]);
    }
    if resume.skills.get(SkillCategory::Certification).is_some() {
        present.push("certifications");
    }
    present
}

/// Compares a resume with the section list of its template.
pub fn check_against_template(resume: &GeneratedResume) -> TemplateCheck {
    let present = present_sections(resume);
    let missing_sections: Vec<&'static str> = template_structure(resume.template)
        .sections
        .iter()
        .copied()
        .filter(|s| !present.contains(s))
        .collect();

    let recommendations = match resume.template {
        Technical => vec![
            "Add detailed technical skills section",
            "Include relevant projects or portfolio",
        ],
        Executive => vec![
            "Highlight leadership and management experience",
            "Include strategic accomplishments and business impact",
        ],
        Creative => vec![
            "Add portfolio links or creative work samples",
            "Showcase creative software and design skills",
        ],
        Professional | Modern => vec![],
    }
    .into_iter()
    .filter(|_| !missing_sections.is_empty())
    .collect();

    TemplateCheck {
        valid: missing_sections.is_empty(),
        missing_sections,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_technology_prefers_technical_template() {
        assert_eq!(
            recommend_for_industry("technology"),
            vec![Technical, Modern, Professional]
        );
    }

    #[test]
    fn test_unknown_industry_gets_professional() {
        assert_eq!(recommend_for_industry("Space Mining"), vec![Professional]);
    }

    #[test]
    fn test_known_industries_listed_in_order() {
        let industries = known_industries();
        assert_eq!(industries.first(), Some(&"Technology"));
        assert_eq!(industries.len(), 15);
    }

    #[test]
    fn test_entry_level_emphasizes_education() {
        let c = customize_for_experience_level(ExperienceLevel::EntryLevel);
        assert_eq!(c.emphasis[0], "education");
        assert_eq!(c.summary_style, "objective_focused");
    }
}
