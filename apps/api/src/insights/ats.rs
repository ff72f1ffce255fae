//! Heuristic ATS compatibility check over the plain text of a document.

use serde::Serialize;

const PROBLEMATIC_GLYPHS: &[char] = &['•', '→', '★', '◆', '▪', '▫'];
const REQUIRED_HEADERS: &[&str] = &["experience", "education", "skills"];
const MAX_LINE_CHARS: usize = 100;
const PENALTY_PER_ISSUE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtsReport {
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
    pub ats_score: u32,
}

pub fn check_ats_compatibility(text: &str) -> AtsReport {
    let mut issues = Vec::new();
    let mut recommendations = Vec::new();

    for glyph in PROBLEMATIC_GLYPHS {
        if text.contains(*glyph) {
            issues.push(format!(
                "Contains special character '{glyph}' that might not be ATS-friendly"
            ));
            recommendations.push(format!(
                "Replace '{glyph}' with standard bullet points or dashes"
            ));
        }
    }

    if text.lines().any(|line| line.chars().count() > MAX_LINE_CHARS) {
        issues.push("Some lines are very long and might not parse well".to_string());
        recommendations
            .push("Break long sentences into shorter, more digestible bullet points".to_string());
    }

    let lowered = text.to_lowercase();
    let missing: Vec<&str> = REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|h| !lowered.contains(h))
        .collect();
    if !missing.is_empty() {
        issues.push(format!(
            "Missing standard section headers: {}",
            missing.join(", ")
        ));
        recommendations.push("Include standard section headers for better ATS parsing".to_string());
    }

    let ats_score = 100u32.saturating_sub(issues.len() as u32 * PENALTY_PER_ISSUE);

    AtsReport {
        issues,
        recommendations,
        ats_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_document_scores_100() {
        let text = "EXPERIENCE\n- Built things\nEDUCATION\nBSc\nSKILLS\nRust";
        let report = check_ats_compatibility(text);
        assert!(report.issues.is_empty());
        assert_eq!(report.ats_score, 100);
    }

    #[test]
    fn test_glyphs_and_missing_headers_are_penalized() {
        let text = "• Built things ★";
        let report = check_ats_compatibility(text);
        // two glyphs + missing headers
        assert_eq!(report.issues.len(), 3);
        assert_eq!(report.ats_score, 70);
        assert!(report.issues[2].contains("experience, education, skills"));
    }

    #[test]
    fn test_long_lines_flagged_once() {
        let long = "x".repeat(150);
        let text = format!("experience education skills\n{long}\n{long}");
        let report = check_ats_compatibility(&text);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.ats_score, 90);
    }
}
