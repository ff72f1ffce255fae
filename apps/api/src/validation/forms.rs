//! Form-level validation. A form is accepted only when every field passes;
//! the caller gets the full list of per-field problems otherwise.

use serde::Serialize;

use crate::models::profile::{EducationEntry, PersonalInfo, WorkExperience};
use crate::validation::fields::{validate_email, validate_phone, validate_url};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn require(errors: &mut Vec<FieldError>, field: &'static str, label: &str, value: &str) {
    if is_blank(value) {
        errors.push(FieldError::new(field, format!("{label} is required")));
    }
}

pub fn validate_personal_info(info: &PersonalInfo) -> Vec<FieldError> {
    let mut errors = Vec::new();

    require(&mut errors, "first_name", "First name", &info.first_name);
    require(&mut errors, "last_name", "Last name", &info.last_name);

    if is_blank(&info.email) {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !validate_email(info.email.trim()) {
        errors.push(FieldError::new("email", "Please enter a valid email address"));
    }

    if !is_blank(&info.phone) && !validate_phone(&info.phone) {
        errors.push(FieldError::new("phone", "Please enter a valid phone number"));
    }

    let links = [
        ("linkedin", &info.linkedin),
        ("github", &info.github),
        ("website", &info.website),
    ];
    for (field, value) in links {
        if let Some(url) = value.as_deref().map(str::trim) {
            if !validate_url(url) {
                errors.push(FieldError::new(field, "Please enter a valid URL"));
            }
        }
    }

    errors
}

pub fn validate_work_experience(entry: &WorkExperience) -> Vec<FieldError> {
    let mut errors = Vec::new();
    require(&mut errors, "job_title", "Job title", &entry.job_title);
    require(&mut errors, "company", "Company", &entry.company);
    require(&mut errors, "description", "Job description", &entry.description);

    if let crate::models::profile::EndDate::On(end) = entry.end_date {
        if end < entry.start_date {
            errors.push(FieldError::new(
                "end_date",
                "End date cannot be before the start date",
            ));
        }
    }
    errors
}

pub fn validate_education(entry: &EducationEntry) -> Vec<FieldError> {
    let mut errors = Vec::new();
    require(&mut errors, "degree", "Degree", &entry.degree);
    require(&mut errors, "school", "School", &entry.school);
    errors
}

/// Trims every free-text field of the personal info form.
pub fn normalize_personal_info(info: PersonalInfo) -> PersonalInfo {
    fn opt(value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    PersonalInfo {
        first_name: info.first_name.trim().to_string(),
        last_name: info.last_name.trim().to_string(),
        email: info.email.trim().to_string(),
        phone: info.phone.trim().to_string(),
        location: info.location.trim().to_string(),
        linkedin: opt(info.linkedin),
        github: opt(info.github),
        website: opt(info.website),
        professional_summary: opt(info.professional_summary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::models::profile::EndDate;

    fn valid_info() -> PersonalInfo {
        PersonalInfo {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-123-4567".to_string(),
            location: "Austin, TX".to_string(),
            linkedin: Some("linkedin.com/in/janedoe".to_string()),
            ..PersonalInfo::default()
        }
    }

    #[test]
    fn test_valid_personal_info_has_no_errors() {
        assert!(validate_personal_info(&valid_info()).is_empty());
    }

    #[test]
    fn test_missing_names_and_bad_email_reported_per_field() {
        let info = PersonalInfo {
            first_name: " ".to_string(),
            last_name: String::new(),
            email: "nope".to_string(),
            ..valid_info()
        };
        let fields: Vec<&str> = validate_personal_info(&info)
            .iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["first_name", "last_name", "email"]);
    }

    #[test]
    fn test_phone_is_optional_but_checked_when_present() {
        let mut info = valid_info();
        info.phone = String::new();
        assert!(validate_personal_info(&info).is_empty());
        info.phone = "12".to_string();
        assert_eq!(validate_personal_info(&info)[0].field, "phone");
    }

    #[test]
    fn test_bad_link_is_reported() {
        let mut info = valid_info();
        info.website = Some("not a url".to_string());
        assert_eq!(validate_personal_info(&info)[0].field, "website");
    }

    #[test]
    fn test_work_experience_requires_core_fields() {
        let entry = WorkExperience {
            job_title: String::new(),
            company: "Acme".to_string(),
            location: String::new(),
            start_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            end_date: EndDate::On(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()),
            description: String::new(),
        };
        let fields: Vec<&str> = validate_work_experience(&entry)
            .iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["job_title", "description", "end_date"]);
    }

    #[test]
    fn test_education_requires_degree_and_school() {
        let entry = EducationEntry {
            degree: "BSc".to_string(),
            major: String::new(),
            school: String::new(),
            location: String::new(),
            graduation_date: NaiveDate::from_ymd_opt(2020, 5, 15).unwrap(),
            gpa: None,
            achievements: None,
        };
        assert_eq!(validate_education(&entry)[0].field, "school");
    }

    #[test]
    fn test_normalize_drops_blank_optionals() {
        let info = normalize_personal_info(PersonalInfo {
            first_name: "  Jane ".to_string(),
            github: Some("   ".to_string()),
            ..valid_info()
        });
        assert_eq!(info.first_name, "Jane");
        assert!(info.github.is_none());
    }
}
