//! JSON export/import of a session's career data.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::errors::AppError;
use crate::models::profile::CareerProfile;

/// Checked in this order; the first missing one is reported.
pub const REQUIRED_FIELDS: [&str; 4] = ["personal_info", "work_experience", "education", "skills"];

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid JSON format")]
    InvalidJson,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for field '{field}': {source}")]
    InvalidField {
        field: &'static str,
        source: serde_json::Error,
    },
}

impl From<ImportError> for AppError {
    fn from(e: ImportError) -> Self {
        AppError::Import(e.to_string())
    }
}

#[derive(Serialize)]
struct ExportDocument<'a> {
    #[serde(flatten)]
    profile: &'a CareerProfile,
    export_date: String,
}

/// Pretty-printed export with an `export_date` stamp.
pub fn export_json(profile: &CareerProfile, now: DateTime<Utc>) -> Result<String, AppError> {
    let document = ExportDocument {
        profile,
        export_date: now.to_rfc3339(),
    };
    serde_json::to_string_pretty(&document)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize export: {e}")))
}

fn take_field<T: DeserializeOwned>(
    object: &mut Map<String, Value>,
    field: &'static str,
) -> Result<T, ImportError> {
    let value = object.remove(field).ok_or(ImportError::MissingField(field))?;
    serde_json::from_value(value).map_err(|source| ImportError::InvalidField { field, source })
}

/// Parses an export back into a profile. Nothing is applied unless every
/// field parses, so a failed import leaves the caller's data untouched.
pub fn import_json(raw: &str) -> Result<CareerProfile, ImportError> {
    let value: Value = serde_json::from_str(raw).map_err(|_| ImportError::InvalidJson)?;
    let Value::Object(mut object) = value else {
        return Err(ImportError::InvalidJson);
    };

    if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !object.contains_key(**f)) {
        return Err(ImportError::MissingField(*missing));
    }

    Ok(CareerProfile {
        personal_info: take_field(&mut object, "personal_info")?,
        work_experience: take_field(&mut object, "work_experience")?,
        education: take_field(&mut object, "education")?,
        skills: take_field(&mut object, "skills")?,
    })
}
