// Input validation for the profile forms.
// Field validators are pure predicates; form validators collect per-field errors.

pub mod fields;
pub mod forms;

pub use fields::{format_phone, sanitize_filename, validate_email, validate_phone, validate_url};
pub use forms::{
    normalize_personal_info, validate_education, validate_personal_info,
    validate_work_experience, FieldError,
};
