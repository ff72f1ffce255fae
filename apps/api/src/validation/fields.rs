//! Pure single-field validators and formatters. No normalization, no side effects.

use std::sync::LazyLock;

use regex::Regex;

static RE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.%+-]+@[\w.-]+\.[A-Za-z]{2,}$").unwrap());

static RE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://[-\w.]+(?::[0-9]+)?(?:/[-\w/.~%]*(?:\?[-\w&=%.+]*)?(?:#[-\w.]*)?)?$",
    )
    .unwrap()
});

static RE_FILENAME_FORBIDDEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const MAX_FILENAME_LEN: usize = 100;

pub fn validate_email(email: &str) -> bool {
    RE_EMAIL.is_match(email)
}

fn digits_only(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Accepts US numbers (10 digits, or 11 with a leading 1) and any 7–15 digit
/// international number. Punctuation and spaces are ignored.
pub fn validate_phone(phone: &str) -> bool {
    let digits = digits_only(phone);
    match digits.len() {
        10 => true,
        11 if digits.starts_with('1') => true,
        n => (7..=15).contains(&n),
    }
}

/// Formats US numbers for display; anything else is returned unchanged.
pub fn format_phone(phone: &str) -> String {
    let d = digits_only(phone);
    match d.len() {
        10 => format!("({}) {}-{}", &d[..3], &d[3..6], &d[6..]),
        11 if d.starts_with('1') => format!("+1 ({}) {}-{}", &d[1..4], &d[4..7], &d[7..]),
        _ => phone.to_string(),
    }
}

/// Empty is valid (links are optional). A missing scheme is treated as `https://`.
pub fn validate_url(url: &str) -> bool {
    if url.is_empty() {
        return true;
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        RE_URL.is_match(url)
    } else {
        RE_URL.is_match(&format!("https://{url}"))
    }
}

/// Makes a string safe to use as a file name.
pub fn sanitize_filename(name: &str) -> String {
    let stripped = RE_FILENAME_FORBIDDEN.replace_all(name, "");
    let underscored = RE_WHITESPACE.replace_all(&stripped, "_");
    underscored
        .trim_matches('.')
        .chars()
        .take(MAX_FILENAME_LEN)
        .collect()
}
