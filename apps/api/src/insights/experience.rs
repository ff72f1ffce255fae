//! Work-history arithmetic: date ranges, durations and seniority level.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::profile::{EndDate, WorkExperience};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    EntryLevel,
    MidLevel,
    SeniorLevel,
    Executive,
}

/// Whole months between two dates, ignoring days. Never negative.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    months.max(0) as u32
}

/// "January 2020 - Present" / "January 2020 - March 2023".
pub fn format_date_range(start: NaiveDate, end: EndDate) -> String {
    let start = start.format("%B %Y");
    match end {
        EndDate::Present => format!("{start} - Present"),
        EndDate::On(date) => format!("{start} - {}", date.format("%B %Y")),
    }
}

fn plural(n: u32, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// Human-readable length of a position, e.g. "2 years, 3 months".
pub fn experience_duration(start: NaiveDate, end: EndDate, today: NaiveDate) -> String {
    let months = months_between(start, end.resolve(today));
    if months < 12 {
        return plural(months, "month");
    }
    let (years, rest) = (months / 12, months % 12);
    if rest == 0 {
        plural(years, "year")
    } else {
        format!("{}, {}", plural(years, "year"), plural(rest, "month"))
    }
}

/// Seniority bucket from the summed length of all positions.
pub fn experience_level(entries: &[WorkExperience], today: NaiveDate) -> ExperienceLevel {
    let total_months: u32 = entries
        .iter()
        .map(|e| months_between(e.start_date, e.end_date.resolve(today)))
        .sum();
    let years = total_months as f64 / 12.0;

    if years < 2.0 {
        ExperienceLevel::EntryLevel
    } else if years < 5.0 {
        ExperienceLevel::MidLevel
    } else if years < 10.0 {
        ExperienceLevel::SeniorLevel
    } else {
        ExperienceLevel::Executive
    }
}
