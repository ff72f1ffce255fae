//! Outcome of a generation call that has a documented fallback.

use serde::Serialize;

/// Either the model's result or the fallback that replaced it.
///
/// Calls returning this never fail; calls without a fallback return
/// `Result<T, AppError>` instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Degradable<T> {
    Generated { value: T },
    Degraded { fallback: T, reason: String },
}

impl<T> Degradable<T> {
    pub fn generated(value: T) -> Self {
        Degradable::Generated { value }
    }

    pub fn degraded(fallback: T, reason: impl Into<String>) -> Self {
        Degradable::Degraded {
            fallback,
            reason: reason.into(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Degradable::Degraded { .. })
    }

    #[cfg(test)]
    pub fn value(&self) -> &T {
        match self {
            Degradable::Generated { value } => value,
            Degradable::Degraded { fallback, .. } => fallback,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Degradable::Generated { value } => value,
            Degradable::Degraded { fallback, .. } => fallback,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Degradable::Generated { .. } => None,
            Degradable::Degraded { reason, .. } => Some(reason),
        }
    }
}
