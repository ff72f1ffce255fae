//! Tone calibration — maps the user's chosen cover-letter tone to a fixed
//! instruction sentence.
//!
//! Unknown tone labels resolve to `Professional`, both when parsing request
//! bodies and when looking up instructions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tone {
    #[default]
    Professional,
    Enthusiastic,
    Conservative,
    Creative,
}

impl Tone {
    pub const ALL: [Tone; 4] = [
        Tone::Professional,
        Tone::Enthusiastic,
        Tone::Conservative,
        Tone::Creative,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Enthusiastic => "Enthusiastic",
            Tone::Conservative => "Conservative",
            Tone::Creative => "Creative",
        }
    }

    /// Case-insensitive parse with `Professional` as the fallback.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(label))
            .unwrap_or_default()
    }

    /// The one instruction sentence sent to the model for this tone.
    pub fn instructions(&self) -> &'static str {
        match self {
            Tone::Professional => {
                "Use a formal, professional tone. Be respectful and straightforward."
            }
            Tone::Enthusiastic => {
                "Show genuine excitement about the role and company. \
                 Use energetic but professional language."
            }
            Tone::Conservative => {
                "Use very formal language. Be traditional and respectful in approach."
            }
            Tone::Creative => {
                "Show personality while remaining professional. \
                 Use engaging language that demonstrates creativity."
            }
        }
    }
}

impl From<String> for Tone {
    fn from(value: String) -> Self {
        Tone::from_label(&value)
    }
}

impl From<Tone> for String {
    fn from(value: Tone) -> Self {
        value.label().to_string()
    }
}
