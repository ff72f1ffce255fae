//! Template registry — the static catalog of resume layout/style presets.
//!
//! Every lookup is a pure function over `'static` tables. Unknown template
//! names resolve to `Professional`.

pub mod recommendations;

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::FontFamily;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TemplateName {
    #[default]
    Professional,
    Modern,
    Executive,
    Technical,
    Creative,
}

impl TemplateName {
    pub const ALL: [TemplateName; 5] = [
        TemplateName::Professional,
        TemplateName::Modern,
        TemplateName::Executive,
        TemplateName::Technical,
        TemplateName::Creative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateName::Professional => "Professional",
            TemplateName::Modern => "Modern",
            TemplateName::Executive => "Executive",
            TemplateName::Technical => "Technical",
            TemplateName::Creative => "Creative",
        }
    }

    /// Case-insensitive lookup. Unknown names fall back to `Professional`.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
            .unwrap_or_default()
    }
}

impl From<String> for TemplateName {
    fn from(value: String) -> Self {
        Self::from_name(&value)
    }
}

impl From<TemplateName> for String {
    fn from(value: TemplateName) -> Self {
        value.as_str().to_string()
    }
}

/// An sRGB colour with 0–255 channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Channels scaled to 0.0–1.0, as PDF colour operators expect.
    pub fn unit(&self) -> [f32; 3] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        ]
    }

    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Formatting {
    /// Display name of the typeface the preset asks for.
    pub font: &'static str,
    /// PDF base-14 family used to render it.
    pub family: FontFamily,
    pub header_color: Rgb,
    pub accent_color: Rgb,
    pub layout: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateInfo {
    pub name: TemplateName,
    pub description: &'static str,
    pub style: &'static str,
    pub best_for: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateStructure {
    pub sections: &'static [&'static str],
    pub formatting: Formatting,
}

/// Full catalog entry: description plus structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    #[serde(flatten)]
    pub info: TemplateInfo,
    #[serde(flatten)]
    pub structure: TemplateStructure,
}

pub fn template_info(name: TemplateName) -> TemplateInfo {
    match name {
        TemplateName::Professional => TemplateInfo {
            name,
            description: "Clean, traditional layout perfect for corporate environments and \
                established industries. Features clear section headers, consistent formatting, \
                and ATS-friendly structure.",
            style: "traditional",
            best_for: &["Corporate", "Finance", "Legal", "Healthcare", "Government"],
        },
        TemplateName::Modern => TemplateInfo {
            name,
            description: "Contemporary design with subtle visual elements. Balances \
                professionalism with modern aesthetics. Great for tech, marketing, and creative \
                industries.",
            style: "contemporary",
            best_for: &["Technology", "Marketing", "Design", "Startups", "Media"],
        },
        TemplateName::Executive => TemplateInfo {
            name,
            description: "Sophisticated layout designed for senior-level positions. Emphasizes \
                leadership experience and strategic accomplishments with elegant formatting.",
            style: "executive",
            best_for: &[
                "Executive",
                "Management",
                "Consulting",
                "Investment",
                "Leadership roles",
            ],
        },
        TemplateName::Technical => TemplateInfo {
            name,
            description: "Structured format optimized for technical roles. Provides clear \
                sections for technical skills, projects, and certifications. Highly scannable \
                for ATS systems.",
            style: "technical",
            best_for: &[
                "Software Engineering",
                "Data Science",
                "DevOps",
                "Cybersecurity",
                "Engineering",
            ],
        },
        TemplateName::Creative => TemplateInfo {
            name,
            description: "Balanced creative design that maintains professionalism. Includes \
                space for portfolio links and creative achievements while staying ATS-compliant.",
            style: "creative",
            best_for: &[
                "Graphic Design",
                "UX/UI",
                "Content Creation",
                "Advertising",
                "Arts",
            ],
        },
    }
}

pub fn template_structure(name: TemplateName) -> TemplateStructure {
    match name {
        TemplateName::Professional => TemplateStructure {
            sections: &[
                "contact_info",
                "professional_summary",
                "work_experience",
                "education",
                "skills",
                "certifications",
            ],
            formatting: Formatting {
                font: "Arial",
                family: FontFamily::Helvetica,
                header_color: Rgb(0x2C, 0x3E, 0x50),
                accent_color: Rgb(0x34, 0x49, 0x5E),
                layout: "single_column",
            },
        },
        TemplateName::Modern => TemplateStructure {
            sections: &[
                "contact_info",
                "professional_summary",
                "technical_skills",
                "work_experience",
                "education",
                "projects",
            ],
            formatting: Formatting {
                font: "Calibri",
                family: FontFamily::Helvetica,
                header_color: Rgb(0x34, 0x98, 0xDB),
                accent_color: Rgb(0x29, 0x80, 0xB9),
                layout: "single_column",
            },
        },
        TemplateName::Executive => TemplateStructure {
            sections: &[
                "contact_info",
                "executive_summary",
                "core_competencies",
                "professional_experience",
                "leadership_achievements",
                "education",
                "board_positions",
            ],
            formatting: Formatting {
                font: "Times New Roman",
                family: FontFamily::Times,
                header_color: Rgb(0x1C, 0x28, 0x33),
                accent_color: Rgb(0x2C, 0x3E, 0x50),
                layout: "single_column",
            },
        },
        TemplateName::Technical => TemplateStructure {
            sections: &[
                "contact_info",
                "technical_summary",
                "technical_skills",
                "programming_languages",
                "work_experience",
                "projects",
                "education",
                "certifications",
            ],
            formatting: Formatting {
                font: "Arial",
                family: FontFamily::Helvetica,
                header_color: Rgb(0x16, 0xA0, 0x85),
                accent_color: Rgb(0x13, 0x8D, 0x75),
                layout: "single_column",
            },
        },
        TemplateName::Creative => TemplateStructure {
            sections: &[
                "contact_info",
                "creative_summary",
                "core_skills",
                "work_experience",
                "portfolio_highlights",
                "education",
                "awards",
            ],
            formatting: Formatting {
                font: "Helvetica",
                family: FontFamily::Helvetica,
                header_color: Rgb(0x8E, 0x44, 0xAD),
                accent_color: Rgb(0x7D, 0x3C, 0x98),
                layout: "single_column",
            },
        },
    }
}

/// Looks up a template by (possibly unknown) name.
pub fn get_template(name: &str) -> Template {
    let name = TemplateName::from_name(name);
    Template {
        info: template_info(name),
        structure: template_structure(name),
    }
}

/// The whole catalog in display order.
pub fn available_templates() -> Vec<Template> {
    TemplateName::ALL
        .into_iter()
        .map(|name| Template {
            info: template_info(name),
            structure: template_structure(name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_five_templates() {
        let names: Vec<&str> = available_templates()
            .iter()
            .map(|t| t.info.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Professional", "Modern", "Executive", "Technical", "Creative"]
        );
    }

    #[test]
    fn test_unknown_name_falls_back_to_professional() {
        assert_eq!(TemplateName::from_name("Brutalist"), TemplateName::Professional);
        assert_eq!(get_template("Brutalist"), get_template("Professional"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(TemplateName::from_name("  executive "), TemplateName::Executive);
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let first = serde_json::to_value(get_template("Modern")).unwrap();
        let second = serde_json::to_value(get_template("Modern")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_executive_uses_serif_family() {
        let structure = template_structure(TemplateName::Executive);
        assert_eq!(structure.formatting.family, FontFamily::Times);
        assert_eq!(structure.formatting.header_color.hex(), "#1C2833");
    }

    #[test]
    fn test_template_name_deserializes_with_fallback() {
        let name: TemplateName = serde_json::from_str("\"creative\"").unwrap();
        assert_eq!(name, TemplateName::Creative);
        let name: TemplateName = serde_json::from_str("\"unheard-of\"").unwrap();
        assert_eq!(name, TemplateName::Professional);
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"Professional\"");
    }
}
