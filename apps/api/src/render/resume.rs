//! Resume layout.
//!
//! Header (name, contact, links) is always present. Every other section is
//! emitted only when it has content, in a fixed order: summary, experience,
//! education, skills.

use crate::insights::experience::format_date_range;
use crate::layout::{paginate, Align, Block, FontStyle, PageGeometry, TextStyle};
use crate::models::documents::GeneratedResume;
use crate::models::profile::PersonalInfo;
use crate::render::pdf::write_pdf;
use crate::render::RenderError;
use crate::templates::{template_structure, Formatting};
use crate::validation::format_phone;

pub const RESUME_MARGIN_IN: f32 = 0.75;
pub const SEPARATOR: &str = " • ";

pub const SUMMARY_HEADING: &str = "PROFESSIONAL SUMMARY";
pub const EXPERIENCE_HEADING: &str = "PROFESSIONAL EXPERIENCE";
pub const EDUCATION_HEADING: &str = "EDUCATION";
pub const SKILLS_HEADING: &str = "SKILLS";

const BLACK: [f32; 3] = [0.0, 0.0, 0.0];
const BODY_SIZE: f32 = 10.0;
const BULLET_INDENT: f32 = 10.0;
const ENTRY_GAP: f32 = 7.0;

/// Text styles for one template.
struct Styles {
    name: TextStyle,
    contact: TextStyle,
    heading: TextStyle,
    title: TextStyle,
    meta: TextStyle,
    body: TextStyle,
    rule_color: [f32; 3],
}

impl Styles {
    fn for_formatting(formatting: &Formatting) -> Self {
        let family = formatting.family;
        let header = formatting.header_color.unit();
        let face = |style: FontStyle, size: f32, color: [f32; 3]| TextStyle {
            family,
            style,
            size,
            color,
        };
        Self {
            name: face(FontStyle::Bold, 16.0, header),
            contact: face(FontStyle::Regular, BODY_SIZE, BLACK),
            heading: face(FontStyle::Bold, 12.0, header),
            title: face(FontStyle::Bold, 11.0, BLACK),
            meta: face(FontStyle::Italic, BODY_SIZE, BLACK),
            body: face(FontStyle::Regular, BODY_SIZE, BLACK),
            rule_color: formatting.accent_color.unit(),
        }
    }
}

fn paragraph(text: impl Into<String>, style: TextStyle) -> Block {
    Block::Paragraph {
        text: text.into(),
        style,
        align: Align::Left,
        space_before: 0.0,
        keep_with_next: 0.0,
    }
}

fn centered(text: impl Into<String>, style: TextStyle) -> Block {
    Block::Paragraph {
        text: text.into(),
        style,
        align: Align::Center,
        space_before: 0.0,
        keep_with_next: 0.0,
    }
}

fn section_heading(blocks: &mut Vec<Block>, title: &str, styles: &Styles) {
    blocks.push(Block::Paragraph {
        text: title.to_string(),
        style: styles.heading,
        align: Align::Left,
        space_before: 12.0,
        // heading + rule + first line of content
        keep_with_next: 3.0 + 2.0 * styles.title.line_height(),
    });
    blocks.push(Block::Rule {
        color: styles.rule_color,
        thickness: 0.8,
    });
    blocks.push(Block::Spacer(4.0));
}

/// "email • (555) 123-4567 • City", skipping blank parts.
pub fn contact_line(info: &PersonalInfo) -> String {
    let phone = format_phone(info.phone.trim());
    [info.email.trim(), phone.as_str(), info.location.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

pub fn links_line(info: &PersonalInfo) -> String {
    info.links()
        .into_iter()
        .map(|(label, url)| format!("{label}: {url}"))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

fn header_blocks(blocks: &mut Vec<Block>, info: &PersonalInfo, styles: &Styles) {
    let name = info.full_name();
    let name = if name.is_empty() {
        "Name Not Provided".to_string()
    } else {
        name
    };
    blocks.push(centered(name, styles.name));
    blocks.push(Block::Spacer(4.0));

    let contact = contact_line(info);
    if !contact.is_empty() {
        blocks.push(centered(contact, styles.contact));
    }
    let links = links_line(info);
    if !links.is_empty() {
        blocks.push(centered(links, styles.contact));
    }
    blocks.push(Block::Spacer(14.0));
}

/// The resume as layout blocks, styled by its template.
pub fn resume_blocks(resume: &GeneratedResume) -> Vec<Block> {
    let formatting = template_structure(resume.template).formatting;
    let styles = Styles::for_formatting(&formatting);
    let mut blocks = Vec::new();

    header_blocks(&mut blocks, &resume.personal_info, &styles);

    let summary = resume.professional_summary.trim();
    if !summary.is_empty() {
        section_heading(&mut blocks, SUMMARY_HEADING, &styles);
        blocks.push(paragraph(summary, styles.body));
        blocks.push(Block::Spacer(ENTRY_GAP));
    }

    if !resume.work_experience.is_empty() {
        section_heading(&mut blocks, EXPERIENCE_HEADING, &styles);
        for entry in &resume.work_experience {
            let exp = &entry.experience;
            blocks.push(paragraph(
                format!("{} - {}", exp.job_title.trim(), exp.company.trim()),
                styles.title,
            ));
            let mut meta = format_date_range(exp.start_date, exp.end_date);
            if !exp.location.trim().is_empty() {
                meta.push_str(SEPARATOR);
                meta.push_str(exp.location.trim());
            }
            blocks.push(paragraph(meta, styles.meta));
            for bullet in entry.bullets() {
                blocks.push(Block::Bullet {
                    text: bullet.to_string(),
                    style: styles.body,
                    indent: BULLET_INDENT,
                });
            }
            blocks.push(Block::Spacer(ENTRY_GAP));
        }
    }

    if !resume.education.is_empty() {
        section_heading(&mut blocks, EDUCATION_HEADING, &styles);
        for edu in &resume.education {
            let mut degree = edu.degree.trim().to_string();
            if !edu.major.trim().is_empty() {
                degree.push_str(" in ");
                degree.push_str(edu.major.trim());
            }
            blocks.push(paragraph(degree, styles.title));

            let mut school = format!(
                "{}{SEPARATOR}{}",
                edu.school.trim(),
                edu.graduation_date.format("%B %Y")
            );
            if !edu.location.trim().is_empty() {
                school.push_str(SEPARATOR);
                school.push_str(edu.location.trim());
            }
            blocks.push(paragraph(school, styles.meta));

            if let Some(gpa) = edu.gpa.as_deref().map(str::trim).filter(|g| !g.is_empty()) {
                blocks.push(paragraph(format!("GPA: {gpa}"), styles.body));
            }
            if let Some(achievements) = edu
                .achievements
                .as_deref()
                .map(str::trim)
                .filter(|a| !a.is_empty())
            {
                blocks.push(Block::Bullet {
                    text: achievements.to_string(),
                    style: styles.body,
                    indent: BULLET_INDENT,
                });
            }
            blocks.push(Block::Spacer(ENTRY_GAP));
        }
    }

    if !resume.skills.is_empty() {
        section_heading(&mut blocks, SKILLS_HEADING, &styles);
        for group in resume.skills.groups() {
            blocks.push(paragraph(
                format!("{}: {}", group.category.heading(), group.skills.join(", ")),
                styles.body,
            ));
            blocks.push(Block::Spacer(3.0));
        }
    }

    blocks
}

pub fn render_resume_pdf(resume: &GeneratedResume) -> Result<Vec<u8>, RenderError> {
    let geometry = PageGeometry::letter(RESUME_MARGIN_IN);
    let pages = paginate(&resume_blocks(resume), &geometry);
    let title = format!("Resume - {}", resume.personal_info.full_name());
    write_pdf(&pages, &geometry, &title)
}
