//! Serializes laid-out pages into a PDF file with lopdf.
//!
//! Only the base-14 Type1 faces are used, so nothing is embedded. Text is
//! written in WinAnsiEncoding; characters outside it become `?`.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::layout::{FontFamily, FontStyle, Mark, Page, PageGeometry, TextStyle};
use crate::render::RenderError;

/// Maps a character to its WinAnsiEncoding byte.
fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\t' | '\n' | '\r' => b' ',
        '€' => 0x80,
        '‚' => 0x82,
        '„' => 0x84,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '™' => 0x99,
        '\u{a0}'..='\u{ff}' => c as u32 as u8,
        _ => b'?',
    }
}

pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

/// Resource names for every face a document uses, in first-use order.
struct FontRegistry {
    faces: Vec<(FontFamily, FontStyle)>,
}

impl FontRegistry {
    fn collect(pages: &[Page]) -> Self {
        let mut faces = Vec::new();
        for mark in pages.iter().flat_map(|p| &p.marks) {
            if let Mark::Text(text) = mark {
                let face = (text.style.family, text.style.style);
                if !faces.contains(&face) {
                    faces.push(face);
                }
            }
        }
        Self { faces }
    }

    fn resource_name(&self, style: &TextStyle) -> String {
        let index = self
            .faces
            .iter()
            .position(|f| *f == (style.family, style.style))
            .unwrap_or(0);
        format!("F{}", index + 1)
    }
}

fn color_operands(color: [f32; 3]) -> Vec<Object> {
    color.iter().map(|c| Object::Real(*c)).collect()
}

fn page_content(page: &Page, fonts: &FontRegistry) -> Content {
    let mut operations = Vec::new();
    for mark in &page.marks {
        match mark {
            Mark::Text(text) => {
                operations.push(Operation::new("rg", color_operands(text.style.color)));
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![
                        Object::Name(fonts.resource_name(&text.style).into_bytes()),
                        Object::Real(text.style.size),
                    ],
                ));
                operations.push(Operation::new(
                    "Td",
                    vec![Object::Real(text.x), Object::Real(text.y)],
                ));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(encode_win_ansi(&text.text))],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            Mark::Rule {
                x1,
                x2,
                y,
                color,
                thickness,
            } => {
                operations.push(Operation::new("RG", color_operands(*color)));
                operations.push(Operation::new("w", vec![Object::Real(*thickness)]));
                operations.push(Operation::new("m", vec![Object::Real(*x1), Object::Real(*y)]));
                operations.push(Operation::new("l", vec![Object::Real(*x2), Object::Real(*y)]));
                operations.push(Operation::new("S", vec![]));
            }
        }
    }
    Content { operations }
}

/// Writes `pages` as a complete PDF document held in memory.
pub fn write_pdf(pages: &[Page], geometry: &PageGeometry, title: &str) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let fonts = FontRegistry::collect(pages);

    let mut font_dict = lopdf::Dictionary::new();
    for (i, (family, style)) in fonts.faces.iter().enumerate() {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => family.base_font(*style),
            "Encoding" => "WinAnsiEncoding",
        });
        font_dict.set(format!("F{}", i + 1), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => font_dict,
    });

    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page, &fonts);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), Object::Real(geometry.width), Object::Real(geometry.height)],
            "Resources" => resources_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| (*id).into()).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_win_ansi(title)),
        "Producer" => Object::string_literal(env!("CARGO_PKG_NAME")),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{paginate, Align, Block};

    fn style(face: FontStyle) -> TextStyle {
        TextStyle {
            family: FontFamily::Helvetica,
            style: face,
            size: 11.0,
            color: [0.1, 0.2, 0.5],
        }
    }

    #[test]
    fn test_win_ansi_maps_typographic_glyphs() {
        assert_eq!(encode_win_ansi("a•b–c—"), vec![b'a', 0x95, b'b', 0x96, b'c', 0x97]);
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xe9]);
        assert_eq!(encode_win_ansi("日"), vec![b'?']);
    }

    #[test]
    fn test_written_document_parses_back() {
        let geometry = PageGeometry::letter(1.0);
        let blocks = vec![
            Block::Paragraph {
                text: "Heading".to_string(),
                style: style(FontStyle::Bold),
                align: Align::Left,
                space_before: 0.0,
                keep_with_next: 0.0,
            },
            Block::Rule {
                color: [0.0, 0.0, 0.0],
                thickness: 1.0,
            },
            Block::PageBreak,
            Block::Bullet {
                text: "Body text".to_string(),
                style: style(FontStyle::Regular),
                indent: 10.0,
            },
        ];
        let pages = paginate(&blocks, &geometry);
        let bytes = write_pdf(&pages, &geometry, "Test").unwrap();

        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_registry_names_faces_in_first_use_order() {
        let geometry = PageGeometry::letter(1.0);
        let blocks = vec![
            Block::Bullet {
                text: "x".to_string(),
                style: style(FontStyle::Italic),
                indent: 0.0,
            },
            Block::Bullet {
                text: "y".to_string(),
                style: style(FontStyle::Bold),
                indent: 0.0,
            },
        ];
        let pages = paginate(&blocks, &geometry);
        let fonts = FontRegistry::collect(&pages);
        assert_eq!(fonts.resource_name(&style(FontStyle::Italic)), "F1");
        assert_eq!(fonts.resource_name(&style(FontStyle::Bold)), "F2");
    }
}
