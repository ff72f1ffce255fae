//! Block flow — turns a sequence of document blocks into positioned lines on
//! fixed-size pages.
//!
//! Coordinates are PDF user space: origin bottom-left, y grows upward, units
//! are points. A page always exists, even for an empty document.

use crate::layout::font_metrics::{FontFamily, FontStyle};

/// 72 points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;
pub const LETTER_WIDTH_PT: f32 = 8.5 * POINTS_PER_INCH;
pub const LETTER_HEIGHT_PT: f32 = 11.0 * POINTS_PER_INCH;
const LINE_HEIGHT_FACTOR: f32 = 1.25;
const BULLET_GLYPH: &str = "•";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    /// US Letter with the same margin on every side.
    pub fn letter(margin_in: f32) -> Self {
        Self {
            width: LETTER_WIDTH_PT,
            height: LETTER_HEIGHT_PT,
            margin: margin_in * POINTS_PER_INCH,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub family: FontFamily,
    pub style: FontStyle,
    pub size: f32,
    /// RGB components in 0.0..=1.0.
    pub color: [f32; 3],
}

impl TextStyle {
    pub fn line_height(&self) -> f32 {
        self.size * LINE_HEIGHT_FACTOR
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A wrapped paragraph. `keep_with_next` reserves that many points below
    /// it on the same page, so a heading never ends a page on its own.
    Paragraph {
        text: String,
        style: TextStyle,
        align: Align,
        space_before: f32,
        keep_with_next: f32,
    },
    /// A wrapped paragraph led by a bullet glyph, with hanging indent.
    Bullet {
        text: String,
        style: TextStyle,
        indent: f32,
    },
    /// A full-width horizontal line.
    Rule { color: [f32; 3], thickness: f32 },
    Spacer(f32),
    PageBreak,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub x: f32,
    /// Baseline.
    pub y: f32,
    pub text: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Text(PlacedText),
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        color: [f32; 3],
        thickness: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub marks: Vec<Mark>,
}

impl Page {
    #[cfg(test)]
    pub fn texts(&self) -> impl Iterator<Item = &PlacedText> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Text(t) => Some(t),
            Mark::Rule { .. } => None,
        })
    }
}

struct Cursor<'g> {
    geometry: &'g PageGeometry,
    pages: Vec<Page>,
    /// Top of the free area on the current page.
    y: f32,
}

impl<'g> Cursor<'g> {
    fn new(geometry: &'g PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Page::default()],
            y: geometry.height - geometry.margin,
        }
    }

    fn at_page_top(&self) -> bool {
        self.y >= self.geometry.height - self.geometry.margin
    }

    fn remaining(&self) -> f32 {
        self.y - self.geometry.margin
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = self.geometry.height - self.geometry.margin;
    }

    /// Starts a new page unless `needed` points still fit on this one.
    fn ensure(&mut self, needed: f32) {
        if needed > self.remaining() && !self.at_page_top() {
            self.new_page();
        }
    }

    fn skip(&mut self, amount: f32) {
        // vertical space is dropped at a page top
        if self.at_page_top() {
            return;
        }
        if amount >= self.remaining() {
            self.new_page();
        } else {
            self.y -= amount;
        }
    }

    fn push(&mut self, mark: Mark) {
        if let Some(page) = self.pages.last_mut() {
            page.marks.push(mark);
        }
    }

    fn place_line(&mut self, x: f32, text: String, style: TextStyle) {
        let height = style.line_height();
        self.ensure(height);
        let baseline = self.y - style.size;
        self.push(Mark::Text(PlacedText {
            x,
            y: baseline,
            text,
            style,
        }));
        self.y -= height;
    }
}

/// Lays `blocks` out in order, starting new pages as they fill.
pub fn paginate(blocks: &[Block], geometry: &PageGeometry) -> Vec<Page> {
    let mut cursor = Cursor::new(geometry);
    let left = geometry.margin;
    let width = geometry.content_width();

    for block in blocks {
        match block {
            Block::Paragraph {
                text,
                style,
                align,
                space_before,
                keep_with_next,
            } => {
                let metrics = style.family.metrics(style.style);
                let lines = metrics.wrap_lines(text, style.size, width);
                if lines.is_empty() {
                    continue;
                }
                cursor.skip(*space_before);
                cursor.ensure(style.line_height() + keep_with_next);
                for line in lines {
                    let x = match align {
                        Align::Left => left,
                        Align::Center => {
                            let w = metrics.measure_str(&line, style.size);
                            left + ((width - w) / 2.0).max(0.0)
                        }
                    };
                    cursor.place_line(x, line, *style);
                }
            }
            Block::Bullet {
                text,
                style,
                indent,
            } => {
                let metrics = style.family.metrics(style.style);
                let gap = style.size;
                let text_x = left + indent + gap;
                let lines = metrics.wrap_lines(text, style.size, (width - indent - gap).max(1.0));
                for (i, line) in lines.into_iter().enumerate() {
                    let height = style.line_height();
                    cursor.ensure(height);
                    if i == 0 {
                        cursor.push(Mark::Text(PlacedText {
                            x: left + indent,
                            y: cursor.y - style.size,
                            text: BULLET_GLYPH.to_string(),
                            style: *style,
                        }));
                    }
                    cursor.place_line(text_x, line, *style);
                }
            }
            Block::Rule { color, thickness } => {
                cursor.ensure(*thickness + 2.0);
                let y = cursor.y - 1.0;
                cursor.push(Mark::Rule {
                    x1: left,
                    x2: left + width,
                    y,
                    color: *color,
                    thickness: *thickness,
                });
                cursor.y -= thickness + 2.0;
            }
            Block::Spacer(amount) => cursor.skip(*amount),
            Block::PageBreak => cursor.new_page(),
        }
    }
    cursor.pages
}
