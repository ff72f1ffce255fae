//! Static font-metric tables for the PDF base-14 families used by the templates.
//!
//! Widths come from the Adobe Core 14 AFM files, in 1/1000 em. Oblique and
//! italic faces are measured with the upright tables; the difference is a
//! few percent and only ever makes a wrapped line slightly short.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::Serialize;

// ────────────────────────────────────────────────────────────────────────────
// Font selection
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FontFamily {
    Helvetica,
    Times,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

impl FontStyle {
    pub const ALL: [FontStyle; 3] = [FontStyle::Regular, FontStyle::Bold, FontStyle::Italic];
}

impl FontFamily {
    /// PostScript name of the base-14 face, as written into the PDF font dictionary.
    pub fn base_font(&self, style: FontStyle) -> &'static str {
        match (self, style) {
            (FontFamily::Helvetica, FontStyle::Regular) => "Helvetica",
            (FontFamily::Helvetica, FontStyle::Bold) => "Helvetica-Bold",
            (FontFamily::Helvetica, FontStyle::Italic) => "Helvetica-Oblique",
            (FontFamily::Times, FontStyle::Regular) => "Times-Roman",
            (FontFamily::Times, FontStyle::Bold) => "Times-Bold",
            (FontFamily::Times, FontStyle::Italic) => "Times-Italic",
        }
    }

    pub fn metrics(&self, style: FontStyle) -> &'static FontMetricTable {
        match (self, style) {
            (FontFamily::Helvetica, FontStyle::Bold) => &HELVETICA_BOLD_TABLE,
            (FontFamily::Helvetica, _) => &HELVETICA_TABLE,
            (FontFamily::Times, FontStyle::Bold) => &TIMES_BOLD_TABLE,
            (FontFamily::Times, _) => &TIMES_ROMAN_TABLE,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one face.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [u16; 95],
    /// Fallback for characters outside the table and the named extras.
    average_char_width: u16,
    en_dash_width: u16,
}

const BULLET_WIDTH: u16 = 350;
const EM_DASH_WIDTH: u16 = 1000;

impl FontMetricTable {
    fn char_width(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            return self.widths[code - 32];
        }
        match c {
            '\u{a0}' => self.widths[0],
            '•' => BULLET_WIDTH,
            '–' => self.en_dash_width,
            '—' => EM_DASH_WIDTH,
            _ => self.average_char_width,
        }
    }

    /// Rendered width of `s` in points at `size_pt`.
    pub fn measure_str(&self, s: &str, size_pt: f32) -> f32 {
        let units: u32 = s.chars().map(|c| u32::from(self.char_width(c))).sum();
        units as f32 * size_pt / 1000.0
    }

    /// Greedy word wrap at `max_width_pt`. Words wider than a whole line are
    /// split at character boundaries. Whitespace runs collapse to one space.
    pub fn wrap_lines(&self, s: &str, size_pt: f32, max_width_pt: f32) -> Vec<String> {
        let space_w = self.measure_str(" ", size_pt);
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in s.split_whitespace() {
            for piece in self.split_oversized(word, size_pt, max_width_pt) {
                let piece_w = self.measure_str(&piece, size_pt);
                if current.is_empty() {
                    current = piece;
                    current_width = piece_w;
                } else if current_width + space_w + piece_w > max_width_pt {
                    lines.push(std::mem::take(&mut current));
                    current = piece;
                    current_width = piece_w;
                } else {
                    current.push(' ');
                    current.push_str(&piece);
                    current_width += space_w + piece_w;
                }
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    fn split_oversized(&self, word: &str, size_pt: f32, max_width_pt: f32) -> Vec<String> {
        if self.measure_str(word, size_pt) <= max_width_pt {
            return vec![word.to_string()];
        }
        let mut pieces = Vec::new();
        let mut piece = String::new();
        let mut width = 0.0_f32;
        for c in word.chars() {
            let w = f32::from(self.char_width(c)) * size_pt / 1000.0;
            if !piece.is_empty() && width + w > max_width_pt {
                pieces.push(std::mem::take(&mut piece));
                width = 0.0;
            }
            piece.push(c);
            width += w;
        }
        if !piece.is_empty() {
            pieces.push(piece);
        }
        pieces
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    average_char_width: 556,
    en_dash_width: 556,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
    ],
    average_char_width: 611,
    en_dash_width: 556,
};

static TIMES_ROMAN_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
        // 0    1    2    3    4    5    6    7    8    9
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        // :    ;    <    =    >    ?    @
        278, 278, 564, 564, 564, 444, 921,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 469, 500, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
        // {    |    }    ~
        480, 200, 480, 541,
    ],
    average_char_width: 500,
    en_dash_width: 500,
};

static TIMES_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
        // 0    1    2    3    4    5    6    7    8    9
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        // :    ;    <    =    >    ?    @
        333, 333, 570, 570, 570, 500, 930,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
        // [    \    ]    ^    _    `
        333, 278, 333, 581, 500, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
        // {    |    }    ~
        394, 220, 394, 520,
    ],
    average_char_width: 556,
    en_dash_width: 500,
};

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn helvetica() -> &'static FontMetricTable {
        FontFamily::Helvetica.metrics(FontStyle::Regular)
    }

    #[test]
    fn test_measure_scales_with_size() {
        // "m" is 833/1000 em in Helvetica
        assert!((helvetica().measure_str("m", 10.0) - 8.33).abs() < 1e-4);
        assert!((helvetica().measure_str("mm", 12.0) - 19.992).abs() < 1e-3);
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Senior Software Engineer";
        let regular = FontFamily::Helvetica.metrics(FontStyle::Regular).measure_str(text, 11.0);
        let bold = FontFamily::Helvetica.metrics(FontStyle::Bold).measure_str(text, 11.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_times_is_narrower_than_helvetica() {
        let text = "Managed a distributed team across three time zones";
        let times = FontFamily::Times.metrics(FontStyle::Regular).measure_str(text, 11.0);
        let helv = helvetica().measure_str(text, 11.0);
        assert!(times < helv);
    }

    #[test]
    fn test_italic_measures_like_regular() {
        let text = "Jan 2020 - Present";
        assert_eq!(
            FontFamily::Times.metrics(FontStyle::Italic).measure_str(text, 10.0),
            FontFamily::Times.metrics(FontStyle::Regular).measure_str(text, 10.0)
        );
    }

    #[test]
    fn test_every_face_has_a_base_font_name() {
        for family in [FontFamily::Helvetica, FontFamily::Times] {
            for style in FontStyle::ALL {
                assert!(!family.base_font(style).is_empty());
            }
        }
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "Designed and shipped a billing platform used by forty thousand customers \
                    across twelve countries with zero downtime migrations";
        let lines = helvetica().wrap_lines(text, 10.0, 200.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(helvetica().measure_str(line, 10.0) <= 200.0, "overflow: {line}");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_wrap_empty_is_no_lines() {
        assert!(helvetica().wrap_lines("   ", 10.0, 100.0).is_empty());
    }

    #[test]
    fn test_wrap_splits_oversized_word() {
        let word = "x".repeat(200);
        let lines = helvetica().wrap_lines(&word, 10.0, 100.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }
}
