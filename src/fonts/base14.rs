//! Metrics of the 14 standard PDF fonts.
//!
//! These fonts are never embedded; a viewer supplies them. Widths for the
//! printable ASCII codes 32..=126 are tabulated. Accented Latin letters
//! share the advance of their base letter (accented `i` uses the dotless
//! `i`), and no-break space and soft hyphen measure as space and hyphen.
//! Other codes, and codes with a zero entry, take the font's missing width.

use phf::phf_map;

use super::descriptor::DescriptorFlags;

/// First tabulated character code.
pub const FIRST_CODE: u8 = 32;
/// Last tabulated character code.
pub const LAST_CODE: u8 = 126;

const NUM_CODES: usize = (LAST_CODE - FIRST_CODE) as usize + 1;

/// Static metrics of a Base-14 font, in 1/1000 em.
#[derive(Debug)]
pub struct Base14Metrics {
    /// PostScript name
    pub name: &'static str,
    /// Widths of codes 32..=126
    pub widths: &'static [u16; NUM_CODES],
    /// Ascender
    pub ascent: i16,
    /// Descender (negative)
    pub descent: i16,
    /// Height of capital letters
    pub cap_height: i16,
    /// Height of lowercase x
    pub x_height: i16,
    /// Font bounding box: llx, lly, urx, ury
    pub bbox: [i16; 4],
    /// Italic angle in degrees
    pub italic_angle: f32,
    /// Dominant vertical stem width
    pub stem_v: u16,
    /// Font descriptor flags
    pub flags: DescriptorFlags,
    /// Width used for codes without a table entry
    pub missing_width: u16,
    /// Advance of the dotless `i`, shared by `ì í î ï`
    pub dotless_i_width: u16,
}

impl Base14Metrics {
    /// True for Symbol and ZapfDingbats, whose byte codes do not follow a
    /// Latin encoding.
    pub fn is_symbolic(&self) -> bool {
        self.flags.contains(DescriptorFlags::SYMBOLIC)
    }

    /// Tabulated width of a byte code, `None` outside 32..=126 or for a zero entry.
    pub fn width(&self, code: u8) -> Option<u16> {
        if !(FIRST_CODE..=LAST_CODE).contains(&code) {
            return None;
        }
        match self.widths[(code - FIRST_CODE) as usize] {
            0 => None,
            w => Some(w),
        }
    }

    /// Width of a Latin character outside ASCII, measured through the letter
    /// it is drawn from. `None` for characters without such a letter.
    pub fn latin_width(&self, ch: char) -> Option<u16> {
        match base_letter(ch)? {
            '\u{131}' => Some(self.dotless_i_width),
            base => self.width(base as u8),
        }
    }
}

/// Glyph whose advance an accented or spacing-variant Latin character shares.
fn base_letter(ch: char) -> Option<char> {
    let base = match ch {
        '\u{C0}'..='\u{C5}' => 'A',
        '\u{C7}' => 'C',
        '\u{C8}'..='\u{CB}' => 'E',
        '\u{CC}'..='\u{CF}' => 'I',
        '\u{D1}' => 'N',
        '\u{D2}'..='\u{D6}' => 'O',
        '\u{D9}'..='\u{DC}' => 'U',
        '\u{DD}' | '\u{178}' => 'Y',
        '\u{E0}'..='\u{E5}' => 'a',
        '\u{E7}' => 'c',
        '\u{E8}'..='\u{EB}' => 'e',
        '\u{EC}'..='\u{EF}' | '\u{131}' => '\u{131}',
        '\u{F1}' => 'n',
        '\u{F2}'..='\u{F6}' => 'o',
        '\u{F9}'..='\u{FC}' => 'u',
        '\u{FD}' | '\u{FF}' => 'y',
        '\u{160}' => 'S',
        '\u{161}' => 's',
        '\u{17D}' => 'Z',
        '\u{17E}' => 'z',
        '\u{A0}' => ' ',
        '\u{AD}' => '-',
        _ => return None,
    };
    Some(base)
}

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; NUM_CODES] = [
    278, 278, 355, 556, 556, 889, 667, 222, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    222, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; NUM_CODES] = [
    278, 333, 474, 556, 556, 889, 722, 278, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    278, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN_WIDTHS: [u16; NUM_CODES] = [
    250, 333, 408, 500, 500, 833, 778, 333, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD_WIDTHS: [u16; NUM_CODES] = [
    250, 333, 555, 500, 500, 1000, 833, 333, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

#[rustfmt::skip]
const TIMES_ITALIC_WIDTHS: [u16; NUM_CODES] = [
    250, 333, 420, 500, 500, 833, 778, 333, 333, 333, 500, 675, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 675, 675, 675, 500,
    920, 611, 611, 667, 722, 611, 611, 722, 722, 333, 444, 667, 556, 833, 667, 722,
    611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556, 389, 278, 389, 422, 500,
    333, 500, 500, 444, 500, 444, 278, 500, 500, 278, 278, 444, 278, 722, 500, 500,
    500, 500, 389, 389, 278, 500, 444, 667, 444, 444, 389, 400, 275, 400, 541,
];

#[rustfmt::skip]
const TIMES_BOLD_ITALIC_WIDTHS: [u16; NUM_CODES] = [
    250, 389, 555, 500, 500, 833, 778, 333, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    832, 667, 667, 667, 722, 667, 667, 722, 778, 389, 500, 667, 611, 889, 722, 722,
    611, 722, 667, 556, 611, 722, 667, 889, 667, 611, 611, 333, 278, 333, 570, 500,
    333, 500, 500, 444, 500, 444, 333, 500, 556, 278, 278, 500, 278, 778, 556, 500,
    500, 500, 389, 389, 278, 556, 444, 667, 500, 444, 389, 348, 220, 348, 570,
];

const COURIER_WIDTHS: [u16; NUM_CODES] = [600; NUM_CODES];

#[rustfmt::skip]
const SYMBOL_WIDTHS: [u16; NUM_CODES] = [
    250, 333, 713, 500, 549, 833, 778, 439, 333, 333, 500, 549, 250, 549, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 549, 549, 549, 444,
    549, 722, 667, 722, 612, 611, 763, 603, 722, 333, 631, 722, 686, 889, 722, 722,
    768, 741, 556, 592, 611, 690, 439, 768, 645, 795, 611, 333, 863, 333, 658, 500,
    500, 631, 549, 549, 494, 439, 521, 411, 603, 329, 603, 549, 549, 576, 521, 549,
    549, 521, 549, 603, 439, 576, 713, 686, 493, 686, 494, 480, 200, 480, 549,
];

#[rustfmt::skip]
const ZAPF_DINGBATS_WIDTHS: [u16; NUM_CODES] = [
    278, 974, 961, 974, 980, 719, 789, 790, 791, 690, 960, 939, 549, 855, 911, 933,
    911, 945, 974, 755, 846, 762, 761, 571, 677, 763, 760, 759, 754, 494, 552, 537,
    577, 692, 786, 788, 788, 790, 793, 794, 816, 823, 789, 841, 823, 833, 816, 831,
    923, 744, 723, 749, 790, 792, 695, 776, 768, 792, 759, 707, 708, 682, 701, 826,
    815, 789, 789, 707, 687, 696, 689, 786, 787, 713, 791, 785, 791, 873, 761, 762,
    762, 759, 759, 892, 892, 788, 784, 438, 138, 277, 415, 392, 392, 668, 668,
];

const SANS: DescriptorFlags = DescriptorFlags::NONSYMBOLIC;
const SANS_ITALIC: DescriptorFlags = DescriptorFlags::NONSYMBOLIC.union(DescriptorFlags::ITALIC);
const SERIF: DescriptorFlags = DescriptorFlags::NONSYMBOLIC.union(DescriptorFlags::SERIF);
const SERIF_ITALIC: DescriptorFlags = SERIF.union(DescriptorFlags::ITALIC);
const MONO: DescriptorFlags = SERIF.union(DescriptorFlags::FIXED_PITCH);
const MONO_ITALIC: DescriptorFlags = MONO.union(DescriptorFlags::ITALIC);

const fn helvetica(
    name: &'static str,
    widths: &'static [u16; NUM_CODES],
    bold: bool,
    italic_angle: f32,
    flags: DescriptorFlags,
    bbox: [i16; 4],
) -> Base14Metrics {
    Base14Metrics {
        name,
        widths,
        ascent: 718,
        descent: -207,
        cap_height: 718,
        x_height: if bold { 532 } else { 523 },
        bbox,
        italic_angle,
        stem_v: if bold { 140 } else { 88 },
        flags,
        missing_width: 250,
        dotless_i_width: 278,
    }
}

const fn courier(
    name: &'static str,
    widths: &'static [u16; NUM_CODES],
    bold: bool,
    italic_angle: f32,
    flags: DescriptorFlags,
    bbox: [i16; 4],
) -> Base14Metrics {
    Base14Metrics {
        name,
        widths,
        ascent: 629,
        descent: -157,
        cap_height: 562,
        x_height: if bold { 439 } else { 426 },
        bbox,
        italic_angle,
        stem_v: if bold { 106 } else { 51 },
        flags,
        missing_width: 600,
        dotless_i_width: 600,
    }
}

static HELVETICA: Base14Metrics =
    helvetica("Helvetica", &HELVETICA_WIDTHS, false, 0.0, SANS, [-166, -225, 1000, 931]);
static HELVETICA_BOLD: Base14Metrics =
    helvetica("Helvetica-Bold", &HELVETICA_BOLD_WIDTHS, true, 0.0, SANS, [-170, -228, 1003, 962]);
static HELVETICA_OBLIQUE: Base14Metrics = helvetica(
    "Helvetica-Oblique",
    &HELVETICA_WIDTHS,
    false,
    -12.0,
    SANS_ITALIC,
    [-170, -225, 1116, 931],
);
static HELVETICA_BOLD_OBLIQUE: Base14Metrics = helvetica(
    "Helvetica-BoldOblique",
    &HELVETICA_BOLD_WIDTHS,
    true,
    -12.0,
    SANS_ITALIC,
    [-174, -228, 1114, 962],
);

static COURIER: Base14Metrics =
    courier("Courier", &COURIER_WIDTHS, false, 0.0, MONO, [-23, -250, 715, 805]);
static COURIER_BOLD: Base14Metrics =
    courier("Courier-Bold", &COURIER_WIDTHS, true, 0.0, MONO, [-113, -250, 749, 801]);
static COURIER_OBLIQUE: Base14Metrics =
    courier("Courier-Oblique", &COURIER_WIDTHS, false, -12.0, MONO_ITALIC, [-27, -250, 849, 805]);
static COURIER_BOLD_OBLIQUE: Base14Metrics = courier(
    "Courier-BoldOblique",
    &COURIER_WIDTHS,
    true,
    -12.0,
    MONO_ITALIC,
    [-57, -250, 869, 801],
);

static TIMES_ROMAN: Base14Metrics = Base14Metrics {
    name: "Times-Roman",
    widths: &TIMES_ROMAN_WIDTHS,
    ascent: 683,
    descent: -217,
    cap_height: 662,
    x_height: 450,
    bbox: [-168, -218, 1000, 898],
    italic_angle: 0.0,
    stem_v: 84,
    flags: SERIF,
    missing_width: 250,
    dotless_i_width: 278,
};

static TIMES_BOLD: Base14Metrics = Base14Metrics {
    name: "Times-Bold",
    widths: &TIMES_BOLD_WIDTHS,
    ascent: 683,
    descent: -217,
    cap_height: 676,
    x_height: 461,
    bbox: [-168, -218, 1000, 935],
    italic_angle: 0.0,
    stem_v: 139,
    flags: SERIF,
    missing_width: 250,
    dotless_i_width: 278,
};

static TIMES_ITALIC: Base14Metrics = Base14Metrics {
    name: "Times-Italic",
    widths: &TIMES_ITALIC_WIDTHS,
    ascent: 683,
    descent: -217,
    cap_height: 653,
    x_height: 441,
    bbox: [-169, -217, 1010, 883],
    italic_angle: -15.5,
    stem_v: 76,
    flags: SERIF_ITALIC,
    missing_width: 250,
    dotless_i_width: 278,
};

static TIMES_BOLD_ITALIC: Base14Metrics = Base14Metrics {
    name: "Times-BoldItalic",
    widths: &TIMES_BOLD_ITALIC_WIDTHS,
    ascent: 683,
    descent: -217,
    cap_height: 669,
    x_height: 462,
    bbox: [-200, -218, 996, 921],
    italic_angle: -15.0,
    stem_v: 121,
    flags: SERIF_ITALIC,
    missing_width: 250,
    dotless_i_width: 278,
};

static SYMBOL: Base14Metrics = Base14Metrics {
    name: "Symbol",
    widths: &SYMBOL_WIDTHS,
    ascent: 1010,
    descent: -293,
    cap_height: 673,
    x_height: 500,
    bbox: [-180, -293, 1090, 1010],
    italic_angle: 0.0,
    stem_v: 85,
    flags: DescriptorFlags::SYMBOLIC,
    missing_width: 250,
    dotless_i_width: 0,
};

static ZAPF_DINGBATS: Base14Metrics = Base14Metrics {
    name: "ZapfDingbats",
    widths: &ZAPF_DINGBATS_WIDTHS,
    ascent: 820,
    descent: -143,
    cap_height: 820,
    x_height: 820,
    bbox: [-1, -143, 981, 820],
    italic_angle: 0.0,
    stem_v: 90,
    flags: DescriptorFlags::SYMBOLIC,
    missing_width: 250,
    dotless_i_width: 0,
};

/// Built-in catalog keyed by `family ++ style bits` (bit 0 bold, bit 1 italic).
static BASE14_CATALOG: phf::Map<&'static str, &'static Base14Metrics> = phf_map! {
    "Helvetica0" => &HELVETICA,
    "Helvetica1" => &HELVETICA_BOLD,
    "Helvetica2" => &HELVETICA_OBLIQUE,
    "Helvetica3" => &HELVETICA_BOLD_OBLIQUE,
    "Times0" => &TIMES_ROMAN,
    "Times1" => &TIMES_BOLD,
    "Times2" => &TIMES_ITALIC,
    "Times3" => &TIMES_BOLD_ITALIC,
    "Courier0" => &COURIER,
    "Courier1" => &COURIER_BOLD,
    "Courier2" => &COURIER_OBLIQUE,
    "Courier3" => &COURIER_BOLD_OBLIQUE,
    "Symbol0" => &SYMBOL,
    "ZapfDingbats0" => &ZAPF_DINGBATS,
};

/// Metrics for a search key, `None` if it names no built-in font.
pub fn lookup(search_key: &str) -> Option<&'static Base14Metrics> {
    BASE14_CATALOG.get(search_key).copied()
}

/// All built-in fonts, in no particular order.
pub fn all() -> impl Iterator<Item = &'static Base14Metrics> {
    BASE14_CATALOG.values().copied()
}
