//! Font descriptor values.

use bitflags::bitflags;

use super::base14::Base14Metrics;

bitflags! {
    /// FontDescriptor `/Flags` bits (PDF 32000-1 Table 123).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DescriptorFlags: u32 {
        /// All glyphs have the same width
        const FIXED_PITCH = 1 << 0;
        /// Glyphs have serifs
        const SERIF = 1 << 1;
        /// Glyphs outside the Standard Latin set
        const SYMBOLIC = 1 << 2;
        /// Glyphs resemble cursive handwriting
        const SCRIPT = 1 << 3;
        /// Standard Latin character set
        const NONSYMBOLIC = 1 << 5;
        /// Glyphs have dominant vertical strokes that are slanted
        const ITALIC = 1 << 6;
    }
}

/// Everything a PDF FontDescriptor dictionary carries, in 1/1000 em.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// BaseFont name, including the subset tag for embedded subsets
    pub font_name: String,
    /// Descriptor flags
    pub flags: DescriptorFlags,
    /// Font bounding box (llx, lly, urx, ury)
    pub bbox: [i32; 4],
    /// Italic angle in degrees
    pub italic_angle: f32,
    /// Ascender (positive)
    pub ascent: i32,
    /// Descender (negative)
    pub descent: i32,
    /// Cap height
    pub cap_height: i32,
    /// x-height
    pub x_height: i32,
    /// Stem V (vertical stem width)
    pub stem_v: i32,
    /// Width for characters without a width entry
    pub missing_width: i32,
    /// Lowest escaped code point, set for non-embedded subsets only
    pub first_char: Option<u32>,
    /// Highest escaped code point, set for non-embedded subsets only
    pub last_char: Option<u32>,
}

impl FontDescriptor {
    pub(crate) fn from_base14(metrics: &Base14Metrics, missing_width: u16) -> Self {
        Self {
            font_name: metrics.name.to_string(),
            flags: metrics.flags,
            bbox: metrics.bbox.map(i32::from),
            italic_angle: metrics.italic_angle,
            ascent: i32::from(metrics.ascent),
            descent: i32::from(metrics.descent),
            cap_height: i32::from(metrics.cap_height),
            x_height: i32::from(metrics.x_height),
            stem_v: i32::from(metrics.stem_v),
            missing_width: i32::from(missing_width),
            first_char: None,
            last_char: None,
        }
    }

    /// Check whether the font is monospaced.
    pub fn is_fixed_pitch(&self) -> bool {
        self.flags.contains(DescriptorFlags::FIXED_PITCH)
    }
}

/// StemV estimate from an OS/2 weight class; TrueType does not store it.
pub fn stem_v_from_weight(weight_class: u16) -> i32 {
    let weight = i32::from(weight_class.clamp(100, 900));
    50 + (weight / 65) * (weight / 65)
}
