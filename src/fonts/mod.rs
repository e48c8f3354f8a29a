//! Font resources for PDF generation.
//!
//! A [`FontResource`] is what a content-stream writer talks to: it measures
//! text, escapes it for text-showing operators, and at output time produces
//! the width array, ToUnicode CMap, font descriptor and embedded program.
//! The [`FontManager`] resolves `(family, style, encoding)` requests to
//! resources and owns them.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::truetype::FontProgram;

pub mod base14;
mod base14_font;
pub mod ch2gid;
pub mod descriptor;
pub mod encoding;
pub mod font_manager;
pub mod subset_tag;
pub mod to_unicode;
mod truetype_font;
pub mod widths;

pub use base14_font::Base14Font;
pub use ch2gid::{CharToGlyphMap, GlyphMapping};
pub use descriptor::{DescriptorFlags, FontDescriptor};
pub use encoding::FontEncoding;
pub use font_manager::FontManager;
pub use subset_tag::{from_base26, make_subset_tag, to_base26};
pub use truetype_font::TrueTypeFont;

/// How a font's glyphs end up in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RenderMode {
    /// Embed a subset renumbered from glyph 1 in first-use order
    #[default]
    Default,
    /// Embed the whole font and keep original glyph ids
    Embed,
    /// Subset numbering; glyphs are drawn as vector outlines
    PathRendering,
}

bitflags! {
    /// Requested font style.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FontStyle: u8 {
        /// Bold weight
        const BOLD = 1;
        /// Italic or oblique
        const ITALIC = 2;
    }
}

/// Result of measuring a run of text. Widths are in 1/1000 em.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    /// Number of characters
    pub num_chars: usize,
    /// Sum of the character advances
    pub width: f64,
    /// Number of whitespace characters
    pub num_spaces: usize,
    /// Number of words
    pub num_words: usize,
}

/// Sum per-character advances and count whitespace and words.
///
/// A word ends where whitespace follows a non-whitespace character, plus
/// one trailing word when the text does not end in whitespace.
pub(crate) fn measure(
    text: &str,
    mut advance: impl FnMut(char) -> Result<f64>,
) -> Result<TextMetrics> {
    let mut metrics = TextMetrics::default();
    let mut prev_is_space = true;
    for ch in text.chars() {
        metrics.num_chars += 1;
        metrics.width += advance(ch)?;
        let is_space = ch.is_whitespace();
        if is_space {
            metrics.num_spaces += 1;
            if !prev_is_space {
                metrics.num_words += 1;
            }
        }
        prev_is_space = is_space;
    }
    if !prev_is_space {
        metrics.num_words += 1;
    }
    Ok(metrics)
}

/// A resolved font: built-in metrics or a loaded TrueType program.
#[derive(Debug, Clone)]
pub enum FontResource {
    /// One of the 14 standard fonts
    Base14(Base14Font),
    /// A TrueType or TrueType Collection face
    TrueType(Box<TrueTypeFont>),
}

impl FontResource {
    /// Resource id assigned by the font manager.
    pub fn id(&self) -> usize {
        match self {
            FontResource::Base14(f) => f.id(),
            FontResource::TrueType(f) => f.id(),
        }
    }

    /// Catalog key the resource was resolved under.
    pub fn search_name(&self) -> &str {
        match self {
            FontResource::Base14(f) => f.search_name(),
            FontResource::TrueType(f) => f.search_name(),
        }
    }

    /// Render mode the resource was created with.
    pub fn render_mode(&self) -> RenderMode {
        match self {
            FontResource::Base14(f) => f.render_mode(),
            FontResource::TrueType(f) => f.render_mode(),
        }
    }

    /// Check if this is a built-in font.
    pub fn is_base14(&self) -> bool {
        matches!(self, FontResource::Base14(_))
    }

    /// BaseFont name; tagged for TrueType resources.
    pub fn font_name(&self) -> String {
        match self {
            FontResource::Base14(f) => f.font_name().to_string(),
            FontResource::TrueType(f) => f.font_name(),
        }
    }

    /// True only for TrueType fonts with vertical metrics.
    pub fn can_write_vertical(&self) -> bool {
        match self {
            FontResource::Base14(_) => false,
            FontResource::TrueType(f) => f.can_write_vertical(),
        }
    }

    /// Escape text as a ready operand for a text-showing operator: a literal
    /// string for built-in fonts, a `<...>` hex string of glyph codes for
    /// TrueType.
    pub fn escape_string(&mut self, text: &str) -> String {
        match self {
            FontResource::Base14(f) => f.escape_string(text),
            FontResource::TrueType(f) => format!("<{}>", f.escape_string(text)),
        }
    }

    /// Escape text and switch a TrueType resource to full embedding.
    pub fn escape_string_and_embed_full_font(&mut self, text: &str) -> String {
        match self {
            FontResource::Base14(f) => f.escape_string(text),
            FontResource::TrueType(f) => {
                format!("<{}>", f.escape_string_and_embed_full_font(text))
            },
        }
    }

    /// Horizontal text measurement.
    pub fn text_width(&self, text: &str) -> Result<TextMetrics> {
        match self {
            FontResource::Base14(f) => Ok(f.text_width(text)),
            FontResource::TrueType(f) => f.text_width(text),
        }
    }

    /// Tallest character in the text.
    pub fn text_height(&self, text: &str) -> Result<f64> {
        match self {
            FontResource::Base14(f) => Ok(f.text_height(text)),
            FontResource::TrueType(f) => f.text_height(text),
        }
    }

    /// Vertical-writing text measurement.
    pub fn vtext_width(&self, text: &str) -> Result<TextMetrics> {
        match self {
            FontResource::Base14(f) => Ok(f.vtext_width(text)),
            FontResource::TrueType(f) => f.vtext_width(text),
        }
    }

    /// Widest character in the text, for vertical writing.
    pub fn vtext_height(&self, text: &str) -> Result<f64> {
        match self {
            FontResource::Base14(f) => Ok(f.vtext_height(text)),
            FontResource::TrueType(f) => f.vtext_height(text),
        }
    }

    /// `/W` array text; `"[]"` for built-in fonts.
    pub fn generate_widths(&self) -> Result<String> {
        match self {
            FontResource::Base14(_) => Ok("[]".to_string()),
            FontResource::TrueType(f) => f.generate_widths(),
        }
    }

    /// ToUnicode `bfchar` body; empty for built-in fonts.
    pub fn generate_ranges(&self) -> String {
        match self {
            FontResource::Base14(_) => String::new(),
            FontResource::TrueType(f) => f.generate_ranges(),
        }
    }

    /// Font descriptor values.
    pub fn font_descriptor(&self) -> Result<FontDescriptor> {
        match self {
            FontResource::Base14(f) => Ok(f.font_descriptor()),
            FontResource::TrueType(f) => f.font_descriptor(),
        }
    }

    /// Program to embed; `None` for built-in fonts.
    pub fn embedded_program(&self) -> Result<Option<FontProgram>> {
        match self {
            FontResource::Base14(_) => Ok(None),
            FontResource::TrueType(f) => f.embedded_program().map(Some),
        }
    }

    /// The TrueType resource, if this is one.
    pub fn as_truetype(&self) -> Option<&TrueTypeFont> {
        match self {
            FontResource::TrueType(f) => Some(f.as_ref()),
            FontResource::Base14(_) => None,
        }
    }
}
