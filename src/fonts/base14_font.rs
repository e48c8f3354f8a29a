//! Built-in (Base-14) font resource.

use super::base14::{Base14Metrics, LAST_CODE};
use super::descriptor::FontDescriptor;
use super::encoding::{encode_bytes_as_literal, FontEncoding};
use super::{measure, RenderMode, TextMetrics};

/// A metric-only font resource for one of the 14 standard fonts,
/// specialized for one byte encoding.
#[derive(Debug, Clone)]
pub struct Base14Font {
    id: usize,
    search_name: String,
    render_mode: RenderMode,
    metrics: &'static Base14Metrics,
    encoding: FontEncoding,
    missing_width: u16,
}

impl Base14Font {
    /// Create a resource. A `missing_width` of 0 keeps the font's own.
    pub fn new(
        id: usize,
        search_name: impl Into<String>,
        render_mode: RenderMode,
        metrics: &'static Base14Metrics,
        encoding: FontEncoding,
        missing_width: u16,
    ) -> Self {
        Self {
            id,
            search_name: search_name.into(),
            render_mode,
            metrics,
            encoding,
            missing_width: if missing_width == 0 {
                metrics.missing_width
            } else {
                missing_width
            },
        }
    }

    /// Resource id assigned by the font manager.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Catalog key this resource was resolved under, including the encoding.
    pub fn search_name(&self) -> &str {
        &self.search_name
    }

    /// Requested render mode; built-in fonts are never embedded.
    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    /// Static metrics of the font.
    pub fn metrics(&self) -> &'static Base14Metrics {
        self.metrics
    }

    /// Byte encoding the resource was specialized for.
    pub fn encoding(&self) -> FontEncoding {
        self.encoding
    }

    /// PostScript name of the font.
    pub fn font_name(&self) -> &'static str {
        self.metrics.name
    }

    /// Byte code for a character. Symbolic fonts use their built-in codes.
    fn code(&self, ch: char) -> u8 {
        if self.metrics.is_symbolic() {
            u8::try_from(ch as u32).unwrap_or(b'?')
        } else {
            self.encoding.encode(ch).unwrap_or(b'?')
        }
    }

    /// Encode text to byte codes.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        text.chars().map(|ch| self.code(ch)).collect()
    }

    /// Escape text as a PDF literal string.
    pub fn escape_string(&self, text: &str) -> String {
        encode_bytes_as_literal(&self.encode(text))
    }

    /// Width of a character in 1/1000 em.
    ///
    /// Characters the encoding writes above ASCII are measured through
    /// their base letter; characters it cannot write measure as `?`.
    pub fn char_width(&self, ch: char) -> u16 {
        let code = self.code(ch);
        let width = if code > LAST_CODE && !self.metrics.is_symbolic() {
            self.metrics.latin_width(ch)
        } else {
            self.metrics.width(code)
        };
        width.unwrap_or(self.missing_width)
    }

    /// Height of a character: cap height for uppercase ASCII, x-height otherwise.
    pub fn char_height(&self, ch: char) -> u16 {
        let height = if ch.is_ascii_uppercase() {
            self.metrics.cap_height
        } else {
            self.metrics.x_height
        };
        height.max(0) as u16
    }

    /// Horizontal text measurement.
    pub fn text_width(&self, text: &str) -> TextMetrics {
        // Infallible per-character lookups
        measure(text, |ch| Ok(f64::from(self.char_width(ch)))).unwrap_or_default()
    }

    /// Tallest character in the text.
    pub fn text_height(&self, text: &str) -> f64 {
        text.chars()
            .map(|ch| f64::from(self.char_height(ch)))
            .fold(0.0, f64::max)
    }

    /// Vertical text measurement: advances are character heights.
    pub fn vtext_width(&self, text: &str) -> TextMetrics {
        measure(text, |ch| Ok(f64::from(self.char_height(ch)))).unwrap_or_default()
    }

    /// Widest character in the text.
    pub fn vtext_height(&self, text: &str) -> f64 {
        text.chars()
            .map(|ch| f64::from(self.char_width(ch)))
            .fold(0.0, f64::max)
    }

    /// Descriptor values from the static metrics.
    pub fn font_descriptor(&self) -> FontDescriptor {
        FontDescriptor::from_base14(self.metrics, self.missing_width)
    }
}
