//! Error types for the font library.
//!
//! This module defines all error types that can occur while decoding TrueType
//! tables, building font subsets, and resolving font resources.

/// Result type alias for font library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during font processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Read or write outside of a table buffer
    #[error("Out of range access: {len} bytes at offset {offset} (buffer size {size})")]
    OutOfBounds {
        /// Requested offset
        offset: usize,
        /// Requested length
        len: usize,
        /// Actual buffer size
        size: usize,
    },

    /// Glyph id outside of a table's glyph range
    #[error("Glyph index {glyph_id} out of range (font has {num_glyphs} glyphs)")]
    GlyphIndex {
        /// Requested glyph id
        glyph_id: i64,
        /// Number of glyphs in the table
        num_glyphs: usize,
    },

    /// Required table absent from the font program
    #[error("Required font table is missing: {0}")]
    MissingTable(String),

    /// Table content does not match the checksum in its header
    #[error("Checksum mismatch in table {tag}: expected {expected:#010X}, found {actual:#010X}")]
    ChecksumMismatch {
        /// Table tag
        tag: String,
        /// Checksum recorded in the table directory
        expected: u32,
        /// Checksum computed over the table content
        actual: u32,
    },

    /// The cmap table has no Unicode-capable subtable
    #[error("No Unicode cmap subtable found")]
    NoUnicodeCmap,

    /// Unsupported cmap subtable format
    #[error("Unsupported cmap subtable format: {0}")]
    UnsupportedCmapFormat(u16),

    /// Structurally invalid font program
    #[error("Invalid font: {0}")]
    InvalidFont(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// The default font family is not in the built-in catalog
    #[error("Default font family '{0}' is not available")]
    DefaultFontMissing(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl Error {
    /// Build an out-of-range error for a buffer access.
    pub(crate) fn out_of_bounds(offset: usize, len: usize, size: usize) -> Self {
        Error::OutOfBounds { offset, len, size }
    }

    /// Returns true for bounds failures, either on a raw buffer or a glyph index.
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Error::OutOfBounds { .. } | Error::GlyphIndex { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_error() {
        let err = Error::out_of_bounds(10, 4, 12);
        let msg = format!("{}", err);
        assert!(msg.contains("offset 10"));
        assert!(msg.contains("buffer size 12"));
        assert!(err.is_bounds_error());
    }

    #[test]
    fn test_glyph_index_error() {
        let err = Error::GlyphIndex {
            glyph_id: -1,
            num_glyphs: 5,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("-1"));
        assert!(msg.contains("5 glyphs"));
        assert!(err.is_bounds_error());
    }

    #[test]
    fn test_checksum_mismatch_error() {
        let err = Error::ChecksumMismatch {
            tag: "hmtx".to_string(),
            expected: 0x1234,
            actual: 0xABCD,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("hmtx"));
        assert!(msg.contains("0x00001234"));
        assert!(!err.is_bounds_error());
    }

    #[test]
    fn test_missing_table_error() {
        let err = Error::MissingTable("cmap".to_string());
        assert!(format!("{}", err).contains("cmap"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "font.ttf");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Config(_)));
    }
}
