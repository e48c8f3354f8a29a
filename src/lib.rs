// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::len_without_is_empty)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # PDF Fontkit
//!
//! Font resources for PDF generation: resolve a requested family and style to
//! a built-in or TrueType font, measure and escape text with it, and produce
//! the artifacts a PDF writer embeds.
//!
//! ## Core Features
//!
//! - **TrueType Table Engine**: bounds-checked decoders for `head`, `hhea`/`vhea`,
//!   `maxp`, `cmap` (formats 0, 4, 6, 12), `hmtx`/`vmtx`, `loca`, `glyf`, `name`,
//!   `OS/2` and `post`, with table checksum verification
//! - **Collections**: faces of TrueType Collections load like standalone files
//! - **Subsetting**: compacted glyph tables renumbered in first-use order, composite
//!   glyph components included, checksums and `checkSumAdjustment` recomputed
//! - **Three Render Modes**: subset embedding, full embedding with original glyph
//!   ids, and subset numbering for path rendering
//! - **PDF Artifacts**: `/W` width arrays, ToUnicode CMaps with surrogate pairs,
//!   font descriptors and `ABCDEF+` subset tags
//! - **Base-14 Fonts**: static metrics for the 14 standard fonts in Standard,
//!   MacRoman and WinAnsi encodings
//!
//! ## Quick Start
//!
//! ```ignore
//! use pdf_fontkit::{FontEncoding, FontManager, FontManagerConfig, FontStyle, RenderMode};
//!
//! # fn main() -> pdf_fontkit::Result<()> {
//! let config = FontManagerConfig::new().with_font_directory("/usr/share/fonts");
//! let mut manager = FontManager::new(config);
//!
//! let font = manager.make_font(
//!     "DejaVu Sans",
//!     FontStyle::BOLD,
//!     FontEncoding::WinAnsi,
//!     RenderMode::Default,
//! )?;
//! let codes = font.escape_string("Hello");
//! let width = font.text_width("Hello")?.width;
//!
//! let widths = font.generate_widths()?;
//! let to_unicode = font.generate_ranges();
//! if let Some(program) = font.embedded_program()? {
//!     let bytes = program.to_bytes()?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Configuration
pub mod config;

// TrueType table engine
pub mod truetype;

// Font resources and resolution
pub mod fonts;

pub use config::FontManagerConfig;
pub use error::{Error, Result};
pub use fonts::{
    CharToGlyphMap, FontDescriptor, FontEncoding, FontManager, FontResource, FontStyle,
    RenderMode, TextMetrics,
};
pub use truetype::{FontProgram, LoadOptions};
