//! TrueType-backed font resource.

use super::ch2gid::{CharToGlyphMap, GlyphMapping};
use super::descriptor::{stem_v_from_weight, DescriptorFlags, FontDescriptor};
use super::subset_tag::subset_tag_for;
use super::to_unicode::generate_ranges;
use super::widths::generate_widths;
use super::{measure, RenderMode, TextMetrics};
use crate::error::Result;
use crate::truetype::{
    CmapTable, FontProgram, GlyphBounds, GlyphTable, HeadTable, HmtxTable, VmtxTable,
};

/// A font resource backed by a loaded TrueType program.
///
/// Escaping text records every code point in the font's [`CharToGlyphMap`];
/// width arrays, ToUnicode CMaps, the descriptor and the embedded program are
/// all generated from that mapping once the document text is complete.
#[derive(Debug, Clone)]
pub struct TrueTypeFont {
    id: usize,
    search_name: String,
    render_mode: RenderMode,
    program: FontProgram,
    head: HeadTable,
    cmap: CmapTable,
    hmtx: HmtxTable,
    vmtx: Option<VmtxTable>,
    glyf: Option<GlyphTable>,
    /// Design units to 1/1000 em
    scale: f64,
    ch2gid: CharToGlyphMap,
    next_gid: u16,
    /// Every code point the cmap resolves, built on first full-embedding use
    full_char_map: Option<CharToGlyphMap>,
}

impl TrueTypeFont {
    /// Wrap a loaded program as a font resource.
    pub fn new(
        id: usize,
        search_name: impl Into<String>,
        render_mode: RenderMode,
        program: FontProgram,
    ) -> Result<Self> {
        let head = program.head()?;
        let scale = 1000.0 / f64::from(head.units_per_em);
        Ok(Self {
            id,
            search_name: search_name.into(),
            render_mode,
            head,
            cmap: program.cmap()?,
            hmtx: program.hmtx()?,
            vmtx: program.vmtx()?,
            glyf: program.glyf()?,
            program,
            scale,
            ch2gid: CharToGlyphMap::new(),
            next_gid: 1,
            full_char_map: None,
        })
    }

    /// Resource id assigned by the font manager.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Catalog key this resource was resolved under.
    pub fn search_name(&self) -> &str {
        &self.search_name
    }

    /// Active render mode.
    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    /// The underlying font program.
    pub fn program(&self) -> &FontProgram {
        &self.program
    }

    /// Code points escaped so far and their glyph ids.
    pub fn ch2gid(&self) -> &CharToGlyphMap {
        &self.ch2gid
    }

    /// Scale from design units to 1/1000 em.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// True when the font has vertical metrics.
    pub fn can_write_vertical(&self) -> bool {
        self.vmtx.is_some()
    }

    /// Glyph id the cmap assigns to a code point, 0 when absent.
    pub fn glyph_id(&self, codepoint: u32) -> u16 {
        self.cmap.glyph_id(codepoint)
    }

    /// Map of every code point the cmap resolves to `(gid, gid)`, built on first use.
    pub fn full_char_map(&mut self) -> &CharToGlyphMap {
        let map = match self.full_char_map.take() {
            Some(map) => map,
            None => {
                let map = self.build_full_char_map();
                log::debug!("Built full character map with {} entries", map.len());
                map
            },
        };
        self.full_char_map.insert(map)
    }

    fn build_full_char_map(&self) -> CharToGlyphMap {
        self.cmap
            .iter()
            .filter(|&(_, gid)| gid != 0)
            .map(|(cp, gid)| {
                (
                    cp,
                    GlyphMapping {
                        old_gid: gid,
                        new_gid: gid,
                    },
                )
            })
            .collect()
    }

    /// Escape text as 4-digit hex glyph codes, recording each resolvable
    /// code point. The result carries no `<`/`>` delimiters.
    ///
    /// Full embedding keeps original glyph ids. Subset modes give each new
    /// code point the next subset glyph id, starting at 1. Code points the
    /// font cannot show are written as `0000` and not recorded.
    pub fn escape_string(&mut self, text: &str) -> String {
        let mut hex = String::with_capacity(text.len() * 4);
        for ch in text.chars() {
            let code = self.record(ch as u32).unwrap_or(0);
            hex.push_str(&format!("{:04X}", code));
        }
        hex
    }

    /// Switch to full embedding and escape text with original glyph ids.
    ///
    /// Codes already written under a subset mode refer to subset ids; call
    /// this before escaping any other text with the resource.
    pub fn escape_string_and_embed_full_font(&mut self, text: &str) -> String {
        if self.render_mode != RenderMode::Embed {
            if !self.ch2gid.is_empty() {
                log::warn!(
                    "Font {} switched to full embedding after {} code points were subset",
                    self.search_name,
                    self.ch2gid.len()
                );
            }
            self.render_mode = RenderMode::Embed;
        }
        self.escape_string(text)
    }

    /// Record one code point and return the content code to write for it.
    fn record(&mut self, codepoint: u32) -> Option<u16> {
        if let Some(mapping) = self.ch2gid.get(codepoint) {
            return Some(match self.render_mode {
                RenderMode::Embed => mapping.old_gid,
                RenderMode::Default | RenderMode::PathRendering => mapping.new_gid,
            });
        }
        match self.render_mode {
            RenderMode::Embed => {
                let gid = self.full_char_map().get(codepoint)?.old_gid;
                self.ch2gid.insert(codepoint, gid, gid);
                Some(gid)
            },
            RenderMode::Default | RenderMode::PathRendering => {
                let old_gid = self.cmap.get(codepoint).filter(|&gid| gid != 0)?;
                let new_gid = self.next_gid;
                self.next_gid = self.next_gid.checked_add(1)?;
                self.ch2gid.insert(codepoint, old_gid, new_gid);
                Some(new_gid)
            },
        }
    }

    fn scaled(&self, value: impl Into<f64>) -> f64 {
        value.into() * self.scale
    }

    /// Advance width of a glyph in 1/1000 em, rounded.
    pub fn glyph_width(&self, glyph_id: u16) -> Result<u16> {
        Ok(self.scaled(self.hmtx.advance(glyph_id)?).round() as u16)
    }

    /// Advance width of a code point in 1/1000 em, rounded; unmapped code
    /// points measure as `.notdef`.
    pub fn char_width(&self, codepoint: u32) -> Result<u16> {
        self.glyph_width(self.glyph_id(codepoint))
    }

    /// Vertical extent of a glyph in 1/1000 em: its vertical advance, or
    /// its bounding-box height without `vmtx`.
    pub fn glyph_height(&self, glyph_id: u16) -> Result<f64> {
        if let Some(vmtx) = &self.vmtx {
            return Ok(self.scaled(vmtx.advance(glyph_id)?));
        }
        let height = match &self.glyf {
            Some(glyf) => glyf.bounds(glyph_id)?.map_or(0, |b| b.height()),
            None => 0,
        };
        Ok(self.scaled(height))
    }

    fn raw_width(&self, ch: char) -> Result<f64> {
        Ok(self.scaled(self.hmtx.advance(self.glyph_id(ch as u32))?))
    }

    fn raw_height(&self, ch: char) -> Result<f64> {
        self.glyph_height(self.glyph_id(ch as u32))
    }

    /// Horizontal text measurement.
    pub fn text_width(&self, text: &str) -> Result<TextMetrics> {
        measure(text, |ch| self.raw_width(ch))
    }

    /// Tallest character in the text, in 1/1000 em.
    pub fn text_height(&self, text: &str) -> Result<f64> {
        text.chars()
            .try_fold(0.0f64, |max, ch| Ok(max.max(self.raw_height(ch)?)))
    }

    /// Vertical text measurement: advances are glyph heights.
    pub fn vtext_width(&self, text: &str) -> Result<TextMetrics> {
        measure(text, |ch| self.raw_height(ch))
    }

    /// Widest character in the text, in 1/1000 em.
    pub fn vtext_height(&self, text: &str) -> Result<f64> {
        text.chars()
            .try_fold(0.0f64, |max, ch| Ok(max.max(self.raw_width(ch)?)))
    }

    /// `/W` array for the recorded glyphs.
    ///
    /// With full embedding and nothing escaped, lists every glyph the cmap
    /// resolves.
    pub fn generate_widths(&self) -> Result<String> {
        let width = |gid| self.glyph_width(gid);
        if self.render_mode == RenderMode::Embed && self.ch2gid.is_empty() {
            return match &self.full_char_map {
                Some(full) => generate_widths(full, self.render_mode, width),
                None => generate_widths(&self.build_full_char_map(), self.render_mode, width),
            };
        }
        generate_widths(&self.ch2gid, self.render_mode, width)
    }

    /// ToUnicode `bfchar` body for the recorded glyphs.
    pub fn generate_ranges(&self) -> String {
        generate_ranges(&self.ch2gid, self.render_mode)
    }

    /// Subset tag for the current mapping, including the trailing `+`.
    pub fn subset_tag(&self) -> String {
        subset_tag_for(&self.ch2gid)
    }

    /// BaseFont name: `TAG+PostScriptName`.
    pub fn font_name(&self) -> String {
        format!("{}{}", self.subset_tag(), self.program.postscript_name())
    }

    /// Program to embed: the whole font for [`RenderMode::Embed`], otherwise
    /// a subset of the recorded glyphs.
    pub fn embedded_program(&self) -> Result<FontProgram> {
        let tag = self.subset_tag();
        match self.render_mode {
            RenderMode::Embed => Ok(self.program.embed_full_font(Some(&tag))),
            RenderMode::Default | RenderMode::PathRendering => {
                self.program.subset(&self.ch2gid, &tag)
            },
        }
    }

    /// Descriptor values for the font as it will be embedded.
    pub fn font_descriptor(&self) -> Result<FontDescriptor> {
        let hhea = self.program.hhea()?;
        let os2 = self.program.os2()?;
        let post = self.program.post()?;

        let italic_angle = post.map_or(0.0, |p| p.italic_angle) as f32;
        let italic = self.head.is_italic()
            || os2.is_some_and(|o| o.is_italic())
            || italic_angle != 0.0;
        let mut flags = DescriptorFlags::NONSYMBOLIC;
        if post.is_some_and(|p| p.is_fixed_pitch) {
            flags |= DescriptorFlags::FIXED_PITCH;
        }
        if italic {
            flags |= DescriptorFlags::ITALIC;
        }

        let ascent = self.to_pdf_units(hhea.ascender);
        let cap_height = os2
            .and_then(|o| o.cap_height)
            .map_or(ascent, |v| self.to_pdf_units(v));
        let x_height = os2
            .and_then(|o| o.x_height)
            .map_or(ascent / 2, |v| self.to_pdf_units(v));
        let stem_v = match os2 {
            Some(o) => stem_v_from_weight(o.weight_class),
            None if self.head.is_bold() => 140,
            None => 80,
        };

        let (first_char, last_char) = match self.render_mode {
            RenderMode::Default => self.ch2gid.codepoint_range().unzip(),
            _ => (None, None),
        };

        Ok(FontDescriptor {
            font_name: self.font_name(),
            flags,
            bbox: self.bbox()?,
            italic_angle,
            ascent,
            descent: self.to_pdf_units(hhea.descender),
            cap_height,
            x_height,
            stem_v,
            missing_width: i32::from(self.glyph_width(0)?),
            first_char,
            last_char,
        })
    }

    /// Bounding box in 1/1000 em: the union of the recorded glyphs in subset
    /// modes, the `head` box otherwise or when no recorded glyph has outlines.
    fn bbox(&self) -> Result<[i32; 4]> {
        let head_box = GlyphBounds {
            x_min: self.head.x_min,
            y_min: self.head.y_min,
            x_max: self.head.x_max,
            y_max: self.head.y_max,
        };
        let bounds = match (&self.glyf, self.render_mode) {
            (Some(glyf), RenderMode::Default | RenderMode::PathRendering) => {
                let mut union: Option<GlyphBounds> = None;
                for gid in self.ch2gid.old_gids() {
                    if let Some(b) = glyf.bounds(gid)? {
                        union = Some(union.map_or(b, |u| u.union(&b)));
                    }
                }
                union.unwrap_or(head_box)
            },
            _ => head_box,
        };
        Ok([
            self.to_pdf_units(bounds.x_min),
            self.to_pdf_units(bounds.y_min),
            self.to_pdf_units(bounds.x_max),
            self.to_pdf_units(bounds.y_max),
        ])
    }

    /// Convert a value from font units to PDF units (1/1000 em).
    fn to_pdf_units(&self, value: i16) -> i32 {
        self.scaled(value).round() as i32
    }
}
