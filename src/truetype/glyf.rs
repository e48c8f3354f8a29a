//! Glyph outline (`glyf`) accessor.
//!
//! Outlines are not interpreted beyond their header: the bounding box feeds
//! vertical metrics and font descriptors, and composite glyph component
//! references are needed to keep a subset self-contained.

use super::loca::LocaTable;
use super::table_data::BinaryTableData;
use crate::error::{Error, Result};

const ARG_1_AND_2_ARE_WORDS: u16 = 0x0001;
const WE_HAVE_A_SCALE: u16 = 0x0008;
const MORE_COMPONENTS: u16 = 0x0020;
const WE_HAVE_AN_X_AND_Y_SCALE: u16 = 0x0040;
const WE_HAVE_A_TWO_BY_TWO: u16 = 0x0080;

/// Composite glyphs nested deeper than this are treated as malformed.
const MAX_COMPONENT_DEPTH: usize = 16;

/// Glyph bounding box in font design units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphBounds {
    /// Minimum x
    pub x_min: i16,
    /// Minimum y
    pub y_min: i16,
    /// Maximum x
    pub x_max: i16,
    /// Maximum y
    pub y_max: i16,
}

impl GlyphBounds {
    /// Vertical extent used when no `vmtx` table exists: `|yMin| + yMax`.
    pub fn height(&self) -> i32 {
        i32::from(self.y_min).abs() + i32::from(self.y_max)
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &GlyphBounds) -> GlyphBounds {
        GlyphBounds {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }
}

/// One component reference inside a composite glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphComponent {
    /// Referenced glyph id
    pub glyph_id: u16,
    /// Offset of the glyph index field, relative to the glyph start
    pub offset: usize,
}

/// Glyph outline table paired with its `loca` index.
#[derive(Debug, Clone)]
pub struct GlyphTable {
    data: BinaryTableData,
    loca: LocaTable,
}

impl GlyphTable {
    /// Pair `glyf` data with its `loca` table.
    pub fn new(data: BinaryTableData, loca: LocaTable) -> Self {
        Self { data, loca }
    }

    /// The location index.
    pub fn loca(&self) -> &LocaTable {
        &self.loca
    }

    /// Number of glyphs.
    pub fn num_glyphs(&self) -> usize {
        self.loca.num_glyphs()
    }

    /// Raw outline bytes of a glyph; empty for glyphs without contours.
    pub fn glyph_data(&self, glyph_id: u16) -> Result<&[u8]> {
        let offset = self.loca.glyph_offset(i32::from(glyph_id))? as usize;
        let length = self.loca.glyph_length(i32::from(glyph_id))? as usize;
        self.data.read_bytes(offset, length)
    }

    /// Bounding box of a glyph, `None` for empty glyphs.
    pub fn bounds(&self, glyph_id: u16) -> Result<Option<GlyphBounds>> {
        let bytes = self.glyph_data(glyph_id)?;
        if bytes.is_empty() {
            return Ok(None);
        }
        let glyph = BinaryTableData::new(bytes.to_vec());
        Ok(Some(GlyphBounds {
            x_min: glyph.read_short(2)?,
            y_min: glyph.read_short(4)?,
            x_max: glyph.read_short(6)?,
            y_max: glyph.read_short(8)?,
        }))
    }

    /// Direct component references of a composite glyph; empty for simple glyphs.
    pub fn components(&self, glyph_id: u16) -> Result<Vec<GlyphComponent>> {
        parse_components(self.glyph_data(glyph_id)?)
    }

    /// All glyphs reachable through composite references from `glyph_id`,
    /// excluding the glyph itself, in depth-first order.
    pub fn component_closure(&self, glyph_id: u16) -> Result<Vec<u16>> {
        let mut found = Vec::new();
        self.collect_components(glyph_id, 0, &mut found)?;
        Ok(found)
    }

    fn collect_components(&self, glyph_id: u16, depth: usize, found: &mut Vec<u16>) -> Result<()> {
        if depth > MAX_COMPONENT_DEPTH {
            return Err(Error::InvalidFont(format!(
                "composite glyph {} nests too deeply",
                glyph_id
            )));
        }
        for component in self.components(glyph_id)? {
            if !found.contains(&component.glyph_id) {
                found.push(component.glyph_id);
                self.collect_components(component.glyph_id, depth + 1, found)?;
            }
        }
        Ok(())
    }
}

/// Parse component references from raw glyph bytes.
pub fn parse_components(bytes: &[u8]) -> Result<Vec<GlyphComponent>> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    let glyph = BinaryTableData::new(bytes.to_vec());
    if glyph.read_short(0)? >= 0 {
        return Ok(Vec::new());
    }

    let mut components = Vec::new();
    let mut offset = 10;
    loop {
        let flags = glyph.read_ushort(offset)?;
        components.push(GlyphComponent {
            glyph_id: glyph.read_ushort(offset + 2)?,
            offset: offset + 2,
        });
        offset += 4;
        offset += if flags & ARG_1_AND_2_ARE_WORDS != 0 { 4 } else { 2 };
        if flags & WE_HAVE_A_SCALE != 0 {
            offset += 2;
        } else if flags & WE_HAVE_AN_X_AND_Y_SCALE != 0 {
            offset += 4;
        } else if flags & WE_HAVE_A_TWO_BY_TWO != 0 {
            offset += 8;
        }
        if flags & MORE_COMPONENTS == 0 {
            break;
        }
    }
    Ok(components)
}

/// Rewrite the component references of a composite glyph in place.
pub fn remap_components(
    bytes: &mut BinaryTableData,
    remap: impl Fn(u16) -> Option<u16>,
) -> Result<()> {
    for component in parse_components(bytes.as_bytes())? {
        let new_id = remap(component.glyph_id).ok_or_else(|| {
            Error::InvalidFont(format!(
                "component glyph {} missing from subset",
                component.glyph_id
            ))
        })?;
        bytes.set_ushort(component.offset, new_id)?;
    }
    Ok(())
}
