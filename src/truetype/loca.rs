//! Index-to-location (`loca`) table.
//!
//! Maps each glyph id to the byte range of its outline inside `glyf`. The
//! table holds `numGlyphs + 1` entries; the last one is the end offset of the
//! final glyph.

use super::table_data::BinaryTableData;
use super::tables::{Table, Tag};
use crate::error::{Error, Result};

/// Largest offset the short format can hold (stored divided by two).
const SHORT_FORMAT_LIMIT: u32 = 0xFFFF * 2;

/// Storage format of the `loca` table, selected by `head.indexToLocFormat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaVersion {
    /// Offsets divided by two, stored as `uint16`
    Short,
    /// Offsets stored as `uint32`
    Long,
}

impl LocaVersion {
    /// Decode `head.indexToLocFormat`.
    pub fn from_index_to_loc_format(format: i16) -> Result<Self> {
        match format {
            0 => Ok(LocaVersion::Short),
            1 => Ok(LocaVersion::Long),
            other => Err(Error::InvalidFont(format!(
                "invalid indexToLocFormat {}",
                other
            ))),
        }
    }

    /// Value to store in `head.indexToLocFormat`.
    pub fn index_to_loc_format(self) -> i16 {
        match self {
            LocaVersion::Short => 0,
            LocaVersion::Long => 1,
        }
    }

    fn entry_size(self) -> usize {
        match self {
            LocaVersion::Short => 2,
            LocaVersion::Long => 4,
        }
    }
}

/// Decoded `loca` table.
#[derive(Debug, Clone)]
pub struct LocaTable {
    data: BinaryTableData,
    version: LocaVersion,
    num_glyphs: usize,
}

impl LocaTable {
    /// Wrap table data for a font with `num_glyphs` glyphs.
    pub fn new(data: BinaryTableData, version: LocaVersion, num_glyphs: usize) -> Result<Self> {
        let needed = (num_glyphs + 1) * version.entry_size();
        if data.len() < needed {
            return Err(Error::InvalidFont(format!(
                "loca table holds {} bytes, {} glyphs need {}",
                data.len(),
                num_glyphs,
                needed
            )));
        }
        Ok(Self {
            data,
            version,
            num_glyphs,
        })
    }

    /// Storage format.
    pub fn version(&self) -> LocaVersion {
        self.version
    }

    /// Number of glyphs described by the table.
    pub fn num_glyphs(&self) -> usize {
        self.num_glyphs
    }

    /// Raw entry `index`, converted to a byte offset into `glyf`.
    pub fn loca(&self, index: usize) -> Result<u32> {
        match self.version {
            LocaVersion::Short => Ok(2 * u32::from(self.data.read_ushort(index * 2)?)),
            LocaVersion::Long => self.data.read_ulong(index * 4),
        }
    }

    fn check_glyph(&self, glyph_id: i32) -> Result<usize> {
        usize::try_from(glyph_id)
            .ok()
            .filter(|&id| id < self.num_glyphs)
            .ok_or(Error::GlyphIndex {
                glyph_id: i64::from(glyph_id),
                num_glyphs: self.num_glyphs,
            })
    }

    /// Byte offset of a glyph inside `glyf`.
    pub fn glyph_offset(&self, glyph_id: i32) -> Result<u32> {
        let id = self.check_glyph(glyph_id)?;
        self.loca(id)
    }

    /// Byte length of a glyph's outline. Zero for empty glyphs such as space.
    pub fn glyph_length(&self, glyph_id: i32) -> Result<u32> {
        let id = self.check_glyph(glyph_id)?;
        let start = self.loca(id)?;
        let end = self.loca(id + 1)?;
        end.checked_sub(start).ok_or_else(|| {
            Error::InvalidFont(format!(
                "loca offsets decrease at glyph {} ({} > {})",
                id, start, end
            ))
        })
    }

    /// All `numGlyphs + 1` offsets.
    pub fn offsets(&self) -> Result<Vec<u32>> {
        (0..=self.num_glyphs).map(|i| self.loca(i)).collect()
    }

    /// Table checksum over the encoded entries.
    pub fn checksum(&self) -> u32 {
        self.data.checksum()
    }

    /// Package the encoded entries as a font table.
    pub fn to_table(&self) -> Table {
        Table::new(Tag::LOCA, self.data.clone())
    }
}

/// Encode glyph offsets, including the trailing end offset, as a `loca` table.
///
/// The short format is chosen when every offset is even and the largest one
/// still fits in 16 bits after halving; otherwise the long format is used.
pub fn encode_loca_table(offsets: &[u32]) -> Result<LocaTable> {
    let last = *offsets
        .last()
        .ok_or_else(|| Error::InvalidFont("loca needs at least one offset".to_string()))?;
    if offsets.windows(2).any(|pair| pair[1] < pair[0]) {
        return Err(Error::InvalidFont(
            "loca offsets must be non-decreasing".to_string(),
        ));
    }

    let version = if last <= SHORT_FORMAT_LIMIT && offsets.iter().all(|o| o % 2 == 0) {
        LocaVersion::Short
    } else {
        LocaVersion::Long
    };

    let mut data = BinaryTableData::with_capacity(offsets.len() * version.entry_size());
    for &offset in offsets {
        match version {
            LocaVersion::Short => data.write_ushort((offset / 2) as u16),
            LocaVersion::Long => data.write_ulong(offset),
        };
    }

    log::debug!(
        "Encoded loca table: {} glyphs, {:?} format",
        offsets.len() - 1,
        version
    );
    LocaTable::new(data, version, offsets.len() - 1)
}
