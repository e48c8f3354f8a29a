//! Font header (`head`) and maximum profile (`maxp`) tables.

use super::loca::LocaVersion;
use super::table_data::BinaryTableData;
use crate::error::{Error, Result};

/// Magic number stored at offset 12 of every `head` table.
pub const HEAD_MAGIC: u32 = 0x5F0F_3CF5;

/// Offset of `checkSumAdjustment` inside `head`.
pub const CHECKSUM_ADJUSTMENT_OFFSET: usize = 8;

/// Offset of `indexToLocFormat` inside `head`.
pub const INDEX_TO_LOC_FORMAT_OFFSET: usize = 50;

/// Decoded `head` table.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadTable {
    /// Font revision set by the manufacturer
    pub font_revision: f64,
    /// Whole-file checksum adjustment
    pub checksum_adjustment: u32,
    /// Header flags
    pub flags: u16,
    /// Design units per em, 16 to 16384
    pub units_per_em: u16,
    /// Bounding box of all glyphs: xMin
    pub x_min: i16,
    /// Bounding box of all glyphs: yMin
    pub y_min: i16,
    /// Bounding box of all glyphs: xMax
    pub x_max: i16,
    /// Bounding box of all glyphs: yMax
    pub y_max: i16,
    /// Bit 0 bold, bit 1 italic
    pub mac_style: u16,
    /// Storage format of `loca`
    pub index_to_loc_format: LocaVersion,
}

impl HeadTable {
    /// Decode a `head` table.
    pub fn parse(data: &BinaryTableData) -> Result<Self> {
        let magic = data.read_ulong(12)?;
        if magic != HEAD_MAGIC {
            return Err(Error::InvalidFont(format!(
                "bad head magic number {:#010X}",
                magic
            )));
        }
        let units_per_em = data.read_ushort(18)?;
        if units_per_em == 0 {
            return Err(Error::InvalidFont("unitsPerEm is zero".to_string()));
        }
        Ok(Self {
            font_revision: data.read_fixed(4)?,
            checksum_adjustment: data.read_ulong(CHECKSUM_ADJUSTMENT_OFFSET)?,
            flags: data.read_ushort(16)?,
            units_per_em,
            x_min: data.read_short(36)?,
            y_min: data.read_short(38)?,
            x_max: data.read_short(40)?,
            y_max: data.read_short(42)?,
            mac_style: data.read_ushort(44)?,
            index_to_loc_format: LocaVersion::from_index_to_loc_format(
                data.read_short(INDEX_TO_LOC_FORMAT_OFFSET)?,
            )?,
        })
    }

    /// Check the bold bit of `macStyle`.
    pub fn is_bold(&self) -> bool {
        self.mac_style & 0x01 != 0
    }

    /// Check the italic bit of `macStyle`.
    pub fn is_italic(&self) -> bool {
        self.mac_style & 0x02 != 0
    }
}

/// Decoded `maxp` table; only the glyph count is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxpTable {
    /// Number of glyphs in the font
    pub num_glyphs: u16,
}

impl MaxpTable {
    /// Offset of `numGlyphs` inside `maxp`.
    pub const NUM_GLYPHS_OFFSET: usize = 4;

    /// Decode a `maxp` table.
    pub fn parse(data: &BinaryTableData) -> Result<Self> {
        Ok(Self {
            num_glyphs: data.read_ushort(Self::NUM_GLYPHS_OFFSET)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn head_bytes(units_per_em: u16, mac_style: u16, loca_format: i16) -> BinaryTableData {
        let mut data = BinaryTableData::default();
        data.write_ulong(0x0001_0000); // version
        data.write_ulong(0x0001_8000); // fontRevision 1.5
        data.write_ulong(0); // checkSumAdjustment
        data.write_ulong(HEAD_MAGIC);
        data.write_ushort(0x000B); // flags
        data.write_ushort(units_per_em);
        data.write_bytes(&[0u8; 16]); // created, modified
        data.write_short(-100);
        data.write_short(-200);
        data.write_short(1000);
        data.write_short(900);
        data.write_ushort(mac_style);
        data.write_ushort(8); // lowestRecPPEM
        data.write_short(2); // fontDirectionHint
        data.write_short(loca_format);
        data.write_short(0); // glyphDataFormat
        data
    }

    #[test]
    fn test_parse_head() {
        let head = HeadTable::parse(&head_bytes(2048, 0x03, 1)).unwrap();
        assert_eq!(head.units_per_em, 2048);
        assert_eq!(head.font_revision, 1.5);
        assert_eq!((head.x_min, head.y_min, head.x_max, head.y_max), (-100, -200, 1000, 900));
        assert!(head.is_bold());
        assert!(head.is_italic());
        assert_eq!(head.index_to_loc_format, LocaVersion::Long);
    }

    #[test]
    fn test_head_rejects_bad_magic() {
        let mut data = head_bytes(1000, 0, 0);
        data.set_ulong(12, 0).unwrap();
        assert!(HeadTable::parse(&data).is_err());
    }

    #[test]
    fn test_head_rejects_zero_units_per_em() {
        assert!(HeadTable::parse(&head_bytes(0, 0, 0)).is_err());
    }

    #[test]
    fn test_head_truncated() {
        let data = BinaryTableData::new(head_bytes(1000, 0, 0).as_bytes()[..40].to_vec());
        assert!(HeadTable::parse(&data).unwrap_err().is_bounds_error());
    }

    #[test]
    fn test_parse_maxp() {
        let mut data = BinaryTableData::default();
        data.write_ulong(0x0000_5000);
        data.write_ushort(42);
        assert_eq!(MaxpTable::parse(&data).unwrap().num_glyphs, 42);
    }
}
