//! Horizontal (`hhea`) and vertical (`vhea`) header tables.
//!
//! The two tables share a layout; the vertical fields are named
//! vertTypoAscender and so on but sit at the same offsets.

use super::table_data::BinaryTableData;
use crate::error::Result;

/// Decoded `hhea` or `vhea` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HheaTable {
    /// Typographic ascent
    pub ascender: i16,
    /// Typographic descent
    pub descender: i16,
    /// Typographic line gap
    pub line_gap: i16,
    /// Maximum advance in the metrics table
    pub advance_max: u16,
    /// Number of long records in `hmtx`/`vmtx`
    pub number_of_long_metrics: u16,
}

impl HheaTable {
    /// Offset of `numberOfHMetrics` / `numOfLongVerMetrics`.
    pub const NUM_LONG_METRICS_OFFSET: usize = 34;

    /// Decode the table.
    pub fn parse(data: &BinaryTableData) -> Result<Self> {
        Ok(Self {
            ascender: data.read_short(4)?,
            descender: data.read_short(6)?,
            line_gap: data.read_short(8)?,
            advance_max: data.read_ushort(10)?,
            number_of_long_metrics: data.read_ushort(Self::NUM_LONG_METRICS_OFFSET)?,
        })
    }
}
