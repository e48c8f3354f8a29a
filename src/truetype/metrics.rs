//! Horizontal (`hmtx`) and vertical (`vmtx`) metrics tables.
//!
//! Both tables share one layout: `numberOfLongMetrics` pairs of
//! (advance, side bearing) followed by bare side bearings for the remaining
//! glyphs, which repeat the last advance.

use super::table_data::BinaryTableData;
use crate::error::{Error, Result};

/// Decoded `hmtx` or `vmtx` table.
#[derive(Debug, Clone)]
pub struct MetricsTable {
    data: BinaryTableData,
    num_long_metrics: usize,
    num_glyphs: usize,
}

/// Horizontal metrics: advance widths and left side bearings.
pub type HmtxTable = MetricsTable;

/// Vertical metrics: advance heights and top side bearings.
pub type VmtxTable = MetricsTable;

impl MetricsTable {
    /// Wrap table data. `num_long_metrics` comes from `hhea` or `vhea`,
    /// `num_glyphs` from `maxp`.
    pub fn new(data: BinaryTableData, num_long_metrics: usize, num_glyphs: usize) -> Result<Self> {
        if num_long_metrics == 0 && num_glyphs > 0 {
            return Err(Error::InvalidFont(
                "metrics table without long metrics".to_string(),
            ));
        }
        let num_long_metrics = num_long_metrics.min(num_glyphs);
        let needed = num_long_metrics * 4;
        if data.len() < needed {
            return Err(Error::InvalidFont(format!(
                "metrics table holds {} bytes, needs at least {}",
                data.len(),
                needed
            )));
        }
        Ok(Self {
            data,
            num_long_metrics,
            num_glyphs,
        })
    }

    /// Number of glyphs covered by the table.
    pub fn num_glyphs(&self) -> usize {
        self.num_glyphs
    }

    /// Number of full (advance, bearing) records.
    pub fn num_long_metrics(&self) -> usize {
        self.num_long_metrics
    }

    fn check_glyph(&self, glyph_id: u16) -> Result<usize> {
        let id = glyph_id as usize;
        if id >= self.num_glyphs {
            return Err(Error::GlyphIndex {
                glyph_id: i64::from(glyph_id),
                num_glyphs: self.num_glyphs,
            });
        }
        Ok(id)
    }

    /// Advance width (hmtx) or height (vmtx) in font design units.
    pub fn advance(&self, glyph_id: u16) -> Result<u16> {
        let id = self.check_glyph(glyph_id)?;
        let index = id.min(self.num_long_metrics - 1);
        self.data.read_ushort(index * 4)
    }

    /// Left (hmtx) or top (vmtx) side bearing in font design units.
    pub fn side_bearing(&self, glyph_id: u16) -> Result<i16> {
        let id = self.check_glyph(glyph_id)?;
        if id < self.num_long_metrics {
            self.data.read_short(id * 4 + 2)
        } else {
            let offset = self.num_long_metrics * 4 + (id - self.num_long_metrics) * 2;
            // Some fonts truncate the trailing bearing array
            Ok(self.data.read_short(offset).unwrap_or(0))
        }
    }
}

/// Encode metrics as a table made only of long records.
pub fn encode_metrics_table(metrics: &[(u16, i16)]) -> BinaryTableData {
    let mut out = BinaryTableData::with_capacity(metrics.len() * 4);
    for &(advance, bearing) in metrics {
        out.write_ushort(advance);
        out.write_short(bearing);
    }
    out
}
