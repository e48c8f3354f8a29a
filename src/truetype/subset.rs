//! Glyph subsetting.
//!
//! Produces a compacted font program containing `.notdef` at position 0,
//! then every glyph referenced by a [`CharToGlyphMap`] at its `new_gid`,
//! then any composite-glyph components that were not already present.

use std::collections::{BTreeMap, HashMap};

use super::cmap::encode_cmap_table;
use super::font_program::FontProgram;
use super::glyf::remap_components;
use super::head::{MaxpTable, INDEX_TO_LOC_FORMAT_OFFSET};
use super::hhea::HheaTable;
use super::loca::encode_loca_table;
use super::metrics::{encode_metrics_table, MetricsTable};
use super::os2::PostTable;
use super::table_data::BinaryTableData;
use super::tables::{Table, Tag};
use crate::error::{Error, Result};
use crate::fonts::ch2gid::CharToGlyphMap;

/// Tables copied into a subset unchanged.
const PASS_THROUGH_TABLES: [Tag; 6] =
    [Tag::NAME, Tag::OS2, Tag::CVT, Tag::FPGM, Tag::PREP, Tag::GASP];

/// `post` version 3.0: no glyph names.
const POST_VERSION_3: u32 = 0x0003_0000;

impl FontProgram {
    /// Build a subset holding only the glyphs referenced by `ch2gid`.
    ///
    /// The mapping must be densely numbered: sorted by `new_gid`, entry `i`
    /// (counting from zero) carries `new_gid == i + 1`.
    pub fn subset(&self, ch2gid: &CharToGlyphMap, subset_tag: &str) -> Result<FontProgram> {
        let glyf = self
            .glyf()?
            .ok_or_else(|| Error::MissingTable(Tag::GLYF.to_string()))?;
        let hmtx = self.hmtx()?;
        let vmtx = self.vmtx()?;

        // Old glyph id for each new position
        let mut order: Vec<u16> = vec![0];
        for (i, (codepoint, mapping)) in ch2gid.sorted_by_new_gid().into_iter().enumerate() {
            if mapping.new_gid as usize != i + 1 {
                return Err(Error::InvalidFont(format!(
                    "glyph mapping for U+{:04X} has new id {}, expected {}",
                    codepoint,
                    mapping.new_gid,
                    i + 1
                )));
            }
            order.push(mapping.old_gid);
        }

        let mut old_to_new: HashMap<u16, u16> = HashMap::new();
        for (new_gid, &old_gid) in order.iter().enumerate() {
            old_to_new.entry(old_gid).or_insert(new_gid as u16);
        }
        let referenced = order.len();
        for i in 0..referenced {
            for component in glyf.component_closure(order[i])? {
                if !old_to_new.contains_key(&component) {
                    old_to_new.insert(component, order.len() as u16);
                    order.push(component);
                }
            }
        }
        if order.len() > u16::MAX as usize {
            return Err(Error::InvalidFont("subset exceeds 65535 glyphs".to_string()));
        }

        // glyf + loca
        let mut glyf_data = BinaryTableData::default();
        let mut offsets = Vec::with_capacity(order.len() + 1);
        offsets.push(0u32);
        for &old_gid in &order {
            let mut glyph = BinaryTableData::new(glyf.glyph_data(old_gid)?.to_vec());
            remap_components(&mut glyph, |gid| old_to_new.get(&gid).copied())?;
            glyf_data.write_bytes(glyph.as_bytes());
            glyf_data.pad_to_long();
            offsets.push(glyf_data.len() as u32);
        }
        let loca = encode_loca_table(&offsets)?;

        let num_glyphs = order.len() as u16;
        let mut tables = vec![Table::new(Tag::GLYF, glyf_data), loca.to_table()];

        let mut head = self.require_table(Tag::HEAD)?.data.clone();
        head.set_ushort(
            INDEX_TO_LOC_FORMAT_OFFSET,
            loca.version().index_to_loc_format() as u16,
        )?;
        tables.push(Table::new(Tag::HEAD, head));

        let mut maxp = self.require_table(Tag::MAXP)?.data.clone();
        maxp.set_ushort(MaxpTable::NUM_GLYPHS_OFFSET, num_glyphs)?;
        tables.push(Table::new(Tag::MAXP, maxp));

        tables.push(Table::new(Tag::HMTX, subset_metrics(&hmtx, &order)?));
        let mut hhea = self.require_table(Tag::HHEA)?.data.clone();
        hhea.set_ushort(HheaTable::NUM_LONG_METRICS_OFFSET, num_glyphs)?;
        tables.push(Table::new(Tag::HHEA, hhea));

        if let (Some(vmtx), Some(vhea)) = (vmtx, self.get_table(Tag::VHEA)) {
            tables.push(Table::new(Tag::VMTX, subset_metrics(&vmtx, &order)?));
            let mut vhea = vhea.data.clone();
            vhea.set_ushort(HheaTable::NUM_LONG_METRICS_OFFSET, num_glyphs)?;
            tables.push(Table::new(Tag::VHEA, vhea));
        }

        let cmap: BTreeMap<u32, u16> = ch2gid.iter().map(|(cp, m)| (cp, m.new_gid)).collect();
        tables.push(Table::new(Tag::CMAP, encode_cmap_table(&cmap)));

        if let Some(post) = self.get_table(Tag::POST) {
            let header = post.data.read_bytes(0, PostTable::HEADER_LEN)?;
            let mut post = BinaryTableData::new(header.to_vec());
            post.set_ulong(0, POST_VERSION_3)?;
            tables.push(Table::new(Tag::POST, post));
        }

        for tag in PASS_THROUGH_TABLES {
            if let Some(table) = self.get_table(tag) {
                tables.push(Table::new(tag, table.data.clone()));
            }
        }

        log::debug!(
            "Subset {}: {} of {} glyphs ({} referenced, {} components)",
            self.postscript_name(),
            order.len(),
            glyf.num_glyphs(),
            referenced,
            order.len() - referenced
        );

        Ok(FontProgram::from_tables(tables)?.with_subset_tag(Some(subset_tag)))
    }
}

fn subset_metrics(metrics: &MetricsTable, order: &[u16]) -> Result<BinaryTableData> {
    let records = order
        .iter()
        .map(|&gid| Ok((metrics.advance(gid)?, metrics.side_bearing(gid)?)))
        .collect::<Result<Vec<_>>>()?;
    Ok(encode_metrics_table(&records))
}
