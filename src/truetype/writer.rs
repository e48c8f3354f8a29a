//! Serialization of a table set into a standalone TrueType file.

use std::collections::BTreeMap;

use super::head::CHECKSUM_ADJUSTMENT_OFFSET;
use super::table_data::BinaryTableData;
use super::tables::{Table, TableHeader, Tag};
use crate::error::Result;

/// Target of the whole-file checksum, per the TrueType specification.
const CHECKSUM_MAGIC: u32 = 0xB1B0_AFBA;

/// Binary search parameters of the offset table: (searchRange, entrySelector, rangeShift).
pub fn search_params(count: u16, unit: u16) -> (u16, u16, u16) {
    if count == 0 {
        return (0, 0, 0);
    }
    let entry_selector = 15 - count.leading_zeros() as u16;
    let search_range = (1u16 << entry_selector) * unit;
    let range_shift = count * unit - search_range;
    (search_range, entry_selector, range_shift)
}

/// Write tables, sorted by tag, into a complete font file.
///
/// Each table is 4-byte aligned and gets a fresh checksum; `head`'s
/// `checkSumAdjustment` is recomputed over the finished file.
pub fn write_font(sfnt_version: u32, tables: &BTreeMap<Tag, Table>) -> Result<Vec<u8>> {
    let num_tables = tables.len() as u16;
    let (search_range, entry_selector, range_shift) = search_params(num_tables, 16);

    let mut out = BinaryTableData::default();
    out.write_ulong(sfnt_version);
    out.write_ushort(num_tables);
    out.write_ushort(search_range);
    out.write_ushort(entry_selector);
    out.write_ushort(range_shift);

    let mut offset = 12 + TableHeader::SIZE * tables.len();
    let mut head_offset = None;
    let mut bodies = Vec::with_capacity(tables.len());
    for (tag, table) in tables {
        let mut data = table.data.clone();
        if *tag == Tag::HEAD {
            data.set_ulong(CHECKSUM_ADJUSTMENT_OFFSET, 0)?;
            head_offset = Some(offset);
        }
        let header = TableHeader {
            tag: *tag,
            checksum: data.checksum(),
            offset: offset as u32,
            length: data.len() as u32,
        };
        header.write(&mut out);
        offset += (data.len() + 3) & !3;
        bodies.push(data);
    }

    for body in bodies {
        out.write_bytes(body.as_bytes());
        out.pad_to_long();
    }

    if let Some(head_offset) = head_offset {
        let adjustment = CHECKSUM_MAGIC.wrapping_sub(out.checksum());
        out.set_ulong(head_offset + CHECKSUM_ADJUSTMENT_OFFSET, adjustment)?;
    }

    Ok(out.into_bytes())
}
