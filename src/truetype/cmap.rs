//! Character to glyph mapping (`cmap`) table.
//!
//! Only Unicode-capable subtables are decoded: platform 0 (any encoding) and
//! platform 3 with encodings 1 (BMP) or 10 (full repertoire). Formats 0, 4, 6
//! and 12 are supported. When several subtables qualify, a full-repertoire
//! subtable wins over a BMP-only one.

use std::collections::BTreeMap;

use super::table_data::BinaryTableData;
use super::writer::search_params;
use crate::error::{Error, Result};

/// Highest valid Unicode scalar value.
const MAX_CODEPOINT: u32 = 0x10FFFF;

/// Decoded Unicode subtable of a `cmap` table.
#[derive(Debug, Clone, Default)]
pub struct CmapTable {
    /// Code point to glyph id; glyph 0 is never stored
    mappings: BTreeMap<u32, u16>,
    /// Platform of the selected subtable
    pub platform_id: u16,
    /// Encoding of the selected subtable
    pub encoding_id: u16,
    /// Format of the selected subtable
    pub format: u16,
}

#[derive(Debug, Clone, Copy)]
struct EncodingRecord {
    platform_id: u16,
    encoding_id: u16,
    offset: usize,
}

impl EncodingRecord {
    /// Lower is better; `None` for subtables that cannot map Unicode.
    fn priority(&self) -> Option<u8> {
        match (self.platform_id, self.encoding_id) {
            (3, 10) => Some(0),
            (0, 4) | (0, 6) => Some(1),
            (3, 1) => Some(2),
            (0, _) => Some(3),
            _ => None,
        }
    }
}

impl CmapTable {
    /// Decode the best Unicode subtable of a `cmap` table.
    pub fn parse(data: &BinaryTableData) -> Result<Self> {
        let num_tables = data.read_ushort(2)? as usize;

        let mut records = Vec::with_capacity(num_tables);
        for i in 0..num_tables {
            let base = 4 + i * 8;
            records.push(EncodingRecord {
                platform_id: data.read_ushort(base)?,
                encoding_id: data.read_ushort(base + 2)?,
                offset: data.read_ulong(base + 4)? as usize,
            });
        }

        let mut candidates: Vec<(u8, EncodingRecord)> = records
            .into_iter()
            .filter_map(|r| r.priority().map(|p| (p, r)))
            .collect();
        if candidates.is_empty() {
            return Err(Error::NoUnicodeCmap);
        }
        candidates.sort_by_key(|&(p, _)| p);

        let mut last_error = Error::NoUnicodeCmap;
        for (_, record) in candidates {
            match Self::parse_subtable(data, record.offset) {
                Ok((format, mappings)) => {
                    log::debug!(
                        "Using cmap subtable ({}, {}) format {} with {} mappings",
                        record.platform_id,
                        record.encoding_id,
                        format,
                        mappings.len()
                    );
                    return Ok(Self {
                        mappings,
                        platform_id: record.platform_id,
                        encoding_id: record.encoding_id,
                        format,
                    });
                },
                Err(e) => {
                    log::debug!(
                        "Skipping cmap subtable ({}, {}): {}",
                        record.platform_id,
                        record.encoding_id,
                        e
                    );
                    last_error = e;
                },
            }
        }
        Err(last_error)
    }

    fn parse_subtable(data: &BinaryTableData, offset: usize) -> Result<(u16, BTreeMap<u32, u16>)> {
        let format = data.read_ushort(offset)?;
        let mappings = match format {
            0 => parse_format0(data, offset)?,
            4 => parse_format4(data, offset)?,
            6 => parse_format6(data, offset)?,
            12 => parse_format12(data, offset)?,
            other => return Err(Error::UnsupportedCmapFormat(other)),
        };
        Ok((format, mappings))
    }

    /// Build a table directly from a mapping.
    pub fn from_mappings(mappings: BTreeMap<u32, u16>) -> Self {
        Self {
            mappings: mappings.into_iter().filter(|&(_, gid)| gid != 0).collect(),
            platform_id: 3,
            encoding_id: 10,
            format: 12,
        }
    }

    /// Glyph id for a code point, or 0 when the font has no glyph for it.
    pub fn glyph_id(&self, codepoint: u32) -> u16 {
        self.mappings.get(&codepoint).copied().unwrap_or(0)
    }

    /// Glyph id for a code point, if mapped.
    pub fn get(&self, codepoint: u32) -> Option<u16> {
        self.mappings.get(&codepoint).copied()
    }

    /// All mappings in code point order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u16)> + '_ {
        self.mappings.iter().map(|(&cp, &gid)| (cp, gid))
    }

    /// Number of mapped code points.
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Check if nothing is mapped.
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

fn insert(map: &mut BTreeMap<u32, u16>, codepoint: u32, glyph_id: u16) {
    if glyph_id != 0 && codepoint <= MAX_CODEPOINT {
        map.insert(codepoint, glyph_id);
    }
}

fn parse_format0(data: &BinaryTableData, offset: usize) -> Result<BTreeMap<u32, u16>> {
    let glyphs = data.read_bytes(offset + 6, 256)?;
    let mut map = BTreeMap::new();
    for (code, &gid) in glyphs.iter().enumerate() {
        insert(&mut map, code as u32, u16::from(gid));
    }
    Ok(map)
}

fn parse_format4(data: &BinaryTableData, offset: usize) -> Result<BTreeMap<u32, u16>> {
    let seg_count = data.read_ushort(offset + 6)? as usize / 2;
    let end_codes = offset + 14;
    let start_codes = end_codes + seg_count * 2 + 2;
    let id_deltas = start_codes + seg_count * 2;
    let id_range_offsets = id_deltas + seg_count * 2;

    let mut map = BTreeMap::new();
    for seg in 0..seg_count {
        let end = data.read_ushort(end_codes + seg * 2)?;
        let start = data.read_ushort(start_codes + seg * 2)?;
        let delta = data.read_ushort(id_deltas + seg * 2)?;
        let range_pos = id_range_offsets + seg * 2;
        let range_offset = data.read_ushort(range_pos)? as usize;

        if start > end {
            continue;
        }
        for code in start..=end {
            if code == 0xFFFF {
                break;
            }
            let gid = if range_offset == 0 {
                code.wrapping_add(delta)
            } else {
                let addr = range_pos + range_offset + (code - start) as usize * 2;
                match data.read_ushort(addr)? {
                    0 => 0,
                    g => g.wrapping_add(delta),
                }
            };
            insert(&mut map, u32::from(code), gid);
        }
    }
    Ok(map)
}

fn parse_format6(data: &BinaryTableData, offset: usize) -> Result<BTreeMap<u32, u16>> {
    let first_code = u32::from(data.read_ushort(offset + 6)?);
    let entry_count = data.read_ushort(offset + 8)? as usize;
    let mut map = BTreeMap::new();
    for i in 0..entry_count {
        let gid = data.read_ushort(offset + 10 + i * 2)?;
        insert(&mut map, first_code + i as u32, gid);
    }
    Ok(map)
}

fn parse_format12(data: &BinaryTableData, offset: usize) -> Result<BTreeMap<u32, u16>> {
    let num_groups = data.read_ulong(offset + 12)? as usize;
    let mut map = BTreeMap::new();
    for i in 0..num_groups {
        let base = offset + 16 + i * 12;
        let start = data.read_ulong(base)?;
        let end = data.read_ulong(base + 4)?.min(MAX_CODEPOINT);
        let start_glyph = data.read_ulong(base + 8)?;
        if start > end {
            continue;
        }
        for code in start..=end {
            let gid = start_glyph.wrapping_add(code - start);
            if let Ok(gid) = u16::try_from(gid) {
                insert(&mut map, code, gid);
            }
        }
    }
    Ok(map)
}

/// Encode a code point to glyph mapping as a `cmap` table.
///
/// Writes a (3, 1) format 4 subtable for the Basic Multilingual Plane and,
/// when supplementary code points are present, a (3, 10) format 12 subtable
/// covering everything. Mappings too fragmented for format 4's 16-bit
/// length get the format 12 subtable alone.
pub fn encode_cmap_table(mappings: &BTreeMap<u32, u16>) -> BinaryTableData {
    let format4 = encode_format4(mappings);
    let needs_format12 = format4.is_none() || mappings.keys().any(|&cp| cp > 0xFFFF);
    if format4.is_none() {
        log::debug!(
            "cmap with {} mappings exceeds format 4 limits, writing format 12 only",
            mappings.len()
        );
    }

    let mut subtables: Vec<(u16, u16, BinaryTableData)> = Vec::with_capacity(2);
    if let Some(format4) = format4 {
        subtables.push((3, 1, format4));
    }
    if needs_format12 {
        subtables.push((3, 10, encode_format12(mappings)));
    }

    let mut out = BinaryTableData::default();
    out.write_ushort(0);
    out.write_ushort(subtables.len() as u16);
    let mut offset = 4 + 8 * subtables.len() as u32;
    for (platform_id, encoding_id, subtable) in &subtables {
        out.write_ushort(*platform_id);
        out.write_ushort(*encoding_id);
        out.write_ulong(offset);
        offset += subtable.len() as u32;
    }
    for (_, _, subtable) in &subtables {
        out.write_bytes(subtable.as_bytes());
    }
    out
}

/// Runs of consecutive code points mapped to consecutive glyph ids.
fn runs(mappings: impl Iterator<Item = (u32, u16)>) -> Vec<(u32, u32, u16)> {
    let mut runs: Vec<(u32, u32, u16)> = Vec::new();
    for (cp, gid) in mappings {
        match runs.last_mut() {
            Some((start, end, start_gid))
                if cp == *end + 1 && u32::from(gid) == u32::from(*start_gid) + (cp - *start) =>
            {
                *end = cp;
            },
            _ => runs.push((cp, cp, gid)),
        }
    }
    runs
}

/// Format 4 subtable, or `None` when its length would not fit in 16 bits.
fn encode_format4(mappings: &BTreeMap<u32, u16>) -> Option<BinaryTableData> {
    let bmp = mappings.range(..0xFFFF).map(|(&cp, &gid)| (cp, gid));
    let mut segments: Vec<(u16, u16, u16)> = runs(bmp)
        .into_iter()
        .map(|(start, end, gid)| {
            let delta = (u32::from(gid).wrapping_sub(start) & 0xFFFF) as u16;
            (start as u16, end as u16, delta)
        })
        .collect();
    segments.push((0xFFFF, 0xFFFF, 1));

    let length = 16 + 8 * segments.len();
    if length > usize::from(u16::MAX) {
        return None;
    }
    // Bounded by the length check above
    let seg_count = segments.len() as u16;
    let (search_range, entry_selector, range_shift) = search_params(seg_count, 2);

    let mut out = BinaryTableData::default();
    out.write_ushort(4);
    out.write_ushort(length as u16);
    out.write_ushort(0);
    out.write_ushort(seg_count * 2);
    out.write_ushort(search_range);
    out.write_ushort(entry_selector);
    out.write_ushort(range_shift);
    for &(_, end, _) in &segments {
        out.write_ushort(end);
    }
    out.write_ushort(0);
    for &(start, _, _) in &segments {
        out.write_ushort(start);
    }
    for &(_, _, delta) in &segments {
        out.write_ushort(delta);
    }
    for _ in &segments {
        out.write_ushort(0);
    }
    Some(out)
}

fn encode_format12(mappings: &BTreeMap<u32, u16>) -> BinaryTableData {
    let groups = runs(mappings.iter().map(|(&cp, &gid)| (cp, gid)));
    let mut out = BinaryTableData::default();
    out.write_ushort(12);
    out.write_ushort(0);
    out.write_ulong(16 + 12 * groups.len() as u32);
    out.write_ulong(0);
    out.write_ulong(groups.len() as u32);
    for (start, end, gid) in groups {
        out.write_ulong(start);
        out.write_ulong(end);
        out.write_ulong(u32::from(gid));
    }
    out
}
