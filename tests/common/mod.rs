//! Synthetic TrueType fonts for integration tests.
//!
//! Glyph layout at 2048 units per em:
//!
//! | gid | char     | advance | notes                         |
//! |-----|----------|---------|-------------------------------|
//! | 0   | .notdef  | 1229    |                               |
//! | 1   | `A`      | 1024    | 500/1000 em                   |
//! | 2   | `B`      | 1229    |                               |
//! | 3   | `C`      | 2048    |                               |
//! | 4   | space    | 512     | no outline                    |
//! | 5   | (accent) | 0       | only reachable as a component |
//! | 6   | `Ä`      | 1024    | composite of glyphs 1 and 5   |
//! | 7   | U+1F600  | 2048    |                               |
//! | 8   | (none)   | 2048    | left-side bearing only        |

#![allow(dead_code)]

use std::collections::BTreeMap;

use pdf_fontkit::truetype::font_program::SFNT_VERSION_TRUETYPE;
use pdf_fontkit::truetype::writer::write_font;
use pdf_fontkit::truetype::{
    encode_cmap_table, encode_loca_table, encode_metrics_table, BinaryTableData, Table, Tag,
};

pub const UNITS_PER_EM: u16 = 2048;
pub const NUM_GLYPHS: u16 = 9;
pub const GRINNING_FACE: char = '\u{1F600}';

const ARG_1_AND_2_ARE_WORDS: u16 = 0x0001;
const MORE_COMPONENTS: u16 = 0x0020;

/// (advance, bounding box) of every glyph with long metrics.
const GLYPHS: [(u16, Option<[i16; 4]>); 8] = [
    (1229, Some([100, 0, 1100, 1400])),
    (1024, Some([0, 0, 1000, 1434])),
    (1229, Some([100, 0, 1100, 1434])),
    (2048, Some([50, -400, 2000, 1500])),
    (512, None),
    (0, Some([300, 1500, 700, 1700])),
    (1024, Some([0, 0, 1000, 1700])),
    (2048, Some([0, -200, 2048, 1800])),
];

/// Builder for a small TrueType font with a fixed glyph set.
#[derive(Debug, Clone)]
pub struct SyntheticFont {
    pub family: String,
    pub bold: bool,
    pub italic: bool,
    pub vertical: bool,
}

impl SyntheticFont {
    pub fn new(family: &str) -> Self {
        Self {
            family: family.to_string(),
            bold: false,
            italic: false,
            vertical: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn vertical(mut self) -> Self {
        self.vertical = true;
        self
    }

    pub fn subfamily(&self) -> &'static str {
        match (self.bold, self.italic) {
            (true, true) => "Bold Italic",
            (true, false) => "Bold",
            (false, true) => "Italic",
            (false, false) => "Regular",
        }
    }

    pub fn postscript_name(&self) -> String {
        format!(
            "{}-{}",
            self.family.replace(' ', ""),
            self.subfamily().replace(' ', "")
        )
    }

    pub fn tables(&self) -> BTreeMap<Tag, Table> {
        let mut glyf = BinaryTableData::default();
        let mut offsets = vec![0u32];
        for gid in 0..NUM_GLYPHS as usize {
            match gid {
                6 => glyf.write_bytes(&composite_glyph([0, 0, 1000, 1700], &[(1, 0), (5, 300)])),
                8 => glyf.write_bytes(&simple_glyph([0, 0, 2048, 1000])),
                _ => match GLYPHS[gid].1 {
                    Some(bbox) => glyf.write_bytes(&simple_glyph(bbox)),
                    None => 0,
                },
            };
            glyf.pad_to_long();
            offsets.push(glyf.len() as u32);
        }
        let loca = encode_loca_table(&offsets).unwrap();

        let mut hmtx = encode_metrics_table(
            &GLYPHS
                .iter()
                .map(|&(advance, bbox)| (advance, bbox.map_or(0, |b| b[0])))
                .collect::<Vec<_>>(),
        );
        hmtx.write_short(0);

        let mut cmap = BTreeMap::new();
        cmap.insert(' ' as u32, 4);
        cmap.insert('A' as u32, 1);
        cmap.insert('B' as u32, 2);
        cmap.insert('C' as u32, 3);
        cmap.insert(0xC4, 6);
        cmap.insert(GRINNING_FACE as u32, 7);

        let mut tables = vec![
            Table::new(Tag::HEAD, self.head(loca.version().index_to_loc_format())),
            Table::new(Tag::HHEA, metrics_header(0x0001_0000, GLYPHS.len() as u16)),
            Table::new(Tag::MAXP, maxp()),
            Table::new(Tag::HMTX, hmtx),
            Table::new(Tag::CMAP, encode_cmap_table(&cmap)),
            loca.to_table(),
            Table::new(Tag::GLYF, glyf),
            Table::new(Tag::NAME, self.name()),
            Table::new(Tag::OS2, self.os2()),
            Table::new(Tag::POST, self.post()),
        ];
        if self.vertical {
            let vmtx = encode_metrics_table(&[(2048, 0); NUM_GLYPHS as usize]);
            tables.push(Table::new(Tag::VHEA, metrics_header(0x0001_1000, NUM_GLYPHS)));
            tables.push(Table::new(Tag::VMTX, vmtx));
        }
        tables.into_iter().map(|t| (t.tag(), t)).collect()
    }

    /// Complete font file.
    pub fn build(&self) -> Vec<u8> {
        write_font(SFNT_VERSION_TRUETYPE, &self.tables()).unwrap()
    }

    fn head(&self, index_to_loc_format: i16) -> BinaryTableData {
        let mut mac_style = 0u16;
        if self.bold {
            mac_style |= 0x01;
        }
        if self.italic {
            mac_style |= 0x02;
        }
        let mut data = BinaryTableData::default();
        data.write_ulong(0x0001_0000);
        data.write_ulong(0x0001_0000);
        data.write_ulong(0); // checkSumAdjustment
        data.write_ulong(0x5F0F_3CF5);
        data.write_ushort(0x000B);
        data.write_ushort(UNITS_PER_EM);
        data.write_bytes(&[0u8; 16]);
        data.write_short(0);
        data.write_short(-500);
        data.write_short(2048);
        data.write_short(1900);
        data.write_ushort(mac_style);
        data.write_ushort(8);
        data.write_short(2);
        data.write_short(index_to_loc_format);
        data.write_short(0);
        data
    }

    fn name(&self) -> BinaryTableData {
        let full_name = format!("{} {}", self.family, self.subfamily());
        let records = [
            (1u16, self.family.clone()),
            (2, self.subfamily().to_string()),
            (4, full_name),
            (6, self.postscript_name()),
        ];

        let mut storage = Vec::new();
        let mut data = BinaryTableData::default();
        data.write_ushort(0);
        data.write_ushort(records.len() as u16);
        data.write_ushort(6 + 12 * records.len() as u16);
        for (name_id, value) in &records {
            let encoded: Vec<u8> = value.encode_utf16().flat_map(|u| u.to_be_bytes()).collect();
            data.write_ushort(3);
            data.write_ushort(1);
            data.write_ushort(0x0409);
            data.write_ushort(*name_id);
            data.write_ushort(encoded.len() as u16);
            data.write_ushort(storage.len() as u16);
            storage.extend_from_slice(&encoded);
        }
        data.write_bytes(&storage);
        data
    }

    fn os2(&self) -> BinaryTableData {
        let mut fs_selection = 0u16;
        if self.italic {
            fs_selection |= 0x0001;
        }
        if self.bold {
            fs_selection |= 0x0020;
        }
        if fs_selection == 0 {
            fs_selection = 0x0040;
        }
        let weight = if self.bold { 700 } else { 400 };

        let mut data = BinaryTableData::new(vec![0u8; 96]);
        data.set_ushort(0, 2).unwrap();
        data.set_ushort(2, 1100).unwrap();
        data.set_ushort(4, weight).unwrap();
        data.set_ushort(6, 5).unwrap();
        data.set_ushort(62, fs_selection).unwrap();
        data.set_ushort(64, 0x20).unwrap();
        data.set_ushort(66, 0xFFFF).unwrap();
        data.set_ushort(68, 1900).unwrap();
        data.set_ushort(70, (-500i16) as u16).unwrap();
        data.set_ushort(74, 1900).unwrap();
        data.set_ushort(76, 500).unwrap();
        data.set_ushort(86, 1024).unwrap();
        data.set_ushort(88, 1434).unwrap();
        data
    }

    fn post(&self) -> BinaryTableData {
        let italic_angle: i32 = if self.italic { -12 << 16 } else { 0 };
        let mut data = BinaryTableData::default();
        data.write_ulong(0x0003_0000);
        data.write_ulong(italic_angle as u32);
        data.write_short(-200);
        data.write_short(100);
        data.write_ulong(0);
        data.write_bytes(&[0u8; 16]);
        data
    }
}

/// `hhea` or `vhea` with fixed vertical extents.
fn metrics_header(version: u32, num_long_metrics: u16) -> BinaryTableData {
    let mut data = BinaryTableData::default();
    data.write_ulong(version);
    data.write_short(1900);
    data.write_short(-500);
    data.write_short(0);
    data.write_ushort(2048);
    data.write_short(0);
    data.write_short(0);
    data.write_short(2048);
    data.write_short(1);
    data.write_short(0);
    data.write_short(0);
    data.write_bytes(&[0u8; 8]);
    data.write_short(0);
    data.write_ushort(num_long_metrics);
    data
}

fn maxp() -> BinaryTableData {
    let mut data = BinaryTableData::default();
    data.write_ulong(0x0001_0000);
    data.write_ushort(NUM_GLYPHS);
    data.write_bytes(&[0u8; 26]);
    data
}

/// One contour with a single on-curve point.
fn simple_glyph(bbox: [i16; 4]) -> Vec<u8> {
    let mut g = BinaryTableData::default();
    g.write_short(1);
    for v in bbox {
        g.write_short(v);
    }
    g.write_ushort(0); // endPtsOfContours
    g.write_ushort(0); // instructionLength
    g.write_u8(0x01);
    g.write_short(bbox[0]);
    g.write_short(bbox[1]);
    g.into_bytes()
}

/// Composite glyph placing `(glyph_id, dy)` components.
fn composite_glyph(bbox: [i16; 4], components: &[(u16, i16)]) -> Vec<u8> {
    let mut g = BinaryTableData::default();
    g.write_short(-1);
    for v in bbox {
        g.write_short(v);
    }
    for (i, &(gid, dy)) in components.iter().enumerate() {
        let more = if i + 1 < components.len() { MORE_COMPONENTS } else { 0 };
        g.write_ushort(ARG_1_AND_2_ARE_WORDS | more);
        g.write_ushort(gid);
        g.write_short(0);
        g.write_short(dy);
    }
    g.into_bytes()
}

/// Wrap standalone font files into one TrueType Collection.
pub fn build_collection(faces: &[Vec<u8>]) -> Vec<u8> {
    let mut out = BinaryTableData::default();
    out.write_ulong(0x7474_6366);
    out.write_ulong(0x0001_0000);
    out.write_ulong(faces.len() as u32);
    let offsets_at = out.len();
    for _ in faces {
        out.write_ulong(0);
    }
    out.pad_to_long();

    for (i, face) in faces.iter().enumerate() {
        let base = out.len() as u32;
        out.set_ulong(offsets_at + i * 4, base).unwrap();

        let mut face = BinaryTableData::new(face.clone());
        let num_tables = face.read_ushort(4).unwrap() as usize;
        for t in 0..num_tables {
            let field = 12 + t * 16 + 8;
            let offset = face.read_ulong(field).unwrap();
            face.set_ulong(field, offset + base).unwrap();
        }
        out.write_bytes(face.as_bytes());
        out.pad_to_long();
    }
    out.into_bytes()
}

/// Write a font file into a directory and return its path.
pub fn write_file(dir: &std::path::Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
