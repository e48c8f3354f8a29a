//! ToUnicode CMaps.
//!
//! Maps the 2-byte glyph codes written into content streams back to Unicode
//! so text can be extracted from the PDF. Code points beyond the Basic
//! Multilingual Plane are written as UTF-16 surrogate pairs.

use std::collections::HashSet;
use std::fmt::Write;

use super::ch2gid::CharToGlyphMap;
use super::RenderMode;

/// Maximum entries in one `beginbfchar` block.
pub const MAX_BFCHAR_ENTRIES: usize = 100;

/// UTF-16BE hex of a code point: 4 digits in the BMP, 8 for a surrogate pair.
pub fn unicode_hex(codepoint: u32) -> String {
    if codepoint <= 0xFFFF {
        format!("{:04X}", codepoint)
    } else {
        let high = ((codepoint - 0x10000) >> 10) + 0xD800;
        let low = ((codepoint - 0x10000) & 0x3FF) + 0xDC00;
        format!("{:04X}{:04X}", high, low)
    }
}

/// `bfchar` body mapping glyph codes back to code points.
///
/// Keys by original glyph id when embedding the full font and by subset glyph
/// id otherwise. Returns an empty string when there is nothing to map.
pub fn generate_ranges(ch2gid: &CharToGlyphMap, mode: RenderMode) -> String {
    let entries: Vec<(u16, u32)> = match mode {
        RenderMode::Embed => ch2gid
            .iter()
            .filter(|&(cp, m)| cp > 0 && m.old_gid > 0)
            .map(|(cp, m)| (m.old_gid, cp))
            .collect(),
        RenderMode::PathRendering => {
            let mut seen = HashSet::new();
            ch2gid
                .iter()
                .filter(|&(_, m)| seen.insert(m.new_gid))
                .map(|(cp, m)| (m.new_gid, cp))
                .collect()
        },
        RenderMode::Default => {
            let entries: Vec<(u16, u32)> = ch2gid.iter().map(|(cp, m)| (m.new_gid, cp)).collect();
            return entries.chunks(MAX_BFCHAR_ENTRIES).map(bfchar_block).collect();
        },
    };

    if entries.is_empty() {
        String::new()
    } else {
        bfchar_block(&entries)
    }
}

fn bfchar_block(entries: &[(u16, u32)]) -> String {
    let mut block = format!("{} beginbfchar\n", entries.len());
    for &(gid, codepoint) in entries {
        let _ = writeln!(block, "<{:04X}> <{}>", gid, unicode_hex(codepoint));
    }
    block.push_str("endbfchar\n");
    block
}

/// Complete ToUnicode CMap stream around a `bfchar` body.
pub fn to_unicode_cmap(body: &str) -> String {
    let mut cmap = String::new();

    // CMap header
    cmap.push_str("/CIDInit /ProcSet findresource begin\n");
    cmap.push_str("12 dict begin\n");
    cmap.push_str("begincmap\n");
    cmap.push_str("/CIDSystemInfo <<\n");
    cmap.push_str("  /Registry (Adobe)\n");
    cmap.push_str("  /Ordering (UCS)\n");
    cmap.push_str("  /Supplement 0\n");
    cmap.push_str(">> def\n");
    cmap.push_str("/CMapName /Adobe-Identity-UCS def\n");
    cmap.push_str("/CMapType 2 def\n");
    cmap.push_str("1 begincodespacerange\n");
    cmap.push_str("<0000> <FFFF>\n");
    cmap.push_str("endcodespacerange\n");

    cmap.push_str(body);

    // CMap footer
    cmap.push_str("endcmap\n");
    cmap.push_str("CMapName currentdict /CMap defineresource pop\n");
    cmap.push_str("end\n");
    cmap.push_str("end\n");

    cmap
}
