//! Glyph width arrays (`/W`).
//!
//! Format: `[ start [ w1 w2 ... ] start2 [ w1 w2 ... ] ]`, one group per run
//! of consecutive glyph ids. Widths are in 1/1000 em.

use super::ch2gid::CharToGlyphMap;
use super::RenderMode;
use crate::error::Result;

/// Width array text for the glyphs recorded in `ch2gid`.
///
/// `width` returns the scaled advance of an original glyph id. Returns `"[]"`
/// when there is nothing to list.
pub fn generate_widths(
    ch2gid: &CharToGlyphMap,
    mode: RenderMode,
    width: impl Fn(u16) -> Result<u16>,
) -> Result<String> {
    match mode {
        RenderMode::Embed => embedded_widths(ch2gid, width),
        RenderMode::PathRendering => {
            let sorted = ch2gid.sorted_by_new_gid();
            match sorted.first() {
                Some(&(_, first)) => {
                    let widths = sorted
                        .iter()
                        .map(|(_, m)| width(m.old_gid))
                        .collect::<Result<Vec<_>>>()?;
                    Ok(format!("[ {} ]", width_group(first.new_gid, &widths)))
                },
                None => Ok("[]".to_string()),
            }
        },
        RenderMode::Default => {
            if ch2gid.is_empty() {
                return Ok("[]".to_string());
            }
            let widths = ch2gid
                .sorted_by_new_gid()
                .iter()
                .map(|(_, m)| width(m.old_gid))
                .collect::<Result<Vec<_>>>()?;
            Ok(format!("[ {} ]", width_group(1, &widths)))
        },
    }
}

/// Groups of consecutive original glyph ids; glyph 0 is never listed.
fn embedded_widths(
    ch2gid: &CharToGlyphMap,
    width: impl Fn(u16) -> Result<u16>,
) -> Result<String> {
    let glyphs: Vec<u16> = ch2gid
        .old_gids()
        .into_iter()
        .filter(|&gid| gid != 0)
        .collect();
    if glyphs.is_empty() {
        return Ok("[]".to_string());
    }

    let mut groups = Vec::new();
    let mut i = 0;
    while i < glyphs.len() {
        let start = glyphs[i];
        let mut widths = vec![width(start)?];

        // Find consecutive glyphs
        while i + 1 < glyphs.len() && glyphs[i + 1] == glyphs[i] + 1 {
            i += 1;
            widths.push(width(glyphs[i])?);
        }

        groups.push(width_group(start, &widths));
        i += 1;
    }

    Ok(format!("[ {} ]", groups.join(" ")))
}

fn width_group(start: u16, widths: &[u16]) -> String {
    let widths: Vec<String> = widths.iter().map(u16::to_string).collect();
    format!("{} [ {} ]", start, widths.join(" "))
}
