//! Character to glyph-id mapping shared by escaping, subsetting, width
//! arrays and ToUnicode CMaps.

use std::collections::BTreeSet;

use indexmap::IndexMap;

/// Glyph ids recorded for one code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMapping {
    /// Glyph id in the original font program
    pub old_gid: u16,
    /// Glyph id in the subset (equal to `old_gid` when embedding the full font)
    pub new_gid: u16,
}

/// Insertion-ordered map from Unicode code point to glyph ids.
///
/// A code point is recorded at most once; later inserts for the same code
/// point are ignored.
#[derive(Debug, Clone, Default)]
pub struct CharToGlyphMap {
    entries: IndexMap<u32, GlyphMapping>,
}

impl CharToGlyphMap {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a code point. Returns false if it was already present.
    pub fn insert(&mut self, codepoint: u32, old_gid: u16, new_gid: u16) -> bool {
        if self.entries.contains_key(&codepoint) {
            return false;
        }
        self.entries
            .insert(codepoint, GlyphMapping { old_gid, new_gid });
        true
    }

    /// Glyph ids for a code point.
    pub fn get(&self, codepoint: u32) -> Option<GlyphMapping> {
        self.entries.get(&codepoint).copied()
    }

    /// Check if a code point has been recorded.
    pub fn contains(&self, codepoint: u32) -> bool {
        self.entries.contains_key(&codepoint)
    }

    /// Number of recorded code points.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-use order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, GlyphMapping)> + '_ {
        self.entries.iter().map(|(&cp, &m)| (cp, m))
    }

    /// Entries ordered by `new_gid`; ties keep first-use order.
    pub fn sorted_by_new_gid(&self) -> Vec<(u32, GlyphMapping)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|&(_, m)| m.new_gid);
        entries
    }

    /// Distinct original glyph ids, ascending.
    pub fn old_gids(&self) -> BTreeSet<u16> {
        self.entries.values().map(|m| m.old_gid).collect()
    }

    /// Lowest and highest recorded code points.
    pub fn codepoint_range(&self) -> Option<(u32, u32)> {
        let min = self.entries.keys().min()?;
        let max = self.entries.keys().max()?;
        Some((*min, *max))
    }
}

impl FromIterator<(u32, GlyphMapping)> for CharToGlyphMap {
    fn from_iter<I: IntoIterator<Item = (u32, GlyphMapping)>>(iter: I) -> Self {
        let mut map = CharToGlyphMap::new();
        for (cp, m) in iter {
            map.insert(cp, m.old_gid, m.new_gid);
        }
        map
    }
}
