//! Subset tags.
//!
//! An embedded subset font is named `ABCDEF+BaseName`, where the six
//! uppercase letters identify the particular subset.

use std::hash::{Hash, Hasher};

use super::ch2gid::CharToGlyphMap;

/// Number of letters in a subset tag.
pub const SUBSET_TAG_LEN: usize = 6;

/// 26^6, the number of distinct subset tags.
const TAG_SPACE: u64 = 308_915_776;

/// Render `n` in base 26 with digits `A`..`Z`, most significant first.
///
/// Zero renders as `"A"`.
pub fn to_base26(mut n: u64) -> String {
    let mut digits = Vec::new();
    loop {
        digits.push(b'A' + (n % 26) as u8);
        n /= 26;
        if n == 0 {
            break;
        }
    }
    digits.iter().rev().map(|&d| d as char).collect()
}

/// Inverse of [`to_base26`]. Returns `None` for characters outside `A`..`Z`
/// or on overflow.
pub fn from_base26(s: &str) -> Option<u64> {
    s.bytes().try_fold(0u64, |acc, b| {
        if !b.is_ascii_uppercase() {
            return None;
        }
        acc.checked_mul(26)?.checked_add(u64::from(b - b'A'))
    })
}

/// Six-letter tag for `n`, left-padded with `A`, followed by `+`.
///
/// Values of `n` that need more than six digits wrap around the tag space.
pub fn make_subset_tag(n: u64) -> String {
    format!("{:A>width$}+", to_base26(n % TAG_SPACE), width = SUBSET_TAG_LEN)
}

/// Deterministic tag for a glyph mapping: the same subset always gets the
/// same tag.
pub fn subset_tag_for(ch2gid: &CharToGlyphMap) -> String {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for (codepoint, mapping) in ch2gid.iter() {
        codepoint.hash(&mut hasher);
        mapping.old_gid.hash(&mut hasher);
    }
    make_subset_tag(hasher.finish())
}
