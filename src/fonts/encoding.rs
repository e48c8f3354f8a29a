//! Single-byte text encodings for the built-in fonts.
//!
//! Each encoding is a static 256-entry table from byte code to Unicode code
//! point, 0 marking an unused code. Escaping text for a Base-14 font maps
//! every character back to its byte through the same table and writes the
//! bytes as a PDF literal string:
//!
//! ```text
//! (Hello \(World\)) Tj
//! ```

/// Byte encodings a Base-14 font can be specialized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum FontEncoding {
    /// Adobe StandardEncoding
    #[default]
    Standard,
    /// Mac OS Roman
    MacRoman,
    /// Windows code page 1252
    WinAnsi,
}

impl FontEncoding {
    /// All encodings, in ordinal order.
    pub const ALL: [FontEncoding; 3] = [
        FontEncoding::Standard,
        FontEncoding::MacRoman,
        FontEncoding::WinAnsi,
    ];

    /// Stable ordinal used in font search keys.
    pub fn ordinal(self) -> u8 {
        match self {
            FontEncoding::Standard => 0,
            FontEncoding::MacRoman => 1,
            FontEncoding::WinAnsi => 2,
        }
    }

    /// PDF name of the encoding.
    pub fn pdf_name(self) -> &'static str {
        match self {
            FontEncoding::Standard => "StandardEncoding",
            FontEncoding::MacRoman => "MacRomanEncoding",
            FontEncoding::WinAnsi => "WinAnsiEncoding",
        }
    }

    fn table(self) -> &'static [u16; 256] {
        match self {
            FontEncoding::Standard => &STANDARD_ENCODING,
            FontEncoding::MacRoman => &MAC_ROMAN_ENCODING,
            FontEncoding::WinAnsi => &WIN_ANSI_ENCODING,
        }
    }

    /// Character for a byte code, `None` for unused codes.
    pub fn to_char(self, byte: u8) -> Option<char> {
        match self.table()[byte as usize] {
            0 => None,
            cp => char::from_u32(u32::from(cp)),
        }
    }

    /// Byte code for a character, `None` when the encoding lacks it.
    pub fn encode(self, ch: char) -> Option<u8> {
        let cp = ch as u32;
        if cp == 0 || cp > 0xFFFF {
            return None;
        }
        self.table()
            .iter()
            .position(|&entry| u32::from(entry) == cp)
            .map(|pos| pos as u8)
    }

    /// Encode text, replacing unsupported characters with `?`.
    pub fn encode_str(self, text: &str) -> Vec<u8> {
        text.chars()
            .map(|ch| self.encode(ch).unwrap_or(b'?'))
            .collect()
    }
}

/// Escape a byte for a PDF literal string.
fn escape_byte_for_literal(b: u8, out: &mut String) {
    match b {
        b'(' => out.push_str("\\("),
        b')' => out.push_str("\\)"),
        b'\\' => out.push_str("\\\\"),
        0x0A => out.push_str("\\n"),
        0x0D => out.push_str("\\r"),
        0x09 => out.push_str("\\t"),
        0x08 => out.push_str("\\b"),
        0x0C => out.push_str("\\f"),
        b if (0x20..0x7F).contains(&b) => out.push(b as char),
        b => out.push_str(&format!("\\{:03o}", b)),
    }
}

/// Encode bytes as a PDF literal string with proper escaping.
pub fn encode_bytes_as_literal(bytes: &[u8]) -> String {
    let mut result = String::with_capacity(bytes.len() * 2 + 2);
    result.push('(');
    for &b in bytes {
        escape_byte_for_literal(b, &mut result);
    }
    result.push(')');
    result
}

/// Code points 0x01..=0x7E shared by the Latin encodings, with control
/// codes mapping to themselves.
const fn ascii_base() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 1;
    while i < 0x7F {
        table[i] = i as u16;
        i += 1;
    }
    table
}

const fn with_high(mut table: [u16; 256], high: &[(u8, u16)]) -> [u16; 256] {
    let mut i = 0;
    while i < high.len() {
        table[high[i].0 as usize] = high[i].1;
        i += 1;
    }
    table
}

const fn latin1_upper(mut table: [u16; 256]) -> [u16; 256] {
    let mut i = 0xA0;
    while i <= 0xFF {
        table[i] = i as u16;
        i += 1;
    }
    table
}

static STANDARD_ENCODING: [u16; 256] = with_high(
    ascii_base(),
    &[
        (0x27, 0x2019), // quoteright
        (0x60, 0x2018), // quoteleft
        (0xA1, 0x00A1),
        (0xA2, 0x00A2),
        (0xA3, 0x00A3),
        (0xA4, 0x2044),
        (0xA5, 0x00A5),
        (0xA6, 0x0192),
        (0xA7, 0x00A7),
        (0xA8, 0x00A4),
        (0xA9, 0x0027),
        (0xAA, 0x201C),
        (0xAB, 0x00AB),
        (0xAC, 0x2039),
        (0xAD, 0x203A),
        (0xAE, 0xFB01),
        (0xAF, 0xFB02),
        (0xB1, 0x2013),
        (0xB2, 0x2020),
        (0xB3, 0x2021),
        (0xB4, 0x00B7),
        (0xB6, 0x00B6),
        (0xB7, 0x2022),
        (0xB8, 0x201A),
        (0xB9, 0x201E),
        (0xBA, 0x201D),
        (0xBB, 0x00BB),
        (0xBC, 0x2026),
        (0xBD, 0x2030),
        (0xBF, 0x00BF),
        (0xC1, 0x0060),
        (0xC2, 0x00B4),
        (0xC3, 0x02C6),
        (0xC4, 0x02DC),
        (0xC5, 0x00AF),
        (0xC6, 0x02D8),
        (0xC7, 0x02D9),
        (0xC8, 0x00A8),
        (0xCA, 0x02DA),
        (0xCB, 0x00B8),
        (0xCD, 0x02DD),
        (0xCE, 0x02DB),
        (0xCF, 0x02C7),
        (0xD0, 0x2014),
        (0xE1, 0x00C6),
        (0xE3, 0x00AA),
        (0xE8, 0x0141),
        (0xE9, 0x00D8),
        (0xEA, 0x0152),
        (0xEB, 0x00BA),
        (0xF1, 0x00E6),
        (0xF5, 0x0131),
        (0xF8, 0x0142),
        (0xF9, 0x00F8),
        (0xFA, 0x0153),
        (0xFB, 0x00DF),
    ],
);

const MAC_ROMAN_HIGH: [u16; 128] = [
    0x00C4, 0x00C5, 0x00C7, 0x00C9, 0x00D1, 0x00D6, 0x00DC, 0x00E1, // 0x80
    0x00E0, 0x00E2, 0x00E4, 0x00E3, 0x00E5, 0x00E7, 0x00E9, 0x00E8, // 0x88
    0x00EA, 0x00EB, 0x00ED, 0x00EC, 0x00EE, 0x00EF, 0x00F1, 0x00F3, // 0x90
    0x00F2, 0x00F4, 0x00F6, 0x00F5, 0x00FA, 0x00F9, 0x00FB, 0x00FC, // 0x98
    0x2020, 0x00B0, 0x00A2, 0x00A3, 0x00A7, 0x2022, 0x00B6, 0x00DF, // 0xA0
    0x00AE, 0x00A9, 0x2122, 0x00B4, 0x00A8, 0x2260, 0x00C6, 0x00D8, // 0xA8
    0x221E, 0x00B1, 0x2264, 0x2265, 0x00A5, 0x00B5, 0x2202, 0x2211, // 0xB0
    0x220F, 0x03C0, 0x222B, 0x00AA, 0x00BA, 0x03A9, 0x00E6, 0x00F8, // 0xB8
    0x00BF, 0x00A1, 0x00AC, 0x221A, 0x0192, 0x2248, 0x2206, 0x00AB, // 0xC0
    0x00BB, 0x2026, 0x00A0, 0x00C0, 0x00C3, 0x00D5, 0x0152, 0x0153, // 0xC8
    0x2013, 0x2014, 0x201C, 0x201D, 0x2018, 0x2019, 0x00F7, 0x25CA, // 0xD0
    0x00FF, 0x0178, 0x2044, 0x20AC, 0x2039, 0x203A, 0xFB01, 0xFB02, // 0xD8
    0x2021, 0x00B7, 0x201A, 0x201E, 0x2030, 0x00C2, 0x00CA, 0x00C1, // 0xE0
    0x00CB, 0x00C8, 0x00CD, 0x00CE, 0x00CF, 0x00CC, 0x00D3, 0x00D4, // 0xE8
    0xF8FF, 0x00D2, 0x00DA, 0x00DB, 0x00D9, 0x0131, 0x02C6, 0x02DC, // 0xF0
    0x00AF, 0x02D8, 0x02D9, 0x02DA, 0x00B8, 0x02DD, 0x02DB, 0x02C7, // 0xF8
];

const fn mac_roman() -> [u16; 256] {
    let mut table = ascii_base();
    let mut i = 0;
    while i < 128 {
        table[0x80 + i] = MAC_ROMAN_HIGH[i];
        i += 1;
    }
    table
}

static MAC_ROMAN_ENCODING: [u16; 256] = mac_roman();

static WIN_ANSI_ENCODING: [u16; 256] = with_high(
    latin1_upper(ascii_base()),
    &[
        (0x80, 0x20AC), // Euro sign
        (0x82, 0x201A), // Single low-9 quotation mark
        (0x83, 0x0192), // Latin small letter f with hook
        (0x84, 0x201E), // Double low-9 quotation mark
        (0x85, 0x2026), // Horizontal ellipsis
        (0x86, 0x2020), // Dagger
        (0x87, 0x2021), // Double dagger
        (0x88, 0x02C6), // Modifier letter circumflex accent
        (0x89, 0x2030), // Per mille sign
        (0x8A, 0x0160), // Latin capital letter S with caron
        (0x8B, 0x2039), // Single left-pointing angle quotation mark
        (0x8C, 0x0152), // Latin capital ligature OE
        (0x8E, 0x017D), // Latin capital letter Z with caron
        (0x91, 0x2018), // Left single quotation mark
        (0x92, 0x2019), // Right single quotation mark
        (0x93, 0x201C), // Left double quotation mark
        (0x94, 0x201D), // Right double quotation mark
        (0x95, 0x2022), // Bullet
        (0x96, 0x2013), // En dash
        (0x97, 0x2014), // Em dash
        (0x98, 0x02DC), // Small tilde
        (0x99, 0x2122), // Trade mark sign
        (0x9A, 0x0161), // Latin small letter s with caron
        (0x9B, 0x203A), // Single right-pointing angle quotation mark
        (0x9C, 0x0153), // Latin small ligature oe
        (0x9E, 0x017E), // Latin small letter z with caron
        (0x9F, 0x0178), // Latin capital letter Y with diaeresis
    ],
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winansi_mapping() {
        let enc = FontEncoding::WinAnsi;
        assert_eq!(enc.encode('A'), Some(0x41));
        assert_eq!(enc.encode('\u{20AC}'), Some(0x80)); // Euro
        assert_eq!(enc.encode('\u{2019}'), Some(0x92)); // Right single quote
        assert_eq!(enc.encode('é'), Some(0xE9));
        assert_eq!(enc.encode('\u{4E2D}'), None);
        assert_eq!(enc.to_char(0x81), None);
    }

    #[test]
    fn test_mac_roman_mapping() {
        let enc = FontEncoding::MacRoman;
        assert_eq!(enc.to_char(0x8E), Some('é'));
        assert_eq!(enc.to_char(0xDB), Some('\u{20AC}'));
        assert_eq!(enc.encode('é'), Some(0x8E));
        assert_eq!(enc.encode('A'), Some(0x41));
    }

    #[test]
    fn test_standard_quotes() {
        let enc = FontEncoding::Standard;
        assert_eq!(enc.encode('\''), Some(0xA9));
        assert_eq!(enc.encode('\u{2019}'), Some(0x27));
        assert_eq!(enc.encode('é'), None);
        assert_eq!(enc.to_char(0xE1), Some('Æ'));
    }

    #[test]
    fn test_encode_str_replaces_unmappable() {
        assert_eq!(FontEncoding::WinAnsi.encode_str("a\u{4E2D}b"), b"a?b".to_vec());
    }

    #[test]
    fn test_ordinals_are_distinct() {
        let ordinals: Vec<u8> = FontEncoding::ALL.iter().map(|e| e.ordinal()).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
    }

    #[test]
    fn test_encode_bytes_as_literal() {
        let result = encode_bytes_as_literal(b"ABC");
        assert_eq!(result, "(ABC)");

        let result = encode_bytes_as_literal(&[0x28, 0x29]); // '(' ')'
        assert_eq!(result, "(\\(\\))");

        let result = encode_bytes_as_literal(b"back\\slash");
        assert_eq!(result, "(back\\\\slash)");
    }

    #[test]
    fn test_encode_bytes_as_literal_octal() {
        assert_eq!(encode_bytes_as_literal(&[0xE9, 0x01]), "(\\351\\001)");
        assert_eq!(encode_bytes_as_literal(b"a\nb"), "(a\\nb)");
    }
}
