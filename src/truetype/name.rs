//! Naming (`name`) table.

use super::table_data::BinaryTableData;
use crate::error::Result;
use crate::fonts::encoding::FontEncoding;

/// Family name id
pub const NAME_ID_FAMILY: u16 = 1;
/// Subfamily (style) name id
pub const NAME_ID_SUBFAMILY: u16 = 2;
/// Full font name id
pub const NAME_ID_FULL_NAME: u16 = 4;
/// PostScript name id
pub const NAME_ID_POSTSCRIPT: u16 = 6;

/// Windows English (United States) language id.
const LANGUAGE_EN_US: u16 = 0x0409;

/// One decoded name record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRecord {
    /// Platform id
    pub platform_id: u16,
    /// Platform-specific encoding id
    pub encoding_id: u16,
    /// Language id
    pub language_id: u16,
    /// Name id
    pub name_id: u16,
    /// Decoded string
    pub value: String,
}

impl NameRecord {
    fn rank(&self) -> u8 {
        match (self.platform_id, self.language_id) {
            (3, LANGUAGE_EN_US) => 0,
            (3, _) => 1,
            (1, 0) => 2,
            (0, _) => 3,
            _ => 4,
        }
    }
}

/// Decoded `name` table.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    records: Vec<NameRecord>,
}

impl NameTable {
    /// Decode all records with a known string encoding.
    pub fn parse(data: &BinaryTableData) -> Result<Self> {
        let count = data.read_ushort(2)? as usize;
        let storage = data.read_ushort(4)? as usize;

        let mut records = Vec::with_capacity(count);
        for i in 0..count {
            let base = 6 + i * 12;
            let platform_id = data.read_ushort(base)?;
            let encoding_id = data.read_ushort(base + 2)?;
            let language_id = data.read_ushort(base + 4)?;
            let name_id = data.read_ushort(base + 6)?;
            let length = data.read_ushort(base + 8)? as usize;
            let offset = data.read_ushort(base + 10)? as usize;

            let bytes = match data.read_bytes(storage + offset, length) {
                Ok(bytes) => bytes,
                Err(e) => {
                    log::debug!("Skipping name record {}: {}", name_id, e);
                    continue;
                },
            };
            let value = match platform_id {
                0 | 3 => decode_utf16be(bytes),
                1 if encoding_id == 0 => bytes
                    .iter()
                    .map(|&b| FontEncoding::MacRoman.to_char(b).unwrap_or('?'))
                    .collect(),
                _ => continue,
            };
            records.push(NameRecord {
                platform_id,
                encoding_id,
                language_id,
                name_id,
                value,
            });
        }
        Ok(Self { records })
    }

    /// All decoded records.
    pub fn records(&self) -> &[NameRecord] {
        &self.records
    }

    /// Best string for a name id, preferring Windows English.
    pub fn get(&self, name_id: u16) -> Option<&str> {
        self.records
            .iter()
            .filter(|r| r.name_id == name_id && !r.value.is_empty())
            .min_by_key(|r| r.rank())
            .map(|r| r.value.as_str())
    }

    /// PostScript name.
    pub fn postscript_name(&self) -> Option<&str> {
        self.get(NAME_ID_POSTSCRIPT)
    }

    /// Family name.
    pub fn family_name(&self) -> Option<&str> {
        self.get(NAME_ID_FAMILY)
    }

    /// Subfamily (style) name.
    pub fn subfamily_name(&self) -> Option<&str> {
        self.get(NAME_ID_SUBFAMILY)
    }
}

fn decode_utf16be(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}
