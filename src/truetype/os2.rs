//! `OS/2` and `post` tables, used for font descriptor values.

use super::table_data::BinaryTableData;
use crate::error::Result;

/// The subset of `OS/2` fields a PDF font descriptor needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Os2Table {
    /// Table version
    pub version: u16,
    /// Visual weight, 100 to 900
    pub weight_class: u16,
    /// Font selection flags
    pub fs_selection: u16,
    /// Typographic ascender
    pub typo_ascender: i16,
    /// Typographic descender
    pub typo_descender: i16,
    /// Height of lowercase x, version 2 and later
    pub x_height: Option<i16>,
    /// Height of capital letters, version 2 and later
    pub cap_height: Option<i16>,
}

impl Os2Table {
    /// Decode the table.
    pub fn parse(data: &BinaryTableData) -> Result<Self> {
        let version = data.read_ushort(0)?;
        let (x_height, cap_height) = if version >= 2 {
            (Some(data.read_short(86)?), Some(data.read_short(88)?))
        } else {
            (None, None)
        };
        Ok(Self {
            version,
            weight_class: data.read_ushort(4)?,
            fs_selection: data.read_ushort(62)?,
            typo_ascender: data.read_short(68)?,
            typo_descender: data.read_short(70)?,
            x_height,
            cap_height,
        })
    }

    /// Italic bit of `fsSelection`.
    pub fn is_italic(&self) -> bool {
        self.fs_selection & 0x0001 != 0
    }

    /// Bold bit of `fsSelection`.
    pub fn is_bold(&self) -> bool {
        self.fs_selection & 0x0020 != 0
    }
}

/// The subset of `post` fields a PDF font descriptor needs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PostTable {
    /// Table version as 16.16 fixed
    pub version: u32,
    /// Italic angle in degrees, counter-clockwise from vertical
    pub italic_angle: f64,
    /// Non-zero for monospaced fonts
    pub is_fixed_pitch: bool,
}

impl PostTable {
    /// Length of the fixed header shared by all versions.
    pub const HEADER_LEN: usize = 32;

    /// Decode the table.
    pub fn parse(data: &BinaryTableData) -> Result<Self> {
        Ok(Self {
            version: data.read_ulong(0)?,
            italic_angle: data.read_fixed(4)?,
            is_fixed_pitch: data.read_ulong(12)? != 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_os2_v4() {
        let mut data = BinaryTableData::new(vec![0; 96]);
        data.set_ushort(0, 4).unwrap();
        data.set_ushort(4, 700).unwrap();
        data.set_ushort(62, 0x0021).unwrap();
        data.set_ushort(68, 750).unwrap();
        data.set_ushort(70, (-250i16) as u16).unwrap();
        data.set_ushort(86, 480).unwrap();
        data.set_ushort(88, 700).unwrap();

        let os2 = Os2Table::parse(&data).unwrap();
        assert_eq!(os2.weight_class, 700);
        assert!(os2.is_bold());
        assert!(os2.is_italic());
        assert_eq!(os2.typo_descender, -250);
        assert_eq!(os2.x_height, Some(480));
        assert_eq!(os2.cap_height, Some(700));
    }

    #[test]
    fn test_parse_os2_v1_has_no_heights() {
        let mut data = BinaryTableData::new(vec![0; 86]);
        data.set_ushort(0, 1).unwrap();
        let os2 = Os2Table::parse(&data).unwrap();
        assert_eq!(os2.cap_height, None);
    }

    #[test]
    fn test_parse_post() {
        let mut data = BinaryTableData::default();
        data.write_ulong(0x0003_0000);
        data.write_ulong((-819_200i32) as u32); // -12.5
        data.write_bytes(&[0u8; 4]);
        data.write_ulong(1);
        data.write_bytes(&[0u8; 16]);
        let post = PostTable::parse(&data).unwrap();
        assert_eq!(post.version, 0x0003_0000);
        assert_eq!(post.italic_angle, -12.5);
        assert!(post.is_fixed_pitch);
    }
}
