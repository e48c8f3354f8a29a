//! Table tags and table directory records.

use std::fmt;

use super::table_data::BinaryTableData;
use crate::error::Result;

/// A four-byte table tag such as `glyf` or `OS/2`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(pub [u8; 4]);

impl Tag {
    /// Font header
    pub const HEAD: Tag = Tag(*b"head");
    /// Horizontal header
    pub const HHEA: Tag = Tag(*b"hhea");
    /// Horizontal metrics
    pub const HMTX: Tag = Tag(*b"hmtx");
    /// Vertical header
    pub const VHEA: Tag = Tag(*b"vhea");
    /// Vertical metrics
    pub const VMTX: Tag = Tag(*b"vmtx");
    /// Maximum profile
    pub const MAXP: Tag = Tag(*b"maxp");
    /// Character to glyph mapping
    pub const CMAP: Tag = Tag(*b"cmap");
    /// Glyph locations
    pub const LOCA: Tag = Tag(*b"loca");
    /// Glyph outlines
    pub const GLYF: Tag = Tag(*b"glyf");
    /// Naming table
    pub const NAME: Tag = Tag(*b"name");
    /// PostScript information
    pub const POST: Tag = Tag(*b"post");
    /// OS/2 and Windows metrics
    pub const OS2: Tag = Tag(*b"OS/2");
    /// Control value table
    pub const CVT: Tag = Tag(*b"cvt ");
    /// Font program
    pub const FPGM: Tag = Tag(*b"fpgm");
    /// Control value program
    pub const PREP: Tag = Tag(*b"prep");
    /// Grid-fitting and scan-conversion procedure
    pub const GASP: Tag = Tag(*b"gasp");

    /// Build a tag from a byte string.
    pub const fn new(bytes: &[u8; 4]) -> Self {
        Tag(*bytes)
    }

    /// Tag bytes.
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self)
    }
}

impl From<&[u8; 4]> for Tag {
    fn from(bytes: &[u8; 4]) -> Self {
        Tag(*bytes)
    }
}

/// Table directory record: identifies one table inside a font program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableHeader {
    /// Table tag
    pub tag: Tag,
    /// Checksum of the table content
    pub checksum: u32,
    /// Byte offset from the start of the file
    pub offset: u32,
    /// Unpadded table length
    pub length: u32,
}

impl TableHeader {
    /// Size of one record in the table directory.
    pub const SIZE: usize = 16;

    /// Decode a record at `offset` of a font file.
    pub fn read(data: &BinaryTableData, offset: usize) -> Result<Self> {
        let tag = data.read_bytes(offset, 4)?;
        Ok(Self {
            tag: Tag([tag[0], tag[1], tag[2], tag[3]]),
            checksum: data.read_ulong(offset + 4)?,
            offset: data.read_ulong(offset + 8)?,
            length: data.read_ulong(offset + 12)?,
        })
    }

    /// Append the record to `out`. Returns the number of bytes written.
    pub fn write(&self, out: &mut BinaryTableData) -> usize {
        out.write_bytes(self.tag.as_bytes())
            + out.write_ulong(self.checksum)
            + out.write_ulong(self.offset)
            + out.write_ulong(self.length)
    }
}

/// A table header together with its owned content.
#[derive(Debug, Clone)]
pub struct Table {
    /// Directory record. `offset` refers to the file the table was read from.
    pub header: TableHeader,
    /// Table content
    pub data: BinaryTableData,
}

impl Table {
    /// Create a table from freshly written content, computing its checksum.
    pub fn new(tag: Tag, data: BinaryTableData) -> Self {
        let header = TableHeader {
            tag,
            checksum: data.checksum(),
            offset: 0,
            length: data.len() as u32,
        };
        Self { header, data }
    }

    /// Table tag.
    pub fn tag(&self) -> Tag {
        self.header.tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_display() {
        assert_eq!(Tag::OS2.to_string(), "OS/2");
        assert_eq!(Tag::CVT.to_string(), "cvt ");
        assert_eq!(format!("{:?}", Tag::GLYF), "Tag(glyf)");
    }

    #[test]
    fn test_tag_ordering_is_bytewise() {
        // Uppercase sorts before lowercase in the table directory
        assert!(Tag::OS2 < Tag::CMAP);
        assert!(Tag::CMAP < Tag::GLYF);
    }

    #[test]
    fn test_header_round_trip() {
        let header = TableHeader {
            tag: Tag::HMTX,
            checksum: 0xCAFE_F00D,
            offset: 0x100,
            length: 42,
        };
        let mut out = BinaryTableData::default();
        assert_eq!(header.write(&mut out), TableHeader::SIZE);
        assert_eq!(TableHeader::read(&out, 0).unwrap(), header);
    }

    #[test]
    fn test_table_new_computes_checksum() {
        let table = Table::new(Tag::MAXP, BinaryTableData::new(vec![0, 0, 0, 5]));
        assert_eq!(table.header.checksum, 5);
        assert_eq!(table.header.length, 4);
    }
}
