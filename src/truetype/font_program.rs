//! Loaded TrueType font program.
//!
//! A [`FontProgram`] owns every table of one font face, each in its own
//! [`BinaryTableData`]. It can be read from a standalone TrueType file or from
//! one face of a TrueType Collection, and written back out as a standalone
//! file (see [`FontProgram::to_bytes`]).

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use super::cmap::CmapTable;
use super::glyf::GlyphTable;
use super::head::{HeadTable, MaxpTable, CHECKSUM_ADJUSTMENT_OFFSET};
use super::hhea::HheaTable;
use super::loca::LocaTable;
use super::metrics::{HmtxTable, MetricsTable, VmtxTable};
use super::name::NameTable;
use super::os2::{Os2Table, PostTable};
use super::table_data::{checksum, BinaryTableData};
use super::tables::{Table, TableHeader, Tag};
use super::writer::write_font;
use crate::error::{Error, Result};

/// sfnt version of TrueType outline fonts.
pub const SFNT_VERSION_TRUETYPE: u32 = 0x0001_0000;
/// Apple's alternative TrueType sfnt version ('true').
pub const SFNT_VERSION_APPLE: u32 = 0x7472_7565;
/// sfnt version of CFF-flavored OpenType ('OTTO').
pub const SFNT_VERSION_OTTO: u32 = 0x4F54_544F;
/// Collection header tag ('ttcf').
pub const TTC_TAG: u32 = 0x7474_6366;

/// Tables without which a font cannot be used for text.
const REQUIRED_TABLES: [Tag; 5] = [Tag::CMAP, Tag::HEAD, Tag::HHEA, Tag::HMTX, Tag::MAXP];

/// Options controlling how font programs are loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Reject fonts whose table checksums do not match their content
    pub verify_checksums: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            verify_checksums: true,
        }
    }
}

/// One TrueType font face and its tables.
#[derive(Debug, Clone)]
pub struct FontProgram {
    sfnt_version: u32,
    tables: BTreeMap<Tag, Table>,
    /// Original file bytes, kept for standalone files so full embedding is byte-identical
    source: Option<Arc<Vec<u8>>>,
    postscript_name: String,
    subset_tag: Option<String>,
}

impl FontProgram {
    /// Parse a standalone TrueType file or the first face of a collection.
    pub fn parse(data: Vec<u8>) -> Result<Self> {
        Self::parse_with_options(data, 0, &LoadOptions::default())
    }

    /// Parse face `index` of a font file.
    ///
    /// `index` must be 0 for standalone files.
    pub fn parse_with_options(data: Vec<u8>, index: u32, options: &LoadOptions) -> Result<Self> {
        let file = BinaryTableData::new(data);
        if file.len() < 12 {
            return Err(Error::InvalidFont("font file too small".to_string()));
        }

        let signature = file.read_ulong(0)?;
        let (face_offset, standalone) = match signature {
            TTC_TAG => (collection_face_offset(&file, index)?, false),
            SFNT_VERSION_TRUETYPE | SFNT_VERSION_APPLE if index == 0 => (0, true),
            SFNT_VERSION_TRUETYPE | SFNT_VERSION_APPLE => {
                return Err(Error::InvalidFont(format!(
                    "face index {} requested from a single-font file",
                    index
                )))
            },
            SFNT_VERSION_OTTO => {
                return Err(Error::InvalidFont(
                    "CFF-flavored OpenType fonts are not supported".to_string(),
                ))
            },
            other => {
                return Err(Error::InvalidFont(format!(
                    "invalid font signature {:#010X}",
                    other
                )))
            },
        };

        let sfnt_version = file.read_ulong(face_offset)?;
        if sfnt_version != SFNT_VERSION_TRUETYPE && sfnt_version != SFNT_VERSION_APPLE {
            return Err(Error::InvalidFont(format!(
                "unsupported sfnt version {:#010X}",
                sfnt_version
            )));
        }

        let num_tables = file.read_ushort(face_offset + 4)? as usize;
        let mut tables = BTreeMap::new();
        for i in 0..num_tables {
            let header = TableHeader::read(&file, face_offset + 12 + i * TableHeader::SIZE)?;
            let data = BinaryTableData::copy_from(
                file.as_bytes(),
                header.offset as usize,
                header.length as usize,
            )?;
            if options.verify_checksums {
                verify_checksum(&header, &data)?;
            }
            tables.insert(header.tag, Table { header, data });
        }

        let source = standalone.then(|| Arc::new(file.into_bytes()));
        let program = Self::assemble(sfnt_version, tables, source)?;
        log::debug!(
            "Loaded font program '{}' with {} tables, {} glyphs",
            program.postscript_name,
            program.tables.len(),
            program.num_glyphs().unwrap_or(0)
        );
        Ok(program)
    }

    /// Read and parse face `index` of a font file on disk.
    pub fn from_file(path: impl AsRef<Path>, index: u32, options: &LoadOptions) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::parse_with_options(data, index, options)
    }

    /// Build a font program from tables written in memory.
    pub fn from_tables(tables: impl IntoIterator<Item = Table>) -> Result<Self> {
        let tables = tables.into_iter().map(|t| (t.tag(), t)).collect();
        Self::assemble(SFNT_VERSION_TRUETYPE, tables, None)
    }

    fn assemble(
        sfnt_version: u32,
        tables: BTreeMap<Tag, Table>,
        source: Option<Arc<Vec<u8>>>,
    ) -> Result<Self> {
        let mut program = Self {
            sfnt_version,
            tables,
            source,
            postscript_name: String::new(),
            subset_tag: None,
        };
        for tag in REQUIRED_TABLES {
            program.require_table(tag)?;
        }
        // Fails with NoUnicodeCmap when no usable subtable exists
        program.cmap()?;
        program.head()?;
        program.postscript_name = program
            .name()
            .ok()
            .and_then(|name| name.postscript_name().map(|s| s.replace(' ', "")))
            .unwrap_or_else(|| "Unknown".to_string());
        Ok(program)
    }

    /// Table for a tag, or `None` when the font lacks it.
    pub fn get_table(&self, tag: Tag) -> Option<&Table> {
        self.tables.get(&tag)
    }

    /// Table for a tag, failing with [`Error::MissingTable`] when absent.
    pub fn require_table(&self, tag: Tag) -> Result<&Table> {
        self.tables
            .get(&tag)
            .ok_or_else(|| Error::MissingTable(tag.to_string()))
    }

    fn table_data(&self, tag: Tag) -> Result<&BinaryTableData> {
        Ok(&self.require_table(tag)?.data)
    }

    /// Check if a table is present.
    pub fn has_table(&self, tag: Tag) -> bool {
        self.tables.contains_key(&tag)
    }

    /// Tags of all tables, in directory order.
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.tables.keys().copied()
    }

    /// All tables, in directory order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// sfnt version of the face.
    pub fn sfnt_version(&self) -> u32 {
        self.sfnt_version
    }

    /// Decode `head`.
    pub fn head(&self) -> Result<HeadTable> {
        HeadTable::parse(self.table_data(Tag::HEAD)?)
    }

    /// Decode `maxp`.
    pub fn maxp(&self) -> Result<MaxpTable> {
        MaxpTable::parse(self.table_data(Tag::MAXP)?)
    }

    /// Number of glyphs from `maxp`.
    pub fn num_glyphs(&self) -> Result<usize> {
        Ok(self.maxp()?.num_glyphs as usize)
    }

    /// Decode `hhea`.
    pub fn hhea(&self) -> Result<HheaTable> {
        HheaTable::parse(self.table_data(Tag::HHEA)?)
    }

    /// Decode `vhea`, if present.
    pub fn vhea(&self) -> Result<Option<HheaTable>> {
        self.get_table(Tag::VHEA)
            .map(|t| HheaTable::parse(&t.data))
            .transpose()
    }

    /// Decode the Unicode subtable of `cmap`.
    pub fn cmap(&self) -> Result<CmapTable> {
        CmapTable::parse(self.table_data(Tag::CMAP)?)
    }

    /// Decode `hmtx`.
    pub fn hmtx(&self) -> Result<HmtxTable> {
        let hhea = self.hhea()?;
        MetricsTable::new(
            self.table_data(Tag::HMTX)?.clone(),
            hhea.number_of_long_metrics as usize,
            self.num_glyphs()?,
        )
    }

    /// Decode `vmtx`, if both `vhea` and `vmtx` are present.
    pub fn vmtx(&self) -> Result<Option<VmtxTable>> {
        let (Some(vhea), Some(vmtx)) = (self.vhea()?, self.get_table(Tag::VMTX)) else {
            return Ok(None);
        };
        MetricsTable::new(
            vmtx.data.clone(),
            vhea.number_of_long_metrics as usize,
            self.num_glyphs()?,
        )
        .map(Some)
    }

    /// Decode `loca` and pair it with `glyf`, if both are present.
    pub fn glyf(&self) -> Result<Option<GlyphTable>> {
        let (Some(loca), Some(glyf)) = (self.get_table(Tag::LOCA), self.get_table(Tag::GLYF))
        else {
            return Ok(None);
        };
        let loca = LocaTable::new(
            loca.data.clone(),
            self.head()?.index_to_loc_format,
            self.num_glyphs()?,
        )?;
        Ok(Some(GlyphTable::new(glyf.data.clone(), loca)))
    }

    /// Decode `name`, or an empty table when absent.
    pub fn name(&self) -> Result<NameTable> {
        match self.get_table(Tag::NAME) {
            Some(table) => NameTable::parse(&table.data),
            None => Ok(NameTable::default()),
        }
    }

    /// Decode `OS/2`, if present.
    pub fn os2(&self) -> Result<Option<Os2Table>> {
        self.get_table(Tag::OS2)
            .map(|t| Os2Table::parse(&t.data))
            .transpose()
    }

    /// Decode `post`, if present.
    pub fn post(&self) -> Result<Option<PostTable>> {
        self.get_table(Tag::POST)
            .map(|t| PostTable::parse(&t.data))
            .transpose()
    }

    /// PostScript name from `name`, with spaces removed.
    pub fn postscript_name(&self) -> &str {
        &self.postscript_name
    }

    /// Subset tag attached by [`FontProgram::subset`] or [`FontProgram::embed_full_font`].
    pub fn subset_tag(&self) -> Option<&str> {
        self.subset_tag.as_deref()
    }

    /// Name to use as the PDF BaseFont: `TAG+PostScriptName` when tagged.
    ///
    /// The stored tag already ends in `+`.
    pub fn font_name(&self) -> String {
        match &self.subset_tag {
            Some(tag) => format!("{}{}", tag, self.postscript_name),
            None => self.postscript_name.clone(),
        }
    }

    pub(crate) fn with_subset_tag(mut self, subset_tag: Option<&str>) -> Self {
        self.subset_tag = subset_tag.map(str::to_string);
        self
    }

    /// Copy of the whole font for full embedding.
    ///
    /// A standalone file keeps its original bytes; a collection face is
    /// re-serialized as a standalone file.
    pub fn embed_full_font(&self, subset_tag: Option<&str>) -> FontProgram {
        self.clone().with_subset_tag(subset_tag)
    }

    /// Serialized font file.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match &self.source {
            Some(source) => Ok(source.as_ref().clone()),
            None => write_font(self.sfnt_version, &self.tables),
        }
    }

    /// Length of the serialized font file.
    pub fn len(&self) -> Result<usize> {
        match &self.source {
            Some(source) => Ok(source.len()),
            None => Ok(self.to_bytes()?.len()),
        }
    }
}

/// Number of faces in a font file: the collection size, or 1 for a standalone file.
pub fn collection_size(data: &[u8]) -> Result<u32> {
    let file = BinaryTableData::new(data[..data.len().min(12)].to_vec());
    match file.read_ulong(0)? {
        TTC_TAG => file.read_ulong(8),
        _ => Ok(1),
    }
}

fn collection_face_offset(file: &BinaryTableData, index: u32) -> Result<usize> {
    let num_fonts = file.read_ulong(8)?;
    if index >= num_fonts {
        return Err(Error::InvalidFont(format!(
            "face index {} out of range, collection holds {} fonts",
            index, num_fonts
        )));
    }
    Ok(file.read_ulong(12 + index as usize * 4)? as usize)
}

fn verify_checksum(header: &TableHeader, data: &BinaryTableData) -> Result<()> {
    let actual = if header.tag == Tag::HEAD && data.len() >= CHECKSUM_ADJUSTMENT_OFFSET + 4 {
        let mut bytes = data.as_bytes().to_vec();
        bytes[CHECKSUM_ADJUSTMENT_OFFSET..CHECKSUM_ADJUSTMENT_OFFSET + 4].fill(0);
        checksum(&bytes)
    } else {
        data.checksum()
    };
    if actual != header.checksum {
        return Err(Error::ChecksumMismatch {
            tag: header.tag.to_string(),
            expected: header.checksum,
            actual,
        });
    }
    Ok(())
}
