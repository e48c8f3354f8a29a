//! TrueType table engine.
//!
//! Bounds-checked big-endian table buffers, typed decoders for the tables a
//! PDF font resource needs, and a [`FontProgram`] that can be loaded from a
//! file or collection, subset, and written back out.

pub mod cmap;
pub mod font_program;
pub mod glyf;
pub mod head;
pub mod hhea;
pub mod loca;
pub mod metrics;
pub mod name;
pub mod os2;
mod subset;
pub mod table_data;
pub mod tables;
pub mod writer;

pub use cmap::{encode_cmap_table, CmapTable};
pub use font_program::{collection_size, FontProgram, LoadOptions};
pub use glyf::{GlyphBounds, GlyphComponent, GlyphTable};
pub use head::{HeadTable, MaxpTable};
pub use hhea::HheaTable;
pub use loca::{encode_loca_table, LocaTable, LocaVersion};
pub use metrics::{encode_metrics_table, HmtxTable, MetricsTable, VmtxTable};
pub use name::NameTable;
pub use os2::{Os2Table, PostTable};
pub use table_data::{checksum, BinaryTableData};
pub use tables::{Table, TableHeader, Tag};
