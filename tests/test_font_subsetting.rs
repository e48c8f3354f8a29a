//! Integration tests for TrueType font resources.
//!
//! Escapes text with a synthetic font in each render mode and checks the
//! artifacts a PDF writer embeds:
//! - glyph codes written into content streams
//! - `/W` width arrays and ToUnicode `bfchar` blocks
//! - font descriptors
//! - subset font programs, re-parsed and checksum-verified

mod common;

use common::{SyntheticFont, GRINNING_FACE};
use pdf_fontkit::fonts::{
    from_base26, make_subset_tag, to_base26, CharToGlyphMap, DescriptorFlags, TrueTypeFont,
};
use pdf_fontkit::truetype::{checksum, FontProgram, LocaVersion, Tag};
use pdf_fontkit::{Error, RenderMode};
use proptest::prelude::*;

fn font(mode: RenderMode) -> TrueTypeFont {
    font_from(SyntheticFont::new("Synthetic Sans"), mode)
}

fn font_from(builder: SyntheticFont, mode: RenderMode) -> TrueTypeFont {
    let program = FontProgram::parse(builder.build()).unwrap();
    TrueTypeFont::new(1, "SyntheticSans0", mode, program).unwrap()
}

/// Test subset numbering of escaped text in first-use order.
#[test]
fn test_escape_default_mode() {
    let mut font = font(RenderMode::Default);
    assert_eq!(font.escape_string("BAB C"), "00010002000100030004");

    let ch2gid = font.ch2gid();
    assert_eq!(ch2gid.len(), 4);
    let b = ch2gid.get('B' as u32).unwrap();
    assert_eq!((b.old_gid, b.new_gid), (2, 1));
    let space = ch2gid.get(' ' as u32).unwrap();
    assert_eq!((space.old_gid, space.new_gid), (4, 3));

    // Later text continues the numbering
    assert_eq!(font.escape_string("CA"), "00040002");
    assert_eq!(font.ch2gid().len(), 4);
}

/// Test that characters the font cannot show are written as glyph 0 and not recorded.
#[test]
fn test_escape_unmapped_character() {
    let mut font = font(RenderMode::Default);
    assert_eq!(font.escape_string("AzB"), "000100000002");
    assert!(!font.ch2gid().contains('z' as u32));
    assert_eq!(font.ch2gid().len(), 2);
}

/// Test width array and ToUnicode output in subset mode.
#[test]
fn test_default_mode_widths_and_ranges() {
    let mut font = font(RenderMode::Default);
    font.escape_string("BAB C");

    assert_eq!(font.generate_widths().unwrap(), "[ 1 [ 600 500 250 1000 ] ]");
    assert_eq!(
        font.generate_ranges(),
        "4 beginbfchar\n<0001> <0042>\n<0002> <0041>\n<0003> <0020>\n<0004> <0043>\nendbfchar\n"
    );
}

/// Test that nothing escaped yields empty artifacts.
#[test]
fn test_empty_artifacts() {
    let font = font(RenderMode::Default);
    assert_eq!(font.generate_widths().unwrap(), "[]");
    assert_eq!(font.generate_ranges(), "");
}

/// Test that supplementary-plane characters map to surrogate pairs.
#[test]
fn test_surrogate_pair_to_unicode() {
    let mut font = font(RenderMode::Default);
    let text = format!("A{}", GRINNING_FACE);
    assert_eq!(font.escape_string(&text), "00010002");
    assert_eq!(
        font.generate_ranges(),
        "2 beginbfchar\n<0001> <0041>\n<0002> <D83DDE00>\nendbfchar\n"
    );
    assert_eq!(font.generate_widths().unwrap(), "[ 1 [ 500 1000 ] ]");
}

/// Test ToUnicode blocks are split at 100 entries.
#[test]
fn test_bfchar_blocks_split() {
    let mut ch2gid = CharToGlyphMap::new();
    for i in 0..150u32 {
        ch2gid.insert(0x4E00 + i, 1, i as u16 + 1);
    }
    let body = pdf_fontkit::fonts::to_unicode::generate_ranges(&ch2gid, RenderMode::Default);
    assert!(body.starts_with("100 beginbfchar\n<0001> <4E00>\n"));
    assert!(body.contains("endbfchar\n50 beginbfchar\n<0065> <4E64>\n"));
    assert_eq!(body.matches("endbfchar").count(), 2);
}

/// Test measurement in 1/1000 em.
#[test]
fn test_measurement() {
    let font = font(RenderMode::Default);
    assert_eq!(font.char_width('A' as u32).unwrap(), 500);
    assert_eq!(font.char_width('B' as u32).unwrap(), 600);
    // Unmapped characters measure as .notdef
    assert_eq!(font.char_width('z' as u32).unwrap(), 600);

    let metrics = font.text_width("AB C").unwrap();
    assert_eq!(metrics.num_chars, 4);
    assert_eq!(metrics.num_spaces, 1);
    assert_eq!(metrics.num_words, 2);
    assert!((metrics.width - 2350.1).abs() < 0.01);

    // Without vmtx, heights come from glyph bounding boxes
    assert!((font.text_height("AC").unwrap() - 927.73).abs() < 0.01);
    assert!((font.vtext_height("AB").unwrap() - 600.1).abs() < 0.01);
    assert!(!font.can_write_vertical());
}

/// Test vertical measurement with `vmtx`.
#[test]
fn test_vertical_measurement() {
    let font = font_from(SyntheticFont::new("Synthetic Sans").vertical(), RenderMode::Default);
    assert!(font.can_write_vertical());
    assert_eq!(font.text_height("AB").unwrap(), 1000.0);

    let metrics = font.vtext_width("A B").unwrap();
    assert_eq!(metrics.width, 3000.0);
    assert_eq!(metrics.num_words, 2);
}

/// Test that full embedding keeps original glyph ids.
#[test]
fn test_embed_mode_keeps_glyph_ids() {
    let mut font = font(RenderMode::Embed);
    assert_eq!(font.escape_string("BA\u{C4}"), "000200010006");
    assert_eq!(font.generate_widths().unwrap(), "[ 1 [ 500 600 ] 6 [ 500 ] ]");
    assert_eq!(
        font.generate_ranges(),
        "3 beginbfchar\n<0002> <0042>\n<0001> <0041>\n<0006> <00C4>\nendbfchar\n"
    );
}

/// Test that full embedding lists every mapped glyph before any text is escaped.
#[test]
fn test_embed_mode_widths_without_text() {
    let font = font(RenderMode::Embed);
    assert!(font.ch2gid().is_empty());
    assert_eq!(
        font.generate_widths().unwrap(),
        "[ 1 [ 500 600 1000 250 ] 6 [ 500 1000 ] ]"
    );
    assert_eq!(font.generate_ranges(), "");
}

/// Test that the fully embedded program is the original file.
#[test]
fn test_embed_mode_program() {
    let bytes = SyntheticFont::new("Synthetic Sans").build();
    let program = FontProgram::parse(bytes.clone()).unwrap();
    let mut font = TrueTypeFont::new(1, "SyntheticSans0", RenderMode::Embed, program).unwrap();
    font.escape_string("AB");

    let embedded = font.embedded_program().unwrap();
    assert_eq!(embedded.to_bytes().unwrap(), bytes);
    assert_eq!(embedded.num_glyphs().unwrap(), 9);
    assert_eq!(embedded.font_name(), font.font_name());
}

/// Test switching to full embedding.
#[test]
fn test_escape_and_embed_full_font() {
    let mut font = font(RenderMode::Default);
    assert_eq!(font.escape_string("C"), "0001");
    assert_eq!(font.escape_string_and_embed_full_font("CB"), "00030002");
    assert_eq!(font.render_mode(), RenderMode::Embed);
}

/// Test that path rendering numbers glyphs like subsetting.
#[test]
fn test_path_rendering_mode() {
    let mut font = font(RenderMode::PathRendering);
    assert_eq!(font.escape_string("CA"), "00010002");
    assert_eq!(font.generate_widths().unwrap(), "[ 1 [ 1000 500 ] ]");
    assert_eq!(
        font.generate_ranges(),
        "2 beginbfchar\n<0001> <0043>\n<0002> <0041>\nendbfchar\n"
    );
}

/// Test that a subset re-parses with renumbered glyphs and valid checksums.
#[test]
fn test_subset_program() {
    let mut font = font(RenderMode::Default);
    font.escape_string("\u{C4}A");

    let subset = font.embedded_program().unwrap();
    let bytes = subset.to_bytes().unwrap();
    assert_eq!(checksum(&bytes), 0xB1B0_AFBA);

    let reloaded = FontProgram::parse(bytes).unwrap();
    // .notdef, the composite, A, then the accent component
    assert_eq!(reloaded.num_glyphs().unwrap(), 4);
    assert_eq!(reloaded.postscript_name(), "SyntheticSans-Regular");

    let cmap = reloaded.cmap().unwrap();
    assert_eq!(cmap.glyph_id(0xC4), 1);
    assert_eq!(cmap.glyph_id('A' as u32), 2);
    assert_eq!(cmap.glyph_id('B' as u32), 0);

    let hmtx = reloaded.hmtx().unwrap();
    assert_eq!(hmtx.advance(0).unwrap(), 1229);
    assert_eq!(hmtx.advance(1).unwrap(), 1024);
    assert_eq!(hmtx.advance(3).unwrap(), 0);
    assert_eq!(reloaded.hhea().unwrap().number_of_long_metrics, 4);

    let glyf = reloaded.glyf().unwrap().unwrap();
    assert_eq!(glyf.loca().version(), LocaVersion::Short);
    let components: Vec<u16> = glyf
        .components(1)
        .unwrap()
        .iter()
        .map(|c| c.glyph_id)
        .collect();
    assert_eq!(components, vec![2, 3]);

    let post = reloaded.post().unwrap().unwrap();
    assert_eq!(post.version, 0x0003_0000);
    assert_eq!(reloaded.get_table(Tag::POST).unwrap().data.len(), 32);
    assert!(reloaded.has_table(Tag::OS2));
    assert!(reloaded.has_table(Tag::NAME));
}

/// Test the subset's name carries the subset tag.
#[test]
fn test_subset_font_name() {
    let mut font = font(RenderMode::Default);
    font.escape_string("AB");
    let name = font.font_name();
    assert_eq!(name.len(), 7 + "SyntheticSans-Regular".len());
    assert!(name[..6].chars().all(|c| c.is_ascii_uppercase()));
    assert_eq!(&name[6..7], "+");
    assert!(name.ends_with("SyntheticSans-Regular"));

    let subset = font.embedded_program().unwrap();
    assert_eq!(subset.subset_tag(), Some(&name[..7]));
    assert_eq!(subset.font_name(), name);

    // Same text, same tag
    let mut other = font_from(SyntheticFont::new("Synthetic Sans"), RenderMode::Default);
    other.escape_string("AB");
    assert_eq!(other.font_name(), name);
}

/// Test that a mapping with gaps in its subset ids is rejected.
#[test]
fn test_subset_rejects_sparse_numbering() {
    let program = FontProgram::parse(SyntheticFont::new("Synthetic Sans").build()).unwrap();
    let mut ch2gid = CharToGlyphMap::new();
    ch2gid.insert('A' as u32, 1, 1);
    ch2gid.insert('B' as u32, 2, 3);
    let err = program.subset(&ch2gid, "AAAAAA+").unwrap_err();
    assert!(matches!(err, Error::InvalidFont(_)));
}

/// Test descriptor values for a subset.
#[test]
fn test_font_descriptor_subset() {
    let mut font = font(RenderMode::Default);
    font.escape_string("CA");
    let descriptor = font.font_descriptor().unwrap();

    assert_eq!(descriptor.font_name, font.font_name());
    assert!(descriptor.flags.contains(DescriptorFlags::NONSYMBOLIC));
    assert!(!descriptor.flags.contains(DescriptorFlags::ITALIC));
    assert_eq!(descriptor.bbox, [0, -195, 977, 732]);
    assert_eq!(descriptor.ascent, 928);
    assert_eq!(descriptor.descent, -244);
    assert_eq!(descriptor.cap_height, 700);
    assert_eq!(descriptor.x_height, 500);
    assert_eq!(descriptor.stem_v, 86);
    assert_eq!(descriptor.missing_width, 600);
    assert_eq!(descriptor.italic_angle, 0.0);
    assert_eq!(descriptor.first_char, Some(65));
    assert_eq!(descriptor.last_char, Some(67));
}

/// Test descriptor values for a fully embedded italic font.
#[test]
fn test_font_descriptor_embedded_italic() {
    let mut font = font_from(
        SyntheticFont::new("Synthetic Sans").bold().italic(),
        RenderMode::Embed,
    );
    font.escape_string("A");
    let descriptor = font.font_descriptor().unwrap();

    assert!(descriptor.flags.contains(DescriptorFlags::ITALIC));
    assert_eq!(descriptor.italic_angle, -12.0);
    assert_eq!(descriptor.bbox, [0, -244, 1000, 928]);
    assert_eq!(descriptor.stem_v, 150);
    assert_eq!(descriptor.first_char, None);
    assert_eq!(descriptor.last_char, None);
}

/// Test a collection face behaves like a standalone font.
#[test]
fn test_collection_face_resource() {
    let ttc = common::build_collection(&[
        SyntheticFont::new("Synthetic Sans").build(),
        SyntheticFont::new("Synthetic Sans").italic().build(),
    ]);
    let program =
        FontProgram::parse_with_options(ttc, 1, &pdf_fontkit::LoadOptions::default()).unwrap();
    let mut font = TrueTypeFont::new(2, "SyntheticSans2", RenderMode::Default, program).unwrap();
    assert_eq!(font.escape_string("BC"), "00010002");

    let bytes = font.embedded_program().unwrap().to_bytes().unwrap();
    let reloaded = FontProgram::parse(bytes).unwrap();
    assert_eq!(reloaded.num_glyphs().unwrap(), 3);
    assert_eq!(reloaded.postscript_name(), "SyntheticSans-Italic");
}

#[test]
fn test_base26_values() {
    assert_eq!(to_base26(0), "A");
    assert_eq!(to_base26(25), "Z");
    assert_eq!(to_base26(26), "BA");
    assert_eq!(make_subset_tag(0), "AAAAAA+");
    assert_eq!(make_subset_tag(27), "AAAABB+");
}

proptest! {
    /// Base-26 text always converts back to its value.
    #[test]
    fn prop_base26_inverse(n in any::<u64>()) {
        prop_assert_eq!(from_base26(&to_base26(n)), Some(n));
    }

    /// Subset tags are six uppercase letters and a plus sign.
    #[test]
    fn prop_subset_tag_shape(n in any::<u64>()) {
        let tag = make_subset_tag(n);
        prop_assert_eq!(tag.len(), 7);
        prop_assert!(tag[..6].chars().all(|c| c.is_ascii_uppercase()));
        prop_assert!(tag.ends_with('+'));
    }

    /// Escaped text numbers distinct characters 1..=n and the subset holds
    /// exactly those glyphs plus .notdef and missing components.
    #[test]
    fn prop_subset_numbering_is_dense(text in "[ABC \u{C4}]{1,24}") {
        let mut font = font(RenderMode::Default);
        let hex = font.escape_string(&text);

        let distinct: std::collections::BTreeSet<char> = text.chars().collect();
        let ch2gid = font.ch2gid().clone();
        prop_assert_eq!(ch2gid.len(), distinct.len());
        let new_gids: Vec<u16> =
            ch2gid.sorted_by_new_gid().iter().map(|(_, m)| m.new_gid).collect();
        let expected: Vec<u16> = (1..=distinct.len() as u16).collect();
        prop_assert_eq!(new_gids, expected);

        // Every code written matches the recorded subset id
        let codes = hex.as_str();
        for (i, ch) in text.chars().enumerate() {
            let code = u16::from_str_radix(&codes[i * 4..i * 4 + 4], 16).unwrap();
            prop_assert_eq!(code, ch2gid.get(ch as u32).unwrap().new_gid);
        }

        let mut components = 0;
        if distinct.contains(&'\u{C4}') {
            components += 1;
            if !distinct.contains(&'A') {
                components += 1;
            }
        }
        let bytes = font.embedded_program().unwrap().to_bytes().unwrap();
        let subset = FontProgram::parse(bytes).unwrap();
        prop_assert_eq!(subset.num_glyphs().unwrap(), distinct.len() + 1 + components);
    }
}
