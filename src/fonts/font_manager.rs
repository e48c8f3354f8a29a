//! Font resolution and resource ownership.
//!
//! Requests are resolved against three catalogs in a fixed order:
//! standalone TrueType files, TrueType Collection faces, then the 14
//! built-in fonts. A request that matches nothing is retried once with the
//! configured default family.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::base14;
use super::{Base14Font, FontEncoding, FontResource, FontStyle, RenderMode, TrueTypeFont};
use crate::config::FontManagerConfig;
use crate::error::{Error, Result};
use crate::truetype::FontProgram;

/// Resolves font requests and owns every resolved [`FontResource`].
#[derive(Debug)]
pub struct FontManager {
    config: FontManagerConfig,
    /// Search key -> standalone file
    truetype_catalog: HashMap<String, PathBuf>,
    /// Search key -> collection file and face index
    collection_catalog: HashMap<String, (PathBuf, u32)>,
    /// Resolved resources in creation order; resource id is position + 1
    fonts: Vec<FontResource>,
    /// Search name -> position in `fonts`
    resolved: HashMap<String, usize>,
}

impl Default for FontManager {
    fn default() -> Self {
        Self::new(FontManagerConfig::default())
    }
}

impl FontManager {
    /// Create a manager and scan the configured font directories.
    pub fn new(config: FontManagerConfig) -> Self {
        let mut manager = Self {
            config,
            truetype_catalog: HashMap::new(),
            collection_catalog: HashMap::new(),
            fonts: Vec::new(),
            resolved: HashMap::new(),
        };
        manager.scan_directories();
        manager
    }

    /// The active configuration.
    pub fn config(&self) -> &FontManagerConfig {
        &self.config
    }

    /// Catalog key for a family and style: the family followed by the style bits.
    pub fn search_key(family: &str, style: FontStyle) -> String {
        format!("{}{}", family, style.bits())
    }

    /// Check if a search key names a built-in font.
    pub fn is_base14(key: &str) -> bool {
        base14::lookup(key).is_some()
    }

    /// Add a standalone TrueType file to the catalog. An existing entry for
    /// the same key is kept.
    pub fn register_truetype(
        &mut self,
        family: &str,
        style: FontStyle,
        path: impl Into<PathBuf>,
    ) -> bool {
        let key = Self::search_key(family, style);
        if self.truetype_catalog.contains_key(&key) {
            return false;
        }
        self.truetype_catalog.insert(key, path.into());
        true
    }

    /// Add one face of a TrueType Collection to the catalog. An existing
    /// entry for the same key is kept.
    pub fn register_collection(
        &mut self,
        family: &str,
        style: FontStyle,
        path: impl Into<PathBuf>,
        index: u32,
    ) -> bool {
        let key = Self::search_key(family, style);
        if self.collection_catalog.contains_key(&key) {
            return false;
        }
        self.collection_catalog.insert(key, (path.into(), index));
        true
    }

    /// Number of standalone files and collection faces in the catalogs.
    pub fn catalog_len(&self) -> (usize, usize) {
        (self.truetype_catalog.len(), self.collection_catalog.len())
    }

    /// Resolve a request to a font resource, creating it on first use.
    ///
    /// Falls back to the default family when nothing matches. Fails only when
    /// the default family itself cannot be resolved.
    pub fn make_font(
        &mut self,
        family: &str,
        style: FontStyle,
        encoding: FontEncoding,
        render_mode: RenderMode,
    ) -> Result<&mut FontResource> {
        let position = match self.resolve(family, style, encoding, render_mode) {
            Some(position) => position,
            None => {
                let default_family = self.config.default_family.clone();
                log::info!(
                    "No font for '{}' style {}, falling back to '{}'",
                    family,
                    style.bits(),
                    default_family
                );
                self.resolve(&default_family, style, encoding, render_mode)
                    .ok_or(Error::DefaultFontMissing(default_family))?
            },
        };
        Ok(&mut self.fonts[position])
    }

    fn resolve(
        &mut self,
        family: &str,
        style: FontStyle,
        encoding: FontEncoding,
        render_mode: RenderMode,
    ) -> Option<usize> {
        let key = Self::search_key(family, style);
        if let Some(&position) = self.resolved.get(&key) {
            log::debug!("Font cache hit for {}", key);
            return Some(position);
        }

        if let Some(path) = self.truetype_catalog.get(&key).cloned() {
            match self.load_truetype(&key, &path, 0, render_mode) {
                Ok(position) => return Some(position),
                Err(e) => {
                    log::warn!("Failed to load font {}: {}", path.display(), e);
                    self.truetype_catalog.remove(&key);
                },
            }
        }

        if let Some((path, index)) = self.collection_catalog.get(&key).cloned() {
            match self.load_truetype(&key, &path, index, render_mode) {
                Ok(position) => return Some(position),
                Err(e) => {
                    log::warn!("Failed to load face {} of {}: {}", index, path.display(), e);
                    self.collection_catalog.remove(&key);
                },
            }
        }

        let metrics = base14::lookup(&key)?;
        let encoded_key = format!("{}{}", key, encoding.ordinal());
        if let Some(&position) = self.resolved.get(&encoded_key) {
            log::debug!("Font cache hit for {}", encoded_key);
            return Some(position);
        }
        let font = Base14Font::new(
            self.fonts.len() + 1,
            encoded_key.clone(),
            render_mode,
            metrics,
            encoding,
            self.config.missing_width,
        );
        log::info!("Resolved {} to built-in font {}", encoded_key, metrics.name);
        Some(self.push(encoded_key, FontResource::Base14(font)))
    }

    fn load_truetype(
        &mut self,
        key: &str,
        path: &Path,
        index: u32,
        render_mode: RenderMode,
    ) -> Result<usize> {
        let program = FontProgram::from_file(path, index, &self.config.load_options())?;
        let font = TrueTypeFont::new(self.fonts.len() + 1, key, render_mode, program)?;
        log::info!(
            "Resolved {} to {} ({})",
            key,
            font.program().postscript_name(),
            path.display()
        );
        Ok(self.push(key.to_string(), FontResource::TrueType(Box::new(font))))
    }

    fn push(&mut self, search_name: String, font: FontResource) -> usize {
        let position = self.fonts.len();
        self.fonts.push(font);
        self.resolved.insert(search_name, position);
        position
    }

    /// Resource by id.
    pub fn font(&self, id: usize) -> Option<&FontResource> {
        id.checked_sub(1).and_then(|i| self.fonts.get(i))
    }

    /// Mutable resource by id.
    pub fn font_mut(&mut self, id: usize) -> Option<&mut FontResource> {
        id.checked_sub(1).and_then(move |i| self.fonts.get_mut(i))
    }

    /// All resolved resources in creation order.
    pub fn fonts(&self) -> impl Iterator<Item = &FontResource> {
        self.fonts.iter()
    }

    /// Number of resolved resources.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Check if nothing has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    fn scan_directories(&mut self) {
        let dirs = self.config.font_directories.clone();
        for dir in dirs {
            let mut files = Vec::new();
            collect_font_files(&dir, self.config.recursive, &mut files);
            files.sort();
            for file in files {
                if let Err(e) = self.scan_file(&file) {
                    log::warn!("Skipping font file {}: {}", file.display(), e);
                }
            }
        }
        if !self.config.font_directories.is_empty() {
            log::info!(
                "Font catalog: {} TrueType files, {} collection faces",
                self.truetype_catalog.len(),
                self.collection_catalog.len()
            );
        }
    }

    fn scan_file(&mut self, path: &Path) -> Result<()> {
        let data = std::fs::read(path)?;
        match ttf_parser::fonts_in_collection(&data) {
            Some(count) => {
                for index in 0..count {
                    let (family, style) = face_identity(&data, index)?;
                    self.register_collection(&family, style, path, index);
                }
            },
            None => {
                let (family, style) = face_identity(&data, 0)?;
                self.register_truetype(&family, style, path);
            },
        }
        Ok(())
    }
}

/// Family name and style bits of one face.
fn face_identity(data: &[u8], index: u32) -> Result<(String, FontStyle)> {
    let face = ttf_parser::Face::parse(data, index)
        .map_err(|e| Error::InvalidFont(format!("face {}: {}", index, e)))?;
    let family = face
        .names()
        .into_iter()
        .filter(|name| name.name_id == ttf_parser::name_id::FAMILY)
        .find_map(|name| name.to_string())
        .ok_or_else(|| Error::InvalidFont(format!("face {} has no family name", index)))?;

    let mut style = FontStyle::empty();
    if face.is_bold() {
        style |= FontStyle::BOLD;
    }
    if face.is_italic() {
        style |= FontStyle::ITALIC;
    }
    Ok((family, style))
}

fn collect_font_files(dir: &Path, recursive: bool, files: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Cannot read font directory {}: {}", dir.display(), e);
            return;
        },
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if recursive {
                collect_font_files(&path, recursive, files);
            }
        } else if is_font_file(&path) {
            files.push(path);
        }
    }
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ttf") || ext.eq_ignore_ascii_case("ttc"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_key() {
        assert_eq!(FontManager::search_key("Times", FontStyle::empty()), "Times0");
        assert_eq!(
            FontManager::search_key("Courier", FontStyle::BOLD | FontStyle::ITALIC),
            "Courier3"
        );
    }

    #[test]
    fn test_is_base14() {
        assert!(FontManager::is_base14("Helvetica0"));
        assert!(FontManager::is_base14("Helvetica1"));
        assert!(FontManager::is_base14("Times2"));
        assert!(!FontManager::is_base14("Arial0")); // Not a Base-14 font
    }

    #[test]
    fn test_is_font_file() {
        assert!(is_font_file(Path::new("a/DejaVuSans.ttf")));
        assert!(is_font_file(Path::new("a/Cambria.TTC")));
        assert!(!is_font_file(Path::new("a/font.otf")));
        assert!(!is_font_file(Path::new("a/ttf")));
    }

    #[test]
    fn test_base14_resolution() {
        let mut manager = FontManager::default();
        let font = manager
            .make_font("Helvetica", FontStyle::BOLD, FontEncoding::WinAnsi, RenderMode::Default)
            .unwrap();
        assert!(font.is_base14());
        assert_eq!(font.search_name(), "Helvetica12");
        assert_eq!(font.font_name(), "Helvetica-Bold");
        assert_eq!(font.id(), 1);
    }

    #[test]
    fn test_unknown_family_falls_back() {
        let mut manager = FontManager::default();
        let font = manager
            .make_font("NoSuchFont", FontStyle::ITALIC, FontEncoding::Standard, RenderMode::Default)
            .unwrap();
        assert!(font.search_name().starts_with("Times"));
        assert_eq!(font.font_name(), "Times-Italic");
    }

    #[test]
    fn test_missing_default_family_is_fatal() {
        let config = FontManagerConfig::new().with_default_family("Nowhere");
        let mut manager = FontManager::new(config);
        let err = manager
            .make_font(
                "NoSuchFont",
                FontStyle::empty(),
                FontEncoding::Standard,
                RenderMode::Default,
            )
            .unwrap_err();
        assert!(matches!(err, Error::DefaultFontMissing(ref f) if f == "Nowhere"));
    }

    #[test]
    fn test_font_ids() {
        let mut manager = FontManager::default();
        let id = manager
            .make_font("Courier", FontStyle::empty(), FontEncoding::Standard, RenderMode::Default)
            .unwrap()
            .id();
        assert_eq!(manager.font(id).map(|f| f.font_name()), Some("Courier".to_string()));
        assert!(manager.font(0).is_none());
        assert!(manager.font_mut(2).is_none());
        assert_eq!(manager.len(), 1);
    }
}
