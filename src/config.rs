//! Configuration for font resolution.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::truetype::LoadOptions;

/// Font manager configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontManagerConfig {
    /// Directories scanned for `.ttf` and `.ttc` files.
    pub font_directories: Vec<PathBuf>,

    /// Scan sub-directories.
    pub recursive: bool,

    /// Family used when a request matches no catalog entry.
    pub default_family: String,

    /// Width for built-in font characters without a table entry; 0 keeps
    /// the font's own.
    pub missing_width: u16,

    /// Reject font files whose table checksums do not match.
    pub verify_checksums: bool,
}

impl Default for FontManagerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FontManagerConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            font_directories: Vec::new(),
            recursive: true,
            default_family: "Times".to_string(),
            missing_width: 0,
            verify_checksums: true,
        }
    }

    /// Load configuration from JSON; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add a directory to scan.
    pub fn with_font_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.font_directories.push(dir.into());
        self
    }

    /// Scan sub-directories.
    pub fn with_recursive(mut self, enable: bool) -> Self {
        self.recursive = enable;
        self
    }

    /// Set the fallback family.
    pub fn with_default_family(mut self, family: impl Into<String>) -> Self {
        self.default_family = family.into();
        self
    }

    /// Set the built-in font missing width.
    pub fn with_missing_width(mut self, width: u16) -> Self {
        self.missing_width = width;
        self
    }

    /// Verify table checksums on load.
    pub fn with_verify_checksums(mut self, enable: bool) -> Self {
        self.verify_checksums = enable;
        self
    }

    /// Options passed to the font program loader.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            verify_checksums: self.verify_checksums,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_defaults() {
        let config = FontManagerConfig::default();
        assert!(config.font_directories.is_empty());
        assert!(config.recursive);
        assert_eq!(config.default_family, "Times");
        assert_eq!(config.missing_width, 0);
        assert!(config.load_options().verify_checksums);
    }

    #[test]
    fn test_builder() {
        let config = FontManagerConfig::new()
            .with_font_directory("/usr/share/fonts")
            .with_recursive(false)
            .with_default_family("Helvetica")
            .with_missing_width(500)
            .with_verify_checksums(false);
        assert_eq!(config.font_directories, vec![PathBuf::from("/usr/share/fonts")]);
        assert!(!config.recursive);
        assert_eq!(config.default_family, "Helvetica");
        assert_eq!(config.missing_width, 500);
        assert!(!config.load_options().verify_checksums);
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            FontManagerConfig::from_json(r#"{"font_directories": ["fonts"], "recursive": false}"#)
                .unwrap();
        assert_eq!(config.font_directories, vec![PathBuf::from("fonts")]);
        assert!(!config.recursive);
        assert_eq!(config.default_family, "Times");
        assert!(config.verify_checksums);
    }

    #[test]
    fn test_from_json_invalid() {
        let err = FontManagerConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
