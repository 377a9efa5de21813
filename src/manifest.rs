//! Web app manifest `icons` fragment
//!
//! Describes the generated PNGs in the shape the `icons` member of a
//! `manifest.json` expects, so the list can be pasted (or merged) into the
//! app manifest next to the service worker's icon references.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Root of the fragment file
#[derive(Serialize, Debug, Clone, Default)]
pub struct ManifestIcons {
    /// One entry per written icon, in size order
    pub icons: Vec<IconEntry>,
}

/// A single `icons[]` member of a web app manifest
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct IconEntry {
    /// URL of the image as served by the app (e.g. "/assets/icons/icon-72x72.png")
    pub src: String,

    /// Space-separated pixel sizes (e.g. "72x72")
    pub sizes: String,

    /// MIME type of the image
    #[serde(rename = "type")]
    pub mime_type: String,

    /// How the platform may use the icon ("any", "maskable", "monochrome")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

impl ManifestIcons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_icon(&mut self, icon: IconEntry) {
        self.icons.push(icon);
    }

    /// Serialize the fragment and write it as `file_name` inside `dir`.
    ///
    /// Returns the path of the written file.
    pub fn write_to_dir(&self, dir: &Path, file_name: &str) -> Result<PathBuf> {
        let path = dir.join(file_name);
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize manifest icons")?;

        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(path)
    }
}

impl IconEntry {
    /// Entry for a square PNG served from `url_prefix`.
    ///
    /// # Arguments
    /// * `url_prefix` - Public directory of the icons, with trailing slash
    /// * `file_name` - Name of the PNG inside that directory
    /// * `size` - Edge length in pixels
    pub fn png(url_prefix: &str, file_name: &str, size: u32) -> Self {
        Self {
            src: format!("{url_prefix}{file_name}"),
            sizes: format!("{size}x{size}"),
            mime_type: "image/png".to_string(),
            purpose: None,
        }
    }

    pub fn with_purpose(mut self, purpose: &str) -> Self {
        self.purpose = Some(purpose.to_string());
        self
    }
}
