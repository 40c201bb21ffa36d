//! Host-supplied configuration.
//!
//! Every field has a default, so `{}` (or no options at all) yields the
//! stock poster: `poster.png` at 2x with cache busting, A3 landscape print.

use serde::{Deserialize, Serialize};

use crate::error::{PosterError, Result};
use crate::types::PageSetup;

/// Default export file name.
pub const DEFAULT_EXPORT_FILE: &str = "poster.png";
/// Default rasterization pixel density multiplier.
pub const DEFAULT_PIXEL_RATIO: f64 = 2.0;
/// Default path of the bundled logo.
pub const DEFAULT_LOGO: &str = "nhs.jpeg";
/// Default path of the menu snapshot image.
pub const DEFAULT_MENU_IMAGE: &str = "/menu-1.png";

/// Options for the PNG export.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    pub file_name: String,
    pub pixel_ratio: f64,
    /// Append a unique query to embedded image URLs so they are re-fetched.
    pub cache_bust: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_EXPORT_FILE.to_string(),
            pixel_ratio: DEFAULT_PIXEL_RATIO,
            cache_bust: true,
        }
    }
}

/// Top-level poster options.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PosterOptions {
    pub export: ExportOptions,
    pub page: PageSetup,
    /// Logo image path. `None` renders the text placeholder.
    pub logo: Option<String>,
    pub menu_image: String,
}

impl Default for PosterOptions {
    fn default() -> Self {
        Self {
            export: ExportOptions::default(),
            page: PageSetup::default(),
            logo: Some(DEFAULT_LOGO.to_string()),
            menu_image: DEFAULT_MENU_IMAGE.to_string(),
        }
    }
}

impl PosterOptions {
    /// Parse options from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Read and validate options from a JSON file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.export.file_name.trim().is_empty() {
            return Err(PosterError::Config("export file name is empty".into()));
        }
        if !self.export.pixel_ratio.is_finite() || self.export.pixel_ratio <= 0.0 {
            return Err(PosterError::Config(format!(
                "pixel ratio must be positive, got {}",
                self.export.pixel_ratio
            )));
        }
        if !self.page.print_scale.is_finite() || self.page.print_scale <= 0.0 {
            return Err(PosterError::Config(format!(
                "print scale must be positive, got {}",
                self.page.print_scale
            )));
        }
        if !self.page.margin_mm.is_finite() || self.page.margin_mm < 0.0 {
            return Err(PosterError::Config(format!(
                "page margin must not be negative, got {}",
                self.page.margin_mm
            )));
        }
        Ok(())
    }
}
