//! Icon resolution configuration.
//!
//! [`IconConfig`] is read from a TOML file. Every key is optional; missing
//! keys take their defaults.
//!
//! ```toml
//! images_dir = "assets/images"
//! icons_dir = "assets/icons"
//! default_icon = "other.png"
//! brands = ["xiaomi", "apple", "samsung"]
//! raster_extensions = ["png", "webp"]
//! vector_extensions = ["svg"]
//! cache = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::brand::BrandVocabulary;
use crate::reference::AssetRef;
use crate::resolver::{CachePolicy, DEFAULT_ICON, normalize_extensions};
use crate::{Error, Result};

/// Configuration for device and platform icon resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    /// Directory scanned for device images.
    pub images_dir: PathBuf,
    /// Directory scanned for platform icons.
    pub icons_dir: PathBuf,
    /// Generic device icon, relative to `images_dir` unless absolute.
    pub default_icon: PathBuf,
    /// Brand tokens in priority order.
    pub brands: Vec<String>,
    /// Extensions included in the device catalog.
    pub raster_extensions: Vec<String>,
    /// Extensions included in the platform catalog.
    pub vector_extensions: Vec<String>,
    /// Keep built catalogs between calls.
    pub cache: bool,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from("assets/images"),
            icons_dir: PathBuf::from("assets/icons"),
            default_icon: PathBuf::from(DEFAULT_ICON),
            brands: BrandVocabulary::DEFAULT_BRANDS
                .iter()
                .map(|b| b.to_string())
                .collect(),
            raster_extensions: vec!["png".to_string()],
            vector_extensions: vec!["svg".to_string()],
            cache: true,
        }
    }
}

impl IconConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::config(e.message()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: Self =
            toml::from_str(&content).map_err(|e| Error::config_file(path, e.message()))?;
        config.validate().map_err(|e| match e {
            Error::Config { message, .. } => Error::config_file(path, message),
            other => other,
        })?;

        tracing::debug!(
            target: crate::logging::targets::RESOLVER,
            "Loaded icon configuration from {}",
            path.display()
        );
        Ok(config)
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Check that the configuration can drive a resolver.
    pub fn validate(&self) -> Result<()> {
        if self.vocabulary().is_empty() {
            return Err(Error::config("brand list is empty"));
        }
        if normalize_extensions(&self.raster_extensions).is_empty() {
            return Err(Error::config("no raster extensions configured"));
        }
        if normalize_extensions(&self.vector_extensions).is_empty() {
            return Err(Error::config("no vector extensions configured"));
        }
        Ok(())
    }

    /// Brand vocabulary built from `brands`.
    pub fn vocabulary(&self) -> BrandVocabulary {
        BrandVocabulary::new(&self.brands)
    }

    /// Caching policy selected by `cache`.
    pub fn cache_policy(&self) -> CachePolicy {
        if self.cache {
            CachePolicy::Memoize
        } else {
            CachePolicy::Rebuild
        }
    }

    /// Location of the generic device icon.
    pub fn default_icon_path(&self) -> PathBuf {
        if self.default_icon.is_absolute() {
            self.default_icon.clone()
        } else {
            self.images_dir.join(&self.default_icon)
        }
    }

    /// Asset reference for the generic device icon.
    pub fn default_icon_ref(&self) -> AssetRef {
        AssetRef::from_path(self.default_icon_path())
    }
}
