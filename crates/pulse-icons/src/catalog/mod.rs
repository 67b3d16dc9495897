//! Catalog of bundled device images.
//!
//! An [`AssetCatalog`] maps normalized stems (lowercased file names without
//! their extension) to asset references. It is built once from an
//! [`AssetSource`] and never changes afterwards; rebuilding produces a new
//! catalog.
//!
//! Iteration order matters: matching takes the *first* satisfying entry, so
//! entries are kept in file-name order and the order is reproducible across
//! builds and platforms.
//!
//! # Example
//!
//! ```ignore
//! use pulse_icons::catalog::{AssetCatalog, AssetSource};
//!
//! let catalog = AssetCatalog::build(&AssetSource::directory("assets/images"), &["png".into()])?;
//! for entry in catalog.iter() {
//!     println!("{} -> {}", entry.stem(), entry.asset());
//! }
//! ```

mod source;

pub use source::{AssetFile, AssetSource, EmbeddedAssets};
#[cfg(feature = "hot-reload")]
pub(crate) use source::has_extension;

use std::collections::HashSet;
use std::path::Path;

use crate::logging::targets;
use crate::reference::AssetRef;
use crate::Result;

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    stem: String,
    asset: AssetRef,
}

impl CatalogEntry {
    /// Normalized stem used for matching.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Asset returned when this entry matches.
    pub fn asset(&self) -> &AssetRef {
        &self.asset
    }
}

/// Read-only, order-stable index of raster assets keyed by normalized stem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetCatalog {
    entries: Vec<CatalogEntry>,
}

impl AssetCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from `(file name, asset)` pairs.
    ///
    /// Pairs are ordered by file name. When two files normalize to the same
    /// stem, the first one in that order is kept.
    pub fn from_files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = (S, AssetRef)>,
        S: AsRef<str>,
    {
        let mut files: Vec<(String, AssetRef)> = files
            .into_iter()
            .map(|(name, asset)| (name.as_ref().to_string(), asset))
            .collect();
        files.sort_by(|a, b| a.0.cmp(&b.0));

        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(files.len());

        for (file_name, asset) in files {
            let Some(stem) = normalize_stem(&file_name) else {
                continue;
            };
            if !seen.insert(stem.clone()) {
                tracing::debug!(
                    target: targets::CATALOG,
                    "Skipping {}: stem '{}' already cataloged",
                    asset,
                    stem
                );
                continue;
            }
            entries.push(CatalogEntry { stem, asset });
        }

        Self { entries }
    }

    /// Scan a source for files with the given extensions and build a catalog.
    pub fn build(source: &AssetSource, extensions: &[String]) -> Result<Self> {
        let files = source.scan(extensions)?;
        Ok(Self::from_scan(files))
    }

    /// Async version of [`build`](Self::build).
    pub async fn build_async(source: &AssetSource, extensions: &[String]) -> Result<Self> {
        let files = source.scan_async(extensions).await?;
        Ok(Self::from_scan(files))
    }

    fn from_scan(files: Vec<AssetFile>) -> Self {
        let catalog = Self::from_files(files.into_iter().map(|f| (f.file_name, f.asset)));
        tracing::debug!(
            target: targets::CATALOG,
            "Built asset catalog with {} entries",
            catalog.len()
        );
        catalog
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Iterate stems in catalog order.
    pub fn stems(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.stem.as_str())
    }

    /// Look up an asset by exact stem.
    pub fn get(&self, stem: &str) -> Option<&AssetRef> {
        self.entries
            .iter()
            .find(|e| e.stem == stem)
            .map(|e| &e.asset)
    }
}

/// Lowercased file name without its extension.
pub fn normalize_stem(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase)
}
