//! Platform icon lookup.
//!
//! Platform identifiers (`"windows"`, `"macos"`, `"android"`, ...) map to
//! vector icons by exact file stem. Unlike device icons there is no generic
//! fallback: an unknown platform has no icon.

use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::{AssetFile, AssetSource};
use crate::logging::targets;
use crate::reference::{AssetRef, IconReference};
use crate::resolver::{CachePolicy, non_empty, normalize_extensions};
use crate::snapshot::Snapshot;
use crate::{Error, Result};

/// Vector icons keyed by platform identifier.
///
/// Keys are file stems with their case preserved; lookup is exact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformIconCatalog {
    icons: HashMap<String, AssetRef>,
}

impl PlatformIconCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from `(file name, asset)` pairs.
    ///
    /// When two files share a stem, the first by file name is kept.
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

        let mut icons = HashMap::with_capacity(files.len());
        for (file_name, asset) in files {
            let stem = std::path::Path::new(&file_name)
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string);
            if let Some(stem) = stem {
                icons.entry(stem).or_insert(asset);
            }
        }
        Self { icons }
    }

    /// Scan a source and build a catalog.
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
            "Built platform icon catalog with {} entries",
            catalog.len()
        );
        catalog
    }

    /// Look up a platform icon by exact identifier.
    pub fn get(&self, platform_id: &str) -> Option<&AssetRef> {
        self.icons.get(platform_id)
    }

    /// Number of icons.
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Platform identifiers, sorted.
    pub fn platforms(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.icons.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

/// Resolves platform identifiers to vector icons.
#[derive(Debug)]
pub struct PlatformIconResolver {
    source: Option<AssetSource>,
    extensions: Vec<String>,
    catalog: Snapshot<PlatformIconCatalog>,
}

impl PlatformIconResolver {
    /// Create a resolver that scans the given source for `.svg` files.
    pub fn new(source: AssetSource) -> Self {
        Self {
            source: Some(source),
            extensions: vec!["svg".to_string()],
            catalog: Snapshot::new(CachePolicy::default()),
        }
    }

    /// Create a resolver around an already built catalog.
    pub fn with_catalog(catalog: PlatformIconCatalog) -> Self {
        Self {
            source: None,
            extensions: vec!["svg".to_string()],
            catalog: Snapshot::with_value(catalog, CachePolicy::Memoize),
        }
    }

    /// Set the vector extensions scanned into the catalog.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = normalize_extensions(extensions);
        self
    }

    /// Set the caching policy.
    pub fn with_cache_policy(mut self, policy: CachePolicy) -> Self {
        if self.source.is_some() {
            self.catalog.set_policy(policy);
        }
        self
    }

    /// Get the catalog source, if any.
    pub fn source(&self) -> Option<&AssetSource> {
        self.source.as_ref()
    }

    /// Get the current catalog, building it if needed.
    pub fn catalog(&self) -> Result<Arc<PlatformIconCatalog>> {
        match &self.source {
            Some(source) => self
                .catalog
                .get_or_load(|| PlatformIconCatalog::build(source, &self.extensions)),
            None => self.catalog.current().ok_or(Error::NoSource),
        }
    }

    /// Async version of [`catalog`](Self::catalog).
    pub async fn catalog_async(&self) -> Result<Arc<PlatformIconCatalog>> {
        match &self.source {
            Some(source) => {
                self.catalog
                    .get_or_load_async(|| PlatformIconCatalog::build_async(source, &self.extensions))
                    .await
            }
            None => self.catalog.current().ok_or(Error::NoSource),
        }
    }

    /// Drop the cached catalog so the next lookup rescans the source.
    pub fn invalidate(&self) {
        if self.source.is_some() {
            self.catalog.invalidate();
            tracing::debug!(target: targets::PLATFORM, "Platform catalog invalidated");
        }
    }

    /// Rebuild the catalog now and swap it in.
    pub fn reload(&self) -> Result<usize> {
        let source = self.source.as_ref().ok_or(Error::NoSource)?;
        let catalog = PlatformIconCatalog::build(source, &self.extensions)?;
        let count = catalog.len();
        self.catalog.store(catalog);
        tracing::info!(target: targets::PLATFORM, "Reloaded platform catalog ({} entries)", count);
        Ok(count)
    }

    /// Resolve a platform identifier to its vector icon.
    ///
    /// Returns `None` for empty or absent identifiers, unknown platforms, and
    /// when the catalog cannot be loaded.
    pub fn resolve<'a>(&self, platform_id: impl Into<Option<&'a str>>) -> Option<IconReference> {
        let platform_id = non_empty(platform_id.into())?;
        match self.catalog() {
            Ok(catalog) => lookup(&catalog, platform_id),
            Err(e) => {
                log_unavailable(platform_id, &e);
                None
            }
        }
    }

    /// Async version of [`resolve`](Self::resolve).
    pub async fn resolve_async<'a>(
        &self,
        platform_id: impl Into<Option<&'a str>>,
    ) -> Option<IconReference> {
        let platform_id = non_empty(platform_id.into())?;
        match self.catalog_async().await {
            Ok(catalog) => lookup(&catalog, platform_id),
            Err(e) => {
                log_unavailable(platform_id, &e);
                None
            }
        }
    }
}

fn lookup(catalog: &PlatformIconCatalog, platform_id: &str) -> Option<IconReference> {
    let icon = catalog.get(platform_id).cloned().map(IconReference::Vector);
    if icon.is_none() {
        tracing::debug!(target: targets::PLATFORM, "No icon for platform '{}'", platform_id);
    }
    icon
}

fn log_unavailable(platform_id: &str, error: &Error) {
    tracing::warn!(
        target: targets::PLATFORM,
        "Platform catalog unavailable while resolving '{}': {}",
        platform_id,
        error
    );
}
