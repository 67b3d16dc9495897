//! Device icon resolution with fallback.
//!
//! [`DeviceIconResolver`] is the public entry point for device icons. It owns
//! the brand vocabulary, the catalog source and the default icon, and it never
//! fails: any missing input, catalog error, or non-match yields the default
//! icon.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::brand::{BrandModelDescriptor, BrandVocabulary};
use crate::catalog::{AssetCatalog, AssetSource};
use crate::logging::targets;
use crate::matcher::{AssetMatcher, MatchPass};
use crate::reference::{AssetRef, IconReference};
use crate::snapshot::Snapshot;
use crate::{Error, Result};

/// Location of the generic device icon when none is configured.
pub const DEFAULT_ICON: &str = "other.png";

/// How often a resolver rebuilds its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// Build once and keep the catalog until invalidated.
    #[default]
    Memoize,
    /// Rescan the source on every resolution.
    Rebuild,
}

/// Detailed outcome of a device resolution, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The icon handed to the caller.
    pub icon: IconReference,
    /// Brand/model descriptor, when the name contained a known brand.
    pub descriptor: Option<BrandModelDescriptor>,
    /// Matching pass that produced the icon, if it came from the catalog.
    pub pass: Option<MatchPass>,
}

/// Resolves device names to icons.
///
/// # Example
///
/// ```ignore
/// let resolver = DeviceIconResolver::new(AssetSource::directory("assets/images"))
///     .with_default_icon("assets/images/other.png");
///
/// let icon = resolver.resolve("HUAWEI WATCH GT 4");
/// let icon = resolver.resolve_async("HUAWEI WATCH GT 4").await;
/// ```
#[derive(Debug)]
pub struct DeviceIconResolver {
    /// Where the catalog is scanned from; `None` for pre-built catalogs
    source: Option<AssetSource>,
    /// Raster extensions included in the catalog
    extensions: Vec<String>,
    /// Brand priority list
    vocabulary: BrandVocabulary,
    /// Fallback icon
    default_icon: AssetRef,
    /// Current catalog
    catalog: Snapshot<AssetCatalog>,
}

impl DeviceIconResolver {
    /// Create a resolver that scans the given source for `.png` files.
    pub fn new(source: AssetSource) -> Self {
        Self {
            source: Some(source),
            extensions: vec!["png".to_string()],
            vocabulary: BrandVocabulary::default(),
            default_icon: AssetRef::new(DEFAULT_ICON),
            catalog: Snapshot::new(CachePolicy::default()),
        }
    }

    /// Create a resolver around an already built catalog.
    pub fn with_catalog(catalog: AssetCatalog) -> Self {
        Self {
            source: None,
            extensions: vec!["png".to_string()],
            vocabulary: BrandVocabulary::default(),
            default_icon: AssetRef::new(DEFAULT_ICON),
            catalog: Snapshot::with_value(catalog, CachePolicy::Memoize),
        }
    }

    /// Set the brand vocabulary.
    pub fn with_vocabulary(mut self, vocabulary: BrandVocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Set the default icon location.
    pub fn with_default_icon(mut self, default_icon: impl Into<AssetRef>) -> Self {
        self.default_icon = default_icon.into();
        self
    }

    /// Set the raster extensions scanned into the catalog.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = normalize_extensions(extensions);
        self
    }

    /// Set the caching policy.
    ///
    /// Ignored for resolvers built with [`with_catalog`](Self::with_catalog),
    /// which have nothing to rebuild from.
    pub fn with_cache_policy(mut self, policy: CachePolicy) -> Self {
        if self.source.is_some() {
            self.catalog.set_policy(policy);
        }
        self
    }

    /// Get the brand vocabulary.
    pub fn vocabulary(&self) -> &BrandVocabulary {
        &self.vocabulary
    }

    /// Get the catalog source, if any.
    pub fn source(&self) -> Option<&AssetSource> {
        self.source.as_ref()
    }

    /// Get the caching policy.
    pub fn cache_policy(&self) -> CachePolicy {
        self.catalog.policy()
    }

    /// Get the default icon.
    pub fn default_icon(&self) -> IconReference {
        IconReference::Default(self.default_icon.clone())
    }

    /// Get the current catalog, building it if needed.
    pub fn catalog(&self) -> Result<Arc<AssetCatalog>> {
        match &self.source {
            Some(source) => self
                .catalog
                .get_or_load(|| AssetCatalog::build(source, &self.extensions)),
            None => self.catalog.current().ok_or(Error::NoSource),
        }
    }

    /// Async version of [`catalog`](Self::catalog).
    pub async fn catalog_async(&self) -> Result<Arc<AssetCatalog>> {
        match &self.source {
            Some(source) => {
                self.catalog
                    .get_or_load_async(|| AssetCatalog::build_async(source, &self.extensions))
                    .await
            }
            None => self.catalog.current().ok_or(Error::NoSource),
        }
    }

    /// Drop the cached catalog so the next resolution rescans the source.
    ///
    /// Does nothing for resolvers built around a fixed catalog.
    pub fn invalidate(&self) {
        if self.source.is_some() {
            self.catalog.invalidate();
            tracing::debug!(target: targets::RESOLVER, "Device catalog invalidated");
        }
    }

    /// Rebuild the catalog now and swap it in.
    ///
    /// Returns the number of entries in the new catalog.
    pub fn reload(&self) -> Result<usize> {
        let source = self.source.as_ref().ok_or(Error::NoSource)?;
        let catalog = AssetCatalog::build(source, &self.extensions)?;
        let count = catalog.len();
        self.catalog.store(catalog);
        tracing::info!(target: targets::RESOLVER, "Reloaded device catalog ({} entries)", count);
        Ok(count)
    }

    /// Resolve a device name to an icon.
    ///
    /// Empty or absent names, catalog failures and non-matches all yield the
    /// default icon.
    pub fn resolve<'a>(&self, device_name: impl Into<Option<&'a str>>) -> IconReference {
        self.resolve_detailed(device_name).icon
    }

    /// Async version of [`resolve`](Self::resolve).
    ///
    /// Suspends only while the catalog is being built.
    pub async fn resolve_async<'a>(
        &self,
        device_name: impl Into<Option<&'a str>>,
    ) -> IconReference {
        let Some(name) = non_empty(device_name.into()) else {
            return self.default_icon();
        };

        match self.catalog_async().await {
            Ok(catalog) => self.resolve_in(&catalog, name).icon,
            Err(e) => self.fallback_on_error(name, &e).icon,
        }
    }

    /// Resolve a device name and report how the icon was chosen.
    pub fn resolve_detailed<'a>(&self, device_name: impl Into<Option<&'a str>>) -> Resolution {
        let Some(name) = non_empty(device_name.into()) else {
            return Resolution {
                icon: self.default_icon(),
                descriptor: None,
                pass: None,
            };
        };

        match self.catalog() {
            Ok(catalog) => self.resolve_in(&catalog, name),
            Err(e) => self.fallback_on_error(name, &e),
        }
    }

    fn resolve_in(&self, catalog: &AssetCatalog, name: &str) -> Resolution {
        let descriptor = self.vocabulary.extract(name);
        let found = match &descriptor {
            Some(descriptor) if !catalog.is_empty() => {
                AssetMatcher::new(catalog, &self.vocabulary).find_descriptor(name, descriptor)
            }
            _ => None,
        };

        match found {
            Some((entry, pass)) => Resolution {
                icon: IconReference::Raster(entry.asset().clone()),
                descriptor,
                pass: Some(pass),
            },
            None => {
                tracing::debug!(
                    target: targets::RESOLVER,
                    "No icon for '{}', using default",
                    name
                );
                Resolution {
                    icon: self.default_icon(),
                    descriptor,
                    pass: None,
                }
            }
        }
    }

    fn fallback_on_error(&self, name: &str, error: &Error) -> Resolution {
        tracing::warn!(
            target: targets::RESOLVER,
            "Device catalog unavailable while resolving '{}': {}",
            name,
            error
        );
        Resolution {
            icon: self.default_icon(),
            descriptor: None,
            pass: None,
        }
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

pub(crate) fn normalize_extensions<I, S>(extensions: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    extensions
        .into_iter()
        .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}
