//! Matching device names against the asset catalog.
//!
//! Matching runs in two passes over the catalog, both in catalog order:
//!
//! 1. **Strong**: the stem equals the whole lowercased device name, or equals
//!    the lowercased full model, or contains the brand together with the first
//!    space-delimited model token.
//! 2. **Loose**: the stem contains the brand together with the first model
//!    token when the model is also split on `+` (so `"venu+ sq"` yields
//!    `"venu"`).
//!
//! The loose pass only runs when the strong pass finds nothing.

use serde::{Deserialize, Serialize};

use crate::brand::{BrandModelDescriptor, BrandVocabulary};
use crate::catalog::{AssetCatalog, CatalogEntry};
use crate::logging::targets;

/// Which pass produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPass {
    /// Exact name, exact full model, or brand plus first model token.
    Strong,
    /// Brand plus first model token split on whitespace or `+`.
    Loose,
}

/// Matches device names against a catalog.
#[derive(Debug, Clone, Copy)]
pub struct AssetMatcher<'a> {
    catalog: &'a AssetCatalog,
    vocabulary: &'a BrandVocabulary,
}

impl<'a> AssetMatcher<'a> {
    /// Create a matcher over a catalog.
    pub fn new(catalog: &'a AssetCatalog, vocabulary: &'a BrandVocabulary) -> Self {
        Self {
            catalog,
            vocabulary,
        }
    }

    /// Find the catalog entry for a device name.
    pub fn find(&self, device_name: &str) -> Option<&'a CatalogEntry> {
        self.find_with_pass(device_name).map(|(entry, _)| entry)
    }

    /// Find the catalog entry for a device name and report which pass matched.
    pub fn find_with_pass(&self, device_name: &str) -> Option<(&'a CatalogEntry, MatchPass)> {
        if self.catalog.is_empty() {
            return None;
        }
        let descriptor = self.vocabulary.extract(device_name)?;
        self.find_descriptor(device_name, &descriptor)
    }

    /// Match an already extracted descriptor.
    pub fn find_descriptor(
        &self,
        device_name: &str,
        descriptor: &BrandModelDescriptor,
    ) -> Option<(&'a CatalogEntry, MatchPass)> {
        let name_lower = device_name.to_lowercase();
        let full_model_lower = descriptor.full_model.to_lowercase();
        let model_lower = descriptor.model_lower();
        let brand = descriptor.brand.as_str();

        let strong_token = model_lower.split(char::is_whitespace).next().unwrap_or("");
        if let Some(entry) = self.catalog.iter().find(|entry| {
            let stem = entry.stem();
            stem == name_lower
                || stem == full_model_lower
                || (stem.contains(brand) && stem.contains(strong_token))
        }) {
            tracing::trace!(
                target: targets::MATCHER,
                "'{}' matched '{}' (strong)",
                device_name,
                entry.stem()
            );
            return Some((entry, MatchPass::Strong));
        }

        let loose_token = model_lower
            .split(|c: char| c.is_whitespace() || c == '+')
            .next()
            .unwrap_or("");
        if let Some(entry) = self
            .catalog
            .iter()
            .find(|entry| entry.stem().contains(brand) && entry.stem().contains(loose_token))
        {
            tracing::trace!(
                target: targets::MATCHER,
                "'{}' matched '{}' (loose)",
                device_name,
                entry.stem()
            );
            return Some((entry, MatchPass::Loose));
        }

        tracing::trace!(target: targets::MATCHER, "'{}' matched nothing", device_name);
        None
    }
}
