//! Brand and model extraction from device names.
//!
//! Device names come straight from discovery and look like
//! `"Xiaomi Smart Band 9 Pro"` or `"Galaxy Watch6 (Samsung)"`. The extractor
//! finds a known brand by priority and pulls a model token out of the text
//! that follows it.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A leading run of digits followed by whitespace and word characters.
static MODEL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+[\s0-9A-Za-z_]*").expect("valid model pattern"));

/// Ordered list of lowercase brand tokens.
///
/// The order is the priority used when a name contains more than one brand:
/// the earliest-listed brand wins, wherever it appears in the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandVocabulary {
    brands: Vec<String>,
}

impl BrandVocabulary {
    /// Brands recognized out of the box, in priority order.
    pub const DEFAULT_BRANDS: &'static [&'static str] = &[
        "xiaomi", "apple", "samsung", "garmin", "fitbit", "huawei", "oppo", "vivo", "realme",
    ];

    /// Create a vocabulary from brand tokens in priority order.
    ///
    /// Tokens are trimmed and lowercased; empty tokens and repeats are dropped.
    pub fn new<I, S>(brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for brand in brands {
            let brand = brand.as_ref().trim().to_lowercase();
            if !brand.is_empty() && !normalized.contains(&brand) {
                normalized.push(brand);
            }
        }
        Self { brands: normalized }
    }

    /// Get the brands in priority order.
    pub fn brands(&self) -> &[String] {
        &self.brands
    }

    /// Number of brands.
    pub fn len(&self) -> usize {
        self.brands.len()
    }

    /// Check if the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }

    /// Find the highest-priority brand contained in an already lowercased name.
    pub fn detect(&self, lowered_name: &str) -> Option<&str> {
        self.brands
            .iter()
            .find(|brand| lowered_name.contains(brand.as_str()))
            .map(String::as_str)
    }

    /// Extract a brand/model descriptor from a device name.
    pub fn extract(&self, device_name: &str) -> Option<BrandModelDescriptor> {
        BrandModelDescriptor::extract(device_name, self)
    }
}

impl Default for BrandVocabulary {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BRANDS)
    }
}

/// Brand and model derived from a device name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandModelDescriptor {
    /// Matched brand token, lowercase.
    pub brand: String,
    /// Model text in its original case; may be empty.
    pub model: String,
    /// `"<brand> <model>"`, or just the brand when the model is empty.
    pub full_model: String,
}

impl BrandModelDescriptor {
    /// Extract a descriptor, or `None` when the name is empty or has no known brand.
    pub fn extract(device_name: &str, vocabulary: &BrandVocabulary) -> Option<Self> {
        if device_name.is_empty() {
            return None;
        }

        let lowered = device_name.to_lowercase();
        let brand = vocabulary.detect(&lowered)?;

        let brand_end = lowered.find(brand)? + brand.len();
        let after_brand = device_name[original_offset(device_name, brand_end)..].trim();

        let model = match MODEL_PATTERN.find(after_brand) {
            Some(found) => found.as_str().trim(),
            None => after_brand,
        };

        let full_model = if model.is_empty() {
            brand.to_string()
        } else {
            format!("{} {}", brand, model)
        };

        Some(Self {
            brand: brand.to_string(),
            model: model.to_string(),
            full_model,
        })
    }

    /// Lowercased model text.
    pub fn model_lower(&self) -> String {
        self.model.to_lowercase()
    }
}

/// Convenience wrapper using the default vocabulary.
pub fn extract_brand_and_model(device_name: &str) -> Option<BrandModelDescriptor> {
    BrandModelDescriptor::extract(device_name, &BrandVocabulary::default())
}

/// Map a byte offset in `name.to_lowercase()` back to a char boundary in `name`.
///
/// Lowercasing can change the byte length of individual characters, so the
/// offset is walked character by character.
fn original_offset(name: &str, lowered_offset: usize) -> usize {
    let mut lowered_len = 0;
    for (idx, ch) in name.char_indices() {
        if lowered_len >= lowered_offset {
            return idx;
        }
        lowered_len += ch.to_lowercase().map(char::len_utf8).sum::<usize>();
    }
    name.len()
}
