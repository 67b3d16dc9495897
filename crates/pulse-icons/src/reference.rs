//! Icon references handed to the rendering layer.
//!
//! An [`IconReference`] is what every resolver returns: a raster asset from the
//! device catalog, a vector icon from the platform catalog, or the generic
//! device icon used when nothing better is known.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// File extensions treated as raster images by [`is_raster_image`].
pub const RASTER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif"];

/// Opaque location of a bundled asset.
///
/// Filesystem assets carry their path; embedded assets use the `:/path`
/// resource syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(String);

impl AssetRef {
    /// Prefix marking an asset that lives in an embedded bundle.
    pub const EMBEDDED_PREFIX: &'static str = ":/";

    /// Create a reference from any location string.
    pub fn new(location: impl AsRef<str>) -> Self {
        Self(location.as_ref().to_string())
    }

    /// Create a reference to a filesystem path.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::new(path.as_ref().to_string_lossy())
    }

    /// Create a reference to a file inside an embedded bundle.
    pub fn embedded(path: impl AsRef<str>) -> Self {
        let path = path.as_ref().trim_start_matches('/');
        Self::new(format!("{}{}", Self::EMBEDDED_PREFIX, path))
    }

    /// Get the location string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this reference points into an embedded bundle.
    pub fn is_embedded(&self) -> bool {
        self.0.starts_with(Self::EMBEDDED_PREFIX)
    }

    /// Get the lowercased file extension of the location, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(self.as_str())
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetRef {
    fn from(location: &str) -> Self {
        Self::new(location)
    }
}

impl From<String> for AssetRef {
    fn from(location: String) -> Self {
        Self(location)
    }
}

/// The icon chosen for a device or platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "location", rename_all = "snake_case")]
pub enum IconReference {
    /// A raster image from the device catalog.
    Raster(AssetRef),
    /// A vector icon from the platform catalog.
    Vector(AssetRef),
    /// The generic device icon.
    Default(AssetRef),
}

impl IconReference {
    /// Get the underlying asset reference.
    pub fn asset(&self) -> &AssetRef {
        match self {
            IconReference::Raster(asset)
            | IconReference::Vector(asset)
            | IconReference::Default(asset) => asset,
        }
    }

    /// Get the location string of the underlying asset.
    pub fn as_str(&self) -> &str {
        self.asset().as_str()
    }

    /// Check if this is the default icon.
    pub fn is_default(&self) -> bool {
        matches!(self, IconReference::Default(_))
    }

    /// Classify how the rendering layer should treat this icon.
    pub fn kind(&self) -> IconKind {
        IconKind::classify(self)
    }
}

impl fmt::Display for IconReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.asset(), f)
    }
}

/// Rendering treatment of an icon reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKind {
    /// Draw as a raster image.
    Raster,
    /// Draw as a vector icon.
    Vector,
    /// Neither; the location has no recognized image extension.
    Other,
}

impl IconKind {
    /// Classify an icon reference.
    ///
    /// Vector references are always [`IconKind::Vector`]. Anything else is
    /// [`IconKind::Raster`] when its location ends in a raster extension.
    pub fn classify(icon: &IconReference) -> Self {
        match icon {
            IconReference::Vector(_) => IconKind::Vector,
            IconReference::Raster(asset) | IconReference::Default(asset) => {
                if has_raster_extension(asset) {
                    IconKind::Raster
                } else {
                    IconKind::Other
                }
            }
        }
    }
}

/// Check whether an icon denotes a raster image.
///
/// Returns true for catalog-derived raster assets and for the default icon
/// when it is itself a raster path; false for vector icons.
pub fn is_raster_image(icon: &IconReference) -> bool {
    IconKind::classify(icon) == IconKind::Raster
}

fn has_raster_extension(asset: &AssetRef) -> bool {
    asset
        .extension()
        .is_some_and(|ext| RASTER_EXTENSIONS.contains(&ext.as_str()))
}
