//! Device and platform icon resolution for the Pulse wearable companion.
//!
//! This crate turns the free-text names reported by device discovery into
//! icons from a bundled asset catalog, featuring:
//!
//! - **Catalogs**: Order-stable indexes of bundled raster and vector assets,
//!   scanned from a directory or from an embedded `include_dir!` bundle
//! - **Brand extraction**: Priority-ordered brand detection and model parsing
//! - **Two-pass matching**: Exact name/model matches before loose token matches
//! - **Fallbacks**: A generic device icon, or no icon for unknown platforms
//! - **Hot Reload**: Invalidate cached catalogs when the asset bundle changes
//!
//! # Example
//!
//! ```ignore
//! use pulse_icons::prelude::*;
//!
//! let resolver = DeviceIconResolver::new(AssetSource::directory("assets/images"))
//!     .with_default_icon("assets/images/other.png");
//!
//! let icon = resolver.resolve("Xiaomi Smart Band 9 Pro");
//! if is_raster_image(&icon) {
//!     // draw as an image
//! }
//!
//! let platforms = PlatformIconResolver::new(AssetSource::directory("assets/icons"));
//! let windows = platforms.resolve("windows");
//! ```

pub mod brand;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod matcher;
pub mod platform;
pub mod reference;
pub mod resolver;
pub mod service;

#[cfg(feature = "hot-reload")]
pub mod hot_reload;

mod error;
mod snapshot;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::brand::{BrandModelDescriptor, BrandVocabulary, extract_brand_and_model};
    pub use crate::catalog::{AssetCatalog, AssetSource, CatalogEntry};
    pub use crate::config::IconConfig;
    pub use crate::matcher::{AssetMatcher, MatchPass};
    pub use crate::platform::{PlatformIconCatalog, PlatformIconResolver};
    pub use crate::reference::{AssetRef, IconKind, IconReference, is_raster_image};
    pub use crate::resolver::{CachePolicy, DeviceIconResolver, Resolution};
    pub use crate::service::IconService;

    #[cfg(feature = "hot-reload")]
    pub use crate::hot_reload::AssetWatcher;
}
