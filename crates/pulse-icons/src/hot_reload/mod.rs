//! Hot-reload support for asset catalogs.
//!
//! This module is only available with the `hot-reload` feature.

mod watcher;

pub use watcher::{AssetChangeEvent, AssetWatcher, CatalogKind, ChangeKind};
