//! File watching for asset catalog hot-reload.

use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebouncedEventKind, Debouncer, new_debouncer};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Duration;

use crate::catalog::has_extension;
use crate::config::IconConfig;
use crate::logging::targets;
use crate::resolver::normalize_extensions;
use crate::service::IconService;
use crate::{Error, Result};

/// Which catalog a watched directory feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    /// Device images.
    Device,
    /// Platform icons.
    Platform,
}

/// Type of file change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// File was created or modified.
    Modified,
    /// File was removed.
    Removed,
}

/// Event indicating an asset file changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetChangeEvent {
    /// Path to the changed file.
    pub path: PathBuf,
    /// Type of change.
    pub kind: ChangeKind,
    /// Catalog the file belongs to.
    pub catalog: CatalogKind,
}

#[derive(Debug)]
struct WatchedDir {
    catalog: CatalogKind,
    extensions: Vec<String>,
}

/// Watches asset directories and invalidates catalogs when they change.
///
/// # Example
///
/// ```ignore
/// let service = IconService::from_config(&config)?;
/// let mut watcher = AssetWatcher::new()?;
/// watcher.watch_config(&config)?;
///
/// // In your event loop:
/// let changes = watcher.poll();
/// if !changes.is_empty() {
///     watcher.apply_changes(&service, &changes);
/// }
/// ```
pub struct AssetWatcher {
    debouncer: Debouncer<RecommendedWatcher>,
    rx: Receiver<std::result::Result<Vec<notify_debouncer_mini::DebouncedEvent>, notify::Error>>,
    watched_dirs: HashMap<PathBuf, WatchedDir>,
}

impl AssetWatcher {
    /// Create a new asset watcher.
    pub fn new() -> Result<Self> {
        let (tx, rx) = mpsc::channel();

        let debouncer = new_debouncer(Duration::from_millis(100), tx)
            .map_err(|e| Error::HotReload(e.to_string()))?;

        Ok(Self {
            debouncer,
            rx,
            watched_dirs: HashMap::new(),
        })
    }

    /// Start watching an asset directory.
    ///
    /// Only files directly inside the directory with one of `extensions`
    /// are reported, matching what the catalog builders scan.
    pub fn watch_dir<I, S>(
        &mut self,
        path: impl AsRef<Path>,
        catalog: CatalogKind,
        extensions: I,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let path = path
            .as_ref()
            .canonicalize()
            .map_err(|e| Error::io(path.as_ref(), e))?;
        if !path.is_dir() {
            return Err(Error::not_directory(path));
        }

        let extensions = normalize_extensions(extensions);
        if !self.watched_dirs.contains_key(&path) {
            self.debouncer
                .watcher()
                .watch(&path, RecursiveMode::NonRecursive)
                .map_err(|e| Error::HotReload(e.to_string()))?;
            tracing::info!(
                target: targets::HOT_RELOAD,
                "Watching {:?} assets: {}",
                catalog,
                path.display()
            );
        }
        self.watched_dirs.insert(
            path,
            WatchedDir {
                catalog,
                extensions,
            },
        );

        Ok(())
    }

    /// Watch both directories named by a configuration.
    pub fn watch_config(&mut self, config: &IconConfig) -> Result<()> {
        self.watch_dir(
            &config.images_dir,
            CatalogKind::Device,
            &config.raster_extensions,
        )?;
        self.watch_dir(
            &config.icons_dir,
            CatalogKind::Platform,
            &config.vector_extensions,
        )
    }

    /// Stop watching an asset directory.
    pub fn unwatch_dir(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = match path.as_ref().canonicalize() {
            Ok(p) => p,
            Err(_) => return Ok(()),
        };

        if self.watched_dirs.remove(&path).is_some() {
            let _ = self.debouncer.watcher().unwatch(&path);
            tracing::info!(
                target: targets::HOT_RELOAD,
                "Stopped watching assets: {}",
                path.display()
            );
        }

        Ok(())
    }

    /// Poll for asset changes.
    ///
    /// Returns the changed asset files. Call this in your event loop.
    pub fn poll(&mut self) -> Vec<AssetChangeEvent> {
        let mut changes = vec![];

        loop {
            match self.rx.try_recv() {
                Ok(Ok(events)) => {
                    for event in events {
                        if event.kind != DebouncedEventKind::Any {
                            continue;
                        }
                        let Some(catalog) = self.catalog_for(&event.path) else {
                            continue;
                        };
                        let kind = if event.path.exists() {
                            ChangeKind::Modified
                        } else {
                            ChangeKind::Removed
                        };
                        changes.push(AssetChangeEvent {
                            path: event.path,
                            kind,
                            catalog,
                        });
                    }
                }
                Ok(Err(e)) => {
                    tracing::warn!(target: targets::HOT_RELOAD, "File watcher error: {}", e);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::error!(target: targets::HOT_RELOAD, "File watcher disconnected");
                    break;
                }
            }
        }

        changes.sort_by(|a, b| a.path.cmp(&b.path));
        changes.dedup_by(|a, b| a.path == b.path);

        changes
    }

    /// Invalidate the catalogs affected by `changes`.
    ///
    /// Returns the number of catalogs invalidated.
    pub fn apply_changes(&self, service: &IconService, changes: &[AssetChangeEvent]) -> usize {
        let device = changes.iter().any(|c| c.catalog == CatalogKind::Device);
        let platform = changes.iter().any(|c| c.catalog == CatalogKind::Platform);

        for change in changes {
            tracing::debug!(
                target: targets::HOT_RELOAD,
                "{:?} asset {:?}: {}",
                change.catalog,
                change.kind,
                change.path.display()
            );
        }

        if device {
            service.device().invalidate();
        }
        if platform {
            service.platform().invalidate();
        }

        let count = usize::from(device) + usize::from(platform);
        if count > 0 {
            tracing::info!(
                target: targets::HOT_RELOAD,
                "Invalidated {} catalog(s) after {} asset change(s)",
                count,
                changes.len()
            );
        }
        count
    }

    /// Catalog fed by a file path, if the file is one a catalog would scan.
    pub fn catalog_for(&self, path: &Path) -> Option<CatalogKind> {
        let dir = self.watched_dirs.get(path.parent()?)?;
        let file_name = path.file_name()?.to_str()?;
        has_extension(file_name, &dir.extensions).then_some(dir.catalog)
    }

    /// Get the number of watched directories.
    pub fn watched_count(&self) -> usize {
        self.watched_dirs.len()
    }

    /// Get the watched directories.
    pub fn watched_dirs(&self) -> impl Iterator<Item = &Path> {
        self.watched_dirs.keys().map(|p| p.as_path())
    }
}

impl std::fmt::Debug for AssetWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetWatcher")
            .field("watched_dirs", &self.watched_dirs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use tempfile::tempdir;

    #[test]
    fn watcher_creation() {
        let watcher = AssetWatcher::new();
        assert!(watcher.is_ok());
    }

    #[test]
    fn watch_and_unwatch_dir() {
        let dir = tempdir().unwrap();
        let mut watcher = AssetWatcher::new().unwrap();

        watcher
            .watch_dir(dir.path(), CatalogKind::Device, ["png"])
            .unwrap();
        watcher
            .watch_dir(dir.path(), CatalogKind::Device, ["png"])
            .unwrap();
        assert_eq!(watcher.watched_count(), 1);

        watcher.unwatch_dir(dir.path()).unwrap();
        assert_eq!(watcher.watched_count(), 0);
    }

    #[test]
    fn watch_file_is_rejected() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("other.png");
        fs::write(&file, b"").unwrap();

        let mut watcher = AssetWatcher::new().unwrap();
        let err = watcher
            .watch_dir(&file, CatalogKind::Device, ["png"])
            .unwrap_err();
        assert!(matches!(err, Error::NotDirectory { .. }));
    }

    #[test]
    fn catalog_for_filters_extensions() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let mut watcher = AssetWatcher::new().unwrap();
        watcher
            .watch_dir(&root, CatalogKind::Platform, ["svg"])
            .unwrap();

        assert_eq!(
            watcher.catalog_for(&root.join("windows.svg")),
            Some(CatalogKind::Platform)
        );
        assert_eq!(watcher.catalog_for(&root.join("notes.txt")), None);
        assert_eq!(watcher.catalog_for(&root.join("nested/linux.svg")), None);
    }

    #[test]
    fn poll_reports_watched_asset_changes() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let mut watcher = AssetWatcher::new().unwrap();
        watcher
            .watch_dir(&root, CatalogKind::Device, ["png"])
            .unwrap();

        fs::write(root.join("notes.txt"), b"ignored").unwrap();
        fs::write(root.join("garmin venu.png"), b"").unwrap();

        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        let changes = loop {
            let changes = watcher.poll();
            if !changes.is_empty() || std::time::Instant::now() > deadline {
                break changes;
            }
            std::thread::sleep(Duration::from_millis(50));
        };

        assert_eq!(
            changes,
            [AssetChangeEvent {
                path: root.join("garmin venu.png"),
                kind: ChangeKind::Modified,
                catalog: CatalogKind::Device,
            }]
        );
    }

    #[test]
    fn apply_changes_invalidates_affected_catalog() {
        let dir = tempdir().unwrap();
        let images = dir.path().join("images");
        let icons = dir.path().join("icons");
        fs::create_dir(&images).unwrap();
        fs::create_dir(&icons).unwrap();

        let config = IconConfig {
            images_dir: images.clone(),
            icons_dir: icons,
            ..IconConfig::default()
        };
        let service = IconService::from_config(&config).unwrap();
        assert!(service.device_icon("Xiaomi Band 8").is_default());

        fs::write(images.join("xiaomi 8.png"), b"").unwrap();
        assert!(service.device_icon("Xiaomi Band 8").is_default());

        let watcher = AssetWatcher::new().unwrap();
        let changes = [AssetChangeEvent {
            path: images.join("xiaomi 8.png"),
            kind: ChangeKind::Modified,
            catalog: CatalogKind::Device,
        }];
        assert_eq!(watcher.apply_changes(&service, &changes), 1);
        assert!(!service.device_icon("Xiaomi Band 8").is_default());
    }
}
