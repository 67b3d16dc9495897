//! Asset sources that catalogs are scanned from.

use std::path::{Path, PathBuf};

use include_dir::Dir;

use crate::logging::targets;
use crate::reference::AssetRef;
use crate::{Error, Result};

/// A bundle embedded at compile time with `include_dir!`.
///
/// # Example
///
/// ```ignore
/// use include_dir::{include_dir, Dir};
/// use pulse_icons::catalog::{AssetSource, EmbeddedAssets};
///
/// static IMAGES: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets/images");
/// let source = AssetSource::Embedded(EmbeddedAssets::new(&IMAGES));
/// ```
#[derive(Clone, Copy)]
pub struct EmbeddedAssets {
    dir: &'static Dir<'static>,
}

impl EmbeddedAssets {
    /// Wrap an embedded directory.
    pub const fn new(dir: &'static Dir<'static>) -> Self {
        Self { dir }
    }

    /// Get a file's contents by its path inside the bundle.
    pub fn get_file(&self, path: &str) -> Option<&'static [u8]> {
        self.dir.get_file(path).map(|f| f.contents())
    }

    /// Number of files directly inside the bundle directory.
    pub fn file_count(&self) -> usize {
        self.dir.files().count()
    }
}

impl std::fmt::Debug for EmbeddedAssets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddedAssets")
            .field("path", &self.dir.path())
            .field("file_count", &self.file_count())
            .finish()
    }
}

/// A file found while scanning a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFile {
    /// File name including extension, as found on disk or in the bundle.
    pub file_name: String,
    /// Reference handed out when this file is chosen.
    pub asset: AssetRef,
}

/// Where a catalog's assets come from.
#[derive(Debug, Clone)]
pub enum AssetSource {
    /// A directory on the filesystem, scanned non-recursively.
    Directory(PathBuf),
    /// A compile-time embedded directory.
    Embedded(EmbeddedAssets),
}

impl AssetSource {
    /// Create a filesystem source.
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        AssetSource::Directory(path.into())
    }

    /// Create an embedded source.
    pub const fn embedded(dir: &'static Dir<'static>) -> Self {
        AssetSource::Embedded(EmbeddedAssets::new(dir))
    }

    /// Get the filesystem directory, if this is a filesystem source.
    pub fn path(&self) -> Option<&Path> {
        match self {
            AssetSource::Directory(path) => Some(path),
            AssetSource::Embedded(_) => None,
        }
    }

    /// List files with one of the given extensions, sorted by file name.
    ///
    /// Extensions are compared case-insensitively and given without the dot.
    pub fn scan(&self, extensions: &[String]) -> Result<Vec<AssetFile>> {
        let mut files = match self {
            AssetSource::Directory(path) => scan_directory(path, extensions)?,
            AssetSource::Embedded(embedded) => scan_embedded(embedded, extensions),
        };
        files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(files)
    }

    /// Async version of [`scan`](Self::scan) using `tokio::fs`.
    ///
    /// Embedded sources are already in memory and are listed directly.
    pub async fn scan_async(&self, extensions: &[String]) -> Result<Vec<AssetFile>> {
        let mut files = match self {
            AssetSource::Directory(path) => scan_directory_async(path, extensions).await?,
            AssetSource::Embedded(embedded) => scan_embedded(embedded, extensions),
        };
        files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(files)
    }
}

/// Check a file name against an extension list.
pub(crate) fn has_extension(file_name: &str, extensions: &[String]) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

fn scan_directory(path: &Path, extensions: &[String]) -> Result<Vec<AssetFile>> {
    let metadata = std::fs::metadata(path).map_err(|e| Error::io(path, e))?;
    if !metadata.is_dir() {
        return Err(Error::not_directory(path));
    }

    let entries = std::fs::read_dir(path).map_err(|e| Error::io(path, e))?;
    let mut files = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| Error::io(path, e))?;
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if has_extension(&file_name, extensions) {
            files.push(AssetFile {
                asset: AssetRef::from_path(entry.path()),
                file_name,
            });
        }
    }

    tracing::debug!(
        target: targets::CATALOG,
        "Scanned {}: {} matching files",
        path.display(),
        files.len()
    );
    Ok(files)
}

async fn scan_directory_async(path: &Path, extensions: &[String]) -> Result<Vec<AssetFile>> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| Error::io(path, e))?;
    if !metadata.is_dir() {
        return Err(Error::not_directory(path));
    }

    let mut entries = tokio::fs::read_dir(path)
        .await
        .map_err(|e| Error::io(path, e))?;
    let mut files = Vec::new();

    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => return Err(Error::io(path, e)),
        };

        let is_file = entry
            .file_type()
            .await
            .map(|t| t.is_file())
            .unwrap_or(false);
        if !is_file {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if has_extension(&file_name, extensions) {
            files.push(AssetFile {
                asset: AssetRef::from_path(entry.path()),
                file_name,
            });
        }
    }

    tracing::debug!(
        target: targets::CATALOG,
        "Scanned {} (async): {} matching files",
        path.display(),
        files.len()
    );
    Ok(files)
}

fn scan_embedded(embedded: &EmbeddedAssets, extensions: &[String]) -> Vec<AssetFile> {
    embedded
        .dir
        .files()
        .filter_map(|file| {
            let path = file.path().to_str()?;
            let file_name = file.path().file_name()?.to_str()?.to_string();
            has_extension(&file_name, extensions).then(|| AssetFile {
                asset: AssetRef::embedded(path),
                file_name,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use include_dir::{DirEntry, File};
    use std::fs;

    static BUNDLE: Dir<'static> = Dir::new(
        "",
        &[
            DirEntry::File(File::new("other.png", b"")),
            DirEntry::File(File::new("apple watch.PNG", b"")),
            DirEntry::File(File::new("readme.txt", b"")),
            DirEntry::Dir(Dir::new(
                "nested",
                &[DirEntry::File(File::new("nested/garmin.png", b""))],
            )),
        ],
    );

    fn png() -> Vec<String> {
        vec!["png".to_string()]
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension("a.png", &png()));
        assert!(has_extension("a.PNG", &png()));
        assert!(!has_extension("a.svg", &png()));
        assert!(!has_extension("png", &png()));
    }

    #[test]
    fn test_scan_directory_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("xiaomi 9.png"), b"").unwrap();
        fs::write(dir.path().join("apple watch.png"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("sub.png")).unwrap();

        let files = AssetSource::directory(dir.path()).scan(&png()).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, ["apple watch.png", "xiaomi 9.png"]);
        assert!(files[0].asset.as_str().ends_with("apple watch.png"));
    }

    #[test]
    fn test_scan_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let err = AssetSource::directory(&missing).scan(&png()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_scan_file_is_not_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("other.png");
        fs::write(&file, b"").unwrap();
        let err = AssetSource::directory(&file).scan(&png()).unwrap_err();
        assert!(matches!(err, Error::NotDirectory { .. }));
    }

    #[test]
    fn test_scan_embedded_top_level_only() {
        let files = AssetSource::embedded(&BUNDLE).scan(&png()).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, ["apple watch.PNG", "other.png"]);
        assert_eq!(files[1].asset.as_str(), ":/other.png");
    }

    #[tokio::test]
    async fn test_scan_errors_match_async() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("other.png");
        fs::write(&file, b"").unwrap();

        for path in [dir.path().join("missing"), file] {
            let source = AssetSource::directory(&path);
            let sync = source.scan(&png()).unwrap_err();
            let async_err = source.scan_async(&png()).await.unwrap_err();
            assert_eq!(
                std::mem::discriminant(&sync),
                std::mem::discriminant(&async_err),
                "{}",
                path.display()
            );
        }
    }

    #[tokio::test]
    async fn test_scan_async_matches_sync() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.png", "c.jpg"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        let source = AssetSource::directory(dir.path());
        let sync = source.scan(&png()).unwrap();
        let async_files = source.scan_async(&png()).await.unwrap();
        assert_eq!(sync, async_files);
    }
}
