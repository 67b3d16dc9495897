//! Error types for icon resolution.

use std::path::PathBuf;

/// Result type alias for catalog and configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building catalogs or loading configuration.
///
/// Resolvers never return these to their callers; they log them and fall
/// back instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error.
    #[error("Failed to read asset location '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An asset source path exists but is not a directory.
    #[error("Asset source '{path}' is not a directory")]
    NotDirectory { path: PathBuf },

    /// Invalid or unreadable configuration.
    #[error("Invalid icon configuration{}: {message}", config_location(.path))]
    Config {
        path: Option<PathBuf>,
        message: String,
    },

    /// A resolver has neither a source to scan nor a pre-built catalog.
    #[error("No asset source or catalog configured")]
    NoSource,

    /// Hot-reload error.
    #[cfg(feature = "hot-reload")]
    #[error("Hot-reload error: {0}")]
    HotReload(String),
}

fn config_location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in '{}'", p.display()))
        .unwrap_or_default()
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a not-a-directory error.
    pub fn not_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotDirectory { path: path.into() }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            path: None,
            message: message.into(),
        }
    }

    /// Create a configuration error tied to a file.
    pub fn config_file(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: Some(path.into()),
            message: message.into(),
        }
    }
}
