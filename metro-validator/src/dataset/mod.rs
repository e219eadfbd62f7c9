//! Entity loading.
//!
//! A [`DatasetSource`] yields an immutable [`Dataset`] snapshot per call.
//! Validators only ever see the snapshot, never the source.

mod error;
mod json;
mod snapshot;
mod sqlite;

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use error::LoadError;
pub use json::JsonFileSource;
pub use snapshot::{Dataset, Stats};
pub use sqlite::SqliteSource;

/// Locations searched, in order, when no dataset path is given.
pub const DEFAULT_DATASET_CANDIDATES: &[&str] = &[
    "../../backend/data/metro.db",
    "../backend/data/metro.db",
    "backend/data/metro.db",
    "./metro.db",
    "../../backend/data/metro.json",
    "../backend/data/metro.json",
    "backend/data/metro.json",
    "./metro.json",
];

/// Something that can produce a point-in-time dataset.
pub trait DatasetSource: Send + Sync {
    /// Human-readable name of the underlying store (e.g. a file path).
    fn describe(&self) -> String;

    /// Load a complete snapshot, or fail without partial results.
    fn load(&self) -> Result<Dataset, LoadError>;
}

/// File extensions read as SQLite databases. Anything else is a JSON export.
const SQLITE_EXTENSIONS: &[&str] = &["db", "sqlite", "sqlite3"];

/// Whether `path` names a SQLite database rather than a JSON export.
pub fn is_sqlite_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SQLITE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Open the source matching the file type of `path`.
pub fn open_source(path: &Path) -> Arc<dyn DatasetSource> {
    if is_sqlite_path(path) {
        Arc::new(SqliteSource::new(path))
    } else {
        Arc::new(JsonFileSource::new(path))
    }
}

/// Pick the first existing candidate path, falling back to the first candidate.
pub fn find_default_dataset(candidates: &[&str]) -> PathBuf {
    candidates
        .iter()
        .map(Path::new)
        .find(|p| p.exists())
        .map(|p| std::path::absolute(p).unwrap_or_else(|_| p.to_path_buf()))
        .or_else(|| candidates.first().map(PathBuf::from))
        .unwrap_or_default()
}
