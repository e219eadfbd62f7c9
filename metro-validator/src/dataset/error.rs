//! Loader error types.

use std::path::PathBuf;

/// Errors that prevent a snapshot from being obtained.
///
/// Any of these aborts the whole validation run; they are never
/// reported as findings.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The snapshot file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot file is not a valid dataset document
    #[error("failed to parse {}: {message}", path.display())]
    Json { path: PathBuf, message: String },

    /// The database could not be opened or queried
    #[error("failed to load {}: {message}", path.display())]
    Database { path: PathBuf, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = LoadError::Json {
            path: PathBuf::from("data/metro.json"),
            message: "expected value at line 1 column 1".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to parse data/metro.json: expected value at line 1 column 1"
        );

        let err = LoadError::Io {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(err.to_string(), "failed to read missing.json: no such file");

        let err = LoadError::Database {
            path: PathBuf::from("metro.db"),
            message: "failed to query cities: no such table: cities".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to load metro.db: failed to query cities: no such table: cities"
        );
    }
}
