//! JSON snapshot file source.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{City, Connection, Line, LineStation, Station};

use super::error::LoadError;
use super::snapshot::Dataset;
use super::DatasetSource;

/// On-disk layout of a dataset export.
#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    cities: Vec<City>,
    #[serde(default)]
    lines: Vec<Line>,
    #[serde(default)]
    stations: Vec<Station>,
    #[serde(default)]
    line_stations: Vec<LineStation>,
    #[serde(default)]
    connections: Vec<Connection>,
}

/// Loads a fresh [`Dataset`] from a JSON export on every call.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Dataset, LoadError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;

        let file: SnapshotFile =
            serde_json::from_str(&contents).map_err(|e| LoadError::Json {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        Ok(Dataset::from_parts(
            file.cities,
            file.lines,
            file.stations,
            file.line_stations,
            file.connections,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = r##"{
        "cities": [{
            "id": "delhi",
            "name": "delhi",
            "display_name": "Delhi",
            "country": "India",
            "timezone": "Asia/Kolkata",
            "map_center": "{\"lat\": 28.6139, \"lng\": 77.209}",
            "is_active": true
        }],
        "lines": [{"id": "yellow", "city_id": "delhi", "name": "Yellow Line", "color": "#FFD700", "display_order": 1}],
        "stations": [
            {"id": "kashmere-gate", "city_id": "delhi", "name": "Kashmere Gate", "latitude": 28.6675, "longitude": 77.2282, "is_interchange": false},
            {"id": "chandni-chowk", "city_id": "delhi", "name": "Chandni Chowk", "latitude": 28.6580, "longitude": 77.2300, "is_interchange": false}
        ],
        "line_stations": [
            {"id": 1, "line_id": "yellow", "station_id": "kashmere-gate", "sequence_number": 1, "direction": "up"},
            {"id": 2, "line_id": "yellow", "station_id": "chandni-chowk", "sequence_number": 2, "direction": "up"}
        ],
        "connections": [
            {"id": 10, "from_station_id": "kashmere-gate", "to_station_id": "chandni-chowk", "line_id": "yellow", "travel_time_seconds": 120, "stop_time_seconds": 30}
        ]
    }"##;

    #[test]
    fn load_sample_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metro.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let source = JsonFileSource::new(&path);
        let ds = source.load().unwrap();

        assert_eq!(ds.stats().cities, 1);
        assert_eq!(ds.stats().lines, 1);
        assert_eq!(ds.stats().stations, 2);
        assert_eq!(ds.stats().connections, 1);
        assert_eq!(ds.station_count_per_line().get("yellow"), Some(&2));
        assert_eq!(source.describe(), path.display().to_string());
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metro.json");
        std::fs::write(&path, "{}").unwrap();

        let ds = JsonFileSource::new(&path).load().unwrap();
        assert_eq!(ds.stats().cities, 0);
        assert!(ds.lines_per_station().is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = JsonFileSource::new("/nonexistent/path/metro.json")
            .load()
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn corrupt_file_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metro.json");
        std::fs::write(&path, r#"{"cities": [{"id": 1}]}"#).unwrap();

        let err = JsonFileSource::new(&path).load().unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
    }

    #[test]
    fn each_load_is_a_fresh_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metro.json");
        std::fs::write(&path, "{}").unwrap();

        let source = JsonFileSource::new(&path);
        assert_eq!(source.load().unwrap().stats().lines, 0);

        std::fs::write(&path, SAMPLE).unwrap();
        assert_eq!(source.load().unwrap().stats().lines, 1);
    }
}
