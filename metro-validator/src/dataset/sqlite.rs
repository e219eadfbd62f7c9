//! SQLite store source.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, Row};
use tracing::debug;

use crate::domain::{City, Line, LineStation, Station};

use super::error::LoadError;
use super::snapshot::Dataset;
use super::DatasetSource;

const CITIES: &str = "SELECT id, name, display_name, country, timezone, map_center, is_active
     FROM cities";
const LINES: &str = "SELECT id, city_id, name, color, display_order FROM metro_lines";
const STATIONS: &str = "SELECT id, city_id, name, latitude, longitude, is_interchange
     FROM metro_stations";
const LINE_STATIONS: &str =
    "SELECT id, line_id, station_id, sequence_number, direction FROM line_stations";
const CONNECTIONS: &str = "SELECT id, from_station_id, to_station_id, line_id,
            travel_time_seconds, stop_time_seconds
     FROM station_connections";
const STATION_COUNT_PER_LINE: &str = "SELECT line_id, COUNT(DISTINCT station_id)
     FROM line_stations
     GROUP BY line_id";
const LINES_PER_STATION: &str = "SELECT station_id, line_id
     FROM line_stations
     GROUP BY station_id, line_id";

/// Loads a fresh [`Dataset`] from the backend's SQLite database.
///
/// The file is opened read-only and never created.
#[derive(Debug, Clone)]
pub struct SqliteSource {
    path: PathBuf,
}

impl SqliteSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Connection, LoadError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        Connection::open_with_flags(&self.path, flags)
            .map_err(|e| self.error(format!("failed to open database: {e}")))
    }

    fn error(&self, message: String) -> LoadError {
        LoadError::Database {
            path: self.path.clone(),
            message,
        }
    }

    fn query<T>(
        &self,
        conn: &Connection,
        what: &str,
        sql: &str,
        map: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>, LoadError> {
        query_all(conn, sql, map)
            .map_err(|e| self.error(format!("failed to query {what}: {e}")))
    }
}

impl DatasetSource for SqliteSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Dataset, LoadError> {
        let conn = self.open()?;
        // One read transaction so every query sees the same snapshot
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| self.error(format!("failed to begin read: {e}")))?;

        let cities = self.query(&tx, "cities", CITIES, |row| {
            Ok(City {
                id: row.get(0)?,
                name: row.get(1)?,
                display_name: row.get(2)?,
                country: row.get(3)?,
                timezone: row.get(4)?,
                map_center: row.get(5)?,
                is_active: row.get::<_, i64>(6)? == 1,
            })
        })?;
        let lines = self.query(&tx, "lines", LINES, |row| {
            Ok(Line {
                id: row.get(0)?,
                city_id: row.get(1)?,
                name: row.get(2)?,
                color: row.get(3)?,
                display_order: row.get(4)?,
            })
        })?;
        let stations = self.query(&tx, "stations", STATIONS, |row| {
            Ok(Station {
                id: row.get(0)?,
                city_id: row.get(1)?,
                name: row.get(2)?,
                latitude: row.get(3)?,
                longitude: row.get(4)?,
                is_interchange: row.get::<_, i64>(5)? == 1,
            })
        })?;
        let line_stations = self.query(&tx, "line_stations", LINE_STATIONS, |row| {
            Ok(LineStation {
                id: row.get(0)?,
                line_id: row.get(1)?,
                station_id: row.get(2)?,
                sequence_number: row.get(3)?,
                direction: row.get(4)?,
            })
        })?;
        let connections = self.query(&tx, "connections", CONNECTIONS, |row| {
            Ok(crate::domain::Connection {
                id: row.get(0)?,
                from_station_id: row.get(1)?,
                to_station_id: row.get(2)?,
                line_id: row.get(3)?,
                travel_time_seconds: row.get(4)?,
                stop_time_seconds: row.get(5)?,
            })
        })?;

        let station_count_per_line: HashMap<String, usize> = self
            .query(&tx, "station counts", STATION_COUNT_PER_LINE, |row| {
                let count: i64 = row.get(1)?;
                Ok((row.get(0)?, usize::try_from(count).unwrap_or_default()))
            })?
            .into_iter()
            .collect();

        let memberships = self.query(&tx, "lines per station", LINES_PER_STATION, |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        let mut lines_per_station: HashMap<String, HashSet<String>> = HashMap::new();
        for (station, line) in memberships {
            lines_per_station.entry(station).or_default().insert(line);
        }

        debug!(
            path = %self.path.display(),
            cities = cities.len(),
            stations = stations.len(),
            "loaded database snapshot"
        );

        Ok(
            Dataset::from_parts(cities, lines, stations, line_stations, connections)
                .with_aggregates(station_count_per_line, lines_per_station),
        )
    }
}

fn query_all<T>(
    conn: &Connection,
    sql: &str,
    map: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
) -> rusqlite::Result<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], map)?.collect::<rusqlite::Result<Vec<T>>>();
    rows
}
