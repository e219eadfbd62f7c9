//! Immutable dataset snapshot and its derived aggregates.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::domain::{City, Connection, Line, LineStation, Station};

/// Entity counts reported alongside validation results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub cities: usize,
    pub lines: usize,
    pub stations: usize,
    pub connections: usize,
}

/// A point-in-time, read-only copy of every entity collection.
///
/// The two membership aggregates are derived once at construction so
/// each validator sees the same figures.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    cities: Vec<City>,
    lines: Vec<Line>,
    stations: Vec<Station>,
    line_stations: Vec<LineStation>,
    connections: Vec<Connection>,
    station_count_per_line: HashMap<String, usize>,
    lines_per_station: HashMap<String, HashSet<String>>,
}

impl Dataset {
    /// Build a snapshot, deriving the membership aggregates from `line_stations`.
    pub fn from_parts(
        cities: Vec<City>,
        lines: Vec<Line>,
        stations: Vec<Station>,
        line_stations: Vec<LineStation>,
        connections: Vec<Connection>,
    ) -> Self {
        let station_count_per_line = count_stations_per_line(&line_stations);
        let lines_per_station = group_lines_per_station(&line_stations);

        Self {
            cities,
            lines,
            stations,
            line_stations,
            connections,
            station_count_per_line,
            lines_per_station,
        }
    }

    /// Replace the derived aggregates with ones computed by the store.
    pub(super) fn with_aggregates(
        mut self,
        station_count_per_line: HashMap<String, usize>,
        lines_per_station: HashMap<String, HashSet<String>>,
    ) -> Self {
        self.station_count_per_line = station_count_per_line;
        self.lines_per_station = lines_per_station;
        self
    }

    /// An empty snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn line_stations(&self) -> &[LineStation] {
        &self.line_stations
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Distinct stations per line. Lines with no members are absent.
    pub fn station_count_per_line(&self) -> &HashMap<String, usize> {
        &self.station_count_per_line
    }

    /// Lines each station is on. Orphans are absent.
    pub fn lines_per_station(&self) -> &HashMap<String, HashSet<String>> {
        &self.lines_per_station
    }

    pub fn stats(&self) -> Stats {
        Stats {
            cities: self.cities.len(),
            lines: self.lines.len(),
            stations: self.stations.len(),
            connections: self.connections.len(),
        }
    }
}

fn count_stations_per_line(line_stations: &[LineStation]) -> HashMap<String, usize> {
    let mut members: HashMap<&str, HashSet<&str>> = HashMap::new();
    for ls in line_stations {
        members
            .entry(ls.line_id.as_str())
            .or_default()
            .insert(ls.station_id.as_str());
    }

    members
        .into_iter()
        .map(|(line, stations)| (line.to_string(), stations.len()))
        .collect()
}

fn group_lines_per_station(line_stations: &[LineStation]) -> HashMap<String, HashSet<String>> {
    let mut lines: HashMap<String, HashSet<String>> = HashMap::new();
    for ls in line_stations {
        lines
            .entry(ls.station_id.clone())
            .or_default()
            .insert(ls.line_id.clone());
    }
    lines
}
