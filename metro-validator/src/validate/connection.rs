//! Connection checks: references, line membership, timings and reverse edges.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::{Connection, Line, LineStation, Station};

use super::config::ValidatorConfig;
use super::issue::{Category, EntityCheck, ValidationResult};

/// A directed, line-specific edge: (from, to, line).
type EdgeKey<'a> = (&'a str, &'a str, &'a str);

/// Lookup tables built once per run.
struct ConnectionIndex<'a> {
    stations: HashSet<&'a str>,
    lines: HashSet<&'a str>,
    /// station → lines it is a member of
    membership: HashMap<&'a str, HashSet<&'a str>>,
    edges: HashSet<EdgeKey<'a>>,
}

impl<'a> ConnectionIndex<'a> {
    fn build(
        connections: &'a [Connection],
        stations: &'a [Station],
        lines: &'a [Line],
        line_stations: &'a [LineStation],
    ) -> Self {
        let mut membership: HashMap<&str, HashSet<&str>> = HashMap::new();
        for ls in line_stations {
            membership
                .entry(ls.station_id.as_str())
                .or_default()
                .insert(ls.line_id.as_str());
        }

        Self {
            stations: stations.iter().map(|s| s.id.as_str()).collect(),
            lines: lines.iter().map(|l| l.id.as_str()).collect(),
            membership,
            edges: connections
                .iter()
                .map(|c| {
                    (
                        c.from_station_id.as_str(),
                        c.to_station_id.as_str(),
                        c.line_id.as_str(),
                    )
                })
                .collect(),
        }
    }

    fn station_exists(&self, id: &str) -> bool {
        self.stations.contains(id)
    }

    /// Lines a station is listed on, if it has any membership rows.
    fn lines_of(&self, station: &str) -> Option<&HashSet<&'a str>> {
        self.membership.get(station)
    }

    fn has_edge(&self, from: &str, to: &str, line: &str) -> bool {
        self.edges.contains(&(from, to, line))
    }
}

/// Validate every connection against stations, lines and memberships.
pub fn validate_connections(
    connections: &[Connection],
    stations: &[Station],
    lines: &[Line],
    line_stations: &[LineStation],
    config: &ValidatorConfig,
) -> ValidationResult {
    let mut result = ValidationResult::new(Category::Connection);
    let index = ConnectionIndex::build(connections, stations, lines, line_stations);

    for conn in connections {
        result.check(conn.id.to_string(), |c| {
            check_references(c, conn, &index);
            check_membership(c, conn, &index);
            check_timings(c, conn, config);

            if !index.has_edge(&conn.to_station_id, &conn.from_station_id, &conn.line_id) {
                c.warn(format!(
                    "Missing reverse connection: {} -> {} on {}",
                    conn.to_station_id, conn.from_station_id, conn.line_id
                ));
            }
        });
    }

    debug!(
        passed = result.passed,
        failed = result.failed,
        warnings = result.warnings,
        "validated connections"
    );
    result
}

fn check_references(c: &mut EntityCheck<'_>, conn: &Connection, index: &ConnectionIndex<'_>) {
    if !index.station_exists(&conn.from_station_id) {
        c.error(format!(
            "FromStationID '{}' does not exist",
            conn.from_station_id
        ));
    }
    if !index.station_exists(&conn.to_station_id) {
        c.error(format!("ToStationID '{}' does not exist", conn.to_station_id));
    }
    if !index.lines.contains(conn.line_id.as_str()) {
        c.error(format!("LineID '{}' does not exist", conn.line_id));
    }
    if conn.from_station_id == conn.to_station_id {
        c.error("Self-connection detected (from == to)");
    }
}

/// Both endpoints must be on the connection's line. Only endpoints with
/// membership rows are checked, whether or not the station itself exists.
fn check_membership(c: &mut EntityCheck<'_>, conn: &Connection, index: &ConnectionIndex<'_>) {
    let endpoints = [
        ("FromStation", conn.from_station_id.as_str()),
        ("ToStation", conn.to_station_id.as_str()),
    ];

    // Stations without membership rows are left to the interchange checks.
    // Stations without membership rows are left to the orphan check.
    for (label, station) in endpoints {
        let Some(lines) = index.lines_of(station) else {
            continue;
        };
        if !lines.contains(conn.line_id.as_str()) {
            c.error(format!(
                "{label} '{station}' does not belong to line '{}'",
                conn.line_id
            ));
        }
    }
}

fn check_timings(c: &mut EntityCheck<'_>, conn: &Connection, config: &ValidatorConfig) {
    let travel = conn.travel_time_seconds;
    if travel < config.min_travel_secs {
        c.warn(format!(
            "Travel time {travel}s is below minimum {}s",
            config.min_travel_secs
        ));
    }
    if travel > config.max_travel_secs {
        c.warn(format!(
            "Travel time {travel}s exceeds recommended maximum {}s",
            config.max_travel_secs
        ));
    }

    let stop = conn.stop_time_seconds;
    if stop < config.min_stop_secs {
        c.warn(format!(
            "Stop time {stop}s is below minimum {}s",
            config.min_stop_secs
        ));
    }
    if stop > config.max_stop_secs {
        c.warn(format!(
            "Stop time {stop}s exceeds recommended maximum {}s",
            config.max_stop_secs
        ));
    }
}
