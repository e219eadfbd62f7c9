//! Runs all validators over a snapshot and derives the overall status.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::dataset::Dataset;

use super::city::validate_cities;
use super::config::ValidatorConfig;
use super::connection::validate_connections;
use super::interchange::validate_interchanges;
use super::issue::{Category, Issue, ValidationResult};
use super::line::validate_lines;
use super::station::validate_stations;

/// Overall verdict for a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pass,
    PassWithWarnings,
    Fail,
}

impl Status {
    /// `Fail` if any result failed an entity, else `PassWithWarnings` if
    /// any raised a warning, else `Pass`.
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a ValidationResult>) -> Self {
        let mut status = Status::Pass;
        for r in results {
            if r.has_errors() {
                return Status::Fail;
            }
            if r.has_warnings() {
                status = Status::PassWithWarnings;
            }
        }
        status
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "pass",
            Status::PassWithWarnings => "pass_with_warnings",
            Status::Fail => "fail",
        }
    }

    pub fn is_fail(&self) -> bool {
        *self == Status::Fail
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five category results of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    results: BTreeMap<Category, ValidationResult>,
}

impl ValidationReport {
    pub fn from_results(results: impl IntoIterator<Item = ValidationResult>) -> Self {
        Self {
            results: results.into_iter().map(|r| (r.category, r)).collect(),
        }
    }

    pub fn get(&self, category: Category) -> Option<&ValidationResult> {
        self.results.get(&category)
    }

    /// Results in display order.
    pub fn results(&self) -> impl Iterator<Item = &ValidationResult> {
        Category::ALL
            .into_iter()
            .filter_map(move |c| self.results.get(&c))
    }

    /// Results keyed by category, for serialization.
    pub fn by_category(&self) -> &BTreeMap<Category, ValidationResult> {
        &self.results
    }

    /// Every issue, grouped by category in display order.
    pub fn issues(&self) -> Vec<Issue> {
        self.results().flat_map(|r| r.issues.iter().cloned()).collect()
    }

    pub fn status(&self) -> Status {
        Status::from_results(self.results())
    }

    /// Failed entities across all categories.
    pub fn total_failed(&self) -> usize {
        self.results().map(|r| r.failed).sum()
    }

    /// Entities with warnings across all categories.
    pub fn total_warnings(&self) -> usize {
        self.results().map(|r| r.warnings).sum()
    }
}

/// Run every validator against `dataset`.
///
/// Validators are independent and share no state; the report is a pure
/// function of the snapshot and config.
pub fn run_validation(dataset: &Dataset, config: &ValidatorConfig) -> ValidationReport {
    let report = ValidationReport::from_results([
        validate_cities(dataset.cities(), config),
        validate_lines(
            dataset.lines(),
            dataset.cities(),
            dataset.station_count_per_line(),
        ),
        validate_stations(dataset.stations(), dataset.cities(), config),
        validate_connections(
            dataset.connections(),
            dataset.stations(),
            dataset.lines(),
            dataset.line_stations(),
            config,
        ),
        validate_interchanges(dataset.stations(), dataset.lines_per_station()),
    ]);

    info!(
        status = %report.status(),
        failed = report.total_failed(),
        warnings = report.total_warnings(),
        "validation complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{City, Connection, Line, LineStation, Station};

    fn city(id: &str) -> City {
        City {
            id: id.to_string(),
            name: id.to_string(),
            display_name: id.to_string(),
            country: "India".to_string(),
            timezone: "Asia/Kolkata".to_string(),
            map_center: r#"{"lat": 28.6139, "lng": 77.209}"#.to_string(),
            is_active: true,
        }
    }

    fn line(id: &str) -> Line {
        Line {
            id: id.to_string(),
            city_id: "delhi".to_string(),
            name: id.to_string(),
            color: "#FFD700".to_string(),
            display_order: 1,
        }
    }

    fn station(id: &str, is_interchange: bool) -> Station {
        Station {
            id: id.to_string(),
            city_id: "delhi".to_string(),
            name: id.to_string(),
            latitude: 28.62,
            longitude: 77.21,
            is_interchange,
        }
    }

    fn member(line: &str, station: &str, seq: i64) -> LineStation {
        LineStation {
            id: seq,
            line_id: line.to_string(),
            station_id: station.to_string(),
            sequence_number: seq,
            direction: "up".to_string(),
        }
    }

    fn conn(id: i64, from: &str, to: &str, line: &str) -> Connection {
        Connection {
            id,
            from_station_id: from.to_string(),
            to_station_id: to.to_string(),
            line_id: line.to_string(),
            travel_time_seconds: 120,
            stop_time_seconds: 30,
        }
    }

    /// Two lines crossing at "hub", all flags and edges consistent.
    fn clean_dataset(hub_flag: bool) -> Dataset {
        Dataset::from_parts(
            vec![city("delhi")],
            vec![line("yellow"), line("blue")],
            vec![
                station("a", false),
                station("hub", hub_flag),
                station("b", false),
            ],
            vec![
                member("yellow", "a", 1),
                member("yellow", "hub", 2),
                member("blue", "hub", 1),
                member("blue", "b", 2),
            ],
            vec![
                conn(1, "a", "hub", "yellow"),
                conn(2, "hub", "a", "yellow"),
                conn(3, "hub", "b", "blue"),
                conn(4, "b", "hub", "blue"),
            ],
        )
    }

    #[test]
    fn empty_dataset_passes_with_zero_counts() {
        let report = run_validation(&Dataset::empty(), &ValidatorConfig::default());

        assert_eq!(report.status(), Status::Pass);
        for category in Category::ALL {
            let r = report.get(category).unwrap();
            assert_eq!((r.passed, r.failed, r.warnings), (0, 0, 0));
        }
        assert!(report.issues().is_empty());
    }

    #[test]
    fn clean_network_passes() {
        let report = run_validation(&clean_dataset(true), &ValidatorConfig::default());

        assert_eq!(report.status(), Status::Pass, "{:?}", report.issues());
        assert_eq!(report.get(Category::Station).unwrap().passed, 3);
        assert_eq!(report.get(Category::Connection).unwrap().passed, 4);
    }

    #[test]
    fn underclaimed_interchange_passes_with_warnings() {
        let report = run_validation(&clean_dataset(false), &ValidatorConfig::default());

        assert_eq!(report.status(), Status::PassWithWarnings);
        let interchange = report.get(Category::Interchange).unwrap();
        assert_eq!((interchange.passed, interchange.failed, interchange.warnings), (3, 0, 1));
        assert_eq!(report.issues().len(), 1);
    }

    #[test]
    fn self_loop_fails_the_run() {
        let base = clean_dataset(true);
        let mut connections = base.connections().to_vec();
        connections.push(conn(5, "a", "a", "yellow"));
        let ds = Dataset::from_parts(
            base.cities().to_vec(),
            base.lines().to_vec(),
            base.stations().to_vec(),
            base.line_stations().to_vec(),
            connections,
        );

        let report = run_validation(&ds, &ValidatorConfig::default());
        assert_eq!(report.status(), Status::Fail);
        assert_eq!(report.get(Category::Connection).unwrap().failed, 1);
    }

    #[test]
    fn issues_are_flattened_in_category_order() {
        let ds = Dataset::from_parts(
            vec![city("delhi")],
            vec![line("ghost-line")],
            vec![station("lonely", true)],
            vec![],
            vec![conn(1, "lonely", "nowhere", "ghost-line")],
        );
        let report = run_validation(&ds, &ValidatorConfig::default());

        let categories: Vec<Category> = report.issues().iter().map(|i| i.category).collect();
        let mut sorted = categories.clone();
        sorted.sort();
        assert_eq!(categories, sorted);
        assert!(categories.contains(&Category::Line));
        assert!(categories.contains(&Category::Connection));
        assert!(categories.contains(&Category::Interchange));
    }

    #[test]
    fn status_derivation() {
        let clean = ValidationResult::new(Category::City);
        let mut warned = ValidationResult::new(Category::Line);
        warned.check("l", |c| c.warn("w"));
        let mut failed = ValidationResult::new(Category::Station);
        failed.check("s", |c| c.error("e"));

        assert_eq!(Status::from_results([&clean]), Status::Pass);
        assert_eq!(Status::from_results([&clean, &warned]), Status::PassWithWarnings);
        assert_eq!(Status::from_results([&warned, &failed]), Status::Fail);
        assert_eq!(Status::from_results([&failed, &warned]), Status::Fail);
        assert_eq!(Status::from_results(std::iter::empty()), Status::Pass);
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(Status::PassWithWarnings).unwrap(),
            "pass_with_warnings"
        );
        assert_eq!(Status::Fail.to_string(), "fail");
        assert!(Status::Fail.is_fail());
    }

    #[test]
    fn totals() {
        let ds = Dataset::from_parts(vec![], vec![], vec![station("x", false)], vec![], vec![]);
        let report = run_validation(&ds, &ValidatorConfig::default());

        // Unknown city for the station, orphan for the interchange check
        assert_eq!(report.total_failed(), 2);
        assert_eq!(report.total_warnings(), 0);
    }
}
