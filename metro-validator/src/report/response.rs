//! Aggregate response shared by `--json` output and the HTTP endpoint.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::dataset::Stats;
use crate::validate::{Category, Issue, Status, ValidationReport, ValidationResult};

/// Full outcome of one validation run.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResponse {
    /// Where the snapshot came from
    pub database: String,

    /// RFC 3339 UTC time the run completed
    pub timestamp: String,

    pub stats: Stats,

    /// Per-category results keyed by category name
    pub results: BTreeMap<Category, ValidationResult>,

    /// Every issue, in category display order
    pub issues: Vec<Issue>,

    pub status: Status,
}

impl ValidationResponse {
    /// Build a response stamped with the current time.
    pub fn new(database: impl Into<String>, stats: Stats, report: &ValidationReport) -> Self {
        Self::with_timestamp(database, stats, report, now_rfc3339())
    }

    pub fn with_timestamp(
        database: impl Into<String>,
        stats: Stats,
        report: &ValidationReport,
        timestamp: String,
    ) -> Self {
        Self {
            database: database.into(),
            timestamp,
            stats,
            results: report.by_category().clone(),
            issues: report.issues(),
            status: report.status(),
        }
    }
}

/// Payload for a run that could not load its snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl ToString) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::validate::{ValidatorConfig, run_validation};

    #[test]
    fn empty_run_serializes_full_shape() {
        let ds = Dataset::empty();
        let report = run_validation(&ds, &ValidatorConfig::default());
        let response = ValidationResponse::with_timestamp(
            "metro.json",
            ds.stats(),
            &report,
            "2024-03-15T10:00:00Z".to_string(),
        );

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["database"], "metro.json");
        assert_eq!(json["timestamp"], "2024-03-15T10:00:00Z");
        assert_eq!(json["stats"]["cities"], 0);
        assert_eq!(json["stats"]["connections"], 0);
        assert_eq!(json["status"], "pass");
        assert_eq!(json["issues"], serde_json::json!([]));

        let results = json["results"].as_object().unwrap();
        let keys: Vec<_> = results.keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 5);
        for key in ["city", "line", "station", "connection", "interchange"] {
            assert!(keys.contains(&key), "missing {key}");
            assert_eq!(results[key]["category"], key);
            assert!(results[key].get("issues").is_none());
        }
    }

    #[test]
    fn timestamp_is_rfc3339_utc() {
        let ts = now_rfc3339();
        assert!(ts.ends_with('Z'), "{ts}");
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn error_response_has_only_error_field() {
        let json = serde_json::to_value(ErrorResponse::new("failed to read metro.json")).unwrap();
        assert_eq!(json, serde_json::json!({"error": "failed to read metro.json"}));
    }
}
