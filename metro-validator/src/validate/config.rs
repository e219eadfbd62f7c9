//! Thresholds and allow-lists used by the validators.

use std::collections::HashSet;

use crate::domain::BoundingBox;

/// Tunable limits for validation.
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Expected service region. Coordinates outside it are warnings only.
    pub region: BoundingBox,

    /// Timezones accepted without a warning. Known to be incomplete.
    pub timezones: HashSet<String>,

    /// Station distance from its city center above which a warning is raised (km).
    pub warn_distance_km: f64,

    /// Station distance from its city center above which an error is raised (km).
    pub max_distance_km: f64,

    /// Plausible travel time between adjacent stations (seconds, inclusive).
    pub min_travel_secs: i64,
    pub max_travel_secs: i64,

    /// Plausible dwell time at a station (seconds, inclusive).
    pub min_stop_secs: i64,
    pub max_stop_secs: i64,
}

impl ValidatorConfig {
    /// Set the service region.
    pub fn with_region(mut self, region: BoundingBox) -> Self {
        self.region = region;
        self
    }

    /// Replace the timezone allow-list.
    pub fn with_timezones<I, S>(mut self, timezones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.timezones = timezones.into_iter().map(Into::into).collect();
        self
    }

    /// Set the warning and error distance thresholds.
    pub fn with_distance_limits(mut self, warn_km: f64, max_km: f64) -> Self {
        self.warn_distance_km = warn_km;
        self.max_distance_km = max_km;
        self
    }

    pub fn is_known_timezone(&self, tz: &str) -> bool {
        self.timezones.contains(tz)
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            region: BoundingBox::new(8.0, 37.0, 68.0, 97.0), // India
            timezones: ["Asia/Kolkata", "Asia/Delhi", "Asia/Mumbai", "UTC"]
                .into_iter()
                .map(String::from)
                .collect(),
            warn_distance_km: 30.0,
            max_distance_km: 50.0,
            min_travel_secs: 30,
            max_travel_secs: 600, // 10 minutes
            min_stop_secs: 10,
            max_stop_secs: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ValidatorConfig::default();

        assert_eq!(config.region, BoundingBox::new(8.0, 37.0, 68.0, 97.0));
        assert_eq!(config.timezones.len(), 4);
        assert!(config.is_known_timezone("Asia/Kolkata"));
        assert!(config.is_known_timezone("UTC"));
        assert!(!config.is_known_timezone("Europe/London"));
        assert_eq!(config.warn_distance_km, 30.0);
        assert_eq!(config.max_distance_km, 50.0);
        assert_eq!(config.min_travel_secs, 30);
        assert_eq!(config.max_travel_secs, 600);
        assert_eq!(config.min_stop_secs, 10);
        assert_eq!(config.max_stop_secs, 120);
    }

    #[test]
    fn custom_config() {
        let config = ValidatorConfig::default()
            .with_region(BoundingBox::new(49.0, 61.0, -8.0, 2.0))
            .with_timezones(["Europe/London"])
            .with_distance_limits(10.0, 20.0);

        assert_eq!(config.region.min_lat, 49.0);
        assert!(config.is_known_timezone("Europe/London"));
        assert!(!config.is_known_timezone("Asia/Kolkata"));
        assert_eq!(config.warn_distance_km, 10.0);
        assert_eq!(config.max_distance_km, 20.0);
    }
}
