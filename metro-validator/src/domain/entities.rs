//! Network entity records as they are held by the store.
//!
//! These are plain snapshots: fields carry whatever the store holds,
//! including malformed values. Judging them is the validators' job.

use serde::{Deserialize, Serialize};

use super::coordinate::{Coordinate, InvalidMapCenter};

/// A city served by one or more metro lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub country: String,
    pub timezone: String,
    /// Encoded center coordinate, e.g. `{"lat": 28.6, "lng": 77.2}`.
    pub map_center: String,
    #[serde(default)]
    pub is_active: bool,
}

impl City {
    /// Decode the city's map center.
    pub fn center(&self) -> Result<Coordinate, InvalidMapCenter> {
        Coordinate::parse_map_center(&self.map_center)
    }
}

/// A metro line belonging to a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub id: String,
    pub city_id: String,
    pub name: String,
    /// Hex color, expected as `#RRGGBB`.
    pub color: String,
    /// UI ordering only.
    pub display_order: i64,
}

/// A metro station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub city_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Claimed interchange status; checked against actual line membership.
    #[serde(default)]
    pub is_interchange: bool,
}

impl Station {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Membership of a station on a line, at a position in one direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStation {
    pub id: i64,
    pub line_id: String,
    pub station_id: String,
    pub sequence_number: i64,
    pub direction: String,
}

/// A directed hop between two stations on a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: i64,
    pub from_station_id: String,
    pub to_station_id: String,
    pub line_id: String,
    pub travel_time_seconds: i64,
    pub stop_time_seconds: i64,
}
