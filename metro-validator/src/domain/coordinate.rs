//! Geographic coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean earth radius used for haversine distances, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Error returned when a city's encoded map center cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid map_center JSON: {reason}")]
pub struct InvalidMapCenter {
    reason: String,
}

/// A latitude/longitude pair in decimal degrees.
///
/// No range is enforced at construction: out-of-domain values are
/// findings to be reported, not states to be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
}

/// Stored form of a map center. Keys match in any common casing and a
/// `null` anywhere reads as zero.
#[derive(Debug, Default, Deserialize)]
struct MapCenterDoc {
    #[serde(default, alias = "Lat", alias = "LAT")]
    lat: Option<f64>,
    #[serde(default, alias = "Lng", alias = "LNG")]
    lng: Option<f64>,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Decode a map center stored as a JSON object such as `{"lat": 28.6, "lng": 77.2}`.
    ///
    /// Missing or `null` values decode as zero, as does a bare `null`.
    /// Anything else that is not an object of numbers is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use metro_validator::domain::Coordinate;
    ///
    /// let c = Coordinate::parse_map_center(r#"{"lat": 12.97, "lng": 77.59}"#).unwrap();
    /// assert_eq!(c, Coordinate::new(12.97, 77.59));
    ///
    /// let c = Coordinate::parse_map_center(r#"{"Lat": 12.97, "Lng": 77.59}"#).unwrap();
    /// assert_eq!(c, Coordinate::new(12.97, 77.59));
    ///
    /// assert!(Coordinate::parse_map_center("not json").is_err());
    /// assert!(Coordinate::parse_map_center(r#"{"lat": "north"}"#).is_err());
    /// ```
    pub fn parse_map_center(raw: &str) -> Result<Self, InvalidMapCenter> {
        let invalid = |e: serde_json::Error| InvalidMapCenter {
            reason: e.to_string(),
        };

        // Decode the object first so arrays are not read as positional fields
        let object: Option<serde_json::Map<String, serde_json::Value>> =
            serde_json::from_str(raw).map_err(invalid)?;
        let doc: MapCenterDoc = match object {
            Some(object) => {
                serde_json::from_value(serde_json::Value::Object(object)).map_err(invalid)?
            }
            None => MapCenterDoc::default(),
        };

        Ok(Self::new(doc.lat.unwrap_or_default(), doc.lng.unwrap_or_default()))
    }

    /// Latitude lies within [-90, 90].
    pub fn latitude_in_domain(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat)
    }

    /// Longitude lies within [-180, 180].
    pub fn longitude_in_domain(&self) -> bool {
        (-180.0..=180.0).contains(&self.lng)
    }

    /// Great-circle distance to `other` in kilometres.
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        haversine_km(self, other)
    }
}

/// Haversine great-circle distance between two coordinates, in kilometres.
pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// An inclusive latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// Returns true if the coordinate lies inside the box (edges included).
    pub fn contains(&self, c: &Coordinate) -> bool {
        c.lat >= self.min_lat
            && c.lat <= self.max_lat
            && c.lng >= self.min_lng
            && c.lng <= self.max_lng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_center() {
        let c = Coordinate::parse_map_center(r#"{"lat": 28.6139, "lng": 77.209}"#).unwrap();
        assert_eq!(c.lat, 28.6139);
        assert_eq!(c.lng, 77.209);
    }

    #[test]
    fn parse_missing_keys_defaults_to_zero() {
        let c = Coordinate::parse_map_center("{}").unwrap();
        assert_eq!(c, Coordinate::new(0.0, 0.0));
    }

    #[test]
    fn parse_capitalised_keys() {
        let c = Coordinate::parse_map_center(r#"{"Lat": 28.6, "Lng": 77.2}"#).unwrap();
        assert_eq!(c, Coordinate::new(28.6, 77.2));

        let c = Coordinate::parse_map_center(r#"{"LAT": 19.07, "lng": 72.87}"#).unwrap();
        assert_eq!(c, Coordinate::new(19.07, 72.87));
    }

    #[test]
    fn parse_null_defaults_to_zero() {
        assert_eq!(
            Coordinate::parse_map_center("null").unwrap(),
            Coordinate::new(0.0, 0.0)
        );
        assert_eq!(
            Coordinate::parse_map_center(r#"{"lat": null, "lng": 77.2}"#).unwrap(),
            Coordinate::new(0.0, 77.2)
        );
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(Coordinate::parse_map_center("").is_err());
        assert!(Coordinate::parse_map_center("{lat: 1}").is_err());
        assert!(Coordinate::parse_map_center("[28.6, 77.2]").is_err());
        assert!(Coordinate::parse_map_center(r#"{"lat": "28.6", "lng": 77.2}"#).is_err());
    }

    #[test]
    fn error_display() {
        let err = Coordinate::parse_map_center("nope").unwrap_err();
        assert!(err.to_string().starts_with("invalid map_center JSON: "));
    }

    #[test]
    fn domain_ranges() {
        assert!(Coordinate::new(90.0, 180.0).latitude_in_domain());
        assert!(Coordinate::new(-90.0, -180.0).longitude_in_domain());
        assert!(!Coordinate::new(90.01, 0.0).latitude_in_domain());
        assert!(!Coordinate::new(0.0, -180.5).longitude_in_domain());
        assert!(!Coordinate::new(f64::NAN, 0.0).latitude_in_domain());
    }

    #[test]
    fn known_distance_delhi_to_mumbai() {
        let delhi = Coordinate::new(28.6139, 77.2090);
        let mumbai = Coordinate::new(19.0760, 72.8777);
        let d = delhi.distance_km(&mumbai);
        // ~1148 km as the crow flies
        assert!((d - 1148.1).abs() < 1.0, "got {d}");
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = Coordinate::new(0.0, 77.0);
        let b = Coordinate::new(1.0, 77.0);
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
        assert!((haversine_km(&a, &b) - expected).abs() < 1e-9);
    }

    #[test]
    fn bounding_box_edges_inclusive() {
        let bbox = BoundingBox::new(8.0, 37.0, 68.0, 97.0);
        assert!(bbox.contains(&Coordinate::new(8.0, 68.0)));
        assert!(bbox.contains(&Coordinate::new(37.0, 97.0)));
        assert!(bbox.contains(&Coordinate::new(28.6, 77.2)));
        assert!(!bbox.contains(&Coordinate::new(7.99, 77.2)));
        assert!(!bbox.contains(&Coordinate::new(28.6, 97.01)));
    }
}
