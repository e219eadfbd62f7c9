//! Domain types for the metro network.
//!
//! Entity records mirror the store one-to-one and are never mutated.
//! `Coordinate` carries the geospatial helpers the validators need.

mod coordinate;
mod entities;

pub use coordinate::{BoundingBox, Coordinate, EARTH_RADIUS_KM, InvalidMapCenter, haversine_km};
pub use entities::{City, Connection, Line, LineStation, Station};
