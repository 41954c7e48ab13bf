//! Polyline representation for route geometries.
//!
//! The provider sends GeoJSON `[longitude, latitude]` pairs; they are turned
//! into latitude-first [`Location`] vertices when the response is decoded.

use serde::{Deserialize, Serialize};

use crate::geodesy;
use crate::location::Location;

/// A route geometry as a fully materialized vertex sequence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Location>,
}

impl Polyline {
    pub fn new(points: Vec<Location>) -> Self {
        Self { points }
    }

    /// Builds a polyline from GeoJSON `[longitude, latitude]` pairs.
    pub fn from_lon_lat(pairs: &[[f64; 2]]) -> Self {
        Self::new(pairs.iter().copied().map(Location::from_lon_lat).collect())
    }

    pub fn points(&self) -> &[Location] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Location> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Location> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Location> {
        self.points.last()
    }

    /// Off-route distance in meters, `None` below two vertices.
    pub fn distance_to(&self, point: &Location) -> Option<f64> {
        geodesy::distance_to_polyline(point, &self.points)
    }
}
