//! Geographic positions and route endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::search::{SearchSuggestion, SuggestQuery};

/// How an altitude value should be interpreted by the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AltitudeMode {
    GroundRelative,
    DeviceRelative,
    Absolute,
    Ignore,
}

/// A latitude/longitude position in degrees.
///
/// Latitude comes first everywhere in this crate. Provider payloads that use
/// the GeoJSON `[longitude, latitude]` order are converted at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_mode: Option<AltitudeMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
            altitude_mode: None,
            label: None,
        }
    }

    /// Builds a location from a GeoJSON `[longitude, latitude]` pair.
    pub fn from_lon_lat(pair: [f64; 2]) -> Self {
        Self::new(pair[1], pair[0])
    }

    pub fn with_altitude(mut self, altitude: f64, mode: AltitudeMode) -> Self {
        self.altitude = Some(altitude);
        self.altitude_mode = Some(mode);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Both axes are finite and inside their degree ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// True for the (0,0) sentinel some providers use for "no coordinate".
    pub fn is_null_island(&self) -> bool {
        self.latitude.abs() < 1e-6 && self.longitude.abs() < 1e-6
    }

    /// `"lon,lat"`, the order the provider expects in query strings.
    pub fn to_lon_lat_string(&self) -> String {
        format!("{},{}", self.longitude, self.latitude)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{} ({:.6}, {:.6})", label, self.latitude, self.longitude),
            None => write!(f, "({:.6}, {:.6})", self.latitude, self.longitude),
        }
    }
}

/// Something the resolver has to look up before it becomes a coordinate.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceReference {
    /// Free-text search; the first suggestion wins.
    Query(SuggestQuery),
    /// A suggestion picked earlier, possibly without an inlined coordinate.
    Suggestion(SearchSuggestion),
    /// A provider place identifier.
    PlaceId(String),
}

/// A route endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum Waypoint {
    Coordinate(Location),
    NeedsResolution(PlaceReference),
}

impl Waypoint {
    pub fn query(text: impl Into<String>) -> Self {
        Waypoint::NeedsResolution(PlaceReference::Query(SuggestQuery::new(text)))
    }

    pub fn place_id(id: impl Into<String>) -> Self {
        Waypoint::NeedsResolution(PlaceReference::PlaceId(id.into()))
    }
}

impl From<Location> for Waypoint {
    fn from(location: Location) -> Self {
        Waypoint::Coordinate(location)
    }
}

impl From<SearchSuggestion> for Waypoint {
    fn from(suggestion: SearchSuggestion) -> Self {
        Waypoint::NeedsResolution(PlaceReference::Suggestion(suggestion))
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Waypoint::Coordinate(location) => write!(f, "{}", location),
            Waypoint::NeedsResolution(PlaceReference::Query(query)) => {
                write!(f, "query \"{}\"", query.text)
            }
            Waypoint::NeedsResolution(PlaceReference::Suggestion(suggestion)) => {
                write!(f, "suggestion \"{}\"", suggestion.display_name())
            }
            Waypoint::NeedsResolution(PlaceReference::PlaceId(id)) => write!(f, "place {}", id),
        }
    }
}
