//! Place search types: suggest queries, suggestions and retrieved places.

use std::fmt;

use uuid::Uuid;

use crate::config::SearchConfig;
use crate::location::Location;

/// Groups the suggest and retrieve calls of one search session for billing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionToken {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for SessionToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parameters of a text search. Unset filters fall back to [`SearchConfig`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SuggestQuery {
    pub text: String,
    /// Bias results toward this position.
    pub proximity: Option<Location>,
    /// Comma separated feature types, e.g. `poi,address`.
    pub types: Option<String>,
    pub limit: Option<u32>,
    /// ISO 3166 alpha-2 country filter.
    pub country: Option<String>,
    pub autocomplete: Option<bool>,
}

impl SuggestQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn near(mut self, proximity: Location) -> Self {
        self.proximity = Some(proximity);
        self
    }

    /// Fills every unset filter from `config`.
    pub fn with_defaults(mut self, config: &SearchConfig) -> Self {
        if self.types.is_none() && !config.types.is_empty() {
            self.types = Some(config.types.clone());
        }
        if self.limit.is_none() && config.limit > 0 {
            self.limit = Some(config.limit);
        }
        if self.country.is_none() && !config.country.is_empty() {
            self.country = Some(config.country.clone());
        }
        if self.autocomplete.is_none() {
            self.autocomplete = Some(config.autocomplete);
        }
        self
    }
}

/// One entry of a suggest response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchSuggestion {
    pub name: String,
    pub mapbox_id: Option<String>,
    pub feature_type: Option<String>,
    pub address: Option<String>,
    pub full_address: Option<String>,
    pub place_formatted: Option<String>,
    pub postcode: Option<String>,
    /// Present only when the provider inlined it in the suggest response.
    pub coordinate: Option<Location>,
}

impl SearchSuggestion {
    /// The inlined coordinate, unless it is missing, out of range or the
    /// (0,0) sentinel.
    pub fn usable_coordinate(&self) -> Option<&Location> {
        self.coordinate
            .as_ref()
            .filter(|location| location.is_valid() && !location.is_null_island())
    }

    /// An inlined coordinate is present but out of range or not finite.
    pub fn has_invalid_coordinate(&self) -> bool {
        self.coordinate.as_ref().is_some_and(|location| !location.is_valid())
    }

    pub fn needs_retrieval(&self) -> bool {
        self.usable_coordinate().is_none()
    }

    pub fn display_name(&self) -> &str {
        match self.place_formatted.as_deref() {
            Some(formatted) if !formatted.is_empty() => formatted,
            _ => &self.name,
        }
    }
}

/// A place resolved from an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedPlace {
    pub name: Option<String>,
    pub mapbox_id: Option<String>,
    pub feature_type: Option<String>,
    pub address: Option<String>,
    pub full_address: Option<String>,
    pub place_formatted: Option<String>,
    pub postcode: Option<String>,
    /// GeoJSON order: `[longitude, latitude]`.
    pub coordinates: [f64; 2],
}

impl RetrievedPlace {
    pub fn display_name(&self) -> Option<&str> {
        self.place_formatted
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.name.as_deref().filter(|s| !s.is_empty()))
    }

    /// Latitude-first location, labelled with the display name when known.
    pub fn location(&self) -> Location {
        let location = Location::from_lon_lat(self.coordinates);
        match self.display_name() {
            Some(name) => location.with_label(name),
            None => location,
        }
    }
}
