//! Waypoint resolution through the search API.

use std::sync::Arc;

use tracing::debug;

use crate::config::SearchConfig;
use crate::error::{DomainError, NavError};
use crate::location::{Location, PlaceReference, Waypoint};
use crate::search::{SearchSuggestion, SessionToken, SuggestQuery};
use crate::traits::{DirectionsApi, WaypointResolver};

/// Resolves waypoints with suggest and retrieve calls.
///
/// One resolver is one search session: every call it makes shares the same
/// session token.
pub struct SearchBoxResolver<A: DirectionsApi> {
    api: Arc<A>,
    search: SearchConfig,
    session: SessionToken,
}

impl<A: DirectionsApi> SearchBoxResolver<A> {
    pub fn new(api: Arc<A>, search: SearchConfig) -> Self {
        Self {
            api,
            search,
            session: SessionToken::new(),
        }
    }

    pub fn session(&self) -> &SessionToken {
        &self.session
    }

    /// Runs a suggest query with the configured filters filled in.
    pub fn suggest(&self, query: &SuggestQuery) -> Result<Vec<SearchSuggestion>, NavError> {
        let query = query.clone().with_defaults(&self.search);
        self.api.suggest_places(&query, &self.session)
    }

    fn resolve_query(&self, query: &SuggestQuery) -> Result<Location, NavError> {
        let suggestion = self
            .suggest(query)?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::NoSuggestions {
                query: query.text.clone(),
            })?;
        self.resolve_suggestion(&suggestion)
    }

    fn resolve_suggestion(&self, suggestion: &SearchSuggestion) -> Result<Location, NavError> {
        if let Some(location) = suggestion.usable_coordinate() {
            debug!(name = suggestion.display_name(), "using inlined suggestion coordinate");
            return Ok(with_default_label(location.clone(), suggestion.display_name()));
        }

        let Some(id) = suggestion.mapbox_id.as_deref() else {
            let name = suggestion.display_name().to_string();
            let err = if suggestion.has_invalid_coordinate() {
                DomainError::MissingCoordinates { place: name }
            } else {
                DomainError::MissingIdentifier { name }
            };
            return Err(err.into());
        };

        debug!(name = suggestion.display_name(), id, "suggestion has no coordinate, retrieving");
        let location = self.resolve_place_id(id)?;
        Ok(with_default_label(location, suggestion.display_name()))
    }

    fn resolve_place_id(&self, id: &str) -> Result<Location, NavError> {
        let place = self.api.retrieve_place(id, &self.session)?;
        let location = place.location();
        if !location.is_valid() {
            return Err(DomainError::MissingCoordinates {
                place: place.display_name().unwrap_or(id).to_string(),
            }
            .into());
        }
        Ok(location)
    }
}

impl<A: DirectionsApi> WaypointResolver for SearchBoxResolver<A> {
    fn resolve(&self, waypoint: &Waypoint) -> Result<Location, NavError> {
        match waypoint {
            Waypoint::Coordinate(location) => Ok(location.clone()),
            Waypoint::NeedsResolution(PlaceReference::Query(query)) => self.resolve_query(query),
            Waypoint::NeedsResolution(PlaceReference::Suggestion(suggestion)) => {
                self.resolve_suggestion(suggestion)
            }
            Waypoint::NeedsResolution(PlaceReference::PlaceId(id)) => self.resolve_place_id(id),
        }
    }
}

fn with_default_label(location: Location, name: &str) -> Location {
    if location.label.is_some() || name.is_empty() {
        location
    } else {
        location.with_label(name)
    }
}
