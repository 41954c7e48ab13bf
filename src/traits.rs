//! Seams between the navigation components.
//!
//! Each stage only talks to the next one through these traits, so a test or
//! an embedding application can swap any of them out.

use std::time::Instant;

use crate::error::NavError;
use crate::location::{Location, Waypoint};
use crate::route::{LoadedRoute, Route};
use crate::search::{RetrievedPlace, SearchSuggestion, SessionToken, SuggestQuery};

/// The three provider operations the navigator needs.
///
/// Every call is blocking from the caller's point of view and returns either
/// a result or an error, never both.
pub trait DirectionsApi: Send + Sync {
    fn suggest_places(
        &self,
        query: &SuggestQuery,
        session: &SessionToken,
    ) -> Result<Vec<SearchSuggestion>, NavError>;

    fn retrieve_place(&self, id: &str, session: &SessionToken) -> Result<RetrievedPlace, NavError>;

    /// Walking directions from `from` to `to`.
    fn get_route(&self, from: &Location, to: &Location, alternatives: bool) -> Result<Route, NavError>;
}

/// Turns a waypoint into a concrete coordinate.
pub trait WaypointResolver: Send + Sync {
    fn resolve(&self, waypoint: &Waypoint) -> Result<Location, NavError>;
}

/// Produces a route between two waypoints, with the endpoints they resolved to.
pub trait RouteSource: Send + Sync {
    fn load_route(&self, start: &Waypoint, end: &Waypoint) -> Result<LoadedRoute, NavError>;
}

/// Monotonic time source.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}
