//! Route loading: resolve both endpoints, then ask for directions.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{DomainError, NavError};
use crate::location::{Location, Waypoint};
use crate::route::{LoadedRoute, Route};
use crate::traits::{DirectionsApi, RouteSource, WaypointResolver};

/// Where a load is, or where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    ResolvingStart,
    ResolvingEnd,
    RequestingRoute,
    Done,
}

impl fmt::Display for LoadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoadStage::ResolvingStart => "resolving start",
            LoadStage::ResolvingEnd => "resolving end",
            LoadStage::RequestingRoute => "requesting route",
            LoadStage::Done => "done",
        };
        f.write_str(name)
    }
}

pub struct RouteLoader<A: DirectionsApi, R: WaypointResolver> {
    api: Arc<A>,
    resolver: R,
    alternatives: bool,
}

impl<A: DirectionsApi, R: WaypointResolver> RouteLoader<A, R> {
    pub fn new(api: Arc<A>, resolver: R) -> Self {
        Self {
            api,
            resolver,
            alternatives: false,
        }
    }

    pub fn with_alternatives(mut self, alternatives: bool) -> Self {
        self.alternatives = alternatives;
        self
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Runs the load to completion.
    ///
    /// Any failure ends the load at the stage where it happened; a response
    /// without a single alternative is [`DomainError::NoRoute`].
    pub fn load(&self, start: &Waypoint, end: &Waypoint) -> Result<LoadedRoute, NavError> {
        debug!(%start, %end, "loading route");
        let from = self.resolve_at(LoadStage::ResolvingStart, start)?;
        let to = self.resolve_at(LoadStage::ResolvingEnd, end)?;
        let route = self.request(&from, &to)?;
        Ok(LoadedRoute { route, from, to })
    }

    fn resolve_at(&self, stage: LoadStage, waypoint: &Waypoint) -> Result<Location, NavError> {
        debug!(%stage, %waypoint, "load stage");
        self.resolver
            .resolve(waypoint)
            .inspect_err(|err| warn!(%stage, error = %err, "route load failed"))
    }

    fn request(&self, from: &Location, to: &Location) -> Result<Route, NavError> {
        let stage = LoadStage::RequestingRoute;
        debug!(%stage, %from, %to, "load stage");
        let route = self
            .api
            .get_route(from, to, self.alternatives)
            .inspect_err(|err| warn!(%stage, error = %err, "route load failed"))?;

        if route.is_empty() {
            warn!(%from, %to, "directions returned no alternatives");
            return Err(DomainError::NoRoute.into());
        }

        if let Some(primary) = route.primary() {
            info!(
                alternatives = route.alternatives().len(),
                distance_m = primary.distance_m,
                duration_s = primary.duration_s,
                stage = %LoadStage::Done,
                "route loaded"
            );
        }
        Ok(route)
    }
}

impl<A: DirectionsApi, R: WaypointResolver> RouteSource for RouteLoader<A, R> {
    fn load_route(&self, start: &Waypoint, end: &Waypoint) -> Result<LoadedRoute, NavError> {
        self.load(start, end)
    }
}
