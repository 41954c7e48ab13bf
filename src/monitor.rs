//! Off-route detection.
//!
//! [`DeviationMonitor`] decides when a reroute is due and what to do with its
//! result. It performs no I/O and reads no clock: callers pass the current
//! instant in, and run the reroute request themselves (see
//! [`crate::rerouter::Rerouter`]).

use std::fmt;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::{DestinationPolicy, RerouteSettings};
use crate::error::{DomainError, NavError};
use crate::geodesy::planar_distance;
use crate::location::Location;
use crate::polyline::Polyline;
use crate::route::Route;

/// Identifies one reroute request so late results can be matched or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RerouteId(u64);

impl fmt::Display for RerouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Tracking,
    Rerouting { request: RerouteId },
}

/// A reroute the caller must now run: load a route from `from` to `to` and
/// hand the result back through [`DeviationMonitor::complete_reroute`].
#[derive(Debug, Clone, PartialEq)]
pub struct RerouteRequest {
    pub id: RerouteId,
    pub from: Location,
    pub to: Location,
    pub deviation_m: f64,
}

/// What a position update led to.
#[derive(Debug, Clone, PartialEq)]
pub enum PositionOutcome {
    /// No route is being tracked.
    Inactive,
    /// Still close to the start of the route; nothing evaluated.
    NearRouteStart { distance_m: f64 },
    RerouteInFlight,
    CoolingDown,
    OnRoute { deviation_m: f64 },
    Reroute(RerouteRequest),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RerouteCompletion {
    /// The new route is now the tracked one.
    Replaced(Route),
    /// The reroute failed; the previous route is still tracked.
    Failed(NavError),
    /// The request was cancelled or replaced before it finished.
    Superseded,
}

#[derive(Debug, Clone)]
struct ActiveRoute {
    polyline: Polyline,
    destination: Location,
    last_completed: Option<Instant>,
}

#[derive(Debug)]
pub struct DeviationMonitor {
    settings: RerouteSettings,
    state: MonitorState,
    active: Option<ActiveRoute>,
    next_id: u64,
}

impl DeviationMonitor {
    pub fn new(settings: RerouteSettings) -> Self {
        Self {
            settings,
            state: MonitorState::Idle,
            active: None,
            next_id: 0,
        }
    }

    pub fn settings(&self) -> &RerouteSettings {
        &self.settings
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn polyline(&self) -> Option<&Polyline> {
        self.active.as_ref().map(|active| &active.polyline)
    }

    pub fn destination(&self) -> Option<&Location> {
        self.active.as_ref().map(|active| &active.destination)
    }

    /// Starts tracking the primary alternative of `route`.
    ///
    /// Replaces any route tracked so far; a reroute still in flight for the
    /// old route is superseded.
    pub fn start_tracking(&mut self, route: &Route, destination: Location) -> Result<(), NavError> {
        let polyline = trackable_geometry(route)?;
        if let MonitorState::Rerouting { request } = self.state {
            debug!(%request, "new route supersedes reroute in flight");
        }
        info!(vertices = polyline.len(), %destination, "tracking route");
        self.active = Some(ActiveRoute {
            polyline,
            destination,
            last_completed: None,
        });
        self.state = MonitorState::Tracking;
        Ok(())
    }

    /// Evaluates one position fix taken at `now`.
    pub fn on_position(&mut self, now: Instant, position: &Location) -> PositionOutcome {
        let Some(active) = self.active.as_ref() else {
            return PositionOutcome::Inactive;
        };

        if let Some(first) = active.polyline.first() {
            let distance_m = planar_distance(position, first);
            if distance_m < self.settings.min_distance_to_reroute_m {
                return PositionOutcome::NearRouteStart { distance_m };
            }
        }

        if matches!(self.state, MonitorState::Rerouting { .. }) {
            return PositionOutcome::RerouteInFlight;
        }

        if let Some(completed) = active.last_completed {
            if now.saturating_duration_since(completed) < self.settings.cooldown {
                return PositionOutcome::CoolingDown;
            }
        }

        let Some(deviation_m) = active.polyline.distance_to(position) else {
            return PositionOutcome::Inactive;
        };
        if deviation_m <= self.settings.threshold_m {
            return PositionOutcome::OnRoute { deviation_m };
        }

        let id = RerouteId(self.next_id);
        self.next_id += 1;
        self.state = MonitorState::Rerouting { request: id };
        warn!(%id, deviation_m, threshold_m = self.settings.threshold_m, "off route, rerouting");

        PositionOutcome::Reroute(RerouteRequest {
            id,
            from: position.clone(),
            to: active.destination.clone(),
            deviation_m,
        })
    }

    /// Applies the result of reroute `id`, finished at `now`.
    ///
    /// Success and failure both start the cooldown. A failure, or a route
    /// that cannot be tracked, leaves the previous route in place.
    pub fn complete_reroute(
        &mut self,
        id: RerouteId,
        result: Result<Route, NavError>,
        now: Instant,
    ) -> RerouteCompletion {
        if self.state != (MonitorState::Rerouting { request: id }) {
            debug!(%id, "discarding superseded reroute result");
            return RerouteCompletion::Superseded;
        }
        let Some(active) = self.active.as_mut() else {
            return RerouteCompletion::Superseded;
        };

        self.state = MonitorState::Tracking;
        active.last_completed = Some(now);

        let route = match result {
            Ok(route) => route,
            Err(err) => {
                warn!(%id, error = %err, "reroute failed, keeping current route");
                return RerouteCompletion::Failed(err);
            }
        };

        match trackable_geometry(&route) {
            Ok(polyline) => {
                if self.settings.destination_policy == DestinationPolicy::ReanchorToRouteEnd {
                    if let Some(end) = polyline.last() {
                        active.destination = end.clone();
                    }
                }
                info!(%id, vertices = polyline.len(), destination = %active.destination, "rerouted");
                active.polyline = polyline;
                RerouteCompletion::Replaced(route)
            }
            Err(err) => {
                warn!(%id, error = %err, "reroute returned an unusable route, keeping current route");
                RerouteCompletion::Failed(err)
            }
        }
    }

    /// Drops the reroute in flight, if any. Its result will be reported as
    /// [`RerouteCompletion::Superseded`].
    pub fn cancel_reroute(&mut self) -> Option<RerouteId> {
        match self.state {
            MonitorState::Rerouting { request } => {
                debug!(%request, "reroute cancelled");
                self.state = MonitorState::Tracking;
                Some(request)
            }
            _ => None,
        }
    }

    /// Stops tracking altogether.
    pub fn stop(&mut self) {
        self.state = MonitorState::Idle;
        self.active = None;
    }
}

fn trackable_geometry(route: &Route) -> Result<Polyline, NavError> {
    let primary = route.primary().ok_or(DomainError::NoRoute)?;
    if primary.geometry.len() < 2 {
        return Err(DomainError::DegenerateGeometry {
            vertices: primary.geometry.len(),
        }
        .into());
    }
    Ok(primary.geometry.clone())
}
