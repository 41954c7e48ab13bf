//! Test fixtures for route-guide.
//!
//! Provides:
//! - Real Semarang locations (from OpenStreetMap)
//! - Canned Mapbox responses
//! - A scripted HTTP transport and a gated route source

#![allow(dead_code)]

pub mod responses;
pub mod semarang_locations;

pub use semarang_locations::*;

use std::collections::VecDeque;
use std::sync::mpsc;

use parking_lot::Mutex;
use reqwest::Url;

use route_guide::config::MapboxConfig;
use route_guide::error::{DomainError, NavError};
use route_guide::http::{HttpResponse, HttpTransport, TransportError};
use route_guide::location::{Location, Waypoint};
use route_guide::mapbox::MapboxClient;
use route_guide::polyline::Polyline;
use route_guide::route::{LoadedRoute, Route, RouteAlternative};
use route_guide::traits::RouteSource;

pub const TEST_TOKEN: &str = "pk.test-token";

/// Replays queued responses in order and records every requested URL.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<Url>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses.lock().push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn ok(self, body: &str) -> Self {
        self.respond(200, body)
    }

    pub fn fail(self, message: &str) -> Self {
        self.responses
            .lock()
            .push_back(Err(TransportError(message.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl HttpTransport for ScriptedTransport {
    fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(url.clone());
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted response left".to_string())))
    }
}

pub fn client(transport: ScriptedTransport) -> MapboxClient<ScriptedTransport> {
    MapboxClient::with_transport(&MapboxConfig::new(TEST_TOKEN), transport).unwrap()
}

pub fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// A single-alternative route through `points` (latitude, longitude).
pub fn route_through(points: &[(f64, f64)]) -> Route {
    Route::new(vec![RouteAlternative {
        distance_m: 0.0,
        duration_s: 0.0,
        geometry: Polyline::new(points.iter().copied().map(location).collect()),
        legs: Vec::new(),
    }])
}

/// Pairs a route with its endpoints: coordinate waypoints as given, anything
/// else as the matching end of the primary geometry.
pub fn loaded(route: Route, start: &Waypoint, end: &Waypoint) -> Result<LoadedRoute, NavError> {
    let geometry = route.primary().map(|primary| primary.geometry.clone());
    let from = match start {
        Waypoint::Coordinate(location) => Some(location.clone()),
        Waypoint::NeedsResolution(_) => geometry.as_ref().and_then(|g| g.first().cloned()),
    };
    let to = match end {
        Waypoint::Coordinate(location) => Some(location.clone()),
        Waypoint::NeedsResolution(_) => geometry.as_ref().and_then(|g| g.last().cloned()),
    };
    match (from, to) {
        (Some(from), Some(to)) => Ok(LoadedRoute { route, from, to }),
        _ => Err(DomainError::NoRoute.into()),
    }
}

/// A route load waiting for the test to answer it.
pub struct PendingLoad {
    pub from: Waypoint,
    pub to: Waypoint,
    reply: mpsc::Sender<Result<Route, NavError>>,
}

impl PendingLoad {
    pub fn from_location(&self) -> Option<&Location> {
        match &self.from {
            Waypoint::Coordinate(location) => Some(location),
            Waypoint::NeedsResolution(_) => None,
        }
    }

    pub fn to_location(&self) -> Option<&Location> {
        match &self.to {
            Waypoint::Coordinate(location) => Some(location),
            Waypoint::NeedsResolution(_) => None,
        }
    }

    pub fn reply(self, result: Result<Route, NavError>) {
        let _ = self.reply.send(result);
    }
}

/// A route source that blocks every load until the test replies to it.
pub struct GatedSource {
    calls: mpsc::Sender<PendingLoad>,
}

impl GatedSource {
    pub fn new() -> (Self, mpsc::Receiver<PendingLoad>) {
        let (calls, pending) = mpsc::channel();
        (Self { calls }, pending)
    }
}

impl RouteSource for GatedSource {
    fn load_route(&self, start: &Waypoint, end: &Waypoint) -> Result<LoadedRoute, NavError> {
        let (reply, answer) = mpsc::channel();
        self.calls
            .send(PendingLoad {
                from: start.clone(),
                to: end.clone(),
                reply,
            })
            .map_err(|_| NavError::Network("gate closed".to_string()))?;
        let route = answer
            .recv()
            .unwrap_or_else(|_| Err(NavError::Network("load abandoned".to_string())))?;
        loaded(route, start, end)
    }
}

/// A route source that answers every load with the same result.
pub struct FixedSource {
    result: Result<Route, NavError>,
    calls: Mutex<usize>,
}

impl FixedSource {
    pub fn new(result: Result<Route, NavError>) -> Self {
        Self {
            result,
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock()
    }
}

impl RouteSource for FixedSource {
    fn load_route(&self, start: &Waypoint, end: &Waypoint) -> Result<LoadedRoute, NavError> {
        *self.calls.lock() += 1;
        loaded(self.result.clone()?, start, end)
    }
}
