//! Drives a [`DeviationMonitor`] against a live position feed.
//!
//! Position updates are evaluated on the caller's thread. When the monitor
//! asks for a reroute, the request runs on a worker thread and its result is
//! fed back into the monitor; the listener hears about every change of the
//! active route.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::config::RerouteSettings;
use crate::error::NavError;
use crate::location::{Location, Waypoint};
use crate::monitor::{
    DeviationMonitor, MonitorState, PositionOutcome, RerouteCompletion, RerouteId, RerouteRequest,
};
use crate::polyline::Polyline;
use crate::route::{LoadedRoute, Route};
use crate::traits::{Clock, RouteSource};

#[derive(Debug, Clone, PartialEq)]
pub enum RouteEvent {
    /// A route was loaded and is now tracked.
    Loaded(Route),
    /// A reroute replaced the tracked route.
    Rerouted(Route),
    /// No new route; whatever was tracked before still is.
    Failed(NavError),
}

pub type RouteListener = Arc<dyn Fn(&RouteEvent) + Send + Sync>;

pub struct Rerouter<S: RouteSource + 'static> {
    source: Arc<S>,
    monitor: Arc<Mutex<DeviationMonitor>>,
    clock: Arc<dyn Clock>,
    listener: RouteListener,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl<S: RouteSource + 'static> Rerouter<S> {
    pub fn new(
        source: Arc<S>,
        settings: RerouteSettings,
        clock: Arc<dyn Clock>,
        listener: RouteListener,
    ) -> Self {
        Self {
            source,
            monitor: Arc::new(Mutex::new(DeviationMonitor::new(settings))),
            clock,
            listener,
            workers: Mutex::new(Vec::new()),
        }
    }

    /// Loads a route between two waypoints and starts tracking it toward
    /// the resolved end.
    ///
    /// The listener receives `Loaded` or `Failed`; the result is also
    /// returned.
    pub fn load_and_track(&self, start: &Waypoint, end: &Waypoint) -> Result<LoadedRoute, NavError> {
        let loaded = match self.source.load_route(start, end) {
            Ok(loaded) => loaded,
            Err(err) => {
                (self.listener)(&RouteEvent::Failed(err.clone()));
                return Err(err);
            }
        };

        self.start_tracking(&loaded.route, loaded.to.clone())?;
        Ok(loaded)
    }

    /// Tracks an already loaded route toward `destination`.
    pub fn start_tracking(&self, route: &Route, destination: Location) -> Result<(), NavError> {
        let started = self.monitor.lock().start_tracking(route, destination);
        match started {
            Ok(()) => {
                (self.listener)(&RouteEvent::Loaded(route.clone()));
                Ok(())
            }
            Err(err) => {
                (self.listener)(&RouteEvent::Failed(err.clone()));
                Err(err)
            }
        }
    }

    /// Feeds one position fix. A reroute, if due, is started in the
    /// background before this returns.
    pub fn update_position(&self, position: &Location) -> PositionOutcome {
        let outcome = self.monitor.lock().on_position(self.clock.now(), position);
        if let PositionOutcome::Reroute(request) = &outcome {
            self.spawn_reroute(request.clone());
        }
        outcome
    }

    pub fn cancel_reroute(&self) -> Option<RerouteId> {
        self.monitor.lock().cancel_reroute()
    }

    pub fn stop(&self) {
        self.monitor.lock().stop();
    }

    pub fn state(&self) -> MonitorState {
        self.monitor.lock().state()
    }

    pub fn polyline(&self) -> Option<Polyline> {
        self.monitor.lock().polyline().cloned()
    }

    pub fn destination(&self) -> Option<Location> {
        self.monitor.lock().destination().cloned()
    }

    /// Blocks until every reroute started so far has finished.
    pub fn wait_for_reroutes(&self) {
        let workers: Vec<_> = self.workers.lock().drain(..).collect();
        for worker in workers {
            if worker.join().is_err() {
                warn!("reroute worker panicked");
            }
        }
    }

    fn spawn_reroute(&self, request: RerouteRequest) {
        let id = request.id;
        let task = RerouteTask {
            source: Arc::clone(&self.source),
            monitor: Arc::clone(&self.monitor),
            clock: Arc::clone(&self.clock),
            listener: Arc::clone(&self.listener),
        };

        let spawned = thread::Builder::new()
            .name(format!("reroute-{id}"))
            .spawn(move || task.run(request));

        match spawned {
            Ok(handle) => {
                let mut workers = self.workers.lock();
                workers.retain(|worker| !worker.is_finished());
                workers.push(handle);
            }
            Err(err) => {
                warn!(%id, error = %err, "could not start reroute worker");
                let failure = NavError::Network(format!("could not start reroute: {err}"));
                let completion =
                    self.monitor
                        .lock()
                        .complete_reroute(id, Err(failure), self.clock.now());
                notify(&self.listener, completion);
            }
        }
    }
}

impl<S: RouteSource + 'static> Drop for Rerouter<S> {
    fn drop(&mut self) {
        self.wait_for_reroutes();
    }
}

struct RerouteTask<S: RouteSource> {
    source: Arc<S>,
    monitor: Arc<Mutex<DeviationMonitor>>,
    clock: Arc<dyn Clock>,
    listener: RouteListener,
}

impl<S: RouteSource> RerouteTask<S> {
    fn run(self, request: RerouteRequest) {
        debug!(id = %request.id, from = %request.from, to = %request.to, "reroute started");
        let from = Waypoint::Coordinate(request.from);
        let to = Waypoint::Coordinate(request.to);
        let result = self.source.load_route(&from, &to).map(|loaded| loaded.route);

        let completion = self
            .monitor
            .lock()
            .complete_reroute(request.id, result, self.clock.now());
        if matches!(completion, RerouteCompletion::Superseded) {
            info!(id = %request.id, "reroute result dropped");
        }
        notify(&self.listener, completion);
    }
}

fn notify(listener: &RouteListener, completion: RerouteCompletion) {
    match completion {
        RerouteCompletion::Replaced(route) => listener(&RouteEvent::Rerouted(route)),
        RerouteCompletion::Failed(err) => listener(&RouteEvent::Failed(err)),
        RerouteCompletion::Superseded => {}
    }
}
