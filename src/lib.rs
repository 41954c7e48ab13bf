//! route-guide core
//!
//! Walking route resolution against the Mapbox search and directions APIs,
//! with off-route detection and automatic rerouting.

pub mod clock;
pub mod config;
pub mod error;
pub mod geodesy;
pub mod http;
pub mod loader;
pub mod location;
pub mod mapbox;
pub mod monitor;
pub mod polyline;
pub mod rerouter;
pub mod resolver;
pub mod route;
pub mod search;
pub mod traits;

pub use config::NavigatorConfig;
pub use error::{DomainError, ErrorKind, NavError};
pub use location::{Location, PlaceReference, Waypoint};
pub use route::Route;
