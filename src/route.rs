//! Directions results.

use serde::{Deserialize, Serialize};

use crate::location::Location;
use crate::polyline::Polyline;

/// One turn-by-turn maneuver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    pub instruction: String,
    pub maneuver_type: String,
    /// Street or path name, empty when unnamed.
    pub name: String,
    pub distance_m: f64,
    pub duration_s: f64,
    pub location: Location,
}

/// The part of an alternative between two consecutive waypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub summary: String,
    pub distance_m: f64,
    pub duration_s: f64,
    pub steps: Vec<RouteStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteAlternative {
    pub distance_m: f64,
    pub duration_s: f64,
    pub geometry: Polyline,
    pub legs: Vec<RouteLeg>,
}

impl RouteAlternative {
    pub fn steps(&self) -> impl Iterator<Item = &RouteStep> {
        self.legs.iter().flat_map(|leg| leg.steps.iter())
    }
}

/// Route alternatives in provider order; the first is the recommended one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Route {
    alternatives: Vec<RouteAlternative>,
}

impl Route {
    pub fn new(alternatives: Vec<RouteAlternative>) -> Self {
        Self { alternatives }
    }

    pub fn alternatives(&self) -> &[RouteAlternative] {
        &self.alternatives
    }

    pub fn primary(&self) -> Option<&RouteAlternative> {
        self.alternatives.first()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }
}

/// A route together with the resolved endpoints it was requested between.
///
/// `to` is where the caller asked to go, which the provider may have snapped
/// to a slightly different final vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedRoute {
    pub route: Route,
    pub from: Location,
    pub to: Location,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(instruction: &str) -> RouteStep {
        RouteStep {
            instruction: instruction.to_string(),
            maneuver_type: "turn".to_string(),
            name: String::new(),
            distance_m: 10.0,
            duration_s: 8.0,
            location: Location::new(0.0, 0.0),
        }
    }

    #[test]
    fn test_steps_span_legs() {
        let alternative = RouteAlternative {
            distance_m: 40.0,
            duration_s: 32.0,
            geometry: Polyline::default(),
            legs: vec![
                RouteLeg {
                    summary: "a".to_string(),
                    distance_m: 20.0,
                    duration_s: 16.0,
                    steps: vec![step("one"), step("two")],
                },
                RouteLeg {
                    summary: "b".to_string(),
                    distance_m: 20.0,
                    duration_s: 16.0,
                    steps: vec![step("three")],
                },
            ],
        };
        let instructions: Vec<_> = alternative.steps().map(|s| s.instruction.as_str()).collect();
        assert_eq!(instructions, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_empty_route_has_no_primary() {
        assert!(Route::default().is_empty());
        assert!(Route::default().primary().is_none());
    }
}
