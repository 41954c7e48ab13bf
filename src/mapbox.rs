//! Mapbox Search Box and Directions adapter.

use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::{Language, MapboxConfig};
use crate::error::{DomainError, NavError};
use crate::http::{HttpResponse, HttpTransport, ReqwestTransport, redacted};
use crate::location::Location;
use crate::polyline::Polyline;
use crate::route::{Route, RouteAlternative, RouteLeg, RouteStep};
use crate::search::{RetrievedPlace, SearchSuggestion, SessionToken, SuggestQuery};
use crate::traits::DirectionsApi;

const SUGGEST_PATH: &[&str] = &["search", "searchbox", "v1", "suggest"];
const RETRIEVE_PATH: &[&str] = &["search", "searchbox", "v1", "retrieve"];
const DIRECTIONS_PATH: &[&str] = &["directions", "v5", "mapbox", "walking"];

/// Directions payload status meaning success.
const STATUS_OK: &str = "Ok";

#[derive(Debug, Clone)]
pub struct MapboxClient<T = ReqwestTransport> {
    base_url: Url,
    access_token: String,
    search_token: String,
    language: Language,
    transport: T,
}

impl MapboxClient<ReqwestTransport> {
    pub fn new(config: &MapboxConfig) -> Result<Self, NavError> {
        let transport = ReqwestTransport::new(config.timeout_secs)
            .map_err(|err| NavError::Config(format!("failed to build HTTP client: {}", err)))?;
        Self::with_transport(config, transport)
    }
}

impl<T: HttpTransport> MapboxClient<T> {
    pub fn with_transport(config: &MapboxConfig, transport: T) -> Result<Self, NavError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|err| NavError::Config(format!("invalid base URL '{}': {}", config.base_url, err)))?;
        if base_url.cannot_be_a_base() {
            return Err(NavError::Config(format!(
                "base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        Ok(Self {
            base_url,
            access_token: config.access_token.clone(),
            search_token: config
                .search_token
                .clone()
                .unwrap_or_else(|| config.access_token.clone()),
            language: config.language,
            transport,
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn suggest_url(&self, query: &SuggestQuery, session: &SessionToken) -> Url {
        let mut url = self.endpoint(SUGGEST_PATH);
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("q", &query.text)
                .append_pair("access_token", &self.search_token)
                .append_pair("language", self.language.code())
                .append_pair("session_token", session.as_str());

            if let Some(proximity) = query.proximity.as_ref().filter(|p| !p.is_null_island()) {
                pairs.append_pair("proximity", &proximity.to_lon_lat_string());
            }
            if let Some(types) = query.types.as_deref().filter(|t| !t.is_empty()) {
                pairs.append_pair("types", types);
            }
            if let Some(limit) = query.limit.filter(|limit| *limit > 0) {
                pairs.append_pair("limit", &limit.to_string());
            }
            if let Some(country) = query.country.as_deref().filter(|c| !c.is_empty()) {
                pairs.append_pair("country", country);
            }
            if let Some(autocomplete) = query.autocomplete {
                pairs.append_pair("autocomplete", if autocomplete { "true" } else { "false" });
            }
        }
        url
    }

    pub fn retrieve_url(&self, id: &str, session: &SessionToken) -> Url {
        let mut url = self.endpoint(RETRIEVE_PATH);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        url.query_pairs_mut()
            .append_pair("access_token", &self.search_token)
            .append_pair("session_token", session.as_str());
        url
    }

    pub fn route_url(&self, from: &Location, to: &Location, alternatives: bool) -> Url {
        let mut url = self.endpoint(DIRECTIONS_PATH);
        let coordinates = format!("{};{}", from.to_lon_lat_string(), to.to_lon_lat_string());
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(&coordinates);
        }
        url.query_pairs_mut()
            .append_pair("alternatives", if alternatives { "true" } else { "false" })
            .append_pair("geometries", "geojson")
            .append_pair("steps", "true")
            .append_pair("access_token", &self.access_token)
            .append_pair("language", self.language.code());
        url
    }

    fn endpoint(&self, path: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Validated in the constructor, cannot fail
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path);
        }
        url
    }

    fn fetch(&self, endpoint: &'static str, url: &Url) -> Result<HttpResponse, NavError> {
        debug!(endpoint, url = %redacted(url), "mapbox request");
        let response = self.transport.get(url).map_err(|err| {
            warn!(endpoint, error = %err, "mapbox request failed");
            NavError::from(err)
        })?;
        debug!(endpoint, status = response.status, "mapbox response");
        Ok(response)
    }
}

impl<T: HttpTransport> DirectionsApi for MapboxClient<T> {
    fn suggest_places(
        &self,
        query: &SuggestQuery,
        session: &SessionToken,
    ) -> Result<Vec<SearchSuggestion>, NavError> {
        let url = self.suggest_url(query, session);
        let response = self.fetch("suggest", &url)?;
        let body = success_body(response)?;
        let payload: SuggestResponse = decode("suggest", &body)?;

        let suggestions: Vec<SearchSuggestion> =
            payload.suggestions.into_iter().map(SuggestionWire::into_suggestion).collect();
        debug!(count = suggestions.len(), query = %query.text, "suggest decoded");
        Ok(suggestions)
    }

    fn retrieve_place(&self, id: &str, session: &SessionToken) -> Result<RetrievedPlace, NavError> {
        let url = self.retrieve_url(id, session);
        let response = self.fetch("retrieve", &url)?;
        let body = success_body(response)?;

        let feature = match decode::<RetrieveResponse>("retrieve", &body)? {
            RetrieveResponse::Feature(feature) => feature,
            RetrieveResponse::FeatureCollection { mut features } => {
                if features.len() != 1 {
                    return Err(NavError::Decode {
                        endpoint: "retrieve",
                        message: format!("expected exactly one feature, found {}", features.len()),
                    });
                }
                features.remove(0)
            }
        };

        feature.into_place(id)
    }

    fn get_route(&self, from: &Location, to: &Location, alternatives: bool) -> Result<Route, NavError> {
        let url = self.route_url(from, to, alternatives);
        let response = self.fetch("directions", &url)?;
        let body = success_body(response)?;

        // A 200 can still carry a failure code such as NoRoute or NoSegment
        let envelope: StatusEnvelope = decode("directions", &body)?;
        match envelope.code.as_deref() {
            Some(STATUS_OK) => {}
            Some(code) => {
                warn!(code, "directions reported failure");
                return Err(NavError::Api {
                    status: 200,
                    code: Some(code.to_string()),
                    message: envelope.message.unwrap_or_else(|| code.to_string()),
                });
            }
            None => {
                return Err(NavError::Decode {
                    endpoint: "directions",
                    message: "missing status code".to_string(),
                });
            }
        }

        let payload: DirectionsResponse = decode("directions", &body)?;
        let route = Route::new(payload.routes.into_iter().map(RouteWire::into_alternative).collect());
        debug!(alternatives = route.alternatives().len(), "directions decoded");
        Ok(route)
    }
}

/// Body of a 200 response, or the provider's complaint as an API error.
fn success_body(response: HttpResponse) -> Result<String, NavError> {
    if response.status == 200 {
        return Ok(response.body);
    }

    // The error body is best effort; fall back to the bare status
    let parsed = serde_json::from_str::<StatusEnvelope>(&response.body).ok();
    let code = parsed.as_ref().and_then(|body| body.code.clone());
    let message = parsed
        .and_then(|body| body.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("status {}", response.status));

    warn!(status = response.status, %message, "mapbox rejected request");
    Err(NavError::Api {
        status: response.status,
        code,
        message,
    })
}

fn decode<D: DeserializeOwned>(endpoint: &'static str, body: &str) -> Result<D, NavError> {
    serde_json::from_str(body).map_err(|err| {
        warn!(endpoint, error = %err, "failed to decode response");
        NavError::Decode {
            endpoint,
            message: err.to_string(),
        }
    })
}

#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SuggestResponse {
    suggestions: Vec<SuggestionWire>,
}

#[derive(Debug, Deserialize)]
struct LatLonWire {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl LatLonWire {
    fn location(&self) -> Option<Location> {
        Some(Location::new(self.latitude?, self.longitude?))
    }
}

#[derive(Debug, Deserialize)]
struct SuggestionMetadataWire {
    coordinates: Option<LatLonWire>,
}

#[derive(Debug, Deserialize)]
struct SuggestionWire {
    name: Option<String>,
    mapbox_id: Option<String>,
    feature_type: Option<String>,
    address: Option<String>,
    full_address: Option<String>,
    place_formatted: Option<String>,
    postcode: Option<String>,
    coordinates: Option<LatLonWire>,
    metadata: Option<SuggestionMetadataWire>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl SuggestionWire {
    fn into_suggestion(self) -> SearchSuggestion {
        let coordinate = self
            .coordinates
            .as_ref()
            .and_then(LatLonWire::location)
            .or_else(|| {
                self.metadata
                    .as_ref()
                    .and_then(|metadata| metadata.coordinates.as_ref())
                    .and_then(LatLonWire::location)
            })
            .or_else(|| Some(Location::new(self.lat?, self.lon?)));

        SearchSuggestion {
            name: self.name.unwrap_or_default(),
            mapbox_id: self.mapbox_id.filter(|id| !id.is_empty()),
            feature_type: self.feature_type,
            address: self.address,
            full_address: self.full_address,
            place_formatted: self.place_formatted,
            postcode: self.postcode,
            coordinate,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum RetrieveResponse {
    Feature(FeatureWire),
    FeatureCollection { features: Vec<FeatureWire> },
}

#[derive(Debug, Default, Deserialize)]
struct FeaturePropertiesWire {
    name: Option<String>,
    mapbox_id: Option<String>,
    feature_type: Option<String>,
    address: Option<String>,
    full_address: Option<String>,
    place_formatted: Option<String>,
    postcode: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PointGeometryWire {
    coordinates: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct FeatureWire {
    #[serde(default)]
    properties: FeaturePropertiesWire,
    geometry: Option<PointGeometryWire>,
}

impl FeatureWire {
    fn into_place(self, requested_id: &str) -> Result<RetrievedPlace, NavError> {
        let coordinates = self
            .geometry
            .and_then(|geometry| geometry.coordinates)
            .filter(|coords| coords.len() >= 2 && coords[0].is_finite() && coords[1].is_finite())
            .map(|coords| [coords[0], coords[1]]);

        let properties = self.properties;
        let Some(coordinates) = coordinates else {
            let place = properties
                .name
                .clone()
                .unwrap_or_else(|| requested_id.to_string());
            return Err(DomainError::MissingCoordinates { place }.into());
        };

        Ok(RetrievedPlace {
            name: properties.name,
            mapbox_id: properties.mapbox_id,
            feature_type: properties.feature_type,
            address: properties.address,
            full_address: properties.full_address,
            place_formatted: properties.place_formatted,
            postcode: properties.postcode,
            coordinates,
        })
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    routes: Vec<RouteWire>,
}

#[derive(Debug, Deserialize)]
struct LineGeometryWire {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct ManeuverWire {
    #[serde(default)]
    instruction: String,
    #[serde(rename = "type", default)]
    kind: String,
    location: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct StepWire {
    distance: f64,
    duration: f64,
    #[serde(default)]
    name: String,
    maneuver: ManeuverWire,
}

#[derive(Debug, Deserialize)]
struct LegWire {
    #[serde(default)]
    summary: String,
    distance: f64,
    duration: f64,
    #[serde(default)]
    steps: Vec<StepWire>,
}

#[derive(Debug, Deserialize)]
struct RouteWire {
    distance: f64,
    duration: f64,
    geometry: LineGeometryWire,
    #[serde(default)]
    legs: Vec<LegWire>,
}

impl RouteWire {
    fn into_alternative(self) -> RouteAlternative {
        let legs = self
            .legs
            .into_iter()
            .map(|leg| RouteLeg {
                summary: leg.summary,
                distance_m: leg.distance,
                duration_s: leg.duration,
                steps: leg
                    .steps
                    .into_iter()
                    .map(|step| RouteStep {
                        instruction: step.maneuver.instruction,
                        maneuver_type: step.maneuver.kind,
                        name: step.name,
                        distance_m: step.distance,
                        duration_s: step.duration,
                        location: Location::from_lon_lat(step.maneuver.location),
                    })
                    .collect(),
            })
            .collect();

        RouteAlternative {
            distance_m: self.distance,
            duration_s: self.duration,
            geometry: Polyline::from_lon_lat(&self.geometry.coordinates),
            legs,
        }
    }
}
