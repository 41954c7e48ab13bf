//! Typed configuration read from the environment.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::NavError;

pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

/// Response language sent to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Indonesian,
    German,
    Spanish,
    French,
    Italian,
    Japanese,
    Korean,
    Dutch,
    Portuguese,
    Russian,
    Chinese,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Indonesian => "id",
            Language::German => "de",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::Italian => "it",
            Language::Japanese => "ja",
            Language::Korean => "ko",
            Language::Dutch => "nl",
            Language::Portuguese => "pt",
            Language::Russian => "ru",
            Language::Chinese => "zh",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept region tags such as en-US
        let primary = s.split(['-', '_']).next().unwrap_or_default();
        let language = match primary.to_ascii_lowercase().as_str() {
            "en" => Language::English,
            "id" => Language::Indonesian,
            "de" => Language::German,
            "es" => Language::Spanish,
            "fr" => Language::French,
            "it" => Language::Italian,
            "ja" => Language::Japanese,
            "ko" => Language::Korean,
            "nl" => Language::Dutch,
            "pt" => Language::Portuguese,
            "ru" => Language::Russian,
            "zh" => Language::Chinese,
            _ => return Err(NavError::Config(format!("unsupported language '{}'", s))),
        };
        Ok(language)
    }
}

#[derive(Debug, Clone)]
pub struct MapboxConfig {
    pub base_url: String,
    pub access_token: String,
    /// Token for suggest and retrieve; `access_token` is used when unset.
    pub search_token: Option<String>,
    pub language: Language,
    pub timeout_secs: u64,
}

impl MapboxConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: access_token.into(),
            search_token: None,
            language: Language::default(),
            timeout_secs: 10,
        }
    }
}

/// Defaults applied to every suggest request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub types: String,
    pub limit: u32,
    pub country: String,
    pub autocomplete: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            types: "poi,address".to_string(),
            limit: 10,
            country: "ID".to_string(),
            autocomplete: true,
        }
    }
}

/// Where reroutes are sent after a successful reroute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DestinationPolicy {
    /// Adopt the last vertex of each accepted route as the destination.
    #[default]
    ReanchorToRouteEnd,
    /// Keep the destination given when tracking started.
    Pinned,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RerouteSettings {
    /// Off-route distance that triggers a reroute.
    pub threshold_m: f64,
    /// No evaluation while this close to the route's first vertex.
    pub min_distance_to_reroute_m: f64,
    /// Quiet period after a completed reroute.
    pub cooldown: Duration,
    pub destination_policy: DestinationPolicy,
}

impl Default for RerouteSettings {
    fn default() -> Self {
        Self {
            threshold_m: 20.0,
            min_distance_to_reroute_m: 5.0,
            cooldown: Duration::from_secs(10),
            destination_policy: DestinationPolicy::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NavigatorConfig {
    pub mapbox: MapboxConfig,
    pub search: SearchConfig,
    pub reroute: RerouteSettings,
    /// Ask the provider for alternative routes.
    pub alternatives: bool,
}

impl NavigatorConfig {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, NavError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, NavError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let access_token = get("MAPBOX_ACCESS_TOKEN")
            .ok_or_else(|| NavError::Config("MAPBOX_ACCESS_TOKEN is not set".to_string()))?;

        let mut mapbox = MapboxConfig::new(access_token);
        mapbox.search_token = get("MAPBOX_SEARCH_TOKEN");
        if let Some(base_url) = get("MAPBOX_BASE_URL") {
            mapbox.base_url = base_url;
        }
        if let Some(language) = get("MAPBOX_LANGUAGE") {
            mapbox.language = language.parse()?;
        }
        if let Some(timeout) = get("MAPBOX_TIMEOUT_SECS") {
            mapbox.timeout_secs = parse_value("MAPBOX_TIMEOUT_SECS", &timeout)?;
        }

        let mut search = SearchConfig::default();
        if let Some(types) = lookup("NAV_SEARCH_TYPES") {
            search.types = types.trim().to_string();
        }
        if let Some(limit) = get("NAV_SEARCH_LIMIT") {
            search.limit = parse_value("NAV_SEARCH_LIMIT", &limit)?;
        }
        if let Some(country) = lookup("NAV_SEARCH_COUNTRY") {
            search.country = country.trim().to_string();
        }
        if let Some(autocomplete) = get("NAV_SEARCH_AUTOCOMPLETE") {
            search.autocomplete = parse_bool("NAV_SEARCH_AUTOCOMPLETE", &autocomplete)?;
        }

        let mut reroute = RerouteSettings::default();
        if let Some(threshold) = get("NAV_REROUTE_THRESHOLD_METERS") {
            reroute.threshold_m = parse_value("NAV_REROUTE_THRESHOLD_METERS", &threshold)?;
        }
        if let Some(min_distance) = get("NAV_MIN_DISTANCE_TO_REROUTE") {
            reroute.min_distance_to_reroute_m =
                parse_value("NAV_MIN_DISTANCE_TO_REROUTE", &min_distance)?;
        }
        if let Some(cooldown) = get("NAV_REROUTE_COOLDOWN_SECONDS") {
            let secs: f64 = parse_value("NAV_REROUTE_COOLDOWN_SECONDS", &cooldown)?;
            reroute.cooldown = Duration::try_from_secs_f64(secs).map_err(|_| {
                NavError::Config(format!("NAV_REROUTE_COOLDOWN_SECONDS: invalid value '{}'", cooldown))
            })?;
        }
        if let Some(pin) = get("NAV_PIN_DESTINATION") {
            if parse_bool("NAV_PIN_DESTINATION", &pin)? {
                reroute.destination_policy = DestinationPolicy::Pinned;
            }
        }

        let alternatives = match get("NAV_ALTERNATIVES") {
            Some(value) => parse_bool("NAV_ALTERNATIVES", &value)?,
            None => false,
        };

        Ok(Self {
            mapbox,
            search,
            reroute,
            alternatives,
        })
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, NavError> {
    value
        .parse()
        .map_err(|_| NavError::Config(format!("{}: invalid value '{}'", key, value)))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, NavError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(NavError::Config(format!("{}: invalid value '{}'", key, value))),
    }
}
