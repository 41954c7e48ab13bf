//! Canned Mapbox payloads, trimmed from real Search Box and Directions
//! responses around Semarang.

pub const SUGGEST_INLINE_COORDINATES: &str = r#"{
  "suggestions": [
    {
      "name": "Lawang Sewu",
      "mapbox_id": "dXJuOm1ieHBvaTpsYXdhbmctc2V3dQ",
      "feature_type": "poi",
      "address": "Jl. Pemuda",
      "full_address": "Jl. Pemuda, Sekayu, Semarang Tengah, Semarang, Jawa Tengah 50132, Indonesia",
      "place_formatted": "Sekayu, Semarang, Jawa Tengah 50132, Indonesia",
      "coordinates": { "latitude": -6.9839, "longitude": 110.4105 }
    },
    {
      "name": "Tugu Muda",
      "mapbox_id": "dXJuOm1ieHBvaTp0dWd1LW11ZGE",
      "feature_type": "poi",
      "place_formatted": "Semarang, Jawa Tengah, Indonesia"
    }
  ],
  "attribution": "© 2024 Mapbox and its suppliers. All rights reserved."
}"#;

pub const SUGGEST_METADATA_COORDINATES: &str = r#"{
  "suggestions": [
    {
      "name": "Kota Lama",
      "mapbox_id": "dXJuOm1ieHBvaTprb3RhLWxhbWE",
      "feature_type": "poi",
      "metadata": { "coordinates": { "latitude": -6.9683, "longitude": 110.4278 } }
    }
  ]
}"#;

pub const SUGGEST_LAT_LON: &str = r#"{
  "suggestions": [
    {
      "name": "Sam Poo Kong",
      "mapbox_id": "dXJuOm1ieHBvaTpzYW0tcG9vLWtvbmc",
      "feature_type": "poi",
      "lat": -6.9962,
      "lon": 110.3984
    }
  ]
}"#;

pub const SUGGEST_NULL_ISLAND_WITH_ID: &str = r#"{
  "suggestions": [
    {
      "name": "Simpang Lima",
      "mapbox_id": "dXJuOm1ieHBvaTpzaW1wYW5nLWxpbWE",
      "feature_type": "poi",
      "coordinates": { "latitude": 0.0, "longitude": 0.0 }
    }
  ]
}"#;

pub const SUGGEST_NULL_ISLAND_WITHOUT_ID: &str = r#"{
  "suggestions": [
    {
      "name": "Simpang Lima",
      "feature_type": "poi",
      "coordinates": { "latitude": 0.0, "longitude": 0.0 }
    }
  ]
}"#;

pub const SUGGEST_EMPTY: &str = r#"{ "suggestions": [] }"#;

pub const RETRIEVE_FEATURE: &str = r#"{
  "type": "Feature",
  "geometry": { "type": "Point", "coordinates": [110.4229, -6.9904] },
  "properties": {
    "name": "Simpang Lima",
    "mapbox_id": "dXJuOm1ieHBvaTpzaW1wYW5nLWxpbWE",
    "feature_type": "poi",
    "place_formatted": "Pleburan, Semarang, Jawa Tengah, Indonesia"
  }
}"#;

pub const RETRIEVE_COLLECTION: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "geometry": { "type": "Point", "coordinates": [110.4092, -6.9843] },
      "properties": { "name": "Tugu Muda", "mapbox_id": "dXJuOm1ieHBvaTp0dWd1LW11ZGE" }
    }
  ],
  "attribution": "© 2024 Mapbox and its suppliers. All rights reserved."
}"#;

pub const RETRIEVE_COLLECTION_TWO: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    { "type": "Feature", "geometry": { "type": "Point", "coordinates": [110.4092, -6.9843] }, "properties": {} },
    { "type": "Feature", "geometry": { "type": "Point", "coordinates": [110.4105, -6.9839] }, "properties": {} }
  ]
}"#;

pub const RETRIEVE_WITHOUT_GEOMETRY: &str = r#"{
  "type": "Feature",
  "properties": { "name": "Tugu Muda" }
}"#;

/// Simpang Lima to Lawang Sewu on foot.
pub const DIRECTIONS_OK: &str = r#"{
  "code": "Ok",
  "uuid": "4b7d1f0e",
  "routes": [
    {
      "distance": 1480.2,
      "duration": 1065.7,
      "weight": 1065.7,
      "geometry": {
        "type": "LineString",
        "coordinates": [[110.4229, -6.9904], [110.4180, -6.9880], [110.4105, -6.9839]]
      },
      "legs": [
        {
          "summary": "Jalan Pahlawan, Jalan Pandanaran",
          "distance": 1480.2,
          "duration": 1065.7,
          "steps": [
            {
              "distance": 620.4,
              "duration": 446.7,
              "name": "Jalan Pahlawan",
              "maneuver": { "type": "depart", "instruction": "Walk northwest on Jalan Pahlawan.", "location": [110.4229, -6.9904] }
            },
            {
              "distance": 859.8,
              "duration": 619.0,
              "name": "Jalan Pandanaran",
              "maneuver": { "type": "turn", "instruction": "Turn left onto Jalan Pandanaran.", "location": [110.4180, -6.9880] }
            },
            {
              "distance": 0.0,
              "duration": 0.0,
              "name": "",
              "maneuver": { "type": "arrive", "instruction": "You have arrived at your destination.", "location": [110.4105, -6.9839] }
            }
          ]
        }
      ]
    },
    {
      "distance": 1612.9,
      "duration": 1161.3,
      "geometry": {
        "type": "LineString",
        "coordinates": [[110.4229, -6.9904], [110.4150, -6.9905], [110.4105, -6.9839]]
      },
      "legs": []
    }
  ],
  "waypoints": [
    { "name": "Jalan Pahlawan", "location": [110.4229, -6.9904] },
    { "name": "Jalan Pemuda", "location": [110.4105, -6.9839] }
  ]
}"#;

/// Same walk, with the final vertex snapped onto the footpath outside the
/// gate rather than the requested point.
pub const DIRECTIONS_SNAPPED_END: &str = r#"{
  "code": "Ok",
  "routes": [
    {
      "distance": 1462.8,
      "duration": 1053.2,
      "geometry": {
        "type": "LineString",
        "coordinates": [[110.4229, -6.9904], [110.4180, -6.9880], [110.4107, -6.9841]]
      },
      "legs": []
    }
  ],
  "waypoints": [
    { "name": "Jalan Pahlawan", "location": [110.4229, -6.9904] },
    { "name": "Jalan Pemuda", "location": [110.4107, -6.9841] }
  ]
}"#;

pub const DIRECTIONS_NO_ROUTE: &str =
    r#"{ "code": "NoRoute", "message": "No route found between the given coordinates.", "routes": [] }"#;

pub const DIRECTIONS_ZERO_ROUTES: &str = r#"{ "code": "Ok", "routes": [], "waypoints": [] }"#;

pub const DIRECTIONS_WITHOUT_CODE: &str = r#"{ "routes": [] }"#;

pub const UNAUTHORIZED: &str = r#"{ "message": "Not Authorized - Invalid Token" }"#;

pub const RATE_LIMITED: &str = r#"{ "message": "Too Many Requests", "code": "RateLimited" }"#;
