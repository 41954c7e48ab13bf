//! Real Semarang (Central Java) locations
//!
//! Coordinates from OpenStreetMap, latitude first.

use route_guide::location::Location;

pub const SIMPANG_LIMA: (f64, f64) = (-6.99040, 110.42290);
pub const LAWANG_SEWU: (f64, f64) = (-6.98390, 110.41050);
pub const TUGU_MUDA: (f64, f64) = (-6.98430, 110.40920);
pub const KOTA_LAMA: (f64, f64) = (-6.96830, 110.42780);
pub const SAM_POO_KONG: (f64, f64) = (-6.99620, 110.39840);

pub fn location(point: (f64, f64)) -> Location {
    Location::new(point.0, point.1)
}

/// Walk due north from Simpang Lima, about 1.1 km.
pub const NORTH_WALK: [(f64, f64); 3] = [
    (-6.99040, 110.42290),
    (-6.98540, 110.42290),
    (-6.98040, 110.42290),
];

/// Roughly 110 m east of the middle of [`NORTH_WALK`].
pub const EAST_OF_NORTH_WALK: (f64, f64) = (-6.98540, 110.42390);

/// Roughly 110 m west of the middle of [`NORTH_WALK`].
pub const WEST_OF_NORTH_WALK: (f64, f64) = (-6.98540, 110.42190);

/// A couple of metres off the middle of [`NORTH_WALK`].
pub const ON_NORTH_WALK: (f64, f64) = (-6.98540, 110.42292);
