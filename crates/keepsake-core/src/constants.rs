//! Shared numeric constants.

/// Seconds in one day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Bit width of a perceptual hash.
pub const PHASH_BITS: u32 = 64;

/// Mean Earth radius in meters, used by the haversine distance.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
