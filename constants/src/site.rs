//! Geographic extent of the served site and the flat projection scale.
//!
//! The extent is a small patch of downtown Calgary; the dataset is clipped
//! to it at load time. The projection scale converts degrees of
//! longitude/latitude into scene units with a plain linear multiply, which
//! is accurate enough over an area this small.

/// Western edge of the site, degrees longitude.
pub const SITE_WEST: f64 = -114.08381578463135;

/// Southern edge of the site, degrees latitude.
pub const SITE_SOUTH: f64 = 51.04519365627357;

/// Eastern edge of the site, degrees longitude.
pub const SITE_EAST: f64 = -114.07364009846911;

/// Northern edge of the site, degrees latitude.
pub const SITE_NORTH: f64 = 51.049629227864315;

/// Default degrees → scene-units multiplier. At this latitude one degree
/// of longitude is roughly 70 km, so the site spans about 1000 scene units.
pub const DEFAULT_PROJECTION_SCALE: f64 = 100_000.0;
