//! Great-circle distance between two report locations.
//!
//! Coordinates are WGS84 degrees with `x = longitude` and `y = latitude`,
//! matching the `geo` crate convention.

use geo::Coord;

/// Mean Earth radius used by the haversine formula, in metres.
pub const EARTH_RADIUS_METRES: f64 = 6_371_000.0;

/// Metres in one statute mile.
pub const METRES_PER_MILE: f64 = 1_609.34;

/// Haversine distance between `from` and `to`, in metres.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use pawmatch_core::haversine_metres;
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// assert_eq!(haversine_metres(origin, origin), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point trigonometry"
)]
pub fn haversine_metres(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let phi_from = from.y.to_radians();
    let phi_to = to.y.to_radians();
    let delta_phi = (to.y - from.y).to_radians();
    let delta_lambda = (to.x - from.x).to_radians();

    // Rounding can push the term fractionally past 1 for antipodal points.
    let half_chord = ((delta_phi / 2.0).sin().powi(2)
        + phi_from.cos() * phi_to.cos() * (delta_lambda / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let angle = 2.0 * half_chord.sqrt().atan2((1.0 - half_chord).sqrt());
    EARTH_RADIUS_METRES * angle
}

/// Haversine distance between `from` and `to`, in statute miles.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use pawmatch_core::distance_miles;
///
/// // One degree of latitude is roughly 69 miles.
/// let miles = distance_miles(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 1.0 });
/// assert!((miles - 69.09).abs() < 0.1);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "unit conversion divides by a float constant"
)]
pub fn distance_miles(from: Coord<f64>, to: Coord<f64>) -> f64 {
    haversine_metres(from, to) / METRES_PER_MILE
}
