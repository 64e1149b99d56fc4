//! Great-circle distance between WGS84 coordinates.

use geo::Coord;

/// Statute miles in one nautical mile.
pub const STATUTE_MILES_PER_NAUTICAL_MILE: f64 = 1.150_779_45;

/// Nautical miles per degree of arc.
const NAUTICAL_MILES_PER_DEGREE: f64 = 60.0;

/// Distance in statute miles between two coordinates.
///
/// Uses the spherical law of cosines. The cosine argument is clamped into
/// `[-1, 1]` so rounding can never push `acos` out of its domain, and identical
/// coordinates short-circuit to exactly `0.0`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tourguide_core::distance_miles;
///
/// let equator = Coord { x: 0.0, y: 0.0 };
/// let one_degree_east = Coord { x: 1.0, y: 0.0 };
///
/// let miles = distance_miles(equator, one_degree_east);
/// assert!((miles - 69.046_767).abs() < 1e-3);
/// assert_eq!(distance_miles(equator, equator), 0.0);
/// ```
pub fn distance_miles(from: Coord<f64>, to: Coord<f64>) -> f64 {
    if from == to {
        return 0.0;
    }
    let lat1 = from.y.to_radians();
    let lon1 = from.x.to_radians();
    let lat2 = to.y.to_radians();
    let lon2 = to.x.to_radians();

    let cosine = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * (lon1 - lon2).cos();
    let angle = cosine.clamp(-1.0, 1.0).acos();

    let nautical_miles = NAUTICAL_MILES_PER_DEGREE * angle.to_degrees();
    STATUTE_MILES_PER_NAUTICAL_MILE * nautical_miles
}
