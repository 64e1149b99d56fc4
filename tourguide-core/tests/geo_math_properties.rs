//! Property-based tests for great-circle distance.
//!
//! # Invariants tested
//!
//! - **Symmetry:** `distance(a, b) == distance(b, a)`.
//! - **Identity:** `distance(a, a) == 0`.
//! - **Range:** distances are finite, non-negative and at most half the
//!   circumference.

use geo::Coord;
use proptest::prelude::*;
use tourguide_core::{STATUTE_MILES_PER_NAUTICAL_MILE, distance_miles};

/// Half the circumference of the sphere, in statute miles.
const HALF_CIRCUMFERENCE_MILES: f64 = STATUTE_MILES_PER_NAUTICAL_MILE * 60.0 * 180.0;

fn coordinate() -> impl Strategy<Value = Coord<f64>> {
    (-180.0_f64..=180.0, -90.0_f64..=90.0).prop_map(|(x, y)| Coord { x, y })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn distance_is_symmetric(a in coordinate(), b in coordinate()) {
        prop_assert_eq!(distance_miles(a, b), distance_miles(b, a));
    }

    #[test]
    fn distance_to_self_is_zero(a in coordinate()) {
        prop_assert_eq!(distance_miles(a, a), 0.0);
    }

    #[test]
    fn distance_is_bounded(a in coordinate(), b in coordinate()) {
        let miles = distance_miles(a, b);
        prop_assert!(miles.is_finite());
        prop_assert!(miles >= 0.0);
        prop_assert!(miles <= HALF_CIRCUMFERENCE_MILES + 1e-6);
    }
}
