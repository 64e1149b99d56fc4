//! Synthetic collaborators and users for simulation runs.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use geo::Coord;
use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tourguide_core::{
    AttractionId, LocationError, LocationSource, PointsError, RewardPointsOracle, User, UserId,
    VisitedLocation,
};

/// Latitude limit of the Web Mercator projection.
const MAX_LATITUDE: f64 = 85.051_128_78;

/// Visits recorded for each synthetic user.
const VISITS_PER_USER: usize = 3;

/// Draw a coordinate uniformly from the projectable globe.
pub(crate) fn random_coord(rng: &mut impl Rng) -> Coord<f64> {
    Coord {
        x: rng.gen_range(-180.0..=180.0),
        y: rng.gen_range(-MAX_LATITUDE..=MAX_LATITUDE),
    }
}

/// Location source reporting seeded random positions.
#[derive(Debug)]
pub(crate) struct RandomLocationSource {
    rng: Mutex<ChaCha8Rng>,
}

impl RandomLocationSource {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl LocationSource for RandomLocationSource {
    fn current_location(&self, user_id: UserId) -> Result<VisitedLocation, LocationError> {
        let location = random_coord(&mut *self.rng.lock());
        Ok(VisitedLocation::now(user_id, location))
    }
}

/// Oracle deriving a score in `1..=1000` from the lookup pair.
///
/// The seed depends only on the ids, so scores repeat across runs and
/// toolchains.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct HashedPointsOracle;

impl RewardPointsOracle for HashedPointsOracle {
    fn points(&self, attraction_id: AttractionId, user_id: UserId) -> Result<u32, PointsError> {
        let (high, low) = user_id.as_u64_pair();
        let seed = attraction_id ^ high ^ low.rotate_left(32);
        Ok(ChaCha8Rng::seed_from_u64(seed).gen_range(1..=1000))
    }
}

/// Build `count` users, each with a short history of random visits.
///
/// Visit times fall within the last thirty days, oldest first.
pub(crate) fn synthetic_users(count: usize, seed: u64) -> Vec<Arc<User>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|n| {
            let name = format!("internalUser{n}");
            let email = format!("{name}@tourGuide.com");
            let user = Arc::new(User::with_random_id(name, "000", email));
            let mut days_ago: Vec<i64> = (0..VISITS_PER_USER)
                .map(|_| rng.gen_range(1..=30))
                .collect();
            days_ago.sort_unstable_by(|a, b| b.cmp(a));
            for days in days_ago {
                let visited_at = Utc::now() - TimeDelta::days(days);
                user.record_location(VisitedLocation::new(
                    user.id(),
                    random_coord(&mut rng),
                    visited_at,
                ));
            }
            user
        })
        .collect()
}
