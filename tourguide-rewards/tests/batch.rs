//! Batch reward and tracking runs on the shared worker pool.
//!
//! Covers equivalence with sequential calculation, absorption of per-user
//! failures and the batch deadline.

use std::sync::Arc;
use std::time::{Duration, Instant};

use geo::Coord;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rstest::rstest;
use tourguide_core::test_support::{
    DelayedPointsOracle, FailingLocationSource, FailingOracle, FixedLocationSource,
    FixedPointsOracle, user,
};
use tourguide_core::{
    AttractionCatalog, ProximityPolicy, RewardPointsOracle, User, VecCatalog, VisitedLocation,
};
use tourguide_rewards::{BatchExecutor, LocationTracker, RewardEngine};

fn engine<O: RewardPointsOracle + 'static>(
    oracle: O,
    timeout: Duration,
) -> RewardEngine<VecCatalog, O> {
    RewardEngine::new(
        Arc::new(VecCatalog::landmarks()),
        Arc::new(oracle),
        Arc::new(ProximityPolicy::default()),
        Arc::new(BatchExecutor::new(32, timeout).expect("runtime builds")),
    )
}

/// Users whose visits land near a random landmark or nowhere in particular.
fn travellers(seed: u64, count: usize) -> Vec<Arc<User>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let landmarks = VecCatalog::landmarks().attractions();
    (0..count)
        .map(|n| {
            let traveller = Arc::new(user(&format!("internalUser{n}")));
            for _ in 0..3 {
                let location = if rng.gen_bool(0.5) {
                    let index = rng.gen_range(0..landmarks.len());
                    landmarks.get(index).expect("index in range").location
                } else {
                    Coord {
                        x: rng.gen_range(-180.0..180.0),
                        y: rng.gen_range(-85.0..85.0),
                    }
                };
                traveller.record_location(VisitedLocation::now(traveller.id(), location));
            }
            traveller
        })
        .collect()
}

fn reward_names(user: &User) -> Vec<String> {
    let mut names: Vec<_> = user
        .rewards()
        .iter()
        .map(|reward| reward.attraction_name().to_owned())
        .collect();
    names.sort();
    names
}

#[rstest]
#[case(1)]
#[case(7)]
#[case(42)]
fn batch_matches_sequential_calculation(#[case] seed: u64) {
    let engine = engine(FixedPointsOracle(3), Duration::from_secs(60));
    let batched = travellers(seed, 100);
    let sequential = travellers(seed, 100);

    let report = engine.calculate_batch(&batched);
    for traveller in &sequential {
        engine.calculate(traveller).expect("fixed oracle never fails");
    }

    assert!(report.is_complete(), "{report}");
    for (left, right) in batched.iter().zip(&sequential) {
        assert_eq!(reward_names(left), reward_names(right));
    }
}

#[rstest]
fn oracle_failures_are_absorbed() {
    let engine = engine(FailingOracle, Duration::from_secs(60));
    let users = travellers(3, 20);
    let rewardable = users
        .iter()
        .filter(|traveller| {
            VecCatalog::landmarks().attractions().iter().any(|attraction| {
                traveller
                    .visited_locations()
                    .iter()
                    .any(|visit| engine.is_near(visit, attraction))
            })
        })
        .count();

    let report = engine.calculate_batch(&users);

    assert_eq!(report.submitted, 20);
    assert_eq!(report.failed, rewardable);
    assert_eq!(report.completed, 20 - rewardable);
    assert!(users.iter().all(|traveller| traveller.rewards().is_empty()));
}

#[rstest]
fn deadline_returns_without_raising() {
    let slow = DelayedPointsOracle {
        points: 1,
        delay: Duration::from_secs(2),
    };
    let engine = engine(slow, Duration::from_millis(100));
    let users: Vec<_> = (0..4)
        .map(|n| {
            let traveller = Arc::new(user(&format!("slow{n}")));
            let disneyland = Coord {
                x: -117.922008,
                y: 33.817595,
            };
            traveller.record_location(VisitedLocation::now(traveller.id(), disneyland));
            traveller
        })
        .collect();

    let started = Instant::now();
    let report = engine.calculate_batch(&users);

    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(report.timed_out());
    assert_eq!(report.abandoned, 4);
}

#[rstest]
fn batch_tracking_always_fetches() {
    let engine = engine(FixedPointsOracle(1), Duration::from_secs(60));
    let source = Arc::new(FixedLocationSource::new(Coord {
        x: -117.922008,
        y: 33.817595,
    }));
    let tracker = LocationTracker::new(Arc::clone(&source), engine);
    let users = travellers(9, 50);

    let report = tracker.track_batch(&users);

    assert!(report.is_complete(), "{report}");
    assert_eq!(source.fetches(), 50);
    assert!(users.iter().all(|traveller| traveller.visited_locations().len() == 4));
    assert!(users.iter().all(|traveller| traveller.is_rewarded_for("Disneyland")));
}

#[rstest]
fn location_failures_are_absorbed() {
    let engine = engine(FixedPointsOracle(1), Duration::from_secs(60));
    let tracker = LocationTracker::new(Arc::new(FailingLocationSource), engine);
    let users = vec![Arc::new(user("a")), Arc::new(user("b"))];

    let report = tracker.track_batch(&users);

    assert_eq!(report.failed, 2);
    assert!(users.iter().all(|traveller| traveller.visited_locations().is_empty()));
}
