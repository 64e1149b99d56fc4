//! End-to-end tests for the `TourGuide` facade.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use geo::Coord;
use rstest::{fixture, rstest};
use tourguide_core::test_support::{
    CountingOracle, FailingOracle, FixedLocationSource, attraction, user,
};
use tourguide_core::{VecCatalog, VisitedLocation, distance_miles};
use tourguide_rewards::{EngineConfig, PoolBuildError, RewardError, TourGuide, TrackError};

type Guide = TourGuide<VecCatalog, CountingOracle, FixedLocationSource>;

const TIMES_SQUARE: Coord<f64> = Coord {
    x: -73.985130,
    y: 40.758896,
};

#[fixture]
fn config() -> EngineConfig {
    EngineConfig::default()
        .with_max_batch_workers(8)
        .with_batch_timeout(Duration::from_secs(60))
        .with_tracking_interval(Duration::from_millis(20))
}

fn guide(config: EngineConfig) -> Guide {
    TourGuide::new(
        VecCatalog::landmarks(),
        CountingOracle::default(),
        FixedLocationSource::new(TIMES_SQUARE),
        config,
    )
    .expect("service builds")
}

#[rstest]
fn nearby_attractions_lists_the_nearest_five(config: EngineConfig) {
    let guide = guide(config);
    let traveller = user("jon");

    let nearby = guide.nearby_attractions(&traveller).expect("nearby succeeds");

    assert_eq!(nearby.user_location, TIMES_SQUARE);
    assert_eq!(nearby.attractions.len(), 5);
    let names: Vec<_> = nearby.attractions.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names.first().copied(), Some("Flatiron Building"));
    assert!(
        nearby
            .attractions
            .windows(2)
            .all(|pair| matches!(pair, [a, b] if a.distance_miles <= b.distance_miles))
    );
    assert!(nearby.attractions.iter().all(|a| a.reward_points > 0));
}

#[rstest]
fn cached_tracking_skips_the_location_source(config: EngineConfig) {
    let guide = guide(config);
    let traveller = user("jon");

    let first = guide.track_location(&traveller).expect("first track fetches");
    let second = guide.track_location(&traveller).expect("second track is cached");
    let nearby = guide.nearby_attractions(&traveller).expect("nearby succeeds");

    assert_eq!(first, second);
    assert_eq!(nearby.user_location, first.location);
    assert_eq!(traveller.visited_locations().len(), 1);
}

#[rstest]
fn tracking_grants_rewards_for_the_fetched_location(config: EngineConfig) {
    let guide = guide(config);
    let traveller = user("jon");

    guide.refresh_location(&traveller).expect("refresh succeeds");

    let rewards = guide.user_rewards(&traveller);
    let mut names: Vec<_> = rewards.iter().map(|r| r.attraction_name().to_owned()).collect();
    names.sort();
    assert_eq!(names, ["Bronx Zoo", "Flatiron Building"]);
}

#[rstest]
fn proximity_buffer_can_be_widened_and_reset(config: EngineConfig) {
    let guide = guide(config);
    guide.set_proximity_buffer(f64::MAX);
    assert_eq!(guide.policy().reward_proximity_buffer(), f64::MAX);

    let traveller = user("jon");
    guide.refresh_location(&traveller).expect("refresh succeeds");
    assert_eq!(traveller.rewards().len(), 26);

    guide.reset_proximity_buffer();
    assert_eq!(guide.policy().reward_proximity_buffer(), 10.0);
}

#[rstest]
fn distance_from_visited_location_measures_in_miles(config: EngineConfig) {
    let guide = guide(config);
    let traveller = user("jon");
    let visit = VisitedLocation::now(traveller.id(), TIMES_SQUARE);
    let flatiron = attraction(1, "Flatiron Building", 40.741112, -73.989723);
    let here = attraction(2, "Times Square", TIMES_SQUARE.y, TIMES_SQUARE.x);

    let miles = guide.distance_from_visited_location(&visit, &flatiron);

    assert_eq!(miles, distance_miles(TIMES_SQUARE, flatiron.location));
    assert!((1.0..1.5).contains(&miles), "unexpected distance {miles}");
    assert_eq!(guide.distance_from_visited_location(&visit, &here), 0.0);
}

#[rstest]
fn ranking_failure_is_not_reported_as_a_tracking_failure(config: EngineConfig) {
    let guide = TourGuide::new(
        VecCatalog::landmarks(),
        FailingOracle,
        FixedLocationSource::new(TIMES_SQUARE),
        config,
    )
    .expect("service builds");
    let traveller = user("jon");
    traveller.record_location(VisitedLocation::now(traveller.id(), TIMES_SQUARE));

    let err = guide
        .nearby_attractions(&traveller)
        .expect_err("oracle fails while ranking");

    assert!(matches!(err, TrackError::Ranking(RewardError::Points(_))));
    assert!(err.to_string().starts_with("failed to rank nearby attractions"));
    assert_eq!(traveller.visited_locations().len(), 1);
}

#[rstest]
fn background_tracking_visits_every_registered_user(config: EngineConfig) {
    let guide = guide(config);
    for n in 0..10 {
        assert!(guide.registry().add_user(Arc::new(user(&format!("internalUser{n}")))));
    }

    let handle = guide.start_tracking().expect("tracking starts");
    let deadline = Instant::now() + Duration::from_secs(10);
    let all_tracked = || {
        guide
            .registry()
            .all_users()
            .iter()
            .all(|traveller| traveller.visited_locations().len() >= 2)
    };
    while !all_tracked() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(10));
    }
    assert!(handle.is_running());
    handle.stop();

    assert!(all_tracked());
    assert!(
        guide
            .registry()
            .all_users()
            .iter()
            .all(|traveller| traveller.is_rewarded_for("Flatiron Building"))
    );
}

#[rstest]
fn zero_workers_is_rejected(config: EngineConfig) {
    let result = TourGuide::new(
        VecCatalog::landmarks(),
        CountingOracle::default(),
        FixedLocationSource::new(TIMES_SQUARE),
        config.with_max_batch_workers(0),
    );
    assert!(matches!(result, Err(PoolBuildError::NoWorkers)));
}
