//! Behavioural coverage for the reward proximity policy.

use std::cell::{Cell, RefCell};

use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tourguide_core::{Attraction, ProximityPolicy, VisitedLocation};
use uuid::Uuid;

/// State shared by the steps of one scenario.
struct ProximityWorld {
    policy: ProximityPolicy,
    zoo: Attraction,
    visit: RefCell<Option<VisitedLocation>>,
    eligible: Cell<Option<bool>>,
}

#[fixture]
fn world() -> ProximityWorld {
    ProximityWorld {
        policy: ProximityPolicy::default(),
        zoo: Attraction::new(25, "Bronx Zoo", Coord { x: -73.872971, y: 40.852905 }),
        visit: RefCell::new(None),
        eligible: Cell::new(None),
    }
}

#[given("the default proximity policy")]
fn default_policy(world: &ProximityWorld) {
    world.policy.reset_reward_proximity_buffer();
}

#[given("a visit one mile from the Bronx Zoo")]
fn visit_near_zoo(world: &ProximityWorld) {
    let location = Coord {
        x: world.zoo.longitude(),
        y: world.zoo.latitude() + 0.0145,
    };
    *world.visit.borrow_mut() = Some(VisitedLocation::now(Uuid::new_v4(), location));
}

#[when("the reward buffer is set to zero")]
fn zero_buffer(world: &ProximityWorld) {
    world.policy.set_reward_proximity_buffer(0.0);
}

#[when("the reward buffer is reset")]
fn reset_buffer(world: &ProximityWorld) {
    world.policy.reset_reward_proximity_buffer();
}

#[when("I check reward eligibility")]
fn check_eligibility(world: &ProximityWorld) {
    let visit = world.visit.borrow();
    let visit = visit.as_ref().expect("visit must be recorded");
    world
        .eligible
        .set(Some(world.policy.is_near_for_reward(visit, &world.zoo)));
}

#[then("the visit is near enough for a reward")]
fn is_eligible(world: &ProximityWorld) {
    assert_eq!(world.eligible.get(), Some(true));
}

#[then("the visit is not near enough for a reward")]
fn is_not_eligible(world: &ProximityWorld) {
    assert_eq!(world.eligible.get(), Some(false));
}

#[scenario(path = "tests/features/proximity.feature", index = 0)]
fn visit_within_default_buffer(world: ProximityWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/proximity.feature", index = 1)]
fn zero_buffer_rejects_visit(world: ProximityWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/proximity.feature", index = 2)]
fn reset_restores_default(world: ProximityWorld) {
    let _ = world;
}
