//! Behaviour-driven step definitions driving the simulation commands.

use super::helpers::{custom_catalog_json, write_utf8};
use super::*;
use crate::simulate::SimulationSummary;
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use tempfile::TempDir;
use tourguide_core::NearbyAttractions;

#[derive(Debug)]
struct CommandWorld {
    _tmp: TempDir,
    root: Utf8PathBuf,
    argv: RefCell<Vec<String>>,
    catalog_path: RefCell<Option<Utf8PathBuf>>,
    output_path: RefCell<Option<Utf8PathBuf>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl CommandWorld {
    fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        Self {
            _tmp: tmp,
            root,
            argv: RefCell::new(vec!["tourguide".to_owned()]),
            catalog_path: RefCell::new(None),
            output_path: RefCell::new(None),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn push_args<const N: usize>(&self, args: [&str; N]) {
        self.argv
            .borrow_mut()
            .extend(args.into_iter().map(str::to_owned));
    }

    fn stdout_json<T: serde::de::DeserializeOwned>(&self) -> T {
        let stdout = String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8");
        serde_json::from_str(&stdout).expect("stdout should hold JSON")
    }
}

#[fixture]
fn world() -> CommandWorld {
    CommandWorld::new()
}

#[given("the rewards command for 20 users")]
fn rewards_for_twenty(#[from(world)] world: &CommandWorld) {
    world.push_args(["rewards", "--users", "20", "--seed", "7"]);
}

#[given("the rewards command for 5 users")]
fn rewards_for_five(#[from(world)] world: &CommandWorld) {
    world.push_args(["rewards", "--users", "5", "--seed", "7"]);
}

#[given("the track command for 10 users")]
fn track_for_ten(#[from(world)] world: &CommandWorld) {
    world.push_args(["track", "--users", "10", "--seed", "7"]);
}

#[given("the nearby command at Times Square listing 3 attractions")]
fn nearby_times_square(#[from(world)] world: &CommandWorld) {
    world.push_args([
        "nearby",
        "--latitude",
        "40.758896",
        "--longitude",
        "-73.985130",
        "--limit",
        "3",
    ]);
}

#[given("a proximity radius spanning the globe")]
fn globe_radius(#[from(world)] world: &CommandWorld) {
    world.push_args(["--proximity-miles", "100000"]);
}

#[given("a custom catalog with two attractions")]
fn custom_catalog(#[from(world)] world: &CommandWorld) {
    let path = world.root.join("attractions.json");
    write_utf8(&path, custom_catalog_json().as_bytes());
    world.catalog_path.replace(Some(path));
}

#[given("an attractions file that does not exist")]
fn missing_attractions(#[from(world)] world: &CommandWorld) {
    let path = world.root.join("missing.json");
    world.push_args(["--attractions", path.as_str()]);
}

#[given("an output file in a new directory")]
fn output_file(#[from(world)] world: &CommandWorld) {
    let path = world.root.join("reports/summary.json");
    world.push_args(["--output", path.as_str()]);
    world.output_path.replace(Some(path));
}

#[when("I run the command")]
fn run_command(#[from(world)] world: &CommandWorld) {
    let mut argv = world.argv.borrow().clone();
    if let Some(catalog) = world.catalog_path.borrow().as_ref() {
        argv.extend(["--attractions".to_owned(), catalog.as_str().to_owned()]);
    }
    let parsed = Cli::try_parse_from(argv).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| {
        let mut buffer = world.stdout.borrow_mut();
        dispatch(cli.command, &mut *buffer)
    });
    world.result.replace(Some(outcome));
}

#[then("the command succeeds")]
fn command_succeeds(#[from(world)] world: &CommandWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    if let Err(err) = result {
        panic!("expected success, found {err:?}");
    }
}

#[then("the summary reports 20 completed users")]
fn twenty_completed(#[from(world)] world: &CommandWorld) {
    let summary: SimulationSummary = world.stdout_json();
    assert_eq!(summary.users, 20);
    assert_eq!(summary.batch.submitted, 20);
    assert_eq!(summary.batch.completed, 20);
    assert_eq!(summary.batch.abandoned, 0);
}

#[then("the summary reports 10 completed users")]
fn ten_completed(#[from(world)] world: &CommandWorld) {
    let summary: SimulationSummary = world.stdout_json();
    assert_eq!(summary.command, "track");
    assert_eq!(summary.batch.completed, 10);
}

#[then("every user holds every landmark reward")]
fn every_landmark(#[from(world)] world: &CommandWorld) {
    let summary: SimulationSummary = world.stdout_json();
    assert_eq!(summary.attractions, 26);
    assert_eq!(summary.rewarded_users, 5);
    assert_eq!(summary.total_rewards, 5 * 26);
}

#[then("the nearest attraction is the Flatiron Building")]
fn nearest_is_flatiron(#[from(world)] world: &CommandWorld) {
    let nearby: NearbyAttractions = world.stdout_json();
    assert_eq!(nearby.attractions.len(), 3);
    let first = nearby.attractions.first().expect("three attractions");
    assert_eq!(first.name, "Flatiron Building");
}

#[then("only the custom attractions are listed")]
fn only_custom(#[from(world)] world: &CommandWorld) {
    let nearby: NearbyAttractions = world.stdout_json();
    let names: Vec<_> = nearby.attractions.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["Empire State Building", "Statue of Liberty"]);
}

#[then("the command fails because the attractions file is missing")]
fn fails_missing_attractions(#[from(world)] world: &CommandWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::MissingSourceFile { field, .. } => assert_eq!(*field, ARG_ATTRACTIONS),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[then("the summary is written to the output file")]
fn summary_in_file(#[from(world)] world: &CommandWorld) {
    assert!(world.stdout.borrow().is_empty());
    let path = world.output_path.borrow().clone().expect("output path set");
    let contents = tourguide_fs::read_utf8_to_string(&path).expect("summary file");
    let summary: SimulationSummary = serde_json::from_str(&contents).expect("summary JSON");
    assert_eq!(summary.command, "rewards");
    assert_eq!(summary.users, 20);
}

macro_rules! register_command_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/simulation_commands.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CommandWorld) {
            let _ = world;
        }
    };
}

register_command_scenario!(rewards_happy_path, "calculating rewards for synthetic users");
register_command_scenario!(rewards_unlimited_radius, "an unlimited radius rewards every landmark");
register_command_scenario!(track_happy_path, "tracking synthetic users");
register_command_scenario!(nearby_times_square_ranking, "ranking attractions near Times Square");
register_command_scenario!(nearby_custom_catalog, "loading a custom attraction catalog");
register_command_scenario!(rewards_missing_attractions, "rejecting a missing attractions file");
register_command_scenario!(rewards_output_file, "writing the summary to a file");
