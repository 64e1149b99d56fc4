//! Test helpers for writing CLI fixture files.

use camino::Utf8Path;
use geo::Coord;
use std::io::Write;
use tourguide_core::Attraction;

/// Write `contents` to `path`, creating parent directories as needed.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    let mut file = tourguide_fs::create_utf8_file(path).expect("create fixture file");
    file.write_all(contents).expect("write fixture file");
}

/// A two-entry Manhattan catalog encoded as JSON.
pub(super) fn custom_catalog_json() -> String {
    let attractions = [
        Attraction::new(
            1,
            "Empire State Building",
            Coord {
                x: -73.985428,
                y: 40.748817,
            },
        )
        .with_address("New York City", "NY"),
        Attraction::new(
            2,
            "Statue of Liberty",
            Coord {
                x: -74.044502,
                y: 40.689247,
            },
        ),
    ];
    serde_json::to_string(&attractions).expect("serialize catalog")
}
