//! Shared test harness modules for the TourGuide CLI.

use super::*;

mod helpers;
mod steps;
