//! Ranked attractions near a user, as presented to callers.

use geo::Coord;

/// An attraction ranked by its distance from a user.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NearbyAttraction {
    /// Attraction name.
    pub name: String,
    /// Attraction position.
    pub location: Coord<f64>,
    /// Distance from the user in statute miles.
    pub distance_miles: f64,
    /// Points the user would earn at the attraction.
    pub reward_points: u32,
}

/// A user's position together with the attractions nearest to it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NearbyAttractions {
    /// Where the user is.
    pub user_location: Coord<f64>,
    /// Attractions, nearest first.
    pub attractions: Vec<NearbyAttraction>,
}
