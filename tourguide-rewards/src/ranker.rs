//! Bounded top-k nearest-attraction ranking.
//!
//! The catalog is scanned once while a buffer of at most `k` candidates is
//! kept sorted by ascending distance. Ties keep catalog order. Reward points
//! are fetched only for the candidates that survive the scan.

use std::sync::Arc;

use geo::Coord;
use tourguide_core::{
    Attraction, AttractionCatalog, NearbyAttraction, RewardPointsOracle, User, VisitedLocation,
    distance_miles,
};

use crate::engine::RewardEngine;
use crate::error::RewardError;

/// An attraction paired with its distance from the query origin.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedAttraction {
    /// The ranked attraction.
    pub attraction: Attraction,
    /// Distance from the origin in statute miles.
    pub distance_miles: f64,
}

/// Keep the `k` attractions nearest to `origin`, nearest first.
///
/// Equal distances keep their relative input order. Returns every attraction
/// when fewer than `k` are supplied, and nothing when `k` is zero.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tourguide_core::test_support::attraction;
/// use tourguide_rewards::rank_nearest;
///
/// let attractions = [
///     attraction(1, "far", 0.0, 3.0),
///     attraction(2, "near", 0.0, 1.0),
///     attraction(3, "middle", 0.0, 2.0),
/// ];
/// let ranked = rank_nearest(Coord { x: 0.0, y: 0.0 }, &attractions, 2);
/// let names: Vec<_> = ranked.iter().map(|r| r.attraction.name.as_str()).collect();
/// assert_eq!(names, ["near", "middle"]);
/// ```
#[must_use]
pub fn rank_nearest(
    origin: Coord<f64>,
    attractions: &[Attraction],
    k: usize,
) -> Vec<RankedAttraction> {
    let mut ranked: Vec<RankedAttraction> = Vec::with_capacity(k.min(attractions.len()));
    if k == 0 {
        return ranked;
    }
    for attraction in attractions {
        let distance = distance_miles(origin, attraction.location);
        let candidate = RankedAttraction {
            attraction: attraction.clone(),
            distance_miles: distance,
        };
        if ranked.len() < k {
            ranked.push(candidate);
            ranked.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
            continue;
        }
        // Strictly greater keeps earlier entries ahead on ties.
        if let Some(slot) = ranked.iter().position(|kept| kept.distance_miles > distance) {
            ranked.insert(slot, candidate);
            ranked.truncate(k);
        }
    }
    ranked
}

/// Ranks catalog attractions by distance and attaches reward points.
pub struct NearestAttractionRanker<C, O> {
    catalog: Arc<C>,
    rewards: RewardEngine<C, O>,
}

impl<C, O> Clone for NearestAttractionRanker<C, O> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            rewards: self.rewards.clone(),
        }
    }
}

impl<C, O> NearestAttractionRanker<C, O>
where
    C: AttractionCatalog + 'static,
    O: RewardPointsOracle + 'static,
{
    /// Create a ranker over the engine's catalog and oracle.
    pub const fn new(catalog: Arc<C>, rewards: RewardEngine<C, O>) -> Self {
        Self { catalog, rewards }
    }

    /// The `k` attractions nearest to `location`, with the user's points.
    ///
    /// Makes at most `k` oracle lookups.
    ///
    /// # Errors
    ///
    /// Returns [`RewardError::Points`] when an oracle lookup fails.
    pub fn k_nearest(
        &self,
        location: &VisitedLocation,
        k: usize,
        user: &User,
    ) -> Result<Vec<NearbyAttraction>, RewardError> {
        let attractions = self.catalog.attractions();
        rank_nearest(location.location, &attractions, k)
            .into_iter()
            .map(|ranked| {
                let reward_points = self.rewards.reward_points(&ranked.attraction, user)?;
                Ok(NearbyAttraction {
                    name: ranked.attraction.name,
                    location: ranked.attraction.location,
                    distance_miles: ranked.distance_miles,
                    reward_points,
                })
            })
            .collect()
    }
}
