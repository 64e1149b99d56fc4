//! Points of interest that can earn a visitor reward points.

use geo::Coord;
use thiserror::Error;

/// Identifier assigned to an attraction by its catalog.
pub type AttractionId = u64;

/// A place a user can be rewarded for visiting.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. The
/// attraction name is the key used to deduplicate rewards, so catalogs must
/// not repeat names.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tourguide_core::Attraction;
///
/// let disneyland = Attraction::new(1, "Disneyland", Coord { x: -117.922008, y: 33.817595 })
///     .with_address("Anaheim", "CA");
///
/// assert_eq!(disneyland.latitude(), 33.817595);
/// assert_eq!(disneyland.city, "Anaheim");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attraction {
    /// Catalog identifier, passed to the reward points oracle.
    pub id: AttractionId,
    /// Display name, unique within a catalog.
    pub name: String,
    /// City the attraction sits in; may be empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub city: String,
    /// State or region code; may be empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub state: String,
    /// Geospatial position.
    pub location: Coord<f64>,
}

impl Attraction {
    /// Construct an attraction without address details.
    pub fn new(id: AttractionId, name: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            id,
            name: name.into(),
            city: String::new(),
            state: String::new(),
            location,
        }
    }

    /// Attach a city and state while returning `self` for chaining.
    #[must_use]
    pub fn with_address(mut self, city: impl Into<String>, state: impl Into<String>) -> Self {
        self.city = city.into();
        self.state = state.into();
        self
    }

    /// Latitude in degrees.
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }

    /// Check the attraction can take part in reward calculation.
    ///
    /// # Errors
    /// Returns [`AttractionError::EmptyName`] for blank names and
    /// [`AttractionError::InvalidCoordinate`] when the position is not a
    /// finite WGS84 coordinate.
    pub fn validate(&self) -> Result<(), AttractionError> {
        if self.name.trim().is_empty() {
            return Err(AttractionError::EmptyName { id: self.id });
        }
        let Coord { x, y } = self.location;
        if !(-90.0..=90.0).contains(&y) || !(-180.0..=180.0).contains(&x) {
            return Err(AttractionError::InvalidCoordinate {
                id: self.id,
                latitude: y,
                longitude: x,
            });
        }
        Ok(())
    }
}

/// Errors returned when validating attractions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttractionError {
    /// The attraction has no usable name.
    #[error("attraction {id} must have a non-empty name")]
    EmptyName {
        /// Identifier of the offending attraction.
        id: AttractionId,
    },
    /// The coordinate is outside WGS84 bounds or not finite.
    #[error("attraction {id} has an invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate {
        /// Identifier of the offending attraction.
        id: AttractionId,
        /// Latitude as supplied.
        latitude: f64,
        /// Longitude as supplied.
        longitude: f64,
    },
    /// Two attractions share a name, which would break reward deduplication.
    #[error("attraction name {name:?} appears more than once")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },
}
