//! Read-only access to the attractions known to the engine.
//!
//! The [`AttractionCatalog`] trait is the boundary to whatever service owns
//! the attraction list. [`VecCatalog`] is the in-memory implementation used by
//! the CLI and tests, and [`landmarks`] supplies the built-in data set.

use std::collections::HashSet;

use crate::{Attraction, AttractionError};

mod landmarks;

pub use landmarks::landmarks;

/// Source of the full attraction list.
///
/// Implementations are read concurrently by every worker of a batch run and
/// must therefore be `Send + Sync`. The list is treated as static for the
/// duration of a batch.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use tourguide_core::{Attraction, AttractionCatalog};
///
/// struct SingleAttraction;
///
/// impl AttractionCatalog for SingleAttraction {
///     fn attractions(&self) -> Vec<Attraction> {
///         vec![Attraction::new(1, "Fallingwater", Coord { x: -79.468056, y: 39.906113 })]
///     }
/// }
///
/// assert_eq!(SingleAttraction.attractions().len(), 1);
/// ```
pub trait AttractionCatalog: Send + Sync {
    /// Return every known attraction.
    fn attractions(&self) -> Vec<Attraction>;
}

/// Attraction catalog held in memory.
///
/// Construction validates every attraction and rejects duplicate names, so a
/// `VecCatalog` can always be used for reward deduplication by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VecCatalog {
    attractions: Vec<Attraction>,
}

impl VecCatalog {
    /// Build a catalog from a collection of attractions.
    ///
    /// # Errors
    /// Returns the first [`AttractionError`] found, including
    /// [`AttractionError::DuplicateName`] when two entries share a name.
    pub fn new<I>(attractions: I) -> Result<Self, AttractionError>
    where
        I: IntoIterator<Item = Attraction>,
    {
        let attractions: Vec<Attraction> = attractions.into_iter().collect();
        let mut seen = HashSet::with_capacity(attractions.len());
        for attraction in &attractions {
            attraction.validate()?;
            if !seen.insert(attraction.name.as_str()) {
                return Err(AttractionError::DuplicateName {
                    name: attraction.name.clone(),
                });
            }
        }
        Ok(Self { attractions })
    }

    /// Catalog of the built-in landmarks.
    ///
    /// # Examples
    /// ```
    /// use tourguide_core::{AttractionCatalog, VecCatalog};
    ///
    /// assert_eq!(VecCatalog::landmarks().attractions().len(), 26);
    /// ```
    pub fn landmarks() -> Self {
        Self {
            attractions: landmarks(),
        }
    }

    /// Parse a JSON array of attractions.
    ///
    /// # Errors
    /// Returns [`CatalogError::Parse`] for malformed JSON and
    /// [`CatalogError::Invalid`] when an entry fails validation.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn from_json_reader<R: std::io::Read>(reader: R) -> Result<Self, CatalogError> {
        let attractions: Vec<Attraction> = serde_json::from_reader(reader)?;
        Ok(Self::new(attractions)?)
    }

    /// Number of attractions.
    pub fn len(&self) -> usize {
        self.attractions.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.attractions.is_empty()
    }
}

impl AttractionCatalog for VecCatalog {
    fn attractions(&self) -> Vec<Attraction> {
        self.attractions.clone()
    }
}

/// Errors raised while loading a catalog from JSON.
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The payload was not a JSON array of attractions.
    #[error("failed to parse attraction catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// An attraction failed validation.
    #[error(transparent)]
    Invalid(#[from] AttractionError),
}
