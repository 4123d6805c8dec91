//! Sparse ratings matrix.
//!
//! A two-level ordered map: entity -> item -> rating. Absence of an inner key
//! means "not rated", which is distinct from a stored rating of `0.0`.
//!
//! ```text
//!            item_0   item_1   item_2
//! entity_a    2.5       -       3.0
//! entity_b     -       4.0      1.0
//! entity_c     -        -        -      (registered, no ratings)
//! ```
//!
//! Both levels are `BTreeMap`s, so every traversal visits keys in order and
//! floating-point accumulations are reproducible across runs.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};

/// Identifier bound for entities and items.
///
/// `Ord` drives tie-breaking in ranked output; `Debug` names missing keys in
/// [`Error::UnknownIdentifier`].
pub trait Key: Ord + Clone + fmt::Debug {}

impl<T: Ord + Clone + fmt::Debug> Key for T {}

/// Sparse entity x item ratings.
///
/// Operations in this crate only borrow the matrix; nothing mutates it after
/// construction.
///
/// # Example
///
/// ```rust
/// use critique::RatingsMatrix;
///
/// let prefs: RatingsMatrix<&str, &str> = [
///     ("A", "x", 1.0),
///     ("A", "y", 2.0),
///     ("B", "x", 2.0),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(prefs.len(), 2);
/// assert_eq!(prefs.rating(&"A", &"y"), Some(2.0));
/// assert_eq!(prefs.rating(&"B", &"y"), None);
/// ```
#[derive(Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        transparent,
        bound(
            serialize = "E: serde::Serialize, I: serde::Serialize",
            deserialize = "E: Ord + serde::Deserialize<'de>, I: Ord + serde::Deserialize<'de>"
        )
    )
)]
pub struct RatingsMatrix<E, I> {
    rows: BTreeMap<E, BTreeMap<I, f64>>,
}

impl<E, I> Default for RatingsMatrix<E, I> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<E: fmt::Debug, I: fmt::Debug> fmt::Debug for RatingsMatrix<E, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.rows.iter()).finish()
    }
}

impl<E: Key, I: Key> RatingsMatrix<E, I> {
    /// Empty matrix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `rating` for (`entity`, `item`), returning the previous rating.
    pub fn insert(&mut self, entity: E, item: I, rating: f64) -> Option<f64> {
        self.rows.entry(entity).or_default().insert(item, rating)
    }

    /// Register `entity` without any ratings.
    ///
    /// Such an entity shares no items with anyone, so it scores 0 against
    /// every other entity.
    pub fn insert_entity(&mut self, entity: E) {
        self.rows.entry(entity).or_default();
    }

    /// Number of entities (outer keys).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if no entity is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of stored ratings.
    #[must_use]
    pub fn num_ratings(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    /// True if `entity` is an outer key.
    #[must_use]
    pub fn contains_entity(&self, entity: &E) -> bool {
        self.rows.contains_key(entity)
    }

    /// Entities in ascending order.
    pub fn entities(&self) -> impl Iterator<Item = &E> {
        self.rows.keys()
    }

    /// Iterate `(entity, ratings)` rows in ascending entity order.
    pub fn iter(&self) -> impl Iterator<Item = (&E, &BTreeMap<I, f64>)> {
        self.rows.iter()
    }

    /// All ratings given by `entity`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownIdentifier`] if `entity` is not in the matrix.
    pub fn ratings(&self, entity: &E) -> Result<&BTreeMap<I, f64>> {
        self.rows.get(entity).ok_or_else(|| Error::unknown(entity))
    }

    /// Rating of `item` by `entity`, if one was given.
    #[must_use]
    pub fn rating(&self, entity: &E, item: &I) -> Option<f64> {
        self.rows.get(entity)?.get(item).copied()
    }

    /// Paired ratings `(a's, b's)` over the items both entities rated, in
    /// ascending item order.
    ///
    /// The traversal order does not depend on argument order, so any
    /// reduction over the pairs is exactly symmetric under swapping `a` and `b`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownIdentifier`] if either entity is missing.
    pub fn shared_ratings(&self, a: &E, b: &E) -> Result<Vec<(f64, f64)>> {
        let ra = self.ratings(a)?;
        let rb = self.ratings(b)?;

        // Walk the smaller row, probe the larger one.
        let pairs = if ra.len() <= rb.len() {
            ra.iter()
                .filter_map(|(item, &x)| rb.get(item).map(|&y| (x, y)))
                .collect()
        } else {
            rb.iter()
                .filter_map(|(item, &y)| ra.get(item).map(|&x| (x, y)))
                .collect()
        };
        Ok(pairs)
    }

    /// Item-major copy: every `(entity, item, rating)` becomes
    /// `(item, entity, rating)`.
    ///
    /// Entities with no ratings have nothing to re-index and do not appear in
    /// the result.
    ///
    /// ```rust
    /// use critique::RatingsMatrix;
    ///
    /// let prefs: RatingsMatrix<&str, &str> =
    ///     [("A", "x", 1.0), ("B", "x", 2.0)].into_iter().collect();
    /// let items = prefs.transpose();
    ///
    /// assert_eq!(items.rating(&"x", &"B"), Some(2.0));
    /// assert_eq!(items.transpose(), prefs);
    /// ```
    #[must_use]
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), fields(entities = self.len(), ratings = self.num_ratings()))
    )]
    pub fn transpose(&self) -> RatingsMatrix<I, E> {
        let mut out = RatingsMatrix::new();
        for (entity, row) in &self.rows {
            for (item, &rating) in row {
                out.insert(item.clone(), entity.clone(), rating);
            }
        }
        out
    }

    /// Unwrap into the nested map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<E, BTreeMap<I, f64>> {
        self.rows
    }
}

impl<E: Key, I: Key> From<BTreeMap<E, BTreeMap<I, f64>>> for RatingsMatrix<E, I> {
    fn from(rows: BTreeMap<E, BTreeMap<I, f64>>) -> Self {
        Self { rows }
    }
}

impl<E: Key, I: Key> FromIterator<(E, I, f64)> for RatingsMatrix<E, I> {
    fn from_iter<T: IntoIterator<Item = (E, I, f64)>>(iter: T) -> Self {
        let mut m = Self::new();
        m.extend(iter);
        m
    }
}

impl<E: Key, I: Key> Extend<(E, I, f64)> for RatingsMatrix<E, I> {
    fn extend<T: IntoIterator<Item = (E, I, f64)>>(&mut self, iter: T) {
        for (entity, item, rating) in iter {
            self.insert(entity, item, rating);
        }
    }
}

/// Free-function form of [`RatingsMatrix::transpose`].
#[must_use]
pub fn transform_prefs<E: Key, I: Key>(prefs: &RatingsMatrix<E, I>) -> RatingsMatrix<I, E> {
    prefs.transpose()
}
