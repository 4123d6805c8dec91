//! Similarity-weighted recommendations.
//!
//! # User-based
//!
//! Every other entity votes on the items the target has not rated, each vote
//! weighted by that entity's similarity to the target:
//!
//! ```text
//! score(item) = Σₒ sim(t, o) · r(o, item)  /  Σₒ sim(t, o)
//! ```
//!
//! Entities with `sim <= 0` do not vote. Dividing by the similarity sum keeps
//! an item rated by many neighbours from outscoring one rated by few.
//!
//! # Item-based
//!
//! Item neighbourhoods change more slowly than entity neighbourhoods, so the
//! item-item table from [`similar_items`] can be computed once and reused by
//! [`recommended_items`] for any entity.
//!
//! # Unrated vs zero
//!
//! A stored rating of exactly `0.0` counts as "not rated" when deciding which
//! items the target still needs recommendations for.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::matrix::{Key, RatingsMatrix};
use crate::rank::{rank, top_matches, RankedResult};
use crate::similarity::Similarity;

/// Accumulates weighted votes per item.
#[derive(Debug)]
struct Tally<I> {
    totals: BTreeMap<I, f64>,
    sim_sums: BTreeMap<I, f64>,
}

impl<I: Key> Tally<I> {
    fn new() -> Self {
        Self {
            totals: BTreeMap::new(),
            sim_sums: BTreeMap::new(),
        }
    }

    fn vote(&mut self, item: &I, rating: f64, sim: f64) {
        *self.totals.entry(item.clone()).or_insert(0.0) += rating * sim;
        *self.sim_sums.entry(item.clone()).or_insert(0.0) += sim;
    }

    fn into_ranked(self) -> RankedResult<I> {
        let Self { totals, sim_sums } = self;
        let scores = totals
            .into_iter()
            .filter_map(|(item, total)| {
                let weight = sim_sums.get(&item).copied().unwrap_or(0.0);
                (weight > 0.0).then(|| (total / weight, item))
            })
            .collect();
        rank(scores)
    }
}

/// True if `target` has no usable rating for `item` (absent, or exactly 0).
#[inline]
fn unseen<I: Ord>(ratings: &BTreeMap<I, f64>, item: &I) -> bool {
    ratings.get(item).map_or(true, |&r| r == 0.0)
}

/// Rank the items `target` has not rated by the similarity-weighted average
/// of everyone else's ratings.
///
/// # Errors
///
/// [`Error::UnknownIdentifier`](crate::Error::UnknownIdentifier) if `target` is not in `prefs`.
///
/// # Example
///
/// ```rust
/// use critique::{recommendations, Euclidean, RatingsMatrix};
///
/// let prefs: RatingsMatrix<&str, &str> =
///     [("A", "x", 1.0), ("B", "x", 1.0), ("B", "y", 4.0)].into_iter().collect();
///
/// let recs = recommendations(&prefs, &"A", &Euclidean).unwrap();
/// assert_eq!(recs, vec![(4.0, "y")]);
/// ```
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip(prefs, metric), fields(entities = prefs.len()))
)]
pub fn recommendations<E, I, S>(
    prefs: &RatingsMatrix<E, I>,
    target: &E,
    metric: &S,
) -> Result<RankedResult<I>>
where
    E: Key,
    I: Key,
    S: Similarity,
{
    let mine = prefs.ratings(target)?;
    let mut tally = Tally::new();

    for (other, theirs) in prefs.iter() {
        if other == target {
            continue;
        }
        let sim = metric.similarity(prefs, target, other)?;
        if sim <= 0.0 {
            continue;
        }
        for (item, &rating) in theirs {
            if unseen(mine, item) {
                tally.vote(item, rating, sim);
            }
        }
    }

    Ok(tally.into_ranked())
}

/// Item-item similarity table: for every item, its `n` most similar items.
///
/// Built on the transposed matrix, so two items are compared over the
/// entities who rated both.
///
/// ```rust
/// use critique::{similar_items, Euclidean, RatingsMatrix};
///
/// let prefs: RatingsMatrix<&str, &str> = [
///     ("A", "x", 1.0), ("A", "y", 1.0),
///     ("B", "x", 5.0), ("B", "z", 2.0),
/// ]
/// .into_iter()
/// .collect();
///
/// let table = similar_items(&prefs, 2, &Euclidean).unwrap();
/// assert_eq!(table.len(), 3);
/// assert_eq!(table[&"x"][0], (1.0, "y"));
/// ```
///
/// # Errors
///
/// Propagates any [`Error`](crate::Error) raised by `metric`. The built-in
/// metrics only fail on unknown identifiers, which cannot occur here because
/// every compared item is drawn from the matrix itself.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip(prefs, metric), fields(entities = prefs.len()))
)]
pub fn similar_items<E, I, S>(
    prefs: &RatingsMatrix<E, I>,
    n: usize,
    metric: &S,
) -> Result<BTreeMap<I, RankedResult<I>>>
where
    E: Key,
    I: Key,
    S: Similarity,
{
    let by_item = prefs.transpose();
    by_item
        .entities()
        .map(|item| Ok((item.clone(), top_matches(&by_item, item, n, metric)?)))
        .collect()
}

/// Recommend items for `target` from a precomputed item-item table.
///
/// Each item the target rated (nonzero) votes for its neighbours with weight
/// `similarity`; the score is the similarity-weighted average of the target's
/// own ratings. Neighbours the target already rated (nonzero) and neighbours
/// with similarity `<= 0` are skipped. Items the target stored as `0.0` are
/// candidates for recommendation but never vote.
///
/// # Errors
///
/// [`Error::UnknownIdentifier`](crate::Error::UnknownIdentifier) if `target` is not in `prefs`.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip(prefs, item_matches), fields(items = item_matches.len()))
)]
pub fn recommended_items<E, I>(
    prefs: &RatingsMatrix<E, I>,
    item_matches: &BTreeMap<I, RankedResult<I>>,
    target: &E,
) -> Result<RankedResult<I>>
where
    E: Key,
    I: Key,
{
    let mine = prefs.ratings(target)?;
    let mut tally = Tally::new();

    for (item, &rating) in mine {
        // A stored 0 only marks the item unseen; it casts no votes.
        if rating == 0.0 {
            continue;
        }
        let Some(neighbours) = item_matches.get(item) else {
            continue;
        };
        for (sim, other_item) in neighbours {
            if *sim <= 0.0 || !unseen(mine, other_item) {
                continue;
            }
            tally.vote(other_item, rating, *sim);
        }
    }

    Ok(tally.into_ranked())
}
