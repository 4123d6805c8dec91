//! Top-N neighbour ranking.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::matrix::{Key, RatingsMatrix};
use crate::similarity::Similarity;

/// Ordered `(score, identifier)` pairs, best first.
pub type RankedResult<K> = Vec<(f64, K)>;

/// Result size used when the caller has no preference.
pub const DEFAULT_TOP_N: usize = 5;

/// Descending order on `(score, id)`: higher score first, and among equal
/// scores the greater identifier first.
///
/// Scores compare with [`f64::total_cmp`], so a NaN score (only possible from
/// NaN ratings) still yields a total order instead of a panic.
#[inline]
pub(crate) fn descending<K: Ord>(a: &(f64, K), b: &(f64, K)) -> Ordering {
    b.0.total_cmp(&a.0).then_with(|| b.1.cmp(&a.1))
}

/// Sort scored identifiers best first (ties: descending identifier).
///
/// ```rust
/// use critique::rank;
///
/// let ranked = rank(vec![(0.5, "a"), (0.9, "b"), (0.5, "c")]);
/// assert_eq!(ranked, vec![(0.9, "b"), (0.5, "c"), (0.5, "a")]);
/// ```
#[must_use]
pub fn rank<K: Ord>(mut scores: Vec<(f64, K)>) -> RankedResult<K> {
    scores.sort_by(descending);
    scores
}

/// The `n` entities most similar to `target`, best first.
///
/// Every other entity in `prefs` is scored with `metric`; `target` never
/// appears in its own result. Fewer than `n` results come back when the
/// matrix has fewer candidates.
///
/// # Errors
///
/// [`Error::UnknownIdentifier`] if `target` is not in `prefs`.
///
/// # Example
///
/// ```rust
/// use critique::{top_matches, Metric, RatingsMatrix};
///
/// let mut prefs: RatingsMatrix<&str, &str> =
///     [("A", "x", 5.0), ("B", "x", 5.0)].into_iter().collect();
/// prefs.insert_entity("C");
///
/// let top = top_matches(&prefs, &"A", 2, &Metric::Euclidean).unwrap();
/// assert_eq!(top, vec![(1.0, "B"), (0.0, "C")]);
/// ```
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip(prefs, metric), fields(entities = prefs.len()))
)]
pub fn top_matches<E, I, S>(
    prefs: &RatingsMatrix<E, I>,
    target: &E,
    n: usize,
    metric: &S,
) -> Result<RankedResult<E>>
where
    E: Key,
    I: Key,
    S: Similarity,
{
    if !prefs.contains_entity(target) {
        return Err(Error::unknown(target));
    }

    let scores = prefs
        .entities()
        .filter(|other| *other != target)
        .map(|other| Ok((metric.similarity(prefs, target, other)?, other.clone())))
        .collect::<Result<Vec<_>>>()?;

    let mut ranked = rank(scores);
    ranked.truncate(n);
    Ok(ranked)
}
