//! Similarity between two entities' rating vectors.
//!
//! Both metrics only look at the shared-item set: items rated by both
//! entities. An empty shared set scores 0.
//!
//! | Metric     | Range    | Reads as                                   |
//! |------------|----------|--------------------------------------------|
//! | Euclidean  | (0, 1]   | 1 = identical ratings, -> 0 as they diverge |
//! | Pearson    | [-1, 1]  | linear agreement, robust to rating offsets |
//!
//! Pearson corrects for "grade inflation": a critic who rates everything one
//! star higher than another still correlates at 1.0, while the Euclidean score
//! penalises the offset.

use std::fmt;
use std::str::FromStr;

use crate::error::Result;
use crate::matrix::{Key, RatingsMatrix};

/// A symmetric similarity score between two entities of a matrix.
///
/// Implementors are small strategy values chosen at the call site and passed to
/// [`top_matches`](crate::top_matches) or
/// [`recommendations`](crate::recommendations).
pub trait Similarity {
    /// Score how alike `a` and `b` rate their shared items.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownIdentifier`](crate::Error::UnknownIdentifier) if either
    /// entity is not in `prefs`.
    fn similarity<E: Key, I: Key>(&self, prefs: &RatingsMatrix<E, I>, a: &E, b: &E)
        -> Result<f64>;
}

/// Distance-based score `1 / (1 + Σ(rₐ - r_b)²)` over shared items.
///
/// Returns 0.0 when no items are shared.
///
/// # Example
///
/// ```rust
/// use critique::{euclidean, RatingsMatrix};
///
/// let prefs: RatingsMatrix<&str, &str> = [
///     ("A", "x", 1.0), ("A", "y", 2.0),
///     ("B", "x", 2.0), ("B", "y", 3.0),
/// ]
/// .into_iter()
/// .collect();
///
/// // 1 / (1 + 1 + 1)
/// let s = euclidean(&prefs, &"A", &"B").unwrap();
/// assert!((s - 1.0 / 3.0).abs() < 1e-12);
/// ```
pub fn euclidean<E: Key, I: Key>(prefs: &RatingsMatrix<E, I>, a: &E, b: &E) -> Result<f64> {
    let shared = prefs.shared_ratings(a, b)?;
    if shared.is_empty() {
        return Ok(0.0);
    }

    let sum_of_squares: f64 = shared
        .iter()
        .map(|&(x, y)| {
            let d = x - y;
            d * d
        })
        .sum();

    Ok(1.0 / (1.0 + sum_of_squares))
}

/// Pearson correlation coefficient over shared items.
///
/// Returns 0.0 when no items are shared, or when either side's ratings are
/// constant over the shared set (zero variance).
///
/// # Clamping
///
/// This is the textbook `num / den` with one deliberate deviation: the
/// quotient is clamped to [-1, 1]. Cancellation in the running sums can push
/// the raw quotient past ±1 (large ratings with small spread).
///
/// # Example
///
/// ```rust
/// use critique::{pearson, RatingsMatrix};
///
/// // B rates everything exactly one point higher than A.
/// let prefs: RatingsMatrix<&str, &str> = [
///     ("A", "x", 1.0), ("A", "y", 2.0), ("A", "z", 4.0),
///     ("B", "x", 2.0), ("B", "y", 3.0), ("B", "z", 5.0),
/// ]
/// .into_iter()
/// .collect();
///
/// let r = pearson(&prefs, &"A", &"B").unwrap();
/// assert!((r - 1.0).abs() < 1e-12);
/// ```
pub fn pearson<E: Key, I: Key>(prefs: &RatingsMatrix<E, I>, a: &E, b: &E) -> Result<f64> {
    let shared = prefs.shared_ratings(a, b)?;
    if shared.is_empty() {
        return Ok(0.0);
    }
    let n = shared.len() as f64;

    let (mut sum1, mut sum2) = (0.0, 0.0);
    let (mut sum1_sq, mut sum2_sq) = (0.0, 0.0);
    let mut p_sum = 0.0;
    for &(x, y) in &shared {
        sum1 += x;
        sum2 += y;
        sum1_sq += x * x;
        sum2_sq += y * y;
        p_sum += x * y;
    }

    let num = p_sum - sum1 * sum2 / n;
    let den = ((sum1_sq - sum1 * sum1 / n) * (sum2_sq - sum2 * sum2 / n)).sqrt();

    Ok(correlation(num, den))
}

/// Final Pearson step: `num / den`, with degenerate denominators mapped to 0
/// and the quotient clamped to [-1, 1].
///
/// A NaN denominator comes from a variance term that rounded below zero.
#[inline]
fn correlation(num: f64, den: f64) -> f64 {
    if den == 0.0 || den.is_nan() {
        return 0.0;
    }
    (num / den).clamp(-1.0, 1.0)
}

/// [`euclidean`] as a [`Similarity`] strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euclidean;

impl Similarity for Euclidean {
    fn similarity<E: Key, I: Key>(
        &self,
        prefs: &RatingsMatrix<E, I>,
        a: &E,
        b: &E,
    ) -> Result<f64> {
        euclidean(prefs, a, b)
    }
}

/// [`pearson`] as a [`Similarity`] strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pearson;

impl Similarity for Pearson {
    fn similarity<E: Key, I: Key>(
        &self,
        prefs: &RatingsMatrix<E, I>,
        a: &E,
        b: &E,
    ) -> Result<f64> {
        pearson(prefs, a, b)
    }
}

/// Runtime-selected metric.
///
/// Defaults to [`Metric::Pearson`]. Parses from `"euclidean"` / `"pearson"`
/// (case-insensitive) so a caller can pick it from configuration text.
///
/// ```rust
/// use critique::Metric;
///
/// let m: Metric = "Euclidean".parse().unwrap();
/// assert_eq!(m, Metric::Euclidean);
/// assert_eq!(Metric::default().to_string(), "pearson");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Metric {
    /// See [`euclidean`].
    Euclidean,
    /// See [`pearson`].
    #[default]
    Pearson,
}

impl Similarity for Metric {
    fn similarity<E: Key, I: Key>(
        &self,
        prefs: &RatingsMatrix<E, I>,
        a: &E,
        b: &E,
    ) -> Result<f64> {
        match self {
            Self::Euclidean => euclidean(prefs, a, b),
            Self::Pearson => pearson(prefs, a, b),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Euclidean => "euclidean",
            Self::Pearson => "pearson",
        })
    }
}

/// Error returned when parsing an unrecognised metric name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown similarity metric: {0:?} (expected \"euclidean\" or \"pearson\")")]
pub struct ParseMetricError(String);

impl FromStr for Metric {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Self::Euclidean),
            "pearson" => Ok(Self::Pearson),
            _ => Err(ParseMetricError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs(rows: &[(&'static str, &'static str, f64)]) -> RatingsMatrix<&'static str, &'static str> {
        rows.iter().copied().collect()
    }

    #[test]
    fn test_euclidean_basic() {
        let m = prefs(&[
            ("A", "x", 1.0),
            ("A", "y", 2.0),
            ("B", "x", 2.0),
            ("B", "y", 3.0),
        ]);
        let s = euclidean(&m, &"A", &"B").unwrap();
        assert!((s - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_euclidean_identical_is_one() {
        let m = prefs(&[("A", "x", 4.0), ("B", "x", 4.0), ("B", "y", 1.0)]);
        assert_eq!(euclidean(&m, &"A", &"B").unwrap(), 1.0);
    }

    #[test]
    fn test_no_shared_items_scores_zero() {
        let m = prefs(&[("A", "x", 4.0), ("B", "y", 4.0)]);
        assert_eq!(euclidean(&m, &"A", &"B").unwrap(), 0.0);
        assert_eq!(pearson(&m, &"A", &"B").unwrap(), 0.0);
    }

    #[test]
    fn test_pearson_perfect_negative() {
        let m = prefs(&[
            ("A", "x", 1.0),
            ("A", "y", 2.0),
            ("A", "z", 3.0),
            ("B", "x", 3.0),
            ("B", "y", 2.0),
            ("B", "z", 1.0),
        ]);
        let r = pearson(&m, &"A", &"B").unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_constant_ratings_scores_zero() {
        let m = prefs(&[
            ("A", "x", 3.0),
            ("A", "y", 3.0),
            ("B", "x", 1.0),
            ("B", "y", 5.0),
        ]);
        assert_eq!(pearson(&m, &"A", &"B").unwrap(), 0.0);
    }

    #[test]
    fn test_pearson_single_shared_item_scores_zero() {
        let m = prefs(&[("A", "x", 5.0), ("B", "x", 5.0)]);
        assert_eq!(pearson(&m, &"A", &"B").unwrap(), 0.0);
    }

    #[test]
    fn test_correlation_clamps_past_unit_range() {
        assert_eq!(correlation(1.000_000_1, 1.0), 1.0);
        assert_eq!(correlation(-3.0, 2.0), -1.0);
        assert_eq!(correlation(0.5, 1.0), 0.5);
    }

    #[test]
    fn test_correlation_degenerate_denominator() {
        assert_eq!(correlation(1.0, 0.0), 0.0);
        assert_eq!(correlation(1.0, f64::NAN), 0.0);
        assert_eq!(correlation(0.0, (-1e-18f64).sqrt()), 0.0);
    }

    #[test]
    fn test_unknown_entity_errors() {
        let m = prefs(&[("A", "x", 5.0)]);
        assert!(euclidean(&m, &"A", &"Z").is_err());
        assert!(pearson(&m, &"Z", &"A").is_err());
        assert!(Metric::Pearson.similarity(&m, &"A", &"Z").is_err());
    }

    #[test]
    fn test_strategies_agree_with_functions() {
        let m = prefs(&[
            ("A", "x", 1.0),
            ("A", "y", 4.0),
            ("B", "x", 2.0),
            ("B", "y", 3.5),
        ]);
        let e = euclidean(&m, &"A", &"B").unwrap();
        let p = pearson(&m, &"A", &"B").unwrap();
        assert_eq!(Euclidean.similarity(&m, &"A", &"B").unwrap(), e);
        assert_eq!(Metric::Euclidean.similarity(&m, &"A", &"B").unwrap(), e);
        assert_eq!(Pearson.similarity(&m, &"A", &"B").unwrap(), p);
        assert_eq!(Metric::Pearson.similarity(&m, &"A", &"B").unwrap(), p);
    }

    #[test]
    fn test_metric_parse_and_display() {
        assert_eq!("pearson".parse::<Metric>().unwrap(), Metric::Pearson);
        assert_eq!(" EUCLIDEAN ".parse::<Metric>().unwrap(), Metric::Euclidean);
        assert!("cosine".parse::<Metric>().is_err());
        for m in [Metric::Euclidean, Metric::Pearson] {
            assert_eq!(m.to_string().parse::<Metric>().unwrap(), m);
        }
    }

    #[test]
    fn test_metric_default_is_pearson() {
        assert_eq!(Metric::default(), Metric::Pearson);
    }
}
