//! Memory-based collaborative filtering.
//!
//! `critique` scores how alike raters are from the ratings they share, ranks
//! neighbours, and recommends unrated items by similarity-weighted averaging:
//!
//! - **Data**: [`RatingsMatrix`], a sparse entity -> item -> rating map
//! - **Similarity**: [`euclidean`], [`pearson`], or any [`Similarity`] strategy
//! - **Ranking**: [`top_matches`]
//! - **Recommendation**: [`recommendations`] (user-based),
//!   [`similar_items`] + [`recommended_items`] (item-based)
//! - **Transposition**: [`RatingsMatrix::transpose`] / [`transform_prefs`]
//!
//! Transposing swaps the roles of entities and items, so the same functions
//! answer "which items are like this item" and "who would like this item".
//!
//! # Ordering
//!
//! Every ranked result is sorted by descending score. Equal scores are ordered
//! by descending identifier, so output is fully deterministic.
//!
//! # Example
//!
//! ```rust
//! use critique::{recommendations, top_matches, Euclidean, Pearson, RatingsMatrix};
//!
//! let prefs: RatingsMatrix<&str, &str> = [
//!     ("Lisa", "Snakes", 3.5), ("Lisa", "Superman", 3.5), ("Lisa", "Dupree", 2.5),
//!     ("Gene", "Snakes", 3.5), ("Gene", "Superman", 5.0), ("Gene", "Dupree", 3.5),
//!     ("Gene", "Lady", 3.0),
//!     ("Toby", "Snakes", 4.5), ("Toby", "Superman", 4.0), ("Toby", "Dupree", 1.0),
//! ]
//! .into_iter()
//! .collect();
//!
//! let neighbours = top_matches(&prefs, &"Toby", 2, &Pearson).unwrap();
//! assert_eq!(neighbours[0].1, "Lisa");
//!
//! let recs = recommendations(&prefs, &"Toby", &Euclidean).unwrap();
//! assert_eq!(recs.len(), 1);
//! assert_eq!(recs[0].1, "Lady");
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`RatingsMatrix`] and [`Metric`]
//! - `tracing`: spans on ranking, recommendation and transposition
//!
//! # References
//!
//! - Resnick et al. (1994). "GroupLens: An Open Architecture for Collaborative
//!   Filtering of Netnews"
//! - Sarwar et al. (2001). "Item-Based Collaborative Filtering Recommendation
//!   Algorithms"
//! - Segaran, T. (2007). "Programming Collective Intelligence", ch. 2

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod matrix;
mod rank;
mod recommend;
mod similarity;

pub use error::{Error, Result};
pub use matrix::{transform_prefs, Key, RatingsMatrix};
pub use rank::{rank, top_matches, RankedResult, DEFAULT_TOP_N};
pub use recommend::{recommendations, recommended_items, similar_items};
pub use similarity::{euclidean, pearson, Euclidean, Metric, ParseMetricError, Pearson, Similarity};
