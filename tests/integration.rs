//! Integration tests across key types and optional features.

use critique::{recommendations, top_matches, Metric, RatingsMatrix, DEFAULT_TOP_N};

/// Numeric ids work the same as string ids.
#[test]
fn numeric_identifiers() {
    // user -> (item, rating)
    let prefs: RatingsMatrix<u32, u64> = [
        (1, 10, 4.0),
        (1, 11, 2.0),
        (1, 12, 5.0),
        (2, 10, 4.5),
        (2, 11, 2.5),
        (2, 12, 5.0),
        (2, 13, 3.0),
        (3, 10, 1.0),
        (3, 11, 5.0),
        (3, 13, 4.0),
    ]
    .into_iter()
    .collect();

    let top = top_matches(&prefs, &1, DEFAULT_TOP_N, &Metric::Pearson).unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].1, 2);
    assert!(top[0].0 > 0.9);
    assert!(top[1].0 < 0.0);

    // Only user 2 correlates positively, so item 13 gets user 2's rating.
    let recs = recommendations(&prefs, &1, &Metric::Pearson).unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].1, 13);
    assert!((recs[0].0 - 3.0).abs() < 1e-12);
}

/// Metric selection from configuration text.
#[test]
fn metric_from_config_text() {
    let prefs: RatingsMatrix<&str, &str> = [
        ("A", "x", 1.0),
        ("A", "y", 2.0),
        ("B", "x", 2.0),
        ("B", "y", 3.0),
    ]
    .into_iter()
    .collect();

    let by_name = |name: &str| {
        let metric: Metric = name.parse().unwrap();
        top_matches(&prefs, &"A", 1, &metric).unwrap()[0].0
    };

    assert!((by_name("euclidean") - 1.0 / 3.0).abs() < 1e-12);
    assert!((by_name("pearson") - 1.0).abs() < 1e-12);
}

#[cfg(feature = "serde")]
mod serde_support {
    use super::*;

    #[test]
    fn matrix_serializes_as_nested_map() {
        let mut prefs: RatingsMatrix<String, String> = RatingsMatrix::new();
        prefs.insert("Toby".into(), "Superman Returns".into(), 4.0);
        prefs.insert_entity("Nobody".into());

        let json = serde_json::to_string(&prefs).unwrap();
        assert_eq!(json, r#"{"Nobody":{},"Toby":{"Superman Returns":4.0}}"#);

        let back: RatingsMatrix<String, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prefs);
    }

    #[test]
    fn metric_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Metric::Euclidean).unwrap(), r#""euclidean""#);
        let m: Metric = serde_json::from_str(r#""pearson""#).unwrap();
        assert_eq!(m, Metric::Pearson);
    }
}
