//! Movie Critics Walkthrough
//!
//! The classic collaborative-filtering tour: compare two critics, find Toby's
//! nearest neighbours, recommend films for Toby, then flip the matrix to ask
//! the same questions about films.
//!
//! ```bash
//! cargo run --example critics
//! ```

use critique::{
    euclidean, pearson, recommendations, recommended_items, similar_items, top_matches,
    transform_prefs, Euclidean, Metric, RatingsMatrix, DEFAULT_TOP_N,
};

fn critics() -> RatingsMatrix<&'static str, &'static str> {
    [
        ("Lisa Rose", "Lady in the Water", 2.5),
        ("Lisa Rose", "Snakes on a Plane", 3.5),
        ("Lisa Rose", "Just My Luck", 3.0),
        ("Lisa Rose", "Superman Returns", 3.5),
        ("Lisa Rose", "You, Me and Dupree", 2.5),
        ("Lisa Rose", "The Night Listener", 3.0),
        ("Gene Seymour", "Lady in the Water", 3.0),
        ("Gene Seymour", "Snakes on a Plane", 3.5),
        ("Gene Seymour", "Just My Luck", 1.5),
        ("Gene Seymour", "Superman Returns", 5.0),
        ("Gene Seymour", "The Night Listener", 3.0),
        ("Gene Seymour", "You, Me and Dupree", 3.5),
        ("Michael Phillips", "Lady in the Water", 2.5),
        ("Michael Phillips", "Snakes on a Plane", 3.0),
        ("Michael Phillips", "Superman Returns", 3.5),
        ("Michael Phillips", "The Night Listener", 4.0),
        ("Claudia Puig", "Snakes on a Plane", 3.5),
        ("Claudia Puig", "Just My Luck", 3.0),
        ("Claudia Puig", "The Night Listener", 4.5),
        ("Claudia Puig", "Superman Returns", 4.0),
        ("Claudia Puig", "You, Me and Dupree", 2.5),
        ("Mick LaSalle", "Lady in the Water", 3.0),
        ("Mick LaSalle", "Snakes on a Plane", 4.0),
        ("Mick LaSalle", "Just My Luck", 2.0),
        ("Mick LaSalle", "Superman Returns", 3.0),
        ("Mick LaSalle", "The Night Listener", 3.0),
        ("Mick LaSalle", "You, Me and Dupree", 2.0),
        ("Jack Matthews", "Lady in the Water", 3.0),
        ("Jack Matthews", "Snakes on a Plane", 4.0),
        ("Jack Matthews", "The Night Listener", 3.0),
        ("Jack Matthews", "Superman Returns", 5.0),
        ("Jack Matthews", "You, Me and Dupree", 3.5),
        ("Toby", "Snakes on a Plane", 4.5),
        ("Toby", "You, Me and Dupree", 1.0),
        ("Toby", "Superman Returns", 4.0),
    ]
    .into_iter()
    .collect()
}

fn print_ranked(title: &str, ranked: &[(f64, &str)]) {
    println!("{title}");
    for (score, id) in ranked {
        println!("  {score:>7.4}  {id}");
    }
    println!();
}

fn main() -> critique::Result<()> {
    let prefs = critics();
    // METRIC=euclidean switches the default strategy for the ranked sections.
    let metric: Metric = std::env::var("METRIC")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_default();

    println!(
        "Lisa Rose vs Gene Seymour: euclidean = {:.4}, pearson = {:.4}\n",
        euclidean(&prefs, &"Lisa Rose", &"Gene Seymour")?,
        pearson(&prefs, &"Lisa Rose", &"Gene Seymour")?,
    );

    print_ranked(
        &format!("Top critic matches for Toby ({metric})"),
        &top_matches(&prefs, &"Toby", 3, &metric)?,
    );
    print_ranked(
        &format!("Top movie picks for Toby ({metric})"),
        &recommendations(&prefs, &"Toby", &metric)?,
    );

    let movies = transform_prefs(&prefs);
    print_ranked(
        "Movies like Superman Returns",
        &top_matches(&movies, &"Superman Returns", DEFAULT_TOP_N, &metric)?,
    );
    print_ranked(
        "Critics who would probably like Just My Luck",
        &recommendations(&movies, &"Just My Luck", &metric)?,
    );

    // Item-based: precompute once, reuse per critic.
    let table = similar_items(&prefs, 10, &Euclidean)?;
    print_ranked(
        "Item-based picks for Toby",
        &recommended_items(&prefs, &table, &"Toby")?,
    );

    Ok(())
}
