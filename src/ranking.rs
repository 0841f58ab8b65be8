use std::cmp::Ordering;

use crate::models::Movie;

/// Computes `(id, ranking)` for every movie: sorted by rating descending,
/// `ranking = count - index`, so the best-rated movie gets `count` and the
/// rankings cover exactly `1..=count`. Unrated movies rank below any rating;
/// equal ratings fall back to id order.
pub fn assign(movies: &[Movie]) -> Vec<(i32, i32)> {
    let mut ordered: Vec<&Movie> = movies.iter().collect();
    ordered.sort_by(|a, b| compare_ratings(b.rating, a.rating).then(a.id.cmp(&b.id)));

    let count = ordered.len() as i32;
    ordered.into_iter().enumerate().map(|(index, m)| (m.id, count - index as i32)).collect()
}

fn compare_ratings(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
