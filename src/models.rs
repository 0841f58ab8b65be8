use serde::Serialize;

use crate::entities::movie;

/// A stored movie as handed to handlers and views.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub year: Option<i32>,
    pub description: String,
    pub rating: Option<f64>,
    pub ranking: Option<i32>,
    pub review: Option<String>,
    pub img_url: Option<String>,
}

impl From<movie::Model> for Movie {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            year: m.year,
            description: m.description,
            rating: m.rating,
            ranking: m.ranking,
            review: m.review,
            img_url: m.img_url,
        }
    }
}

/// Fields for a movie that does not exist yet. Ranking is always assigned by
/// the store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: Option<i32>,
    pub description: String,
    pub rating: Option<f64>,
    pub review: Option<String>,
    pub img_url: Option<String>,
}

impl From<MovieDetails> for NewMovie {
    fn from(details: MovieDetails) -> Self {
        Self {
            title: details.title,
            year: details.year,
            description: details.description,
            rating: None,
            review: None,
            img_url: details.img_url,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MovieEdit {
    pub rating: f64,
    pub review: String,
}

/// One hit from a title search, in upstream order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchResult {
    pub external_id: i64,
    pub title: String,
    pub release_date: Option<String>,
    pub overview: String,
    pub poster_path: Option<String>,
}

/// The subset of an upstream movie record that seeds a new local movie.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MovieDetails {
    pub title: String,
    pub img_url: Option<String>,
    pub year: Option<i32>,
    pub description: String,
}
