use serde::{Deserialize, de::DeserializeOwned};

use crate::models::{MovieDetails, SearchResult};

#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    #[error("no TMDB API key is configured")]
    MissingApiKey,
    #[error("TMDB answered {status} for {path}")]
    Status { status: reqwest::StatusCode, path: String },
    #[error("TMDB request failed: {0}")]
    Http(#[source] reqwest::Error),
}

impl From<reqwest::Error> for TmdbError {
    fn from(err: reqwest::Error) -> Self {
        // the request URL carries the api key
        Self::Http(err.without_url())
    }
}

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    image_base_url: String,
}

impl TmdbClient {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        base_url: String,
        image_base_url: String,
    ) -> Self {
        if api_key.trim().is_empty() {
            tracing::warn!("TMDB_API_KEY is not set; searching and adding movies will fail");
        }
        Self { client, api_key, base_url, image_base_url }
    }

    pub async fn search_by_title(&self, query: &str) -> Result<Vec<SearchResult>, TmdbError> {
        let resp: SearchResponse = self.get_json("/search/movie", &[("query", query)]).await?;
        tracing::debug!(query, hits = resp.results.len(), "tmdb search");
        Ok(resp.results.into_iter().map(SearchMovie::into_result).collect())
    }

    pub async fn fetch_by_id(&self, external_id: i64) -> Result<MovieDetails, TmdbError> {
        let path = format!("/movie/{external_id}");
        let resp: MovieResponse = self.get_json(&path, &[("language", "en-US")]).await?;
        tracing::debug!(external_id, "tmdb lookup");
        Ok(resp.into_details(&self.image_base_url))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, TmdbError> {
        if self.api_key.trim().is_empty() {
            return Err(TmdbError::MissingApiKey);
        }

        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let resp = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TmdbError::Status { status, path: path.to_string() });
        }

        Ok(resp.json().await?)
    }
}

/// Joins the image base and a poster path. TMDB poster paths start with `/`.
pub fn poster_url(image_base_url: &str, poster_path: &str) -> String {
    let base = image_base_url.trim_end_matches('/');
    if poster_path.starts_with('/') {
        format!("{base}{poster_path}")
    } else {
        format!("{base}/{poster_path}")
    }
}

fn release_year(release_date: &str) -> Option<i32> {
    release_date.trim().parse::<jiff::civil::Date>().ok().map(|d| i32::from(d.year()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchMovie>,
}

#[derive(Debug, Deserialize)]
struct SearchMovie {
    id: i64,
    title: Option<String>,
    original_title: Option<String>,
    release_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
}

impl SearchMovie {
    fn into_result(self) -> SearchResult {
        SearchResult {
            external_id: self.id,
            title: non_empty(self.title).or(non_empty(self.original_title)).unwrap_or_default(),
            release_date: non_empty(self.release_date),
            overview: self.overview.unwrap_or_default(),
            poster_path: non_empty(self.poster_path),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MovieResponse {
    title: Option<String>,
    original_title: Option<String>,
    release_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
}

impl MovieResponse {
    fn into_details(self, image_base_url: &str) -> MovieDetails {
        MovieDetails {
            title: non_empty(self.title).or(non_empty(self.original_title)).unwrap_or_default(),
            img_url: non_empty(self.poster_path).map(|p| poster_url(image_base_url, &p)),
            year: self.release_date.as_deref().and_then(release_year),
            description: self.overview.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

    #[test]
    fn search_results_keep_upstream_order() {
        let json = r#"{
            "page": 1,
            "results": [
                {"id": 27205, "title": "Inception", "release_date": "2010-07-15",
                 "overview": "Cobb steals secrets.", "poster_path": "/inception.jpg"},
                {"id": 64956, "title": "Inception: The Cobol Job", "release_date": "",
                 "overview": "", "poster_path": null}
            ]
        }"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        let results: Vec<SearchResult> =
            resp.results.into_iter().map(SearchMovie::into_result).collect();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].external_id, 27205);
        assert_eq!(results[0].title, "Inception");
        assert_eq!(results[0].release_date.as_deref(), Some("2010-07-15"));
        assert_eq!(results[0].poster_path.as_deref(), Some("/inception.jpg"));
        assert_eq!(results[1].release_date, None);
        assert_eq!(results[1].poster_path, None);
    }

    #[test]
    fn missing_results_array_is_empty() {
        let resp: SearchResponse = serde_json::from_str(r#"{"page": 1}"#).unwrap();
        assert!(resp.results.is_empty());
    }

    #[test]
    fn details_build_poster_url_and_year() {
        let json = r#"{"id": 27205, "title": "Inception", "original_title": "Inception",
            "release_date": "2010-07-15", "overview": "Dreams.", "poster_path": "/abc.jpg"}"#;
        let resp: MovieResponse = serde_json::from_str(json).unwrap();
        let details = resp.into_details(IMAGE_BASE);

        assert_eq!(details.title, "Inception");
        assert_eq!(details.year, Some(2010));
        assert_eq!(details.description, "Dreams.");
        assert_eq!(details.img_url.as_deref(), Some("https://image.tmdb.org/t/p/w500/abc.jpg"));
    }

    #[test]
    fn details_without_poster_or_date() {
        let json = r#"{"original_title": "Le Samouraï", "release_date": "",
            "overview": null, "poster_path": null}"#;
        let resp: MovieResponse = serde_json::from_str(json).unwrap();
        let details = resp.into_details(IMAGE_BASE);

        assert_eq!(details.title, "Le Samouraï");
        assert_eq!(details.img_url, None);
        assert_eq!(details.year, None);
        assert_eq!(details.description, "");
    }

    #[test]
    fn poster_url_handles_slashes() {
        assert_eq!(poster_url("https://img/t/p/w500/", "/a.jpg"), "https://img/t/p/w500/a.jpg");
        assert_eq!(poster_url("https://img/t/p/w500", "a.jpg"), "https://img/t/p/w500/a.jpg");
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_any_request() {
        let client = TmdbClient::new(
            reqwest::Client::new(),
            String::new(),
            "http://127.0.0.1:9".to_string(),
            IMAGE_BASE.to_string(),
        );
        let err = client.search_by_title("Inception").await.unwrap_err();
        assert!(matches!(err, TmdbError::MissingApiKey));
    }
}
