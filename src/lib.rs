pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod flash;
pub mod forms;
pub mod models;
pub mod ranking;
pub mod routes;
pub mod store;
pub mod templates;
pub mod tmdb;

use std::{sync::Arc, time::Duration};

use axum::{Router, extract::FromRef, routing::get};
use axum_extra::extract::cookie::Key;
use tower_http::trace::TraceLayer;

use crate::{config::Config, store::MovieStore, tmdb::TmdbClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: MovieStore,
    pub tmdb: Arc<TmdbClient>,
    key: Key,
}

impl AppState {
    pub async fn from_config(config: Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("movieshelf/0.1")
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        let db = db::connect_and_migrate(&config.database_url).await?;

        let tmdb = TmdbClient::new(
            http,
            config.tmdb_api_key.clone(),
            config.tmdb_base_url.clone(),
            config.tmdb_image_base_url.clone(),
        );

        let key = match &config.secret_key {
            Some(secret) => {
                anyhow::ensure!(
                    secret.len() >= config::MIN_SECRET_KEY_LEN,
                    "SECRET_KEY must be at least {} bytes",
                    config::MIN_SECRET_KEY_LEN
                );
                Key::derive_from(secret.as_bytes())
            }
            None => {
                tracing::warn!("SECRET_KEY is not set; flash cookies will not survive a restart");
                Key::generate()
            }
        };

        Ok(Self {
            config: Arc::new(config),
            store: MovieStore::new(db),
            tmdb: Arc::new(tmdb),
            key,
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/add", get(routes::add_form).post(routes::add_submit))
        .route("/add/manual", get(routes::manual_form).post(routes::manual_submit))
        .route("/select", get(routes::select))
        .route("/movie_search/{external_id}", get(routes::movie_search))
        .route("/edit/{id}", get(routes::edit_form).post(routes::edit_submit))
        .route("/delete/{id}", get(routes::delete_confirm).post(routes::delete_submit))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
