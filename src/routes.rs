use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;

use crate::{
    AppState,
    error::AppResult,
    flash,
    forms::{self, EditForm, FieldErrors, FindMovieForm, ManualForm},
    models::NewMovie,
    store::StoreError,
    templates,
};

pub async fn index(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<(SignedCookieJar, Html<String>)> {
    let movies = state.store.recompute_rankings().await?;
    let (jar, notice) = flash::take(jar);
    Ok((jar, Html(templates::index_page(&movies, notice.as_deref()))))
}

pub async fn add_form() -> Html<String> {
    Html(templates::add_page(&FindMovieForm::default(), &FieldErrors::default()))
}

pub async fn add_submit(
    State(state): State<AppState>,
    Form(form): Form<FindMovieForm>,
) -> AppResult<Response> {
    match forms::validate_find(&form) {
        Ok(title) => Ok(search_results(&state, &title).await?.into_response()),
        Err(errors) => Ok(invalid(templates::add_page(&form, &errors))),
    }
}

#[derive(Debug, Deserialize)]
pub struct SelectQuery {
    #[serde(default)]
    title: String,
}

pub async fn select(
    State(state): State<AppState>,
    Query(q): Query<SelectQuery>,
) -> AppResult<Response> {
    let title = q.title.trim();
    if title.is_empty() {
        return Ok(Redirect::to("/add").into_response());
    }
    Ok(search_results(&state, title).await?.into_response())
}

async fn search_results(state: &AppState, title: &str) -> AppResult<Html<String>> {
    let results = state.tmdb.search_by_title(title).await?;
    Ok(Html(templates::select_page(title, &results, &state.config.tmdb_image_base_url)))
}

pub async fn movie_search(
    State(state): State<AppState>,
    Path(external_id): Path<i64>,
) -> AppResult<Redirect> {
    let details = state.tmdb.fetch_by_id(external_id).await?;
    let movie = state.store.create(NewMovie::from(details)).await?;
    Ok(Redirect::to(&format!("/edit/{}", movie.id)))
}

pub async fn manual_form() -> Html<String> {
    Html(templates::manual_page(&ManualForm::default(), &FieldErrors::default()))
}

pub async fn manual_submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<ManualForm>,
) -> AppResult<Response> {
    let new = match forms::validate_manual(&form) {
        Ok(new) => new,
        Err(errors) => return Ok(invalid(templates::manual_page(&form, &errors))),
    };

    match state.store.create(new).await {
        Ok(movie) => {
            let jar = flash::set(jar, &format!("Added \u{201c}{}\u{201d}.", movie.title));
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(StoreError::DuplicateTitle(title)) => {
            let mut errors = FieldErrors::default();
            errors.push("title", format!("\u{201c}{title}\u{201d} is already in your collection."));
            Ok(invalid(templates::manual_page(&form, &errors)))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let movie = state.store.get(id).await?;
    Ok(Html(templates::edit_page(&movie, &EditForm::prefilled(&movie), &FieldErrors::default())))
}

pub async fn edit_submit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    jar: SignedCookieJar,
    Form(form): Form<EditForm>,
) -> AppResult<Response> {
    let movie = state.store.get(id).await?;
    let edit = match forms::validate_edit(&form) {
        Ok(edit) => edit,
        Err(errors) => return Ok(invalid(templates::edit_page(&movie, &form, &errors))),
    };

    let movie = state.store.update(id, edit).await?;
    let jar = flash::set(jar, &format!("Updated \u{201c}{}\u{201d}.", movie.title));
    Ok((jar, Redirect::to("/")).into_response())
}

pub async fn delete_confirm(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let movie = state.store.get(id).await?;
    Ok(Html(templates::delete_page(&movie)))
}

pub async fn delete_submit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    jar: SignedCookieJar,
) -> AppResult<(SignedCookieJar, Redirect)> {
    state.store.delete(id).await?;
    Ok((flash::set(jar, "Movie removed from your collection."), Redirect::to("/")))
}

fn invalid(body: String) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response()
}
