use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::{
    forms::{EditForm, FieldErrors, FindMovieForm, ManualForm},
    models::{Movie, SearchResult},
    tmdb,
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str =
    "w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

pub fn index_page(movies: &[Movie], notice: Option<&str>) -> String {
    page(
        "My Top Movies",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-12" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "My Top Movies" }
                            p class="mt-2 text-gray-600" { "Ranked by your own ratings." }
                        }
                        div class="flex gap-4 text-sm" {
                            a class="text-blue-600 hover:text-blue-800" href="/add" { "Add movie" }
                            a class="text-gray-500 hover:text-gray-700" href="/add/manual" { "Add manually" }
                        }
                    }

                    @if let Some(notice) = notice {
                        div class="mt-6 rounded-md bg-green-50 border border-green-200 px-4 py-3 text-green-800" id="notice" {
                            (notice)
                        }
                    }

                    @if movies.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "Your collection is empty." }
                        }
                    } @else {
                        div class="mt-10 space-y-4" {
                            @for movie in movies {
                                (movie_card(movie))
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn add_page(form: &FindMovieForm, errors: &FieldErrors) -> String {
    form_page(
        "Add a movie",
        "Search the movie database by title.",
        html! {
            form class="mt-8 space-y-6" method="post" action="/add" {
                (text_input("title", "Movie title", &form.title, errors))
                button class=(BUTTON_CLASS) type="submit" { "Find movie" }
            }
        },
    )
}

pub fn manual_page(form: &ManualForm, errors: &FieldErrors) -> String {
    form_page(
        "Add a movie manually",
        "Enter every detail yourself.",
        html! {
            form class="mt-8 space-y-6" method="post" action="/add/manual" {
                (text_input("title", "Title", &form.title, errors))
                (text_input("year", "Year", &form.year, errors))
                (text_input("description", "Description", &form.description, errors))
                (text_input("rating", "Rating out of 10", &form.rating, errors))
                (text_input("review", "Review", &form.review, errors))
                (text_input("img_url", "Image URL", &form.img_url, errors))
                button class=(BUTTON_CLASS) type="submit" { "Add movie" }
            }
        },
    )
}

pub fn select_page(query: &str, results: &[SearchResult], image_base_url: &str) -> String {
    page(
        "Select a movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-3xl mx-auto px-6 py-12" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "Select a movie" }
                            p class="mt-2 text-gray-600" { "Results for \u{201c}" (query) "\u{201d}" }
                        }
                        a class="text-sm text-blue-600 hover:text-blue-800" href="/add" { "New search" }
                    }

                    @if results.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No movies matched that title." }
                        }
                    } @else {
                        ul class="mt-10 space-y-3" {
                            @for result in results {
                                li class="bg-white shadow rounded-lg p-4 flex gap-4 items-start" {
                                    @if let Some(poster) = &result.poster_path {
                                        img class="w-16 rounded" src=(tmdb::poster_url(image_base_url, poster)) alt=(result.title);
                                    }
                                    div {
                                        a class="text-lg font-semibold text-blue-700 hover:text-blue-900" href=(format!("/movie_search/{}", result.external_id)) {
                                            (result.title)
                                        }
                                        @if let Some(date) = &result.release_date {
                                            span class="ml-2 text-gray-500" { "(" (date) ")" }
                                        }
                                        @if !result.overview.is_empty() {
                                            p class="mt-1 text-sm text-gray-600" { (result.overview) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn edit_page(movie: &Movie, form: &EditForm, errors: &FieldErrors) -> String {
    form_page(
        &movie.title,
        "Edit your rating and review.",
        html! {
            form class="mt-8 space-y-6" method="post" action=(format!("/edit/{}", movie.id)) {
                (text_input("rating", "Your rating out of 10 (e.g. 7.5)", &form.rating, errors))
                (text_input("review", "Your review", &form.review, errors))
                button class=(BUTTON_CLASS) type="submit" { "Update" }
            }
        },
    )
}

pub fn delete_page(movie: &Movie) -> String {
    form_page(
        "Delete movie",
        "This removes the movie from your collection for good.",
        html! {
            p class="mt-6 text-gray-800" { "Delete \u{201c}" (movie.title) "\u{201d}?" }
            form class="mt-6 flex gap-4" method="post" action=(format!("/delete/{}", movie.id)) {
                button class="rounded-md bg-red-600 px-4 py-2 font-semibold text-white hover:bg-red-700" type="submit" { "Delete" }
                a class="rounded-md px-4 py-2 text-gray-600 hover:text-gray-900" href="/" { "Cancel" }
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error " (status.as_u16()) }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn form_page(heading: &str, lead: &str, inner: Markup) -> String {
    page(
        heading,
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { (heading) }
                        p class="mt-2 text-gray-600" { (lead) }
                        (inner)
                    }
                }
            }
        },
    )
}

fn text_input(name: &str, label: &str, value: &str, errors: &FieldErrors) -> Markup {
    html! {
        div {
            label class="block text-sm font-medium text-gray-700" for=(name) { (label) }
            input class=(INPUT_CLASS) name=(name) id=(name) value=(value);
            @if let Some(message) = errors.get(name) {
                p class="mt-2 text-sm text-red-600 field-error" { (message) }
            }
        }
    }
}

fn movie_card(movie: &Movie) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6 flex gap-6" {
            @if let Some(img) = &movie.img_url {
                img class="w-24 rounded" src=(img) alt=(movie.title);
            } @else {
                div class="w-24 h-36 rounded bg-gray-200 flex items-center justify-center text-xs text-gray-500" { "No poster" }
            }
            div class="flex-1" {
                div class="flex items-start justify-between gap-4" {
                    h2 class="text-xl font-semibold text-gray-900" {
                        @if let Some(rank) = movie.ranking {
                            span class="mr-2 text-gray-400" { "#" (rank) }
                        }
                        (movie.title)
                        @if let Some(year) = movie.year {
                            span class="ml-2 font-normal text-gray-500" { "(" (year) ")" }
                        }
                    }
                    span class="text-lg font-semibold text-gray-700" {
                        @match movie.rating {
                            Some(rating) => { (format!("{rating:.1}")) " / 10" }
                            None => { "Unrated" }
                        }
                    }
                }
                @if !movie.description.is_empty() {
                    p class="mt-2 text-sm text-gray-600" { (movie.description) }
                }
                @if let Some(review) = &movie.review {
                    p class="mt-2 text-sm italic text-gray-700" { "\u{201c}" (review) "\u{201d}" }
                }
                div class="mt-4 flex gap-4 text-sm" {
                    a class="text-blue-600 hover:text-blue-800" href=(format!("/edit/{}", movie.id)) { "Update" }
                    a class="text-red-600 hover:text-red-800" href=(format!("/delete/{}", movie.id)) { "Delete" }
                }
            }
        }
    }
}
