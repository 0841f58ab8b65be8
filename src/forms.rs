use serde::Deserialize;

use crate::models::{Movie, MovieEdit, NewMovie};

const REQUIRED: &str = "This field is required.";

/// Field-level validation failures, in form order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldErrors(Vec<(&'static str, String)>);

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push((field, message.into()));
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.iter().find(|(f, _)| *f == field).map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(f, _)| *f)
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct FindMovieForm {
    #[serde(default)]
    pub title: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EditForm {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub review: String,
}

impl EditForm {
    pub fn prefilled(movie: &Movie) -> Self {
        Self {
            rating: movie.rating.map(|r| r.to_string()).unwrap_or_default(),
            review: movie.review.clone().unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ManualForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub img_url: String,
}

pub fn validate_find(form: &FindMovieForm) -> Result<String, FieldErrors> {
    let mut errors = FieldErrors::default();
    let title = required(&mut errors, "title", &form.title);
    errors.into_result(|| title.unwrap_or_default())
}

pub fn validate_edit(form: &EditForm) -> Result<MovieEdit, FieldErrors> {
    let mut errors = FieldErrors::default();
    let rating = field(&mut errors, "rating", parse_rating(&form.rating));
    let review = required(&mut errors, "review", &form.review);

    match (rating, review) {
        (Some(rating), Some(review)) if errors.is_empty() => Ok(MovieEdit { rating, review }),
        _ => Err(errors),
    }
}

pub fn validate_manual(form: &ManualForm) -> Result<NewMovie, FieldErrors> {
    let mut errors = FieldErrors::default();
    let title = required(&mut errors, "title", &form.title);
    let year = field(&mut errors, "year", parse_year(&form.year));
    let description = required(&mut errors, "description", &form.description);
    let rating = field(&mut errors, "rating", parse_rating(&form.rating));
    let review = required(&mut errors, "review", &form.review);
    let img_url = field(&mut errors, "img_url", parse_img_url(&form.img_url));

    errors.into_result(|| NewMovie {
        title: title.unwrap_or_default(),
        year,
        description: description.unwrap_or_default(),
        rating,
        review,
        img_url,
    })
}

fn required(errors: &mut FieldErrors, name: &'static str, raw: &str) -> Option<String> {
    field(errors, name, non_blank(raw).map(str::to_string))
}

fn field<T>(errors: &mut FieldErrors, name: &'static str, parsed: Result<T, String>) -> Option<T> {
    match parsed {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(name, message);
            None
        }
    }
}

fn non_blank(raw: &str) -> Result<&str, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { Err(REQUIRED.to_string()) } else { Ok(trimmed) }
}

pub fn parse_rating(raw: &str) -> Result<f64, String> {
    let value: f64 = non_blank(raw)?.parse().map_err(|_| "Not a valid number.".to_string())?;
    if value.is_finite() && (0.0..=10.0).contains(&value) {
        Ok(value)
    } else {
        Err("Rating must be between 0 and 10.".to_string())
    }
}

fn parse_year(raw: &str) -> Result<i32, String> {
    non_blank(raw)?.parse().map_err(|_| "Not a valid year.".to_string())
}

fn parse_img_url(raw: &str) -> Result<String, String> {
    let raw = non_blank(raw)?;
    match url::Url::parse(raw) {
        Ok(parsed)
            if matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|h| !h.is_empty()) =>
        {
            Ok(raw.to_string())
        }
        _ => Err("Invalid URL.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual() -> ManualForm {
        ManualForm {
            title: "Phone Booth".to_string(),
            year: "2002".to_string(),
            description: "A publicist is pinned down by a sniper.".to_string(),
            rating: "7.3".to_string(),
            review: "My favourite character was the caller.".to_string(),
            img_url: "https://image.tmdb.org/t/p/w500/tjrX2oWRCM3Tvarz38zlZM7Uc10.jpg".to_string(),
        }
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        assert_eq!(parse_rating("0"), Ok(0.0));
        assert_eq!(parse_rating("10"), Ok(10.0));
        assert_eq!(parse_rating(" 7.5 "), Ok(7.5));
        assert!(parse_rating("10.1").is_err());
        assert!(parse_rating("-0.1").is_err());
        assert!(parse_rating("NaN").is_err());
        assert!(parse_rating("inf").is_err());
        assert!(parse_rating("seven").is_err());
        assert_eq!(parse_rating(""), Err(REQUIRED.to_string()));
    }

    #[test]
    fn find_requires_a_title() {
        assert_eq!(validate_find(&FindMovieForm { title: "  Heat ".into() }), Ok("Heat".into()));

        let errors = validate_find(&FindMovieForm::default()).unwrap_err();
        assert_eq!(errors.get("title"), Some(REQUIRED));
    }

    #[test]
    fn edit_collects_every_field_error() {
        let errors =
            validate_edit(&EditForm { rating: "11".into(), review: " ".into() }).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["rating", "review"]);
    }

    #[test]
    fn edit_accepts_valid_input() {
        let edit = validate_edit(&EditForm { rating: "9".into(), review: "Great".into() }).unwrap();
        assert_eq!(edit, MovieEdit { rating: 9.0, review: "Great".into() });
    }

    #[test]
    fn manual_form_maps_every_field() {
        let movie = validate_manual(&manual()).unwrap();
        assert_eq!(movie.title, "Phone Booth");
        assert_eq!(movie.year, Some(2002));
        assert_eq!(movie.rating, Some(7.3));
        assert_eq!(movie.review.as_deref(), Some("My favourite character was the caller."));
        assert!(movie.img_url.unwrap().ends_with(".jpg"));
    }

    #[test]
    fn manual_form_rejects_bad_url_and_year() {
        let form =
            ManualForm { year: "two thousand".into(), img_url: "not a url".into(), ..manual() };
        let errors = validate_manual(&form).unwrap_err();
        assert_eq!(errors.get("year"), Some("Not a valid year."));
        assert_eq!(errors.get("img_url"), Some("Invalid URL."));
        assert_eq!(errors.get("title"), None);

        let form = ManualForm { img_url: "ftp://example.com/a.jpg".into(), ..manual() };
        assert!(validate_manual(&form).unwrap_err().get("img_url").is_some());
    }

    #[test]
    fn prefilled_edit_form_uses_stored_values() {
        let movie = Movie {
            id: 1,
            title: "Heat".into(),
            year: Some(1995),
            description: String::new(),
            rating: Some(8.5),
            ranking: None,
            review: None,
            img_url: None,
        };
        let form = EditForm::prefilled(&movie);
        assert_eq!(form.rating, "8.5");
        assert_eq!(form.review, "");
    }
}
