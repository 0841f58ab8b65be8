use axum_extra::extract::cookie::{Cookie, SignedCookieJar};

const FLASH_COOKIE: &str = "movieshelf_flash";

/// Stores a one-shot notice for the next page view.
pub fn set(jar: SignedCookieJar, message: &str) -> SignedCookieJar {
    let value = urlencoding::encode(message).into_owned();
    jar.add(Cookie::build((FLASH_COOKIE, value)).path("/").http_only(true))
}

/// Reads the pending notice, if any, and clears it.
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Option<String>) {
    let message = jar
        .get(FLASH_COOKIE)
        .and_then(|c| urlencoding::decode(c.value()).ok().map(|m| m.into_owned()));
    match message {
        Some(message) => (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), Some(message)),
        None => (jar, None),
    }
}
