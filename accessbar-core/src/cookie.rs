//! Cookie header grammar for the snapshot cookie.
//!
//! Values handed to [`cookie_assignment`] must already be URI-encoded; the web
//! front end does that with `encodeURIComponent`.

use crate::constants::SECONDS_PER_DAY;

/// Find the raw (still encoded) value of `name` in a `document.cookie` header.
#[must_use]
pub fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim())
}

#[must_use]
pub const fn max_age_secs(ttl_days: u32) -> u64 {
    ttl_days as u64 * SECONDS_PER_DAY
}

/// Build the string assigned to `document.cookie` to store a snapshot.
#[must_use]
pub fn cookie_assignment(name: &str, encoded_value: &str, ttl_days: u32) -> String {
    format!(
        "{name}={encoded_value}; max-age={}; path=/; SameSite=Lax",
        max_age_secs(ttl_days)
    )
}

/// Assignment that deletes the cookie straight away.
#[must_use]
pub fn expiry_assignment(name: &str) -> String {
    format!("{name}=; max-age=0; path=/; SameSite=Lax")
}
