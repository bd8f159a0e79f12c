//! The bundled stylesheet keyed by the preference token vocabulary.

use crate::prefs::PreferenceToken;

const STYLESHEET: &str = include_str!("../../accessbar-web/static/accessbar.css");

/// CSS injected once into `<head>` when the toolbar mounts.
#[must_use]
pub const fn stylesheet() -> &'static str {
    STYLESHEET
}

/// Root selector that the stylesheet must carry for `token`.
#[must_use]
pub fn root_selector(token: PreferenceToken) -> String {
    format!("html.{}", token.as_str())
}

/// Tokens whose root selector is missing from `css`.
#[must_use]
pub fn missing_selectors(css: &str) -> Vec<PreferenceToken> {
    PreferenceToken::ALL
        .into_iter()
        .filter(|token| !css.contains(&root_selector(*token)))
        .collect()
}
