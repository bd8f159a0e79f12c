//! Accessibility preferences and their token encoding.
//!
//! The persisted snapshot is a whitespace-separated list of preference tokens,
//! e.g. `accessTextSize3 accessDarkContrast accessRemoveAssets`. Every token is
//! also the CSS class that switches the matching rule set on the page root.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    DARK_CONTRAST_TOKEN, LIGHT_CONTRAST_TOKEN, REMOVE_ASSETS_TOKEN, TEXT_SIZE_LEVELS,
    TEXT_SIZE_TOKENS,
};

/// Tokens emitted for one set of preferences. Never more than three.
pub type TokenList = SmallVec<[PreferenceToken; 3]>;

/// Font-scale step, always within `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextSizeLevel(u8);

impl TextSizeLevel {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(TEXT_SIZE_LEVELS);

    /// Construct a level, rejecting anything outside `1..=4`.
    #[must_use]
    pub const fn new(level: u8) -> Option<Self> {
        if level >= 1 && level <= TEXT_SIZE_LEVELS {
            Some(Self(level))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The following level, or `None` once the top level is passed.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    /// Every level in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=TEXT_SIZE_LEVELS).map(Self)
    }
}

impl fmt::Display for TextSizeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Active contrast override. Light and Dark can never be on together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContrastMode {
    #[default]
    None,
    Light,
    Dark,
}

/// Contrast theme a user can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContrastTheme {
    Light,
    Dark,
}

impl From<ContrastTheme> for ContrastMode {
    fn from(theme: ContrastTheme) -> Self {
        match theme {
            ContrastTheme::Light => Self::Light,
            ContrastTheme::Dark => Self::Dark,
        }
    }
}

/// One whitespace-delimited atom of the persisted snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceToken {
    TextSize(TextSizeLevel),
    LightContrast,
    DarkContrast,
    RemoveAssets,
}

impl PreferenceToken {
    /// The full token vocabulary, in encode order.
    pub const ALL: [Self; 7] = [
        Self::TextSize(TextSizeLevel(1)),
        Self::TextSize(TextSizeLevel(2)),
        Self::TextSize(TextSizeLevel(3)),
        Self::TextSize(TextSizeLevel(4)),
        Self::LightContrast,
        Self::DarkContrast,
        Self::RemoveAssets,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TextSize(level) => TEXT_SIZE_TOKENS[(level.0 - 1) as usize],
            Self::LightContrast => LIGHT_CONTRAST_TOKEN,
            Self::DarkContrast => DARK_CONTRAST_TOKEN,
            Self::RemoveAssets => REMOVE_ASSETS_TOKEN,
        }
    }

    /// Match a raw token exactly. `accessTextSize01` or `accessTextSize+1` are not tokens.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|token| token.as_str() == raw)
    }
}

impl fmt::Display for PreferenceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The persisted accessibility choices of one visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct AccessibilityPreferences {
    /// `None` means the browser default size.
    pub text_size: Option<TextSizeLevel>,
    pub contrast: ContrastMode,
    pub assets_hidden: bool,
}

impl AccessibilityPreferences {
    /// Flip whether images and other media are hidden.
    #[must_use]
    pub const fn toggle_hide_assets(self) -> Self {
        Self {
            assets_hidden: !self.assets_hidden,
            ..self
        }
    }

    /// Advance the text size: absent, 1, 2, 3, 4, then back to absent.
    #[must_use]
    pub const fn cycle_text_size(self) -> Self {
        let text_size = match self.text_size {
            None => Some(TextSizeLevel::MIN),
            Some(level) => level.next(),
        };
        Self { text_size, ..self }
    }

    /// Switch to `theme`, or back to no override when `theme` is already on.
    #[must_use]
    pub fn set_contrast(self, theme: ContrastTheme) -> Self {
        let requested = ContrastMode::from(theme);
        let contrast = if self.contrast == requested {
            ContrastMode::None
        } else {
            requested
        };
        Self { contrast, ..self }
    }

    /// Rebuild preferences from a persisted snapshot.
    ///
    /// Unknown tokens are dropped. When a corrupted snapshot carries two
    /// contrast tokens or two text sizes, the first one found wins.
    #[must_use]
    pub fn decode(serialized: &str) -> Self {
        let mut prefs = Self::default();
        for raw in serialized.split_whitespace() {
            let Some(token) = PreferenceToken::parse(raw) else {
                log::debug!("ignoring unknown preference token `{raw}`");
                continue;
            };
            match token {
                PreferenceToken::TextSize(level) if prefs.text_size.is_none() => {
                    prefs.text_size = Some(level);
                }
                PreferenceToken::LightContrast if prefs.contrast == ContrastMode::None => {
                    prefs.contrast = ContrastMode::Light;
                }
                PreferenceToken::DarkContrast if prefs.contrast == ContrastMode::None => {
                    prefs.contrast = ContrastMode::Dark;
                }
                PreferenceToken::RemoveAssets => prefs.assets_hidden = true,
                duplicate => {
                    log::debug!("ignoring conflicting preference token `{duplicate}`");
                }
            }
        }
        prefs
    }

    /// Active tokens in snapshot order: text size, contrast, assets.
    #[must_use]
    pub fn tokens(&self) -> TokenList {
        let mut tokens = TokenList::new();
        if let Some(level) = self.text_size {
            tokens.push(PreferenceToken::TextSize(level));
        }
        match self.contrast {
            ContrastMode::None => {}
            ContrastMode::Light => tokens.push(PreferenceToken::LightContrast),
            ContrastMode::Dark => tokens.push(PreferenceToken::DarkContrast),
        }
        if self.assets_hidden {
            tokens.push(PreferenceToken::RemoveAssets);
        }
        tokens
    }

    /// Serialize to the space-joined snapshot string.
    #[must_use]
    pub fn encode(&self) -> String {
        self.tokens()
            .iter()
            .map(|token| token.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[must_use]
    pub fn has_token(&self, token: PreferenceToken) -> bool {
        self.tokens().contains(&token)
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for AccessibilityPreferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for AccessibilityPreferences {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::decode(s))
    }
}

impl From<String> for AccessibilityPreferences {
    fn from(serialized: String) -> Self {
        Self::decode(&serialized)
    }
}

impl From<AccessibilityPreferences> for String {
    fn from(prefs: AccessibilityPreferences) -> Self {
        prefs.encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn every_state() -> Vec<AccessibilityPreferences> {
        let sizes = std::iter::once(None).chain(TextSizeLevel::all().map(Some));
        let mut states = Vec::new();
        for text_size in sizes {
            for contrast in [ContrastMode::None, ContrastMode::Light, ContrastMode::Dark] {
                for assets_hidden in [false, true] {
                    states.push(AccessibilityPreferences {
                        text_size,
                        contrast,
                        assets_hidden,
                    });
                }
            }
        }
        states
    }

    #[test]
    fn decode_inverts_encode_for_every_reachable_state() {
        let states = every_state();
        assert_eq!(states.len(), 30);
        for state in states {
            assert_eq!(AccessibilityPreferences::decode(&state.encode()), state);
        }
    }

    #[test]
    fn text_size_cycles_back_to_default_after_five_steps() {
        let start = AccessibilityPreferences::default();
        let mut prefs = start;
        let mut seen = Vec::new();
        for _ in 0..5 {
            prefs = prefs.cycle_text_size();
            seen.push(prefs.text_size.map(TextSizeLevel::get));
        }
        assert_eq!(seen, vec![Some(1), Some(2), Some(3), Some(4), None]);
        assert_eq!(prefs, start);
    }

    #[test]
    fn same_contrast_twice_turns_it_off() {
        let prefs = AccessibilityPreferences::default()
            .set_contrast(ContrastTheme::Light)
            .set_contrast(ContrastTheme::Light);
        assert_eq!(prefs.contrast, ContrastMode::None);
    }

    #[test]
    fn switching_contrast_replaces_the_other_theme() {
        let prefs = AccessibilityPreferences::default()
            .set_contrast(ContrastTheme::Light)
            .set_contrast(ContrastTheme::Dark);
        assert_eq!(prefs.contrast, ContrastMode::Dark);
        assert!(!prefs.has_token(PreferenceToken::LightContrast));
    }

    #[test]
    fn empty_snapshot_is_default() {
        let prefs = AccessibilityPreferences::decode("");
        assert!(prefs.is_default());
        assert_eq!(prefs.text_size, None);
        assert_eq!(prefs.contrast, ContrastMode::None);
        assert!(!prefs.assets_hidden);
    }

    #[test]
    fn decodes_full_snapshot() {
        let prefs =
            AccessibilityPreferences::decode("accessTextSize3 accessDarkContrast accessRemoveAssets");
        assert_eq!(prefs.text_size, TextSizeLevel::new(3));
        assert_eq!(prefs.contrast, ContrastMode::Dark);
        assert!(prefs.assets_hidden);

        let mut tokens: Vec<_> = prefs.encode().split(' ').map(str::to_owned).collect();
        tokens.sort();
        assert_eq!(
            tokens,
            vec!["accessDarkContrast", "accessRemoveAssets", "accessTextSize3"]
        );
    }

    #[test]
    fn hide_assets_toggle_is_an_involution() {
        for state in every_state() {
            assert_eq!(state.toggle_hide_assets().toggle_hide_assets(), state);
            assert_ne!(state.toggle_hide_assets(), state);
        }
    }

    #[test]
    fn corrupted_contrast_keeps_first_token() {
        let prefs = AccessibilityPreferences::decode("accessLightContrast accessDarkContrast");
        assert_eq!(prefs.contrast, ContrastMode::Light);
        let prefs = AccessibilityPreferences::decode("accessDarkContrast accessLightContrast");
        assert_eq!(prefs.contrast, ContrastMode::Dark);
    }

    #[test]
    fn unknown_and_malformed_tokens_are_ignored() {
        let prefs = AccessibilityPreferences::decode(
            "  accessTextSize0 accessTextSize9\taccessTextSizeX accessTextSize+2 fancyTheme accessTextSize2\n",
        );
        assert_eq!(prefs.text_size, TextSizeLevel::new(2));
        assert_eq!(prefs.contrast, ContrastMode::None);
        assert!(!prefs.assets_hidden);
    }

    #[test]
    fn encode_order_is_stable() {
        let prefs = AccessibilityPreferences {
            text_size: TextSizeLevel::new(1),
            contrast: ContrastMode::Light,
            assets_hidden: true,
        };
        assert_eq!(
            prefs.encode(),
            "accessTextSize1 accessLightContrast accessRemoveAssets"
        );
        assert_eq!(prefs.to_string(), prefs.encode());
        assert_eq!(AccessibilityPreferences::default().encode(), "");
    }

    #[test]
    fn text_size_level_rejects_out_of_range() {
        assert!(TextSizeLevel::new(0).is_none());
        assert!(TextSizeLevel::new(5).is_none());
        assert_eq!(TextSizeLevel::MAX.next(), None);
        assert_eq!(TextSizeLevel::MIN.next(), TextSizeLevel::new(2));
    }

    #[test]
    fn serde_uses_snapshot_string() {
        let prefs = AccessibilityPreferences {
            text_size: TextSizeLevel::new(4),
            contrast: ContrastMode::None,
            assets_hidden: true,
        };
        let json = serde_json::to_string(&prefs).unwrap();
        assert_eq!(json, "\"accessTextSize4 accessRemoveAssets\"");
        let back: AccessibilityPreferences = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prefs);
    }

    #[test]
    fn token_vocabulary_parses_back() {
        for token in PreferenceToken::ALL {
            assert_eq!(PreferenceToken::parse(token.as_str()), Some(token));
        }
        assert_eq!(PreferenceToken::parse("accessTextSize01"), None);
    }
}
