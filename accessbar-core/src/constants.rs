//! Centralized names shared by the toolbar, its stylesheet and the cookie.
//!
//! Preference tokens double as CSS class names on the document root, so the
//! strings below must match the selectors in `static/accessbar.css` exactly.

// Preference tokens --------------------------------------------------------
pub const TEXT_SIZE_LEVELS: u8 = 4;
pub const TEXT_SIZE_TOKENS: [&str; TEXT_SIZE_LEVELS as usize] = [
    "accessTextSize1",
    "accessTextSize2",
    "accessTextSize3",
    "accessTextSize4",
];
pub const LIGHT_CONTRAST_TOKEN: &str = "accessLightContrast";
pub const DARK_CONTRAST_TOKEN: &str = "accessDarkContrast";
pub const REMOVE_ASSETS_TOKEN: &str = "accessRemoveAssets";

// Snapshot persistence -----------------------------------------------------
pub const DEFAULT_SNAPSHOT_KEY: &str = "accessToolbar";
pub const DEFAULT_SNAPSHOT_TTL_DAYS: u32 = 2;
pub const SECONDS_PER_DAY: u64 = 86_400;

// Control labels -----------------------------------------------------------
pub const LABEL_TEXT_SIZE: &str = "Text Size";
pub const LABEL_LIGHT_CONTRAST: &str = "Light Contrast";
pub const LABEL_DARK_CONTRAST: &str = "Dark Contrast";
pub const LABEL_HIDE_ASSETS: &str = "Hide Images";
pub const LABEL_TOGGLE: &str = "Accessibility Options";

// DOM ids ------------------------------------------------------------------
pub const TOGGLE_BUTTON_ID: &str = "accessbarToggle";
pub const MENU_ID: &str = "accessbarMenu";
pub const STATUS_REGION_ID: &str = "accessbarStatus";
pub const STYLESHEET_ID: &str = "accessbarStyles";
pub const TEXT_SIZE_BUTTON_ID: &str = "accessbarTextSize";
pub const LIGHT_CONTRAST_BUTTON_ID: &str = "accessbarLightContrast";
pub const DARK_CONTRAST_BUTTON_ID: &str = "accessbarDarkContrast";
pub const HIDE_ASSETS_BUTTON_ID: &str = "accessbarHideAssets";
