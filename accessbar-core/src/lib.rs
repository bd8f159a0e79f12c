//! Accessbar Core
//!
//! Platform-agnostic preference logic for the Accessbar accessibility toolbar.
//! This crate owns the preference state machine, its token encoding and the
//! binding contract; it has no DOM or browser dependencies.

pub mod action;
pub mod config;
pub mod constants;
pub mod cookie;
pub mod prefs;
pub mod snapshot;
pub mod stylesheet;
pub mod surface;
pub mod toolbar;
pub mod view;

// Re-export commonly used types
pub use action::{MenuVisibility, ToolbarAction, WidgetState, reduce};
pub use config::{ConfigError, ToolbarConfig, ToolbarPosition};
pub use cookie::{cookie_assignment, expiry_assignment, find_cookie};
pub use prefs::{
    AccessibilityPreferences, ContrastMode, ContrastTheme, PreferenceToken, TextSizeLevel,
    TokenList,
};
pub use snapshot::{MemorySnapshotStore, SnapshotError, SnapshotSettings, StoredSnapshot};
pub use stylesheet::stylesheet;
pub use surface::RootClasses;
pub use toolbar::Toolbar;
pub use view::{ControlId, ControlView, ToolbarViewState, announcement, text_size_label};

/// Durable key-value store holding the persisted snapshot.
/// Platform-specific implementations should provide this
pub trait SnapshotStore {
    type Error: std::error::Error + 'static;

    /// Read the snapshot stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key` for `ttl_days` days.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform refuses the write.
    fn set(&mut self, key: &str, value: &str, ttl_days: u32) -> Result<(), Self::Error>;
}

/// The page root whose class list switches the stylesheet rules on and off.
pub trait RootSurface {
    /// Add `class` when `enabled`, remove it otherwise.
    fn toggle_class(&mut self, class: &str, enabled: bool);
}
