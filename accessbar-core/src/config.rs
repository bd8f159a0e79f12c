//! Toolbar configuration bundled with the widget and overridable by the host page.

use log::LevelFilter;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::constants::{DEFAULT_SNAPSHOT_KEY, DEFAULT_SNAPSHOT_TTL_DAYS, LABEL_TOGGLE};
use crate::snapshot::SnapshotSettings;

const DEFAULT_CONFIG_DATA: &str = include_str!("../../accessbar-web/static/accessbar.json");

static BUNDLED: Lazy<ToolbarConfig> = Lazy::new(ToolbarConfig::load_from_static);

/// Screen corner the floating toggle is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolbarPosition {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

impl ToolbarPosition {
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::BottomRight => "accessbar--bottom-right",
            Self::BottomLeft => "accessbar--bottom-left",
            Self::TopRight => "accessbar--top-right",
            Self::TopLeft => "accessbar--top-left",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config overrides must be an object, got {0}")]
    NotAnObject(String),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolbarConfig {
    pub cookie_name: String,
    pub ttl_days: u32,
    /// Id of the element the toolbar is rendered into; created when absent.
    pub mount_id: String,
    pub toggle_label: String,
    /// Image shown on the toggle button instead of the text label.
    pub icon_url: Option<String>,
    pub position: ToolbarPosition,
    pub log_level: String,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_SNAPSHOT_KEY.to_string(),
            ttl_days: DEFAULT_SNAPSHOT_TTL_DAYS,
            mount_id: "accessbar".to_string(),
            toggle_label: LABEL_TOGGLE.to_string(),
            icon_url: None,
            position: ToolbarPosition::default(),
            log_level: "warn".to_string(),
        }
    }
}

impl ToolbarConfig {
    /// Parse the bundled `accessbar.json`, falling back to defaults.
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str::<Self>(DEFAULT_CONFIG_DATA)
            .unwrap_or_default()
            .validated()
    }

    /// Shared copy of the bundled configuration.
    #[must_use]
    pub fn bundled() -> &'static Self {
        &BUNDLED
    }

    /// Replace unusable values with their defaults.
    #[must_use]
    pub fn validated(self) -> Self {
        let defaults = Self::default();
        let non_empty = |value: String, fallback: String| {
            if value.trim().is_empty() {
                fallback
            } else {
                value.trim().to_string()
            }
        };
        Self {
            cookie_name: non_empty(self.cookie_name, defaults.cookie_name),
            ttl_days: self.ttl_days.max(1),
            mount_id: non_empty(self.mount_id, defaults.mount_id),
            toggle_label: non_empty(self.toggle_label, defaults.toggle_label),
            icon_url: self.icon_url.filter(|url| !url.trim().is_empty()),
            position: self.position,
            log_level: self.log_level,
        }
    }

    /// Overlay the fields present in `overrides` onto this config.
    ///
    /// # Errors
    ///
    /// Returns an error when `overrides` is not a JSON object or a field has
    /// the wrong type.
    pub fn merged(&self, overrides: Value) -> Result<Self, ConfigError> {
        let fields = match overrides {
            Value::Object(fields) => fields,
            other => return Err(ConfigError::NotAnObject(other.to_string())),
        };
        let mut base = serde_json::to_value(self)?;
        if let Value::Object(target) = &mut base {
            target.extend(fields);
        }
        Ok(serde_json::from_value::<Self>(base)?.validated())
    }

    #[must_use]
    pub fn snapshot_settings(&self) -> SnapshotSettings {
        SnapshotSettings {
            key: self.cookie_name.clone(),
            ttl_days: self.ttl_days,
        }
    }

    /// Console verbosity; unknown names mean `warn`.
    #[must_use]
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Warn)
    }
}
