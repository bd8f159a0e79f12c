//! User actions and the pure reducer that applies them.

use serde::{Deserialize, Serialize};

use crate::prefs::{AccessibilityPreferences, ContrastTheme};

/// Whether the options menu is showing. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MenuVisibility {
    #[default]
    Closed,
    Open,
}

impl MenuVisibility {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Everything a visitor can do with the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolbarAction {
    ToggleMenu,
    /// Escape key or an explicit dismissal.
    CloseMenu,
    CycleTextSize,
    SetLightContrast,
    SetDarkContrast,
    ToggleHideAssets,
}

impl ToolbarAction {
    pub const ALL: [Self; 6] = [
        Self::ToggleMenu,
        Self::CloseMenu,
        Self::CycleTextSize,
        Self::SetLightContrast,
        Self::SetDarkContrast,
        Self::ToggleHideAssets,
    ];

    /// Actions that change preferences and are followed by a snapshot write.
    #[must_use]
    pub const fn persists(self) -> bool {
        !matches!(self, Self::ToggleMenu | Self::CloseMenu)
    }

    /// Stable kebab-case name used in logs and QA scenarios.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::ToggleMenu => "toggle-menu",
            Self::CloseMenu => "close-menu",
            Self::CycleTextSize => "cycle-text-size",
            Self::SetLightContrast => "set-light-contrast",
            Self::SetDarkContrast => "set-dark-contrast",
            Self::ToggleHideAssets => "toggle-hide-assets",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.id() == id)
    }
}

/// Everything the widget instance owns: the preferences plus menu visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidgetState {
    pub prefs: AccessibilityPreferences,
    pub menu: MenuVisibility,
}

impl WidgetState {
    /// Start from restored preferences with the menu closed.
    #[must_use]
    pub const fn restored(prefs: AccessibilityPreferences) -> Self {
        Self {
            prefs,
            menu: MenuVisibility::Closed,
        }
    }
}

/// Apply `action` to `state`, returning the next state.
#[must_use]
pub fn reduce(state: &WidgetState, action: ToolbarAction) -> WidgetState {
    let WidgetState { prefs, menu } = *state;
    match action {
        ToolbarAction::ToggleMenu => WidgetState {
            prefs,
            menu: menu.toggled(),
        },
        ToolbarAction::CloseMenu => WidgetState {
            prefs,
            menu: MenuVisibility::Closed,
        },
        ToolbarAction::CycleTextSize => WidgetState {
            prefs: prefs.cycle_text_size(),
            menu,
        },
        ToolbarAction::SetLightContrast => WidgetState {
            prefs: prefs.set_contrast(ContrastTheme::Light),
            menu,
        },
        ToolbarAction::SetDarkContrast => WidgetState {
            prefs: prefs.set_contrast(ContrastTheme::Dark),
            menu,
        },
        ToolbarAction::ToggleHideAssets => WidgetState {
            prefs: prefs.toggle_hide_assets(),
            menu,
        },
    }
}
