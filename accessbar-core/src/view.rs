//! Derived toolbar view model: labels and active flags for each control.

use crate::action::{ToolbarAction, WidgetState};
use crate::constants::{
    DARK_CONTRAST_BUTTON_ID, HIDE_ASSETS_BUTTON_ID, LABEL_DARK_CONTRAST, LABEL_HIDE_ASSETS,
    LABEL_LIGHT_CONTRAST, LABEL_TEXT_SIZE, LIGHT_CONTRAST_BUTTON_ID, TEXT_SIZE_BUTTON_ID,
    TEXT_SIZE_LEVELS,
};
use crate::prefs::{AccessibilityPreferences, ContrastMode, TextSizeLevel};

/// The four option buttons inside the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    TextSize,
    LightContrast,
    DarkContrast,
    HideAssets,
}

impl ControlId {
    pub const ALL: [Self; 4] = [
        Self::TextSize,
        Self::LightContrast,
        Self::DarkContrast,
        Self::HideAssets,
    ];

    #[must_use]
    pub const fn dom_id(self) -> &'static str {
        match self {
            Self::TextSize => TEXT_SIZE_BUTTON_ID,
            Self::LightContrast => LIGHT_CONTRAST_BUTTON_ID,
            Self::DarkContrast => DARK_CONTRAST_BUTTON_ID,
            Self::HideAssets => HIDE_ASSETS_BUTTON_ID,
        }
    }

    /// The action a click on this control dispatches.
    #[must_use]
    pub const fn action(self) -> ToolbarAction {
        match self {
            Self::TextSize => ToolbarAction::CycleTextSize,
            Self::LightContrast => ToolbarAction::SetLightContrast,
            Self::DarkContrast => ToolbarAction::SetDarkContrast,
            Self::HideAssets => ToolbarAction::ToggleHideAssets,
        }
    }

    /// The control driven by `action`, if any.
    #[must_use]
    pub fn for_action(action: ToolbarAction) -> Option<Self> {
        Self::ALL.into_iter().find(|control| control.action() == action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlView {
    pub id: ControlId,
    pub label: String,
    pub active: bool,
}

/// What the toolbar should show. Rebuilt from [`WidgetState`] on every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarViewState {
    pub menu_open: bool,
    pub controls: [ControlView; 4],
}

impl ToolbarViewState {
    #[must_use]
    pub fn from_state(state: &WidgetState) -> Self {
        let prefs = &state.prefs;
        let control = |id: ControlId| ControlView {
            id,
            label: control_label(id, prefs),
            active: control_active(id, prefs),
        };
        Self {
            menu_open: state.menu.is_open(),
            controls: ControlId::ALL.map(control),
        }
    }

    #[must_use]
    pub fn control(&self, id: ControlId) -> &ControlView {
        // `controls` is built from `ControlId::ALL`, so the positions line up.
        let index = ControlId::ALL
            .iter()
            .position(|candidate| *candidate == id)
            .unwrap_or_default();
        &self.controls[index]
    }
}

impl Default for ToolbarViewState {
    fn default() -> Self {
        Self::from_state(&WidgetState::default())
    }
}

/// `Text Size` without a level, `Text Size (2/4)` with one.
#[must_use]
pub fn text_size_label(level: Option<TextSizeLevel>) -> String {
    level.map_or_else(
        || LABEL_TEXT_SIZE.to_string(),
        |level| format!("{LABEL_TEXT_SIZE} ({level}/{TEXT_SIZE_LEVELS})"),
    )
}

fn control_label(id: ControlId, prefs: &AccessibilityPreferences) -> String {
    match id {
        ControlId::TextSize => text_size_label(prefs.text_size),
        ControlId::LightContrast => LABEL_LIGHT_CONTRAST.to_string(),
        ControlId::DarkContrast => LABEL_DARK_CONTRAST.to_string(),
        ControlId::HideAssets => LABEL_HIDE_ASSETS.to_string(),
    }
}

const fn control_active(id: ControlId, prefs: &AccessibilityPreferences) -> bool {
    match id {
        ControlId::TextSize => prefs.text_size.is_some(),
        ControlId::LightContrast => matches!(prefs.contrast, ContrastMode::Light),
        ControlId::DarkContrast => matches!(prefs.contrast, ContrastMode::Dark),
        ControlId::HideAssets => prefs.assets_hidden,
    }
}

/// Screen-reader message describing the outcome of a preference action.
#[must_use]
pub fn announcement(action: ToolbarAction, prefs: &AccessibilityPreferences) -> Option<String> {
    let control = ControlId::for_action(action)?;
    let message = match control {
        ControlId::TextSize => match prefs.text_size {
            Some(level) => format!("Text size {level} of {TEXT_SIZE_LEVELS}"),
            None => "Text size reset".to_string(),
        },
        other => {
            let state = if control_active(other, prefs) { "on" } else { "off" };
            format!("{} {state}", control_label(other, prefs))
        }
    };
    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{MenuVisibility, reduce};

    #[test]
    fn view_reflects_every_preference() {
        let state = WidgetState {
            prefs: AccessibilityPreferences::decode("accessTextSize2 accessDarkContrast"),
            menu: MenuVisibility::Open,
        };
        let view = ToolbarViewState::from_state(&state);
        assert!(view.menu_open);
        assert_eq!(view.control(ControlId::TextSize).label, "Text Size (2/4)");
        assert!(view.control(ControlId::TextSize).active);
        assert!(!view.control(ControlId::LightContrast).active);
        assert!(view.control(ControlId::DarkContrast).active);
        assert!(!view.control(ControlId::HideAssets).active);
    }

    #[test]
    fn default_view_uses_level_less_label() {
        let view = ToolbarViewState::default();
        assert!(!view.menu_open);
        assert_eq!(view.control(ControlId::TextSize).label, "Text Size");
        assert!(view.controls.iter().all(|control| !control.active));
    }

    #[test]
    fn controls_map_to_their_actions() {
        for control in ControlId::ALL {
            assert_eq!(ControlId::for_action(control.action()), Some(control));
        }
        assert_eq!(ControlId::for_action(ToolbarAction::ToggleMenu), None);
    }

    #[test]
    fn announcements_describe_new_state() {
        let state = reduce(&WidgetState::default(), ToolbarAction::SetLightContrast);
        assert_eq!(
            announcement(ToolbarAction::SetLightContrast, &state.prefs).as_deref(),
            Some("Light Contrast on")
        );
        let state = reduce(&state, ToolbarAction::CycleTextSize);
        assert_eq!(
            announcement(ToolbarAction::CycleTextSize, &state.prefs).as_deref(),
            Some("Text size 1 of 4")
        );
        assert_eq!(announcement(ToolbarAction::ToggleMenu, &state.prefs), None);
    }
}
