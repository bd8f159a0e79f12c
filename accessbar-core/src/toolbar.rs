//! The widget instance: owns the state and binds it to the page and the snapshot.

use crate::action::{ToolbarAction, WidgetState, reduce};
use crate::prefs::{AccessibilityPreferences, PreferenceToken};
use crate::snapshot::SnapshotSettings;
use crate::view::ToolbarViewState;
use crate::{RootSurface, SnapshotStore};

/// One toolbar on one page.
///
/// Every visible effect goes through the two collaborators: the page root
/// (`R`) receives the preference classes and the snapshot store (`S`)
/// receives the encoded preferences after each preference change.
#[derive(Debug)]
pub struct Toolbar<R, S> {
    state: WidgetState,
    view: ToolbarViewState,
    root: R,
    store: S,
    settings: SnapshotSettings,
}

impl<R, S> Toolbar<R, S>
where
    R: RootSurface,
    S: SnapshotStore,
{
    /// Restore preferences from `store`, render them once, and leave the menu closed.
    pub fn initialize(root: R, store: S, settings: SnapshotSettings) -> Self {
        let snapshot = store.get(&settings.key).unwrap_or_default();
        let prefs = AccessibilityPreferences::decode(&snapshot);
        log::debug!("restored accessibility preferences `{prefs}`");
        let state = WidgetState::restored(prefs);
        let mut toolbar = Self {
            state,
            view: ToolbarViewState::from_state(&state),
            root,
            store,
            settings,
        };
        toolbar.render();
        toolbar
    }

    /// Apply a user action: transition, render, and persist when preferences changed.
    pub fn on_action(&mut self, action: ToolbarAction) -> &ToolbarViewState {
        self.state = reduce(&self.state, action);
        log::debug!("{} -> `{}`", action.id(), self.state.prefs);
        self.render();
        if action.persists() {
            self.persist();
        }
        &self.view
    }

    /// Bring the page root classes and the view model in line with the state.
    ///
    /// Only preference tokens are touched on the root; other classes stay.
    pub fn render(&mut self) -> &ToolbarViewState {
        let active = self.state.prefs.tokens();
        for token in PreferenceToken::ALL {
            self.root
                .toggle_class(token.as_str(), active.contains(&token));
        }
        self.view = ToolbarViewState::from_state(&self.state);
        &self.view
    }

    /// Write the encoded preferences to the snapshot store. Failures are logged only.
    pub fn persist(&mut self) {
        let encoded = self.state.prefs.encode();
        if let Err(err) = self
            .store
            .set(&self.settings.key, &encoded, self.settings.ttl_days)
        {
            log::warn!(
                "could not persist accessibility preferences to `{}`: {err}",
                self.settings.key
            );
        }
    }

    #[must_use]
    pub const fn state(&self) -> &WidgetState {
        &self.state
    }

    #[must_use]
    pub const fn prefs(&self) -> &AccessibilityPreferences {
        &self.state.prefs
    }

    #[must_use]
    pub const fn view(&self) -> &ToolbarViewState {
        &self.view
    }

    #[must_use]
    pub const fn root(&self) -> &R {
        &self.root
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn settings(&self) -> &SnapshotSettings {
        &self.settings
    }

    /// Tear down, handing back the collaborators (e.g. to simulate a reload).
    pub fn into_parts(self) -> (R, S) {
        (self.root, self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::{ContrastMode, TextSizeLevel};
    use crate::snapshot::MemorySnapshotStore;
    use crate::view::ControlId;
    use crate::RootClasses;

    const KEY: &str = "accessToolbar";

    fn fresh() -> Toolbar<RootClasses, MemorySnapshotStore> {
        Toolbar::initialize(
            RootClasses::default(),
            MemorySnapshotStore::new(),
            SnapshotSettings::default(),
        )
    }

    #[test]
    fn initialize_applies_persisted_snapshot() {
        let store = MemorySnapshotStore::new().with_snapshot(KEY, "accessTextSize4 accessRemoveAssets");
        let toolbar = Toolbar::initialize(RootClasses::default(), store, SnapshotSettings::default());
        assert_eq!(toolbar.prefs().text_size, TextSizeLevel::new(4));
        assert!(toolbar.prefs().assets_hidden);
        assert_eq!(
            toolbar.root().preference_tokens(),
            vec!["accessTextSize4", "accessRemoveAssets"]
        );
        assert!(!toolbar.view().menu_open);
        assert_eq!(toolbar.store().writes(), 0);
    }

    #[test]
    fn missing_snapshot_means_defaults() {
        let toolbar = fresh();
        assert!(toolbar.prefs().is_default());
        assert!(toolbar.root().preference_tokens().is_empty());
    }

    #[test]
    fn toggle_menu_never_persists_or_changes_preferences() {
        let mut toolbar = fresh();
        let before = *toolbar.prefs();
        assert!(toolbar.on_action(ToolbarAction::ToggleMenu).menu_open);
        assert!(!toolbar.on_action(ToolbarAction::ToggleMenu).menu_open);
        toolbar.on_action(ToolbarAction::ToggleMenu);
        assert!(!toolbar.on_action(ToolbarAction::CloseMenu).menu_open);
        assert_eq!(*toolbar.prefs(), before);
        assert_eq!(toolbar.store().writes(), 0);
    }

    #[test]
    fn preference_actions_render_and_persist() {
        let mut toolbar = fresh();
        toolbar.on_action(ToolbarAction::CycleTextSize);
        toolbar.on_action(ToolbarAction::CycleTextSize);
        let view = toolbar.on_action(ToolbarAction::SetDarkContrast).clone();

        assert_eq!(view.control(ControlId::TextSize).label, "Text Size (2/4)");
        assert!(view.control(ControlId::DarkContrast).active);
        assert_eq!(
            toolbar.root().preference_tokens(),
            vec!["accessTextSize2", "accessDarkContrast"]
        );
        assert_eq!(toolbar.store().writes(), 3);
        assert_eq!(
            toolbar.store().get(KEY).as_deref(),
            Some("accessTextSize2 accessDarkContrast")
        );
        assert_eq!(toolbar.store().entry(KEY).map(|e| e.ttl_days), Some(2));
    }

    #[test]
    fn render_removes_stale_tokens_and_keeps_foreign_classes() {
        let root = RootClasses::from_classes(["js", "accessLightContrast", "accessTextSize3"]);
        let store = MemorySnapshotStore::new().with_snapshot(KEY, "accessDarkContrast");
        let toolbar = Toolbar::initialize(root, store, SnapshotSettings::default());
        assert_eq!(toolbar.prefs().contrast, ContrastMode::Dark);
        assert_eq!(toolbar.root().classes(), vec!["js", "accessDarkContrast"]);
    }

    #[test]
    fn persistence_failure_keeps_state_in_memory() {
        let mut toolbar = Toolbar::initialize(
            RootClasses::default(),
            MemorySnapshotStore::disabled(),
            SnapshotSettings::default(),
        );
        toolbar.on_action(ToolbarAction::ToggleHideAssets);
        assert!(toolbar.prefs().assets_hidden);
        assert_eq!(toolbar.root().preference_tokens(), vec!["accessRemoveAssets"]);
        assert_eq!(toolbar.store().get(KEY), None);
    }

    #[test]
    fn preferences_survive_reload_through_store() {
        let mut toolbar = fresh();
        toolbar.on_action(ToolbarAction::SetLightContrast);
        toolbar.on_action(ToolbarAction::ToggleMenu);
        let (_, store) = toolbar.into_parts();

        let reloaded = Toolbar::initialize(RootClasses::default(), store, SnapshotSettings::default());
        assert_eq!(reloaded.prefs().contrast, ContrastMode::Light);
        assert!(!reloaded.view().menu_open);
    }

    #[test]
    fn custom_settings_choose_key_and_ttl() {
        let settings = SnapshotSettings {
            key: "a11y".to_string(),
            ttl_days: 5,
        };
        let mut toolbar =
            Toolbar::initialize(RootClasses::default(), MemorySnapshotStore::new(), settings);
        toolbar.on_action(ToolbarAction::ToggleHideAssets);
        assert_eq!(toolbar.store().entry("a11y").map(|e| e.ttl_days), Some(5));
        assert_eq!(toolbar.store().get(KEY), None);
    }
}
