//! Scenario catalog shared by the logic and browser runners.

use accessbar_core::{ControlId, ToolbarAction};

/// One instruction in a scenario script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Perform a toolbar action (a click, or Escape for `CloseMenu`).
    Act(ToolbarAction),
    /// The preference tokens on the page root, in any order.
    ExpectTokens(&'static [&'static str]),
    ExpectMenuOpen(bool),
    /// The decoded snapshot value currently stored.
    ExpectSnapshot(&'static str),
    ExpectLabel(ControlId, &'static str),
    /// Rebuild the toolbar from the stored snapshot, as a page load would.
    Reload,
    /// Seeded random actions, checking the invariants after each one.
    RandomWalk { steps: usize },
}

impl Step {
    #[must_use]
    pub const fn browser_supported(&self) -> bool {
        !matches!(self, Self::RandomWalk { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Scenario {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub steps: Vec<Step>,
}

impl Scenario {
    #[must_use]
    pub fn browser_supported(&self) -> bool {
        self.steps.iter().all(Step::browser_supported)
    }

    /// Whether the result depends on the seed.
    #[must_use]
    pub fn is_seeded(&self) -> bool {
        !self.browser_supported()
    }
}

const SCENARIO_KEYS: [&str; 6] = [
    "smoke",
    "text-size-cycle",
    "contrast-exclusive",
    "hide-assets",
    "persistence-reload",
    "random-walk",
];

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIO_KEYS
        .iter()
        .filter_map(|key| get_scenario(key))
        .map(|scenario| (scenario.key, scenario.description))
        .collect()
}

#[must_use]
pub fn all_scenario_keys() -> Vec<String> {
    SCENARIO_KEYS.iter().map(|key| (*key).to_string()).collect()
}

#[must_use]
pub fn get_scenario(key: &str) -> Option<Scenario> {
    use Step::{Act, ExpectLabel, ExpectMenuOpen, ExpectSnapshot, ExpectTokens, RandomWalk, Reload};
    use ToolbarAction::{
        CloseMenu, CycleTextSize, SetDarkContrast, SetLightContrast, ToggleHideAssets, ToggleMenu,
    };

    let (name, description, steps) = match key {
        "smoke" => (
            "Smoke",
            "Open the menu, enlarge text once, close the menu",
            vec![
                ExpectMenuOpen(false),
                Act(ToggleMenu),
                ExpectMenuOpen(true),
                Act(CycleTextSize),
                ExpectTokens(&["accessTextSize1"]),
                ExpectLabel(ControlId::TextSize, "Text Size (1/4)"),
                Act(CloseMenu),
                ExpectMenuOpen(false),
                ExpectTokens(&["accessTextSize1"]),
            ],
        ),
        "text-size-cycle" => (
            "Text Size Cycle",
            "Five text-size clicks walk 1..4 and return to the default size",
            vec![
                Act(ToggleMenu),
                Act(CycleTextSize),
                ExpectTokens(&["accessTextSize1"]),
                Act(CycleTextSize),
                ExpectTokens(&["accessTextSize2"]),
                Act(CycleTextSize),
                ExpectTokens(&["accessTextSize3"]),
                Act(CycleTextSize),
                ExpectTokens(&["accessTextSize4"]),
                ExpectLabel(ControlId::TextSize, "Text Size (4/4)"),
                Act(CycleTextSize),
                ExpectTokens(&[]),
                ExpectLabel(ControlId::TextSize, "Text Size"),
                ExpectSnapshot(""),
            ],
        ),
        "contrast-exclusive" => (
            "Contrast Exclusive",
            "Light and dark contrast replace each other and toggle off",
            vec![
                Act(ToggleMenu),
                Act(SetLightContrast),
                ExpectTokens(&["accessLightContrast"]),
                Act(SetDarkContrast),
                ExpectTokens(&["accessDarkContrast"]),
                ExpectSnapshot("accessDarkContrast"),
                Act(SetDarkContrast),
                ExpectTokens(&[]),
                Act(SetLightContrast),
                Act(SetLightContrast),
                ExpectTokens(&[]),
            ],
        ),
        "hide-assets" => (
            "Hide Assets",
            "Hiding media toggles on and back off",
            vec![
                Act(ToggleMenu),
                Act(ToggleHideAssets),
                ExpectTokens(&["accessRemoveAssets"]),
                ExpectSnapshot("accessRemoveAssets"),
                Act(ToggleHideAssets),
                ExpectTokens(&[]),
                ExpectSnapshot(""),
            ],
        ),
        "persistence-reload" => (
            "Persistence Reload",
            "Preferences survive a page reload; the menu does not",
            vec![
                Act(ToggleMenu),
                Act(CycleTextSize),
                Act(CycleTextSize),
                Act(CycleTextSize),
                Act(SetLightContrast),
                Act(ToggleHideAssets),
                ExpectSnapshot("accessTextSize3 accessLightContrast accessRemoveAssets"),
                Reload,
                ExpectMenuOpen(false),
                ExpectTokens(&["accessTextSize3", "accessLightContrast", "accessRemoveAssets"]),
                Act(ToggleMenu),
                ExpectLabel(ControlId::TextSize, "Text Size (3/4)"),
            ],
        ),
        "random-walk" => (
            "Random Walk",
            "Seeded random clicks with invariant checks after each (logic only)",
            vec![RandomWalk { steps: 250 }, Reload, RandomWalk { steps: 50 }],
        ),
        _ => return None,
    };

    Some(Scenario {
        key: SCENARIO_KEYS.iter().find(|k| **k == key).copied()?,
        name,
        description,
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_key_resolves() {
        for key in all_scenario_keys() {
            let scenario = get_scenario(&key).expect("known scenario");
            assert_eq!(scenario.key, key);
            assert!(!scenario.steps.is_empty());
        }
        assert_eq!(list_scenarios().len(), SCENARIO_KEYS.len());
        assert!(get_scenario("nope").is_none());
    }

    #[test]
    fn only_random_walk_is_logic_only() {
        for key in all_scenario_keys() {
            let scenario = get_scenario(&key).expect("known scenario");
            assert_eq!(scenario.browser_supported(), key != "random-walk");
        }
    }
}
