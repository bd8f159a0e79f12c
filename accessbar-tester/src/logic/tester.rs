use colored::Colorize;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;

use accessbar_core::{
    AccessibilityPreferences, ControlId, MemorySnapshotStore, PreferenceToken, RootClasses,
    SnapshotSettings, SnapshotStore, Toolbar, ToolbarAction,
};

use crate::common::scenario::{Scenario, Step};

/// The toolbar wired to in-memory collaborators.
pub type LogicToolbar = Toolbar<RootClasses, MemorySnapshotStore>;

/// Class the host page already carries; it must survive every render.
const HOST_CLASS: &str = "js";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
    #[serde(with = "duration_vec_serde")]
    pub performance_data: Vec<Duration>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StepError {
    #[error("root tokens {actual:?}, expected {expected:?}")]
    Tokens {
        expected: Vec<String>,
        actual: Vec<String>,
    },
    #[error("menu open is {actual}, expected {expected}")]
    Menu { expected: bool, actual: bool },
    #[error("stored snapshot `{actual}`, expected `{expected}`")]
    Snapshot { expected: String, actual: String },
    #[error("{control:?} label `{actual}`, expected `{expected}`")]
    Label {
        control: ControlId,
        expected: String,
        actual: String,
    },
    #[error("after `{action}` (walk step {step}): {detail}")]
    Invariant {
        step: usize,
        action: &'static str,
        detail: String,
    },
}

pub struct LogicTester {
    verbose: bool,
    settings: SnapshotSettings,
}

impl LogicTester {
    pub fn new(verbose: bool, cookie_name: &str) -> Self {
        Self {
            verbose,
            settings: SnapshotSettings {
                key: cookie_name.to_string(),
                ..SnapshotSettings::default()
            },
        }
    }

    pub fn run_scenario(
        &self,
        scenario: &Scenario,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        // Scripted scenarios do not consume randomness; one seed is enough.
        let seeds = if scenario.is_seeded() {
            seeds
        } else {
            &seeds[..seeds.len().min(1)]
        };

        let mut results = Vec::new();
        for &seed in seeds {
            if self.verbose {
                println!(
                    "🧪 Testing scenario: {} (seed: {})",
                    scenario.name.bright_white(),
                    seed
                );
            }
            results.push(self.run_single_scenario(scenario, seed, iterations));
        }
        results
    }

    fn run_single_scenario(
        &self,
        scenario: &Scenario,
        seed: u64,
        iterations: usize,
    ) -> ScenarioResult {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::new();

        for i in 0..iterations {
            let start_time = Instant::now();
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));

            match self.run_steps(&scenario.steps, iteration_seed) {
                Ok(toolbar) => {
                    successes += 1;
                    let duration = start_time.elapsed();
                    performance_data.push(duration);
                    if self.verbose {
                        println!(
                            "  ✅ Iteration {}/{} passed ({duration:?}) final tokens: `{}`",
                            i + 1,
                            iterations,
                            toolbar.prefs()
                        );
                    }
                }
                Err(err) => {
                    if self.verbose {
                        println!(
                            "  ❌ Iteration {}/{} failed: {}",
                            i + 1,
                            iterations,
                            err.to_string().red()
                        );
                    }
                    failures.push(format!(
                        "Iteration {} (seed {iteration_seed}): {err}",
                        i + 1
                    ));
                }
            }
        }

        let average_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: scenario.name.to_string(),
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration,
            performance_data,
        }
    }

    /// Play `steps` against a fresh page with an empty snapshot store.
    ///
    /// # Errors
    /// Returns the first expectation or invariant that does not hold.
    pub fn run_steps(&self, steps: &[Step], seed: u64) -> Result<LogicToolbar, StepError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut toolbar = Toolbar::initialize(
            RootClasses::from_classes([HOST_CLASS]),
            MemorySnapshotStore::new(),
            self.settings.clone(),
        );

        for step in steps {
            match step {
                Step::Act(action) => {
                    toolbar.on_action(*action);
                }
                Step::ExpectTokens(expected) => expect_tokens(&toolbar, expected)?,
                Step::ExpectMenuOpen(expected) => {
                    let actual = toolbar.view().menu_open;
                    if actual != *expected {
                        return Err(StepError::Menu {
                            expected: *expected,
                            actual,
                        });
                    }
                }
                Step::ExpectSnapshot(expected) => {
                    let actual = stored_snapshot(&toolbar);
                    if actual != *expected {
                        return Err(StepError::Snapshot {
                            expected: (*expected).to_string(),
                            actual,
                        });
                    }
                }
                Step::ExpectLabel(control, expected) => {
                    let actual = &toolbar.view().control(*control).label;
                    if actual != expected {
                        return Err(StepError::Label {
                            control: *control,
                            expected: (*expected).to_string(),
                            actual: actual.clone(),
                        });
                    }
                }
                Step::Reload => toolbar = self.reload(toolbar),
                Step::RandomWalk { steps } => random_walk(&mut toolbar, &mut rng, *steps)?,
            }
        }

        Ok(toolbar)
    }

    fn reload(&self, toolbar: LogicToolbar) -> LogicToolbar {
        let (root, store) = toolbar.into_parts();
        Toolbar::initialize(root, store, self.settings.clone())
    }
}

fn stored_snapshot(toolbar: &LogicToolbar) -> String {
    toolbar
        .store()
        .get(&toolbar.settings().key)
        .unwrap_or_default()
}

fn sorted(tokens: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
    let mut tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
    tokens.sort();
    tokens
}

fn expect_tokens(toolbar: &LogicToolbar, expected: &[&str]) -> Result<(), StepError> {
    let expected = sorted(expected.iter().copied());
    let actual = sorted(toolbar.root().preference_tokens());
    if actual == expected {
        Ok(())
    } else {
        Err(StepError::Tokens { expected, actual })
    }
}

fn random_walk(
    toolbar: &mut LogicToolbar,
    rng: &mut ChaCha8Rng,
    steps: usize,
) -> Result<(), StepError> {
    for step in 0..steps {
        let action = ToolbarAction::ALL[rng.gen_range(0..ToolbarAction::ALL.len())];
        let writes_before = toolbar.store().writes();
        toolbar.on_action(action);
        check_invariants(toolbar, action, writes_before).map_err(|detail| {
            StepError::Invariant {
                step,
                action: action.id(),
                detail,
            }
        })?;
    }
    Ok(())
}

fn check_invariants(
    toolbar: &LogicToolbar,
    action: ToolbarAction,
    writes_before: usize,
) -> Result<(), String> {
    let prefs = toolbar.prefs();
    let root = toolbar.root();

    let expected: Vec<&str> = prefs.tokens().iter().map(|token| token.as_str()).collect();
    if sorted(root.preference_tokens()) != sorted(expected) {
        return Err(format!(
            "root tokens {:?} do not match preferences `{prefs}`",
            root.preference_tokens()
        ));
    }
    if !root.contains(HOST_CLASS) {
        return Err(format!("host class `{HOST_CLASS}` was removed"));
    }

    let contrast_tokens = [PreferenceToken::LightContrast, PreferenceToken::DarkContrast]
        .into_iter()
        .filter(|token| root.contains(token.as_str()))
        .count();
    if contrast_tokens > 1 {
        return Err("both contrast modes are active".to_string());
    }
    let size_tokens = root
        .preference_tokens()
        .iter()
        .filter(|class| matches!(PreferenceToken::parse(class), Some(PreferenceToken::TextSize(_))))
        .count();
    if size_tokens > 1 {
        return Err(format!("{size_tokens} text size levels are active"));
    }

    if AccessibilityPreferences::decode(&prefs.encode()) != *prefs {
        return Err(format!("`{prefs}` does not survive encode/decode"));
    }

    let writes = toolbar.store().writes();
    if action.persists() {
        if writes != writes_before + 1 {
            return Err(format!("expected one snapshot write, saw {}", writes - writes_before));
        }
        let stored = stored_snapshot(toolbar);
        if stored != prefs.encode() {
            return Err(format!("stored `{stored}` but preferences are `{prefs}`"));
        }
    } else if writes != writes_before {
        return Err("menu action wrote a snapshot".to_string());
    }

    if toolbar.view().menu_open != toolbar.state().menu.is_open() {
        return Err("view menu state diverged from widget state".to_string());
    }

    Ok(())
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}

mod duration_vec_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis: Vec<u128> = durations.iter().map(Duration::as_millis).collect();
        millis.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis_vec = Vec::<u128>::deserialize(deserializer)?;
        Ok(millis_vec
            .into_iter()
            .map(|m| Duration::from_millis(u64::try_from(m).unwrap_or(0)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::scenario::{all_scenario_keys, get_scenario};

    fn tester() -> LogicTester {
        LogicTester::new(false, "accessToolbar")
    }

    #[test]
    fn every_catalog_scenario_passes() {
        let tester = tester();
        for key in all_scenario_keys() {
            let scenario = get_scenario(&key).expect("known scenario");
            let results = tester.run_scenario(&scenario, &[1337, 42], 3);
            assert!(!results.is_empty());
            for result in results {
                assert!(result.passed, "{key}: {:?}", result.failures);
                assert_eq!(result.successful_iterations, 3);
            }
        }
    }

    #[test]
    fn scripted_scenarios_run_once_per_invocation() {
        let scenario = get_scenario("smoke").expect("smoke");
        let results = tester().run_scenario(&scenario, &[1, 2, 3], 1);
        assert_eq!(results.len(), 1);

        let walk = get_scenario("random-walk").expect("walk");
        let results = tester().run_scenario(&walk, &[1, 2, 3], 1);
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn wrong_expectation_is_reported() {
        let steps = [
            Step::Act(ToolbarAction::SetDarkContrast),
            Step::ExpectTokens(&["accessLightContrast"]),
        ];
        let err = tester().run_steps(&steps, 0).expect_err("mismatch");
        assert_eq!(
            err,
            StepError::Tokens {
                expected: vec!["accessLightContrast".to_string()],
                actual: vec!["accessDarkContrast".to_string()],
            }
        );
    }

    #[test]
    fn reload_keeps_preferences_and_closes_menu() {
        let steps = [
            Step::Act(ToolbarAction::ToggleMenu),
            Step::Act(ToolbarAction::ToggleHideAssets),
            Step::Reload,
            Step::ExpectMenuOpen(false),
            Step::ExpectTokens(&["accessRemoveAssets"]),
        ];
        let toolbar = tester().run_steps(&steps, 0).expect("reload");
        assert!(toolbar.root().contains(HOST_CLASS));
    }

    #[test]
    fn random_walk_is_deterministic_per_seed() {
        let steps = [Step::RandomWalk { steps: 40 }];
        let first = tester().run_steps(&steps, 99).expect("walk");
        let second = tester().run_steps(&steps, 99).expect("walk");
        assert_eq!(first.prefs(), second.prefs());
        assert_eq!(first.store().writes(), second.store().writes());
    }

    #[test]
    fn custom_cookie_name_is_used_for_snapshots() {
        let tester = LogicTester::new(false, "siteA11y");
        let toolbar = tester
            .run_steps(&[Step::Act(ToolbarAction::CycleTextSize)], 0)
            .expect("steps");
        assert!(toolbar.store().entry("siteA11y").is_some());
        assert!(toolbar.store().entry("accessToolbar").is_none());
    }

    #[test]
    fn scenario_result_serializes_durations_as_millis() {
        let result = ScenarioResult {
            scenario_name: "Smoke".to_string(),
            passed: true,
            iterations_run: 1,
            successful_iterations: 1,
            failures: Vec::new(),
            average_duration: Duration::from_millis(12),
            performance_data: vec![Duration::from_millis(12)],
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["average_duration"], 12);
        assert_eq!(json["performance_data"][0], 12);
    }
}
