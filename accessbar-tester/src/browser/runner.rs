use anyhow::{Result, bail, ensure};
use std::time::Duration;

use crate::browser::PageProbe;
use crate::common::scenario::{Scenario, Step};

/// Rendering is asynchronous, so expectations are polled for this long.
const SETTLE_ATTEMPTS: u32 = 20;
const SETTLE_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct ScenarioCtx {
    pub base_url: String,
    pub verbose: bool,
}

#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, probe: &PageProbe<'_>, ctx: &ScenarioCtx) -> Result<()>;
}

#[async_trait::async_trait]
impl BrowserScenario for Scenario {
    async fn run_browser(&self, probe: &PageProbe<'_>, ctx: &ScenarioCtx) -> Result<()> {
        ensure!(
            self.browser_supported(),
            "scenario `{}` only runs in logic mode",
            self.key
        );
        probe.open_fresh(&ctx.base_url).await?;

        for (index, step) in self.steps.iter().enumerate() {
            if ctx.verbose {
                println!("   step {}: {step:?}", index + 1);
            }
            run_step(probe, step).await?;
        }
        Ok(())
    }
}

async fn run_step(probe: &PageProbe<'_>, step: &Step) -> Result<()> {
    match step {
        Step::Act(action) => probe.perform(*action).await,
        Step::Reload => probe.reload().await,
        Step::ExpectTokens(expected) => {
            let mut expected: Vec<String> = expected.iter().map(|t| (*t).to_string()).collect();
            expected.sort();
            settle("root tokens", &expected, || probe.root_tokens()).await
        }
        Step::ExpectMenuOpen(expected) => settle("menu open", expected, || probe.menu_open()).await,
        Step::ExpectSnapshot(expected) => {
            settle("snapshot cookie", &(*expected).to_string(), || probe.snapshot()).await
        }
        Step::ExpectLabel(control, expected) => {
            settle(
                "control label",
                &(*expected).to_string(),
                || probe.label(*control),
            )
            .await
        }
        Step::RandomWalk { .. } => bail!("random walks are not supported in the browser"),
    }
}

async fn settle<T, F, Fut>(what: &str, expected: &T, mut read: F) -> Result<()>
where
    T: PartialEq + std::fmt::Debug,
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut actual = read().await?;
    for _ in 1..SETTLE_ATTEMPTS {
        if actual == *expected {
            return Ok(());
        }
        tokio::time::sleep(SETTLE_INTERVAL).await;
        actual = read().await?;
    }
    ensure!(
        actual == *expected,
        "{what} was {actual:?}, expected {expected:?}"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn settle_waits_for_the_value_to_arrive() {
        let reads = Cell::new(0);
        let result = tokio_test::block_on(settle("count", &3, || {
            reads.set(reads.get() + 1);
            let value = reads.get();
            async move { Ok(value) }
        }));
        assert!(result.is_ok());
        assert_eq!(reads.get(), 3);
    }

    #[tokio::test]
    async fn settle_reports_the_last_value() {
        let err = settle("menu open", &true, || async { Ok(false) })
            .await
            .expect_err("never true");
        assert_eq!(err.to_string(), "menu open was false, expected true");
    }
}
