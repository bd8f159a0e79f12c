pub mod probe;
pub mod runner;
pub mod session;

pub use probe::PageProbe;
pub use runner::{BrowserScenario, ScenarioCtx};
pub use session::{BrowserConfig, BrowserKind, new_session};
