//! Resolve the toolbar configuration: bundled defaults plus host-page overrides.

use accessbar_core::ToolbarConfig;
use wasm_bindgen::JsValue;

use crate::dom;

/// Global the host page may define before loading the widget, e.g.
/// `window.accessbarConfig = { position: "top-left" }`.
pub const OVERRIDE_GLOBAL: &str = "accessbarConfig";

/// Bundled configuration merged with `window.accessbarConfig`, when present.
#[must_use]
pub fn resolve() -> ToolbarConfig {
    let bundled = ToolbarConfig::bundled().clone();
    let Some(overrides) = read_overrides() else {
        return bundled;
    };
    apply_overrides(&bundled, overrides)
}

/// Merge a JavaScript object over `base`; invalid overrides keep `base`.
#[must_use]
pub fn apply_overrides(base: &ToolbarConfig, overrides: JsValue) -> ToolbarConfig {
    let parsed = match serde_wasm_bindgen::from_value::<serde_json::Value>(overrides) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("ignoring unreadable `{OVERRIDE_GLOBAL}`: {err}");
            return base.clone();
        }
    };
    base.merged(parsed).unwrap_or_else(|err| {
        log::warn!("ignoring invalid `{OVERRIDE_GLOBAL}`: {err}");
        base.clone()
    })
}

fn read_overrides() -> Option<JsValue> {
    let win = dom::window().ok()?;
    let value = js_sys::Reflect::get(&win, &JsValue::from_str(OVERRIDE_GLOBAL)).ok()?;
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value)
    }
}
