use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::dom::js_error_message;

/// Failures talking to the host page.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("`window` is unavailable")]
    NoWindow,
    #[error("`document` is unavailable")]
    NoDocument,
    #[error("document has no <{0}> element")]
    MissingElement(&'static str),
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl WidgetError {
    #[must_use]
    pub fn from_js(value: &JsValue) -> Self {
        Self::Js(js_error_message(value))
    }
}

impl From<JsValue> for WidgetError {
    fn from(value: JsValue) -> Self {
        Self::from_js(&value)
    }
}
