use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlDocument, HtmlElement, Window};

use crate::error::WidgetError;

/// Retrieve the global `window` object.
///
/// # Errors
/// Returns an error when executed outside of a browser context.
pub fn window() -> Result<Window, WidgetError> {
    web_sys::window().ok_or(WidgetError::NoWindow)
}

/// Retrieve the document the toolbar is injected into.
///
/// # Errors
/// Returns an error when the window has no document.
pub fn document() -> Result<Document, WidgetError> {
    window()?.document().ok_or(WidgetError::NoDocument)
}

/// The document as an `HtmlDocument`, which exposes `document.cookie`.
///
/// # Errors
/// Returns an error when the document is not an HTML document.
pub fn html_document() -> Result<HtmlDocument, WidgetError> {
    document()?
        .dyn_into::<HtmlDocument>()
        .map_err(|_| WidgetError::NoDocument)
}

/// The `<html>` element whose class list carries the preference tokens.
///
/// # Errors
/// Returns an error when the document has no root element.
pub fn root_element() -> Result<Element, WidgetError> {
    document()?
        .document_element()
        .ok_or(WidgetError::MissingElement("html"))
}

/// # Errors
/// Returns an error when the document has no `<body>` yet.
pub fn body() -> Result<HtmlElement, WidgetError> {
    document()?.body().ok_or(WidgetError::MissingElement("body"))
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Add a `<style>` element with `css` to `<head>` unless one with `id` exists.
///
/// # Errors
/// Returns an error if the document has no `<head>` or the element cannot be created.
pub fn inject_stylesheet(id: &str, css: &str) -> Result<(), WidgetError> {
    let doc = document()?;
    if doc.get_element_by_id(id).is_some() {
        return Ok(());
    }
    let head = doc.head().ok_or(WidgetError::MissingElement("head"))?;
    let style = doc.create_element("style")?;
    style.set_id(id);
    style.set_text_content(Some(css));
    head.append_child(&style)?;
    Ok(())
}

/// Return the element with `id`, creating it as a `<div>` at the end of `<body>`.
///
/// # Errors
/// Returns an error if the document has no `<body>` or the element cannot be created.
pub fn ensure_container(id: &str) -> Result<Element, WidgetError> {
    let doc = document()?;
    if let Some(existing) = doc.get_element_by_id(id) {
        return Ok(existing);
    }
    let container = doc.create_element("div")?;
    container.set_id(id);
    body()?.append_child(&container)?;
    Ok(container)
}
