// Accessibility helpers for the toolbar itself

use accessbar_core::constants::STATUS_REGION_ID;

/// Update the live region status for screen readers
///
/// Updates the text content of the toolbar's polite live region if present,
/// so assistive technology announces the option that just changed.
pub fn announce(msg: &str) {
    if let Some(node) = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id(STATUS_REGION_ID))
    {
        node.set_text_content(Some(msg));
    }
}

/// Move keyboard focus to the element with `id`, if it can take focus.
pub fn focus_by_id(id: &str) {
    use wasm_bindgen::JsCast;

    if let Some(el) = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    {
        let _ = el.focus();
    }
}
