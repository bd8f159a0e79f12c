use accessbar_core::ToolbarConfig;
use accessbar_core::constants::STYLESHEET_ID;

use crate::components::toolbar_widget::{Props, ToolbarWidget};
use crate::dom;
use crate::error::WidgetError;

/// Inject the stylesheet and render the toolbar into `config.mount_id`.
///
/// # Errors
/// Returns an error if the document has no `<head>`/`<body>` or the DOM
/// refuses the new elements; the page is left untouched in that case.
pub fn mount(config: ToolbarConfig) -> Result<(), WidgetError> {
    let container = dom::ensure_container(&config.mount_id)?;
    dom::inject_stylesheet(STYLESHEET_ID, accessbar_core::stylesheet())?;
    log::info!("mounting accessibility toolbar into #{}", config.mount_id);
    yew::Renderer::<ToolbarWidget>::with_root_and_props(container, Props { config }).render();
    Ok(())
}
