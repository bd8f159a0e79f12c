use accessbar_core::RootSurface;

use crate::dom;

/// The live `<html>` element of the host page.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentRoot;

impl RootSurface for DocumentRoot {
    fn toggle_class(&mut self, class: &str, enabled: bool) {
        let root = match dom::root_element() {
            Ok(root) => root,
            Err(err) => {
                log::warn!("cannot update page root classes: {err}");
                return;
            }
        };
        let list = root.class_list();
        let result = if enabled {
            list.add_1(class)
        } else {
            list.remove_1(class)
        };
        if let Err(err) = result {
            log::warn!(
                "could not toggle `{class}` on the page root: {}",
                dom::js_error_message(&err)
            );
        }
    }
}
