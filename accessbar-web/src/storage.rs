//! Cookie-backed snapshot store.

use accessbar_core::{SnapshotStore, cookie_assignment, expiry_assignment, find_cookie};

use crate::dom;
use crate::error::WidgetError;

/// Keeps the snapshot in `document.cookie`, URI-encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieSnapshotStore;

impl CookieSnapshotStore {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Delete the snapshot cookie.
    ///
    /// # Errors
    /// Returns an error if the document refuses the cookie assignment.
    pub fn clear(&self, key: &str) -> Result<(), WidgetError> {
        dom::html_document()?
            .set_cookie(&expiry_assignment(key))
            .map_err(WidgetError::from)
    }
}

impl SnapshotStore for CookieSnapshotStore {
    type Error = WidgetError;

    fn get(&self, key: &str) -> Option<String> {
        let header = dom::html_document().ok()?.cookie().ok()?;
        let raw = find_cookie(&header, key)?;
        match js_sys::decode_uri_component(raw) {
            Ok(decoded) => Some(decoded.into()),
            Err(err) => {
                log::debug!(
                    "snapshot cookie `{key}` is not valid URI encoding: {}",
                    dom::js_error_message(&err)
                );
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str, ttl_days: u32) -> Result<(), Self::Error> {
        let encoded: String = js_sys::encode_uri_component(value).into();
        dom::html_document()?
            .set_cookie(&cookie_assignment(key, &encoded, ttl_days))
            .map_err(WidgetError::from)
    }
}
