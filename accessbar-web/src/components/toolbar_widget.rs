use accessbar_core::constants::TOGGLE_BUTTON_ID;
use accessbar_core::{Toolbar, ToolbarAction, ToolbarConfig, announcement};
use yew::prelude::*;

use crate::components::toolbar_menu::ToolbarMenu;
use crate::storage::CookieSnapshotStore;
use crate::surface::DocumentRoot;

pub type PageToolbar = Toolbar<DocumentRoot, CookieSnapshotStore>;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub config: ToolbarConfig,
}

/// The injected widget: owns the single [`PageToolbar`] instance for the page
/// and re-renders [`ToolbarMenu`] from its view after every action.
#[function_component(ToolbarWidget)]
pub fn toolbar_widget(p: &Props) -> Html {
    let toolbar = {
        let settings = p.config.snapshot_settings();
        use_mut_ref(move || {
            PageToolbar::initialize(DocumentRoot, CookieSnapshotStore::new(), settings)
        })
    };
    let view = {
        let toolbar = toolbar.clone();
        use_state(move || toolbar.borrow().view().clone())
    };

    let on_action = {
        let toolbar = toolbar.clone();
        let view = view.clone();
        Callback::from(move |action: ToolbarAction| {
            let (next, message) = {
                let mut toolbar = toolbar.borrow_mut();
                let next = toolbar.on_action(action).clone();
                (next, announcement(action, toolbar.prefs()))
            };
            if let Some(message) = message {
                crate::a11y::announce(&message);
            }
            if action == ToolbarAction::CloseMenu {
                crate::a11y::focus_by_id(TOGGLE_BUTTON_ID);
            }
            view.set(next);
        })
    };

    html! {
        <ToolbarMenu
            view={(*view).clone()}
            {on_action}
            toggle_label={AttrValue::from(p.config.toggle_label.clone())}
            icon_url={p.config.icon_url.clone().map(AttrValue::from)}
            position={p.config.position}
        />
    }
}
