use accessbar_core::constants::{MENU_ID, STATUS_REGION_ID, TOGGLE_BUTTON_ID};
use accessbar_core::{ControlView, ToolbarAction, ToolbarPosition, ToolbarViewState};
use web_sys::KeyboardEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub view: ToolbarViewState,
    pub on_action: Callback<ToolbarAction>,
    pub toggle_label: AttrValue,
    #[prop_or_default]
    pub icon_url: Option<AttrValue>,
    #[prop_or_default]
    pub position: ToolbarPosition,
}

/// Floating toggle plus the four option buttons. Stateless: everything shown
/// comes from `view`, every click is reported through `on_action`.
#[function_component(ToolbarMenu)]
pub fn toolbar_menu(p: &Props) -> Html {
    let open = p.view.menu_open;

    let on_toggle = {
        let cb = p.on_action.clone();
        Callback::from(move |_: MouseEvent| cb.emit(ToolbarAction::ToggleMenu))
    };

    let on_keydown = {
        let cb = p.on_action.clone();
        Callback::from(move |e: KeyboardEvent| {
            if open && e.key() == "Escape" {
                e.prevent_default();
                cb.emit(ToolbarAction::CloseMenu);
            }
        })
    };

    let toggle_content = p.icon_url.as_ref().map_or_else(
        || html! { { p.toggle_label.clone() } },
        |src| {
            html! {
                <img class="accessbar-icon" src={src.clone()} alt={p.toggle_label.clone()} />
            }
        },
    );

    html! {
      <div class={classes!("accessbar", p.position.css_class())} onkeydown={on_keydown}>
        <button
            id={TOGGLE_BUTTON_ID}
            class="accessbar-toggle"
            type="button"
            aria-haspopup="menu"
            aria-expanded={open.to_string()}
            aria-controls={MENU_ID}
            title={p.toggle_label.clone()}
            onclick={on_toggle}
        >
          { toggle_content }
        </button>
        <ul id={MENU_ID} class="accessbar-menu" role="menu" aria-labelledby={TOGGLE_BUTTON_ID} hidden={!open}>
          { for p.view.controls.iter().map(|control| option_item(control, &p.on_action)) }
        </ul>
        <div id={STATUS_REGION_ID} class="accessbar-sr-only" role="status" aria-live="polite"></div>
      </div>
    }
}

fn option_item(control: &ControlView, on_action: &Callback<ToolbarAction>) -> Html {
    let onclick = {
        let cb = on_action.clone();
        let action = control.id.action();
        Callback::from(move |_: MouseEvent| cb.emit(action))
    };
    let class = classes!(
        "accessbar-option",
        control.active.then_some("accessbar-option--active")
    );
    html! {
      <li role="none">
        <button
            id={control.id.dom_id()}
            {class}
            type="button"
            role="menuitemcheckbox"
            aria-checked={control.active.to_string()}
            {onclick}
        >
          { control.label.clone() }
        </button>
      </li>
    }
}
