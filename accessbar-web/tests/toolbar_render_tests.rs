use accessbar_core::{
    AccessibilityPreferences, MenuVisibility, ToolbarAction, ToolbarPosition, ToolbarViewState,
    WidgetState, reduce,
};
use accessbar_web::components::toolbar_menu::{Props, ToolbarMenu};
use futures::executor::block_on;
use yew::{AttrValue, Callback, LocalServerRenderer};

fn render(props: Props) -> String {
    block_on(LocalServerRenderer::<ToolbarMenu>::with_props(props).render())
}

fn props(view: ToolbarViewState) -> Props {
    Props {
        view,
        on_action: Callback::noop(),
        toggle_label: AttrValue::from("Accessibility Options"),
        icon_url: None,
        position: ToolbarPosition::default(),
    }
}

#[test]
fn toolbar_renders_all_four_controls() {
    let html = render(props(ToolbarViewState::default()));
    for id in [
        "accessbarTextSize",
        "accessbarLightContrast",
        "accessbarDarkContrast",
        "accessbarHideAssets",
    ] {
        assert!(html.contains(id), "missing control {id}");
    }
    assert!(html.contains("role=\"menu\""));
    assert!(html.contains("aria-live=\"polite\""));
    assert!(html.contains("accessbar--bottom-right"));
}

#[test]
fn icon_replaces_text_label() {
    let html = render(Props {
        icon_url: Some(AttrValue::from("https://cdn.example/a11y.png")),
        position: ToolbarPosition::TopLeft,
        ..props(ToolbarViewState::default())
    });
    assert!(html.contains("accessbar-icon"));
    assert!(html.contains("https://cdn.example/a11y.png"));
    assert!(html.contains("alt=\"Accessibility Options\""));
    assert!(html.contains("accessbar--top-left"));
}

#[test]
fn view_after_actions_drives_labels() {
    let mut state = WidgetState::restored(AccessibilityPreferences::default());
    for action in [
        ToolbarAction::ToggleMenu,
        ToolbarAction::CycleTextSize,
        ToolbarAction::CycleTextSize,
        ToolbarAction::CycleTextSize,
        ToolbarAction::CycleTextSize,
        ToolbarAction::ToggleHideAssets,
    ] {
        state = reduce(&state, action);
    }
    assert_eq!(state.menu, MenuVisibility::Open);
    let html = render(props(ToolbarViewState::from_state(&state)));
    assert!(html.contains("Text Size (4/4)"));
    assert_eq!(html.matches("aria-checked=\"true\"").count(), 2);
}
