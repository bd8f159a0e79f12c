pub mod toolbar_menu;
pub mod toolbar_widget;
