use dioxus::prelude::*;

use ui::views::SettingsView;

#[component]
pub fn Settings() -> Element {
    rsx! {
        SettingsView {}
    }
}
