use dioxus::prelude::*;

use ui::views::GoalsView;

#[component]
pub fn Goals() -> Element {
    rsx! {
        GoalsView {}
    }
}
