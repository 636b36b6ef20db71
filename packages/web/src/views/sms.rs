use dioxus::prelude::*;

use ui::views::{SmsDetailView, SmsView};

use crate::Route;

#[component]
pub fn SmsLogs() -> Element {
    let nav = use_navigator();
    rsx! {
        SmsView {
            on_open: move |id| {
                nav.push(Route::SmsLogDetail { id });
            },
        }
    }
}

#[component]
pub fn SmsLogDetail(id: String) -> Element {
    let nav = use_navigator();
    rsx! {
        SmsDetailView {
            id,
            on_back: move |_| {
                nav.push(Route::SmsLogs {});
            },
        }
    }
}
