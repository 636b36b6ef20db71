use dioxus::prelude::*;

use ui::views::AccountDetailView;

use crate::Route;

#[component]
pub fn AccountDetail(id: String) -> Element {
    let nav = use_navigator();
    rsx! {
        AccountDetailView {
            id,
            on_back: move |_| {
                nav.push(Route::Accounts {});
            },
        }
    }
}
