use dioxus::prelude::*;

use ui::views::AccountsView;

use crate::Route;

#[component]
pub fn Accounts() -> Element {
    let nav = use_navigator();
    rsx! {
        AccountsView {
            on_open_account: move |id| {
                nav.push(Route::AccountDetail { id });
            },
        }
    }
}
