//! Top navigation bar shared by every signed-in page.

use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::components::{Button, ButtonVariant};
use crate::icons;
use crate::Icon;

/// App header: brand, the caller's navigation links, connectivity dot, and
/// the signed-in user with a sign-out action.
#[component]
pub fn Navbar(on_sign_out: EventHandler<()>, children: Element) -> Element {
    let auth = use_auth();
    let state = auth();

    rsx! {
        header {
            class: "flex items-center justify-between px-6 py-3 bg-white border-b border-neutral-200",
            div {
                class: "flex items-center gap-6",
                span {
                    class: "flex items-center gap-2 text-lg font-semibold text-neutral-900",
                    Icon { width: 18, height: 18, fill: "currentColor", icon: icons::FaWallet }
                    "Moneta"
                }
                nav {
                    class: "flex items-center gap-4 text-sm text-neutral-600",
                    {children}
                }
            }
            div {
                class: "flex items-center gap-4",
                span {
                    class: if state.online {
                        "w-2 h-2 rounded-full bg-emerald-500"
                    } else {
                        "w-2 h-2 rounded-full bg-red-500"
                    },
                    title: if state.online { "Connected" } else { "Offline" },
                }
                if let Some(user) = state.user {
                    span { class: "text-sm text-neutral-700", "{user.name}" }
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_sign_out.call(()),
                        "Sign out"
                    }
                }
            }
        }
    }
}
