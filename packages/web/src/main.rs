use std::rc::Rc;

use dioxus::prelude::*;

use api::{ApiClient, AppConfig, BearerSession, Session};
use store::QueryCache;
use ui::{provide_data_layer, AuthProvider, Navbar, ToastProvider};

use views::{
    AccountDetail, Accounts, Goals, Login, Settings, SmsLogDetail, SmsLogs, Transactions,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
    #[route("/")]
    Root {},
    #[route("/accounts")]
    Accounts {},
    #[route("/accounts/:id")]
    AccountDetail { id: String },
    #[route("/transactions")]
    Transactions {},
    #[route("/goals")]
    Goals {},
    #[route("/sms")]
    SmsLogs {},
    #[route("/sms/:id")]
    SmsLogDetail { id: String },
    #[route("/settings")]
    Settings {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // One session, client, and cache for the app's lifetime. The bearer
    // session doubles as the sign-in switch: installing a token signs in,
    // clearing it signs out.
    let session = use_hook(BearerSession::new);
    use_context_provider(|| session.clone());
    let client = use_hook(|| {
        let config = AppConfig::load();
        ApiClient::new(&config, Rc::new(session.clone()) as Rc<dyn Session>)
    });
    provide_data_layer(client, QueryCache::new());

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ToastProvider {
            AuthProvider {
                Router::<Route> {}
            }
        }
    }
}

/// Signed-in chrome around every page: navbar plus the routed content.
/// Renders the login screen instead while there is no session.
#[component]
fn Shell() -> Element {
    let mut auth = ui::use_auth();
    let session = use_context::<BearerSession>();
    let state = auth();

    rsx! {
        if state.loading {
            div {
                class: "min-h-screen flex items-center justify-center text-sm text-neutral-500",
                "Loading…"
            }
        } else if state.signed_in() {
            div {
                class: "min-h-screen bg-neutral-50",
                Navbar {
                    on_sign_out: move |_| {
                        session.set_token(None);
                        ui::set_signed_out(&mut auth);
                    },
                    Link { to: Route::Accounts {}, class: "hover:text-neutral-900", "Accounts" }
                    Link { to: Route::Transactions {}, class: "hover:text-neutral-900", "Transactions" }
                    Link { to: Route::Goals {}, class: "hover:text-neutral-900", "Goals" }
                    Link { to: Route::SmsLogs {}, class: "hover:text-neutral-900", "SMS" }
                    Link { to: Route::Settings {}, class: "hover:text-neutral-900", "Settings" }
                }
                Outlet::<Route> {}
            }
        } else {
            Login {}
        }
    }
}

/// Redirect `/` to `/accounts`.
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Accounts {});
    rsx! {}
}
