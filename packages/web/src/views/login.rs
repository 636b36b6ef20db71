use api::{parse_api_error, user, BearerSession};
use dioxus::prelude::*;

use ui::{
    push_toast, set_signed_in, use_api_client, use_auth, use_toasts, Button, ButtonVariant, Input,
    Label, ToastLevel,
};

/// Token sign-in: install the pasted bearer token, then prove it by
/// fetching the profile. A rejected token is cleared again.
#[component]
pub fn Login() -> Element {
    let client = use_api_client();
    let session = use_context::<BearerSession>();
    let mut auth = use_auth();
    let mut toasts = use_toasts();
    let mut token = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let handle_sign_in = move |_| {
        let value = token().trim().to_string();
        if value.is_empty() || busy() {
            return;
        }
        let client = client.clone();
        let session = session.clone();
        spawn(async move {
            busy.set(true);
            session.set_token(Some(value));
            match user::current(&client).await {
                Ok(profile) => set_signed_in(&mut auth, profile),
                Err(e) => {
                    session.set_token(None);
                    let normalized = parse_api_error(&e);
                    push_toast(&mut toasts, ToastLevel::Error, &normalized.human_message());
                }
            }
            busy.set(false);
        });
    };

    rsx! {
        div {
            class: "min-h-screen flex items-center justify-center bg-neutral-50",
            div {
                class: "bg-white border border-neutral-200 rounded-lg shadow-sm p-8 w-full max-w-sm",
                h1 { class: "m-0 mb-1 text-xl font-semibold text-neutral-900", "Moneta" }
                p {
                    class: "m-0 mb-6 text-sm text-neutral-500",
                    "Paste your access token to sign in."
                }

                div {
                    class: "mb-4",
                    Label { html_for: "login-token", "Access token" }
                    Input {
                        id: "login-token",
                        r#type: "password",
                        class: "w-full mt-1.5",
                        value: token(),
                        oninput: move |evt: FormEvent| token.set(evt.value()),
                    }
                }

                Button {
                    variant: ButtonVariant::Primary,
                    class: "w-full justify-center",
                    disabled: busy(),
                    onclick: handle_sign_in,
                    if busy() { "Signing in…" } else { "Sign in" }
                }
            }
        }
    }
}
