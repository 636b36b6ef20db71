//! Authentication context and hooks for the UI.

use api::{parse_api_error, user, UserProfile};
use dioxus::prelude::*;

use crate::platform::sleep_ms;
use crate::providers::use_api_client;

/// How often the backend is probed for the online flag.
const HEALTH_POLL_SECS: u64 = 30;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    pub loading: bool,
    /// Whether the server is reachable (last connectivity check succeeded).
    pub online: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            online: false,
        }
    }
}

impl AuthState {
    /// The session layer has answered at least once.
    pub fn ready(&self) -> bool {
        !self.loading
    }

    pub fn signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Gate for every domain read: never issue a network call before the
    /// session is loaded or for a signed-out user.
    pub fn can_query(&self) -> bool {
        self.ready() && self.signed_in()
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user signs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that manages authentication state.
/// Wrap your app with this component (inside the data layer providers).
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let client = use_api_client();
    let mut auth_state = use_signal(AuthState::default);
    use_context_provider(|| auth_state);

    // Fetch the profile on mount.
    let mount_client = client.clone();
    let _ = use_resource(move || {
        let client = mount_client.clone();
        async move {
            match user::current(&client).await {
                Ok(profile) => {
                    auth_state.set(AuthState {
                        user: Some(profile),
                        loading: false,
                        online: true,
                    });
                }
                Err(e) => {
                    let normalized = parse_api_error(&e);
                    // 401/403 is a clean signed-out answer; anything
                    // network-shaped means the backend was unreachable.
                    auth_state.set(AuthState {
                        user: None,
                        loading: false,
                        online: normalized.is_client_error(),
                    });
                }
            }
        }
    });

    // Periodic connectivity check.
    use_effect(move || {
        let client = client.clone();
        spawn(async move {
            loop {
                sleep_ms(HEALTH_POLL_SECS * 1000).await;

                // Don't probe while the initial load is still in progress.
                if auth_state().loading {
                    continue;
                }
                let online = api::health::check(&client).await.is_ok();
                if auth_state().online != online {
                    let current = auth_state();
                    auth_state.set(AuthState { online, ..current });
                }
            }
        });
    });

    rsx! {
        {children}
    }
}

/// Sign the auth context in with a freshly fetched profile
/// (used after installing a bearer token).
pub fn set_signed_in(auth: &mut Signal<AuthState>, profile: UserProfile) {
    auth.set(AuthState {
        user: Some(profile),
        loading: false,
        online: true,
    });
}

/// Clear the signed-in user, keeping the connectivity flag.
pub fn set_signed_out(auth: &mut Signal<AuthState>) {
    let online = auth().online;
    auth.set(AuthState {
        user: None,
        loading: false,
        online,
    });
}
