//! Shared views composing the domain hooks, the form system, and the
//! dropdown/grid primitives. Platform shells supply navigation callbacks;
//! everything else lives here.

mod overlay;
pub use overlay::ModalOverlay;

mod accounts;
pub use accounts::AccountsView;

mod account_detail;
pub use account_detail::AccountDetailView;

mod transactions;
pub use transactions::TransactionsView;

mod goals;
pub use goals::GoalsView;

mod sms;
pub use sms::{SmsDetailView, SmsView};

mod settings;
pub use settings::SettingsView;

use crate::auth::use_auth;

/// Currency code the signed-in user prefers; falls back to the default
/// display currency until the profile has loaded.
pub(crate) fn use_display_currency() -> String {
    let auth = use_auth();
    auth()
        .user
        .map(|u| u.currency)
        .unwrap_or_else(|| "INR".to_string())
}
