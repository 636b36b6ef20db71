//! Domain hooks: one module per backend domain, each a thin
//! parameterization of the generic query/mutation hooks — the endpoint
//! call, the cache-key shape (filters included), and the invalidation graph
//! on mutation success.
//!
//! Every read is gated on `AuthState::can_query`; a signed-out or
//! not-yet-loaded session never issues a network call.

mod accounts;
pub use accounts::{
    account_key, accounts_key, use_account, use_accounts, use_create_account, use_delete_account,
    use_update_account, use_upload_statement, StatementUpload,
};

mod transactions;
pub use transactions::{
    transactions_key, transactions_root, use_create_transaction, use_delete_transaction,
    use_parse_receipt, use_transactions, ReceiptUpload,
};

mod goals;
pub use goals::{goal_key, goals_key, use_create_goal, use_investment_goal, use_investment_goals, use_update_goal};

mod sms;
pub use sms::{sms_key, sms_log_key, use_ingest_sms, use_sms_log, use_sms_logs};

mod static_data;
pub use static_data::{use_banks, use_categories, use_merchants};

mod user;
pub use user::{use_update_profile, use_user_profile, user_key};
