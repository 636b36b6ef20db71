use api::{accounts, reconciliation, Account, AccountPayload, UploadReceipt};
use chrono::NaiveDate;
use store::QueryKey;

use crate::auth::use_auth;
use crate::providers::use_api_client;
use crate::query::{
    use_api_mutation, use_api_query, MutationOptions, QueryOptions, UseMutation, UseQuery,
};

use super::transactions::transactions_root;

pub fn accounts_key() -> QueryKey {
    QueryKey::root("accounts")
}

pub fn account_key(id: &str) -> QueryKey {
    accounts_key().join(id)
}

/// All accounts for the signed-in user.
pub fn use_accounts() -> UseQuery<Vec<Account>> {
    let client = use_api_client();
    let auth = use_auth();
    let enabled = auth().can_query();
    use_api_query(
        accounts_key(),
        move || {
            let client = client.clone();
            async move { accounts::list(&client).await }
        },
        QueryOptions::new()
            .enabled(enabled)
            .error_message("Could not load your accounts"),
    )
}

/// One account by id.
pub fn use_account(id: String) -> UseQuery<Account> {
    let client = use_api_client();
    let auth = use_auth();
    let enabled = auth().can_query();
    let fetch_id = id.clone();
    use_api_query(
        account_key(&id),
        move || {
            let client = client.clone();
            let id = fetch_id.clone();
            async move { accounts::get(&client, &id).await }
        },
        QueryOptions::new().enabled(enabled),
    )
}

/// Create an account; refreshes the list on success.
pub fn use_create_account() -> UseMutation<AccountPayload, Account> {
    let client = use_api_client();
    use_api_mutation(
        move |payload: AccountPayload| {
            let client = client.clone();
            async move { accounts::create(&client, &payload).await }
        },
        MutationOptions::new()
            .invalidate(accounts_key())
            .success_toast("Account created"),
    )
}

/// Update the account with the given id; refreshes both the list and the
/// account's own entry.
pub fn use_update_account(id: String) -> UseMutation<AccountPayload, Account> {
    let client = use_api_client();
    let entity = account_key(&id);
    use_api_mutation(
        move |payload: AccountPayload| {
            let client = client.clone();
            let id = id.clone();
            async move { accounts::update(&client, &id, &payload).await }
        },
        MutationOptions::new()
            .invalidate(accounts_key())
            .invalidate(entity)
            .success_toast("Account updated"),
    )
}

/// Delete an account by id. The id is only known per call, so the whole
/// accounts prefix is swept.
pub fn use_delete_account() -> UseMutation<String, ()> {
    let client = use_api_client();
    use_api_mutation(
        move |id: String| {
            let client = client.clone();
            async move { accounts::remove(&client, &id).await }
        },
        MutationOptions::new()
            .invalidate_prefix(accounts_key())
            .success_toast("Account deleted"),
    )
}

/// Input for a reconciliation statement upload.
#[derive(Clone, Debug, PartialEq)]
pub struct StatementUpload {
    pub account_id: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Upload a statement for server-side reconciliation. Matching may adjust
/// transactions and balances, so both prefixes are swept.
pub fn use_upload_statement() -> UseMutation<StatementUpload, UploadReceipt> {
    let client = use_api_client();
    use_api_mutation(
        move |upload: StatementUpload| {
            let client = client.clone();
            async move {
                reconciliation::upload(
                    &client,
                    &upload.account_id,
                    upload.period_start,
                    upload.period_end,
                    &upload.file_name,
                    upload.bytes,
                )
                .await
            }
        },
        MutationOptions::new()
            .invalidate_prefix(accounts_key())
            .invalidate_prefix(transactions_root())
            .success_toast("Statement uploaded"),
    )
}
