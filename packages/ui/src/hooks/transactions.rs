use api::{transactions, ParsedReceipt, Transaction, TransactionFilter, TransactionPayload};
use store::QueryKey;

use crate::auth::use_auth;
use crate::providers::use_api_client;
use crate::query::{
    use_api_mutation, use_api_query, MutationOptions, QueryOptions, UseMutation, UseQuery,
};

use super::accounts::accounts_key;

pub fn transactions_root() -> QueryKey {
    QueryKey::root("transactions")
}

/// Key for one filter combination. Filters are key segments, so every
/// combination caches independently and the root prefix sweeps them all.
pub fn transactions_key(filter: &TransactionFilter) -> QueryKey {
    let mut key = transactions_root();
    for segment in filter.key_segments() {
        key = key.join(segment);
    }
    key
}

/// Transactions matching `filter`.
pub fn use_transactions(filter: TransactionFilter) -> UseQuery<Vec<Transaction>> {
    let client = use_api_client();
    let auth = use_auth();
    let enabled = auth().can_query();
    let key = transactions_key(&filter);
    use_api_query(
        key,
        move || {
            let client = client.clone();
            let filter = filter.clone();
            async move { transactions::list(&client, &filter).await }
        },
        QueryOptions::new()
            .enabled(enabled)
            .error_message("Could not load transactions"),
    )
}

/// Create a transaction. Balances are server-derived, so the accounts list
/// refreshes along with every cached transaction filter.
pub fn use_create_transaction() -> UseMutation<TransactionPayload, Transaction> {
    let client = use_api_client();
    use_api_mutation(
        move |payload: TransactionPayload| {
            let client = client.clone();
            async move { transactions::create(&client, &payload).await }
        },
        MutationOptions::new()
            .invalidate_prefix(transactions_root())
            .invalidate_prefix(accounts_key())
            .success_toast("Transaction recorded"),
    )
}

/// Soft-delete a transaction by id.
pub fn use_delete_transaction() -> UseMutation<String, ()> {
    let client = use_api_client();
    use_api_mutation(
        move |id: String| {
            let client = client.clone();
            async move { transactions::soft_delete(&client, &id).await }
        },
        MutationOptions::new()
            .invalidate_prefix(transactions_root())
            .invalidate_prefix(accounts_key())
            .success_toast("Transaction deleted"),
    )
}

/// A receipt image handed to the server-side parser.
#[derive(Clone, Debug, PartialEq)]
pub struct ReceiptUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Extract draft transaction fields from a receipt image. No invalidation:
/// nothing is persisted until the drafted transaction is submitted.
pub fn use_parse_receipt() -> UseMutation<ReceiptUpload, ParsedReceipt> {
    let client = use_api_client();
    use_api_mutation(
        move |upload: ReceiptUpload| {
            let client = client.clone();
            async move { transactions::parse_image(&client, &upload.file_name, upload.bytes).await }
        },
        MutationOptions::new().error_message("Could not read that receipt"),
    )
}
