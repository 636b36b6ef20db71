use api::{sms, SmsLog, SmsPayload};
use store::QueryKey;

use crate::auth::use_auth;
use crate::providers::use_api_client;
use crate::query::{
    use_api_mutation, use_api_query, MutationOptions, QueryOptions, UseMutation, UseQuery,
};

pub fn sms_key() -> QueryKey {
    QueryKey::root("sms")
}

pub fn sms_log_key(id: &str) -> QueryKey {
    sms_key().join(id)
}

pub fn use_sms_logs() -> UseQuery<Vec<SmsLog>> {
    let client = use_api_client();
    let auth = use_auth();
    let enabled = auth().can_query();
    use_api_query(
        sms_key(),
        move || {
            let client = client.clone();
            async move { sms::list(&client).await }
        },
        QueryOptions::new()
            .enabled(enabled)
            .error_message("Could not load SMS logs"),
    )
}

pub fn use_sms_log(id: String) -> UseQuery<SmsLog> {
    let client = use_api_client();
    let auth = use_auth();
    let enabled = auth().can_query();
    let fetch_id = id.clone();
    use_api_query(
        sms_log_key(&id),
        move || {
            let client = client.clone();
            let id = fetch_id.clone();
            async move { sms::get(&client, &id).await }
        },
        QueryOptions::new().enabled(enabled),
    )
}

/// Hand a missed message to the ingestion pipeline.
pub fn use_ingest_sms() -> UseMutation<SmsPayload, SmsLog> {
    let client = use_api_client();
    use_api_mutation(
        move |payload: SmsPayload| {
            let client = client.clone();
            async move { sms::ingest(&client, &payload).await }
        },
        MutationOptions::new()
            .invalidate_prefix(sms_key())
            .success_toast("Message queued for parsing"),
    )
}
