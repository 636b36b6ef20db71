use api::{user, UserPayload, UserProfile};
use store::QueryKey;

use crate::auth::use_auth;
use crate::providers::use_api_client;
use crate::query::{
    use_api_mutation, use_api_query, MutationOptions, QueryOptions, UseMutation, UseQuery,
};

pub fn user_key() -> QueryKey {
    QueryKey::root("auth").join("user")
}

pub fn use_user_profile() -> UseQuery<UserProfile> {
    let client = use_api_client();
    let auth = use_auth();
    let enabled = auth().can_query();
    use_api_query(
        user_key(),
        move || {
            let client = client.clone();
            async move { user::current(&client).await }
        },
        QueryOptions::new().enabled(enabled),
    )
}

pub fn use_update_profile() -> UseMutation<UserPayload, UserProfile> {
    let client = use_api_client();
    use_api_mutation(
        move |payload: UserPayload| {
            let client = client.clone();
            async move { user::update(&client, &payload).await }
        },
        MutationOptions::new()
            .invalidate(user_key())
            .success_toast("Profile saved"),
    )
}
