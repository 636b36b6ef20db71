use api::{static_data, Bank, Category, Merchant};
use store::QueryKey;

use crate::auth::use_auth;
use crate::providers::use_api_client;
use crate::query::{use_api_query, QueryOptions, UseQuery};

fn static_key(kind: &str) -> QueryKey {
    QueryKey::root("static").join(kind)
}

pub fn use_banks() -> UseQuery<Vec<Bank>> {
    let client = use_api_client();
    let auth = use_auth();
    let enabled = auth().can_query();
    use_api_query(
        static_key("bank"),
        move || {
            let client = client.clone();
            async move { static_data::banks(&client).await }
        },
        QueryOptions::new().enabled(enabled).silent(),
    )
}

pub fn use_categories() -> UseQuery<Vec<Category>> {
    let client = use_api_client();
    let auth = use_auth();
    let enabled = auth().can_query();
    use_api_query(
        static_key("categories"),
        move || {
            let client = client.clone();
            async move { static_data::categories(&client).await }
        },
        QueryOptions::new().enabled(enabled).silent(),
    )
}

pub fn use_merchants() -> UseQuery<Vec<Merchant>> {
    let client = use_api_client();
    let auth = use_auth();
    let enabled = auth().can_query();
    use_api_query(
        static_key("merchants"),
        move || {
            let client = client.clone();
            async move { static_data::merchants(&client).await }
        },
        QueryOptions::new().enabled(enabled).silent(),
    )
}
