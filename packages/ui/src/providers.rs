//! Context wiring for the data layer.
//!
//! The app root constructs one [`ApiClient`] and one [`QueryCache`] and
//! installs both here; hooks anywhere below pull them from context instead
//! of reaching for globals.

use api::ApiClient;
use dioxus::prelude::*;
use store::QueryCache;

/// Install the client and cache into context. Call once, at the app root,
/// before rendering anything that uses the data hooks.
pub fn provide_data_layer(client: ApiClient, cache: QueryCache) {
    use_context_provider(|| client);
    use_context_provider(|| cache);
}

pub fn use_api_client() -> ApiClient {
    use_context::<ApiClient>()
}

pub fn use_query_cache() -> QueryCache {
    use_context::<QueryCache>()
}
