//! Current-user endpoints.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{UserPayload, UserProfile};

pub async fn current(client: &ApiClient) -> Result<UserProfile, ApiError> {
    client.get("/auth/user").await
}

pub async fn update(client: &ApiClient, payload: &UserPayload) -> Result<UserProfile, ApiError> {
    client.put("/user", payload).await
}
