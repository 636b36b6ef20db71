//! Account endpoints.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Account, AccountPayload};

pub async fn list(client: &ApiClient) -> Result<Vec<Account>, ApiError> {
    client.get("/account").await
}

pub async fn get(client: &ApiClient, id: &str) -> Result<Account, ApiError> {
    client.get(&format!("/account/{id}")).await
}

pub async fn create(client: &ApiClient, payload: &AccountPayload) -> Result<Account, ApiError> {
    client.post("/account", payload).await
}

pub async fn update(
    client: &ApiClient,
    id: &str,
    payload: &AccountPayload,
) -> Result<Account, ApiError> {
    client.put(&format!("/account/{id}"), payload).await
}

pub async fn remove(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    client.delete(&format!("/account/{id}")).await
}
