//! SMS ingestion-log endpoints. Read-mostly; ingest exists for manual
//! forwarding of a message the upstream pipeline missed.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{SmsLog, SmsPayload};

pub async fn list(client: &ApiClient) -> Result<Vec<SmsLog>, ApiError> {
    client.get("/sms").await
}

pub async fn get(client: &ApiClient, id: &str) -> Result<SmsLog, ApiError> {
    client.get(&format!("/sms/{id}")).await
}

pub async fn ingest(client: &ApiClient, payload: &SmsPayload) -> Result<SmsLog, ApiError> {
    client.post("/sms", payload).await
}
