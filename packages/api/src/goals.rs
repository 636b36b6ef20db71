//! Investment goal endpoints.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{GoalPayload, InvestmentGoal};

pub async fn list(client: &ApiClient) -> Result<Vec<InvestmentGoal>, ApiError> {
    client.get("/investment-goal").await
}

pub async fn get(client: &ApiClient, id: &str) -> Result<InvestmentGoal, ApiError> {
    client.get(&format!("/investment-goal/{id}")).await
}

pub async fn create(client: &ApiClient, payload: &GoalPayload) -> Result<InvestmentGoal, ApiError> {
    client.post("/investment-goal", payload).await
}

pub async fn update(
    client: &ApiClient,
    id: &str,
    payload: &GoalPayload,
) -> Result<InvestmentGoal, ApiError> {
    client.put(&format!("/investment-goal/{id}"), payload).await
}
