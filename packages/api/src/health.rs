//! Backend liveness probe, polled by the auth provider for the online flag.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::HealthStatus;

pub async fn check(client: &ApiClient) -> Result<HealthStatus, ApiError> {
    client.get("/health").await
}
