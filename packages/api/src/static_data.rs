//! Reference-data endpoints: banks, categories, merchants.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Bank, Category, Merchant};

pub async fn banks(client: &ApiClient) -> Result<Vec<Bank>, ApiError> {
    client.get("/static/bank").await
}

pub async fn categories(client: &ApiClient) -> Result<Vec<Category>, ApiError> {
    client.get("/static/categories").await
}

pub async fn merchants(client: &ApiClient) -> Result<Vec<Merchant>, ApiError> {
    client.get("/static/merchants").await
}
