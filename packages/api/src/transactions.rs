//! Transaction endpoints.
//!
//! Deletion is a soft delete: the server keeps the row and stamps
//! `deleted_at`, so the DELETE verb carries a JSON body instead of an id in
//! the path.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{
    DeleteTransactionRequest, ParsedReceipt, Transaction, TransactionFilter, TransactionPayload,
};

pub async fn list(
    client: &ApiClient,
    filter: &TransactionFilter,
) -> Result<Vec<Transaction>, ApiError> {
    client.get_with("/transaction", &filter.query_pairs()).await
}

pub async fn create(
    client: &ApiClient,
    payload: &TransactionPayload,
) -> Result<Transaction, ApiError> {
    client.post("/transaction", payload).await
}

pub async fn soft_delete(client: &ApiClient, transaction_id: &str) -> Result<(), ApiError> {
    let body = DeleteTransactionRequest {
        transaction_id: transaction_id.to_string(),
    };
    client.delete_json("/transaction", &body).await
}

/// Upload a receipt image; the server extracts draft transaction fields.
pub async fn parse_image(
    client: &ApiClient,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<ParsedReceipt, ApiError> {
    let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
    let form = reqwest::multipart::Form::new().part("image", part);
    client.post_multipart("/transaction/image-parse", form).await
}
