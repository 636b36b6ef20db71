//! Reconciliation statement upload. The client only ships the file and the
//! period; matching math happens server-side.

use chrono::NaiveDate;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::UploadReceipt;

pub async fn upload(
    client: &ApiClient,
    account_id: &str,
    period_start: NaiveDate,
    period_end: NaiveDate,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<UploadReceipt, ApiError> {
    let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
    let form = reqwest::multipart::Form::new()
        .part("file", part)
        .text("account_id", account_id.to_string())
        .text("period_start", period_start.to_string())
        .text("period_end", period_end.to_string());
    client.post_multipart("/reconciliation/upload", form).await
}
