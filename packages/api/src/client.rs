//! # API client
//!
//! [`ApiClient`] wraps a shared `reqwest::Client` with the configured base
//! URL and the injected [`Session`] token source. Endpoint modules build on
//! the request helpers here; decoding of the server's error envelope happens
//! in exactly one place ([`ApiClient::decode`]) so callers only ever see
//! [`ApiError`].

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::{ApiError, ApiErrorBody};
use crate::session::Session;

/// HTTP client for the Moneta backend.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Rc<dyn Session>,
}

impl ApiClient {
    /// Build a client from config and the injected session.
    pub fn new(config: &AppConfig, session: Rc<dyn Session>) -> Self {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = if config.api.timeout_secs > 0 {
            builder.timeout(std::time::Duration::from_secs(config.api.timeout_secs))
        } else {
            builder
        };
        let http = builder.build().unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &Rc<dyn Session> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    async fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let request = self.authorize(request).await;
        request.send().await.map_err(|e| {
            tracing::error!(error = %e, "request failed to reach the backend");
            ApiError::Network(e.to_string())
        })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()));
        }

        let reason = status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
        let code = status.as_u16();
        tracing::warn!(status = code, "backend returned an error status");

        match response.text().await {
            Ok(text) => match serde_json::from_str::<ApiErrorBody>(&text) {
                Ok(body) => Err(ApiError::Api(body)),
                Err(_) => Err(ApiError::Http {
                    status: code,
                    message: reason,
                }),
            },
            Err(_) => Err(ApiError::Http {
                status: code,
                message: reason,
            }),
        }
    }

    /// Like [`decode`](Self::decode) for endpoints whose success body is empty.
    async fn decode_unit(response: reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        // Reuse the envelope path; the Ok arm is unreachable for error statuses.
        Self::decode::<serde_json::Value>(response).await.map(|_| ())
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.http.get(self.url(path))).await?;
        Self::decode(response).await
    }

    pub(crate) async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        let response = self.send(self.http.get(self.url(path)).query(query)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(self.http.post(self.url(path)).json(body)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.send(self.http.put(self.url(path)).json(body)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.send(self.http.delete(self.url(path))).await?;
        Self::decode_unit(response).await
    }

    /// DELETE with a JSON body (the transaction soft-delete contract).
    pub(crate) async fn delete_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let response = self
            .send(self.http.delete(self.url(path)).json(body))
            .await?;
        Self::decode_unit(response).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let response = self
            .send(self.http.post(self.url(path)).multipart(form))
            .await?;
        Self::decode(response).await
    }
}
