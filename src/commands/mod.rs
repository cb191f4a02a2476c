//! REST Command Wrappers
//!
//! Frontend bindings to the Keesti backend API, organized by domain.

mod category;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::AppConfig;
use crate::models::ApiEnvelope;

pub use category_tree::MutationError;

/// Shared HTTP client bound to the configured API root
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth_token_key: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            auth_token_key: config.auth_token_key.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Admin JWT from localStorage, if logged in
    fn auth_token(&self) -> Option<String> {
        web_sys::window()?
            .local_storage()
            .ok()??
            .get_item(&self.auth_token_key)
            .ok()?
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.auth_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and map non-2xx answers to `Rejected`
    async fn send(&self, builder: RequestBuilder) -> Result<Response, MutationError> {
        let response = builder
            .send()
            .await
            .map_err(|e| MutationError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message.or(body.error))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
        Err(MutationError::Rejected { status: status.as_u16(), message })
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, MutationError> {
        let response = self.send(builder).await?;
        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| MutationError::Decode(e.to_string()))?;
        Ok(envelope.into_inner())
    }
}
