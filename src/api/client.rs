use crate::api::models::{ChatCompletion, RequestBody};
use crate::error::{MenuChatError, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::future::Future;
use std::time::Duration;

/// Something that can answer a `/chat/completions` request.
///
/// The HTTP client below is the production implementation; tests plug in
/// scripted backends. Every call is a single request with no retry.
pub trait CompletionBackend: Send + Sync {
    fn complete(
        &self,
        request: &RequestBody,
    ) -> impl Future<Output = Result<ChatCompletion>> + Send;
}

impl<B: CompletionBackend> CompletionBackend for &B {
    fn complete(
        &self,
        request: &RequestBody,
    ) -> impl Future<Output = Result<ChatCompletion>> + Send {
        (**self).complete(request)
    }
}

pub struct OpenAiClient {
    http: reqwest::Client,
    endpoint: String,
}

impl OpenAiClient {
    pub fn new(api_key: &str, endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e| {
                MenuChatError::ConfigError(format!("Invalid authorization header: {}", e))
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl CompletionBackend for OpenAiClient {
    async fn complete(&self, request: &RequestBody) -> Result<ChatCompletion> {
        tracing::debug!(
            endpoint = %self.endpoint,
            model = %request.model,
            messages = request.messages.len(),
            "sending completion request"
        );

        let response = self.http.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        tracing::debug!(status = %status, "completion response received");

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MenuChatError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let completion: ChatCompletion = serde_json::from_str(&body)?;
        Ok(completion)
    }
}
