use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::models::DEFAULT_BASE_URL;
use crate::{Error, Result};
use reqwest::{Client, Response};

/// Transport for the single Gemini call this service makes:
/// `POST {base}/v1beta/models/{model}:generateContent`.
pub struct GenerateContentEndpoint {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GenerateContentEndpoint {
    /// `model` may carry the `models/` prefix the Gemini docs use; it is
    /// dropped so the endpoint path is not doubled.
    pub fn new(client: Client, api_key: String, model: &str) -> Self {
        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.trim_start_matches("models/").to_string(),
        }
    }

    pub fn with_base_url(self, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..self
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Sends one request. Transport failures surface as [`Error::Http`];
    /// rejections and undecodable bodies as [`Error::AiProvider`].
    pub async fn call(&self, body: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        let url = self.url();
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(%url, "Gemini request failed to send: {}", e))?;

        let payload = Self::accepted_body(response).await?;
        serde_json::from_str(&payload).map_err(|e| {
            tracing::error!(body = %payload, "Undecodable Gemini reply: {}", e);
            Error::AiProvider(format!("Failed to parse Gemini response: {}", e))
        })
    }

    async fn accepted_body(response: Response) -> Result<String> {
        let status = response.status();
        let text = response.text().await?;
        if status.is_success() {
            return Ok(text);
        }

        tracing::error!(%status, "Gemini rejected the request: {}", text);
        Err(Error::AiProvider(format!(
            "Gemini API error (status {}): {}",
            status, text
        )))
    }
}
