use super::client::GenerateContentEndpoint;
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData, Part,
};
use crate::ai::{ContentService, ModelReply, ModelRequest, Operation, ReplyCandidate, ResponsePart};
use crate::{Error, Result};
use async_trait::async_trait;
use base64::Engine as _;

/// [`ContentService`] backed by Gemini's `generateContent` REST endpoint.
pub struct GeminiContentClient {
    http: GenerateContentEndpoint,
}

impl GeminiContentClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GenerateContentEndpoint::new(client, api_key, &model),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(&base_url);
        self
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }

    fn build_request(request: &ModelRequest) -> GenerateContentRequest {
        let mut parts = Vec::with_capacity(2);

        // Image first, instruction second.
        if let Some(image) = request.source_image() {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type.clone(),
                    data: base64::engine::general_purpose::STANDARD.encode(&image.bytes),
                },
            });
        }
        parts.push(Part::Text {
            text: request.prompt().to_string(),
        });

        let generation_config = match request.operation() {
            Operation::Generate | Operation::Edit => Some(GenerationConfig {
                response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
            }),
            Operation::Analyze => None,
        };

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config,
        }
    }

    fn into_reply(response: GenerateContentResponse) -> Result<ModelReply> {
        if response.candidates.is_empty() {
            if let Some(reason) = response
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.as_deref())
            {
                tracing::warn!("Gemini blocked the prompt: {}", reason);
            }
        }

        let candidates = response
            .candidates
            .into_iter()
            .map(|candidate| -> Result<ReplyCandidate> {
                if let Some(reason) = candidate.finish_reason.as_deref() {
                    tracing::debug!("Gemini candidate finish reason: {}", reason);
                }
                let parts = candidate
                    .content
                    .map(|content| {
                        content
                            .parts
                            .into_iter()
                            .map(Self::into_response_part)
                            .collect::<Result<Vec<_>>>()
                    })
                    .transpose()?;
                Ok(ReplyCandidate { parts })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ModelReply { candidates })
    }

    fn into_response_part(part: Part) -> Result<ResponsePart> {
        Ok(match part {
            Part::Text { text } => ResponsePart::Text(text),
            Part::InlineData { inline_data } => {
                let data = base64::engine::general_purpose::STANDARD
                    .decode(&inline_data.data)
                    .map_err(|e| {
                        Error::AiProvider(format!(
                            "Failed to decode Gemini inline data ({}): {}",
                            inline_data.mime_type, e
                        ))
                    })?;
                ResponsePart::InlineBinary {
                    mime_type: inline_data.mime_type,
                    data,
                }
            }
            Part::Other(_) => ResponsePart::Unknown,
        })
    }
}

#[async_trait]
impl ContentService for GeminiContentClient {
    async fn generate_content(&self, request: &ModelRequest) -> Result<ModelReply> {
        tracing::debug!(
            "Sending {} request to Gemini model {}",
            request.operation(),
            self.http.model()
        );

        let body = Self::build_request(request);
        let response: GenerateContentResponse = self.http.call(&body).await?;

        tracing::debug!(
            "Gemini returned {} candidate(s)",
            response.candidates.len()
        );

        Self::into_reply(response)
    }
}
