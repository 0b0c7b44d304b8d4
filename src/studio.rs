//! Request dispatch for the three studio operations.

use crate::ai::{ContentService, GeminiContentClient, ModelRequest, Operation, SourceImage};
use crate::models::Config;
use crate::normalize::{normalize, NormalizeMode, NormalizedResult};
use crate::{prompts, Error, Result};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{error, info, Instrument};
use uuid::Uuid;

type ServiceFactory = Box<dyn Fn() -> Result<Arc<dyn ContentService>> + Send + Sync>;

/// Shapes prompts, calls the model once per request and normalizes the reply.
///
/// The remote client is built on first use and then shared by every request.
/// A failed build (for example a missing credential) is not remembered, so
/// the next request tries again.
pub struct Studio {
    service: OnceCell<Arc<dyn ContentService>>,
    factory: ServiceFactory,
}

impl Studio {
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn ContentService>> + Send + Sync + 'static,
    {
        Self {
            service: OnceCell::new(),
            factory: Box::new(factory),
        }
    }

    /// Use an already-built service, e.g. a mock in tests.
    pub fn with_service(service: Arc<dyn ContentService>) -> Self {
        Self::with_factory(move || Ok(Arc::clone(&service)))
    }

    /// Gemini-backed studio sharing `http_client`'s connection pool.
    pub fn from_config(config: &Config, http_client: reqwest::Client) -> Self {
        let config = config.clone();
        Self::with_factory(move || {
            let api_key = config.require_api_key()?;
            let client = GeminiContentClient::new_with_client(
                api_key.to_string(),
                config.gemini_model.clone(),
                http_client.clone(),
            )
            .with_base_url(config.gemini_base_url.clone());
            info!("Gemini client initialized (model: {})", client.model());
            Ok(Arc::new(client) as Arc<dyn ContentService>)
        })
    }

    async fn service(&self) -> Result<&Arc<dyn ContentService>> {
        self.service
            .get_or_try_init(|| async { (self.factory)() })
            .await
    }

    pub async fn generate_image(&self, prompt: &str) -> Result<NormalizedResult> {
        let shaped = prompts::shape(prompt);
        if shaped != prompt {
            info!("Appended '{}' to prompt: '{}'", prompts::IMAGE_HINT_SUFFIX.trim(), shaped);
        }
        self.dispatch(ModelRequest::generate(shaped), NormalizeMode::GenerateOrEdit)
            .await
    }

    pub async fn edit_image(&self, image: SourceImage, prompt: &str) -> Result<NormalizedResult> {
        self.dispatch(ModelRequest::edit(image, prompt), NormalizeMode::GenerateOrEdit)
            .await
    }

    /// Describe `image`; analysis never yields an image, only text.
    pub async fn analyze_image(&self, image: SourceImage, prompt: &str) -> Result<String> {
        let result = self
            .dispatch(ModelRequest::analyze(image, prompt), NormalizeMode::Analyze)
            .await?;
        Ok(result.text)
    }

    async fn dispatch(&self, request: ModelRequest, mode: NormalizeMode) -> Result<NormalizedResult> {
        let operation = request.operation();
        let span = tracing::info_span!("studio", request_id = %Uuid::new_v4(), %operation);

        async move {
            let service = self.service().await?;

            match request.source_image() {
                Some(image) => info!(
                    "Sending {} bytes of {} and prompt to model: '{}'",
                    image.bytes.len(),
                    image.mime_type,
                    request.prompt()
                ),
                None => info!("Sending prompt to model: '{}'", request.prompt()),
            }

            let reply = service
                .generate_content(&request)
                .await
                .map_err(|e| wrap_remote_failure(operation, e))?;
            info!("Received response from model");

            normalize(&reply, mode)
        }
        .instrument(span)
        .await
    }
}

fn wrap_remote_failure(operation: Operation, err: Error) -> Error {
    if !err.is_remote() {
        return err;
    }
    error!("An error occurred during {}: {}", operation.label(), err);
    Error::RemoteCall {
        operation: operation.label(),
        message: err.to_string(),
    }
}
