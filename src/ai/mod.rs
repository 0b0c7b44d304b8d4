//! Remote generative-model integration
//!
//! Defines the provider-neutral request/reply shapes and the service trait the
//! studio dispatches through, plus the Gemini implementation and a mock.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::GeminiContentClient;
pub use mock::MockContentClient;

use crate::Result;
use async_trait::async_trait;
use std::fmt;

/// The three things the studio can ask of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Generate,
    Edit,
    Analyze,
}

impl Operation {
    /// Human label used in logs and wrapped failure messages.
    pub fn label(self) -> &'static str {
        match self {
            Operation::Generate => "image generation",
            Operation::Edit => "image editing",
            Operation::Analyze => "image analysis",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Generate => "Generate",
            Operation::Edit => "Edit",
            Operation::Analyze => "Analyze",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// A single outbound model call.
///
/// Only the constructors build one, so a source image is present exactly for
/// edit and analyze requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRequest {
    operation: Operation,
    prompt: String,
    source_image: Option<SourceImage>,
}

impl ModelRequest {
    pub fn generate(prompt: impl Into<String>) -> Self {
        Self {
            operation: Operation::Generate,
            prompt: prompt.into(),
            source_image: None,
        }
    }

    pub fn edit(image: SourceImage, prompt: impl Into<String>) -> Self {
        Self {
            operation: Operation::Edit,
            prompt: prompt.into(),
            source_image: Some(image),
        }
    }

    pub fn analyze(image: SourceImage, prompt: impl Into<String>) -> Self {
        Self {
            operation: Operation::Analyze,
            prompt: prompt.into(),
            source_image: Some(image),
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn source_image(&self) -> Option<&SourceImage> {
        self.source_image.as_ref()
    }
}

/// One atomic piece of a model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsePart {
    Text(String),
    InlineBinary { mime_type: String, data: Vec<u8> },
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyCandidate {
    /// `None` when the candidate carried no content at all.
    pub parts: Option<Vec<ResponsePart>>,
}

impl ReplyCandidate {
    pub fn with_parts(parts: Vec<ResponsePart>) -> Self {
        Self { parts: Some(parts) }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelReply {
    pub candidates: Vec<ReplyCandidate>,
}

impl ModelReply {
    /// Reply with a single candidate holding `parts`.
    pub fn single(parts: Vec<ResponsePart>) -> Self {
        Self {
            candidates: vec![ReplyCandidate::with_parts(parts)],
        }
    }
}

#[async_trait]
pub trait ContentService: Send + Sync {
    async fn generate_content(&self, request: &ModelRequest) -> Result<ModelReply>;
}
