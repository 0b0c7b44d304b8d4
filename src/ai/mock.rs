use super::{ContentService, ModelReply, ModelRequest, ResponsePart};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Tiny 1x1 PNG returned when no reply was queued.
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
    0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1 pixel
    0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44,
    0x41, // IDAT chunk
    0x54, 0x08, 0x99, 0x63, 0xF8, 0xCF, 0xC0, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0xE2, 0x25,
    0x00, 0xBC, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, // IEND chunk
    0x44, 0xAE, 0x42, 0x60, 0x82,
];

#[derive(Debug, Clone)]
enum MockOutcome {
    Reply(ModelReply),
    Failure(String),
}

/// Scripted [`ContentService`] that cycles through queued outcomes and
/// records every request it sees.
#[derive(Clone)]
pub struct MockContentClient {
    outcomes: Arc<Mutex<Vec<MockOutcome>>>,
    requests: Arc<Mutex<Vec<ModelRequest>>>,
}

impl MockContentClient {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_reply(self, reply: ModelReply) -> Self {
        self.outcomes.lock().unwrap().push(MockOutcome::Reply(reply));
        self
    }

    pub fn with_parts(self, parts: Vec<ResponsePart>) -> Self {
        self.with_reply(ModelReply::single(parts))
    }

    /// Queue a provider failure carrying `message`.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push(MockOutcome::Failure(message.into()));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn default_reply() -> ModelReply {
        ModelReply::single(vec![
            ResponsePart::Text("Here is your image.".to_string()),
            ResponsePart::InlineBinary {
                mime_type: "image/png".to_string(),
                data: TINY_PNG.to_vec(),
            },
        ])
    }
}

impl Default for MockContentClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentService for MockContentClient {
    async fn generate_content(&self, request: &ModelRequest) -> Result<ModelReply> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };

        let outcomes = self.outcomes.lock().unwrap();
        if outcomes.is_empty() {
            return Ok(Self::default_reply());
        }

        match &outcomes[index % outcomes.len()] {
            MockOutcome::Reply(reply) => Ok(reply.clone()),
            MockOutcome::Failure(message) => Err(Error::AiProvider(message.clone())),
        }
    }
}
