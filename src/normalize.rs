//! Reduces a model reply to at most one base64 image plus the reply's text.
//!
//! All three studio operations go through [`normalize`]; the only difference
//! between them is whether an image may be kept.

use crate::ai::{ModelReply, ResponsePart};
use crate::{Error, Result};
use base64::Engine as _;

pub const NO_CANDIDATES: &str = "Model did not return any candidates. The request might have failed or the model could not generate a response.";
pub const EMPTY_CANDIDATE: &str = "Model returned an empty candidate or content.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeMode {
    /// The first `image/*` part becomes the result image.
    GenerateOrEdit,
    /// Image parts are only ever described.
    Analyze,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedResult {
    /// Base64 of the retained image part, if any.
    pub image: Option<String>,
    pub text: String,
}

/// Normalize the first candidate of `reply`.
///
/// Text fragments and the notes synthesized for parts that are not kept are
/// joined with single spaces in the order the model sent them.
pub fn normalize(reply: &ModelReply, mode: NormalizeMode) -> Result<NormalizedResult> {
    let candidate = reply.candidates.first().ok_or_else(|| {
        tracing::warn!("Model did not return any candidates");
        Error::EmptyResponse(NO_CANDIDATES.to_string())
    })?;

    tracing::debug!("Number of candidates: {}", reply.candidates.len());

    let parts = match candidate.parts.as_deref() {
        Some(parts) if !parts.is_empty() => parts,
        _ => {
            tracing::warn!("Candidate 0 or its content is empty");
            return Err(Error::EmptyResponse(EMPTY_CANDIDATE.to_string()));
        }
    };

    let mut image: Option<String> = None;
    let mut fragments: Vec<String> = Vec::with_capacity(parts.len());

    for (i, part) in parts.iter().enumerate() {
        match part {
            ResponsePart::Text(text) => {
                tracing::debug!("Part {} is text ({} chars)", i, text.chars().count());
                fragments.push(text.clone());
            }
            ResponsePart::InlineBinary { mime_type, data } => {
                let retain = mode == NormalizeMode::GenerateOrEdit
                    && mime_type.starts_with("image/")
                    && image.is_none();

                if retain {
                    tracing::debug!("Part {} is image data (MIME: {}), retained", i, mime_type);
                    image = Some(base64::engine::general_purpose::STANDARD.encode(data));
                } else {
                    tracing::debug!("Part {} is inline data (MIME: {}), described", i, mime_type);
                    fragments.push(inline_data_note(mime_type, mode));
                }
            }
            ResponsePart::Unknown => {
                tracing::debug!("Part {} is unknown", i);
                fragments.push(unknown_part_note(mode));
            }
        }
    }

    Ok(NormalizedResult {
        image,
        text: fragments.join(" "),
    })
}

fn inline_data_note(mime_type: &str, mode: NormalizeMode) -> String {
    match mode {
        NormalizeMode::GenerateOrEdit => format!("Received inline data of type: {}", mime_type),
        NormalizeMode::Analyze => {
            format!("Received inline data of type: {} during analysis.", mime_type)
        }
    }
}

fn unknown_part_note(mode: NormalizeMode) -> String {
    match mode {
        NormalizeMode::GenerateOrEdit => "Received an unknown part in the response.".to_string(),
        NormalizeMode::Analyze => {
            "Received an unknown part in the response during analysis.".to_string()
        }
    }
}
