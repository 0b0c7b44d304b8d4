//! Backend for the AI Creative Studio.
//!
//! Exposes image generation, image editing and image analysis over HTTP,
//! forwarding each request to a Gemini image model and normalizing its
//! multi-part reply into an optional base64 image plus text.

pub mod ai;
pub mod controllers;
pub mod error;
pub mod models;
pub mod normalize;
pub mod prompts;
pub mod server;
pub mod studio;

pub use error::{Error, Result};
