pub mod client;
pub mod content;
pub mod types;

pub use client::GenerateContentEndpoint;
pub use content::GeminiContentClient;
