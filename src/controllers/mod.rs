pub mod error;
pub mod studio_controller;

pub use error::ApiError;
