use super::ApiError;
use crate::ai::mime::resolve_upload_mime;
use crate::ai::SourceImage;
use crate::models::{AnalysisResponse, ImageResponse, PromptRequest, WelcomeResponse};
use crate::normalize::NormalizedResult;
use crate::studio::Studio;
use actix_multipart::form::{bytes::Bytes as UploadBytes, text::Text, MultipartForm};
use actix_web::{get, post, web, HttpResponse};

pub const WELCOME_MESSAGE: &str = "Welcome to the AI Creative Studio Backend!";

/// Multipart body shared by the edit and analyze endpoints.
#[derive(MultipartForm)]
pub struct ImagePromptForm {
    pub file: UploadBytes,
    pub prompt: Text<String>,
}

impl ImagePromptForm {
    fn into_parts(self) -> (SourceImage, String) {
        let declared = self.file.content_type.as_ref().map(|m| m.essence_str());
        let mime_type = resolve_upload_mime(declared, &self.file.data);
        let image = SourceImage {
            bytes: self.file.data.to_vec(),
            mime_type,
        };
        (image, self.prompt.into_inner())
    }
}

/// Configure studio routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(welcome)
        .service(generate_image)
        .service(edit_image)
        .service(analyze_image);
}

#[get("/")]
pub async fn welcome() -> HttpResponse {
    HttpResponse::Ok().json(WelcomeResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}

#[post("/generate-image")]
pub async fn generate_image(
    request: web::Json<PromptRequest>,
    studio: web::Data<Studio>,
) -> Result<HttpResponse, ApiError> {
    let result = studio.generate_image(&request.prompt).await?;
    image_response(result, "Failed to generate image.")
}

#[post("/edit-image")]
pub async fn edit_image(
    MultipartForm(form): MultipartForm<ImagePromptForm>,
    studio: web::Data<Studio>,
) -> Result<HttpResponse, ApiError> {
    let (image, prompt) = form.into_parts();
    let result = studio.edit_image(image, &prompt).await?;
    image_response(result, "Failed to edit image.")
}

#[post("/analyze-image")]
pub async fn analyze_image(
    MultipartForm(form): MultipartForm<ImagePromptForm>,
    studio: web::Data<Studio>,
) -> Result<HttpResponse, ApiError> {
    let (image, prompt) = form.into_parts();
    let text = studio.analyze_image(image, &prompt).await?;
    if text.is_empty() {
        return Err(ApiError::Internal("Failed to analyze image.".to_string()));
    }
    Ok(HttpResponse::Ok().json(AnalysisResponse { text }))
}

/// A reply without an image is a failure; its text becomes the detail.
fn image_response(result: NormalizedResult, fallback: &str) -> Result<HttpResponse, ApiError> {
    match result.image {
        Some(image) => Ok(HttpResponse::Ok().json(ImageResponse {
            image,
            text: result.text,
        })),
        None if result.text.is_empty() => Err(ApiError::Internal(fallback.to_string())),
        None => Err(ApiError::Internal(result.text)),
    }
}
