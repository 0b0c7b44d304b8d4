use actix_web::{http::StatusCode, test, web, App};
use ai_creative_studio::{
    models::{AnalysisResponse, Config, ErrorResponse, ImageResponse},
    server::{app_config, multipart_config},
    studio::Studio,
};
use base64::Engine as _;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-2.5-flash-image-preview";
const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash-image-preview:generateContent";
const BOUNDARY: &str = "integration-boundary";

fn config_for(server: &MockServer) -> Config {
    Config {
        gemini_api_key: Some("test-key".to_string()),
        gemini_model: MODEL.to_string(),
        gemini_base_url: server.uri(),
        ..Config::default()
    }
}

fn image_upload(bytes: &[u8], content_type: &str, prompt: &str) -> test::TestRequest {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"photo\"\r\nContent-Type: {}\r\n\r\n",
            BOUNDARY, content_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(
        format!(
            "\r\n--{}\r\nContent-Disposition: form-data; name=\"prompt\"\r\n\r\n{}\r\n--{}--\r\n",
            BOUNDARY, prompt, BOUNDARY
        )
        .as_bytes(),
    );

    test::TestRequest::post()
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        ))
        .set_payload(body)
}

macro_rules! gemini_app {
    ($config:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(Studio::from_config(
                    &$config,
                    reqwest::Client::new(),
                )))
                .app_data(multipart_config($config.max_upload_bytes))
                .configure(app_config),
        )
        .await
    };
}

#[actix_web::test]
async fn test_generate_image_end_to_end() {
    let server = MockServer::start().await;
    let generated: Vec<u8> = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A];
    let b64 = base64::engine::general_purpose::STANDARD.encode(&generated);

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "role": "user", "parts": [{ "text": "a lighthouse at dusk picture" }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "Here is a lighthouse." },
                        { "inlineData": { "mimeType": "image/png", "data": b64.clone() } },
                        { "text": "Enjoy!" }
                    ]
                },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let app = gemini_app!(config);

    let req = test::TestRequest::post()
        .uri("/generate-image")
        .set_json(json!({ "prompt": "a lighthouse at dusk" }))
        .to_request();
    let resp: ImageResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        resp,
        ImageResponse {
            image: b64,
            text: "Here is a lighthouse. Enjoy!".to_string(),
        }
    );
}

#[actix_web::test]
async fn test_edit_image_end_to_end() {
    let server = MockServer::start().await;
    let source: [u8; 6] = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    let source_b64 = base64::engine::general_purpose::STANDARD.encode(source);
    let edited_b64 = base64::engine::general_purpose::STANDARD.encode([0x89, 0x50, 0x4E, 0x47]);

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_partial_json(json!({
            "contents": [{
                "parts": [
                    { "inlineData": { "mimeType": "image/jpeg", "data": source_b64 } },
                    { "text": "make the sky purple" }
                ]
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "inlineData": { "mimeType": "image/png", "data": edited_b64.clone() } },
                        { "inlineData": { "mimeType": "image/png", "data": edited_b64.clone() } }
                    ]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let app = gemini_app!(config);

    let req = image_upload(&source, "image/jpeg", "make the sky purple")
        .uri("/edit-image")
        .to_request();
    let resp: ImageResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.image, edited_b64);
    assert_eq!(resp.text, "Received inline data of type: image/png");
}

#[actix_web::test]
async fn test_analyze_image_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "A tabby cat" },
                        { "text": "sleeping on a windowsill." }
                    ]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let app = gemini_app!(config);

    let req = image_upload(&[0x89, 0x50, 0x4E, 0x47], "image/png", "What is in this photo?")
        .uri("/analyze-image")
        .to_request();
    let resp: AnalysisResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.text, "A tabby cat sleeping on a windowsill.");
}

#[actix_web::test]
async fn test_provider_rejection_is_500() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let app = gemini_app!(config);

    let req = test::TestRequest::post()
        .uri("/generate-image")
        .set_json(json!({ "prompt": "draw a tree" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert!(body
        .detail
        .starts_with("Internal server error during image generation: "));
    assert!(body.detail.contains("API key not valid"));
}

#[actix_web::test]
async fn test_blocked_prompt_without_candidates_is_500() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let app = gemini_app!(config);

    let req = image_upload(&[0x89, 0x50], "image/png", "describe")
        .uri("/analyze-image")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(
        body.detail,
        "Model did not return any candidates. The request might have failed or the model could not generate a response."
    );
}

#[actix_web::test]
async fn test_missing_credential_never_reaches_provider() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = Config {
        gemini_api_key: None,
        ..config_for(&server)
    };
    let app = gemini_app!(config);

    let req = image_upload(&[0x89, 0x50], "image/png", "make it red")
        .uri("/edit-image")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(
        body.detail,
        "GEMINI_API_KEY or GOOGLE_API_KEY environment variable not set."
    );
}
