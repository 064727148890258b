//! HTTP Server & Routing Integration Tests
//!
//! Drives the full router with `oneshot` requests. A local axum server plays
//! the part of the OpenRouter chat-completion endpoint so the upstream call,
//! its failure modes and the normalization fallbacks are all exercised.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use http_body_util::BodyExt;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::{json, Value};
use std::io::Cursor;
use std::time::Duration;
use tower::ServiceExt;
use zyarat_ai::{build_router, AppState, Settings};

const BOUNDARY: &str = "zyarat-test-boundary";

/// Small PNG standing in for a camera photo
fn png_bytes() -> Vec<u8> {
    let img = RgbImage::from_pixel(16, 12, Rgb([140, 90, 40]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// Build a multipart/form-data body with one file field
fn multipart_body(field: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"photo.png\"\r\n",
            field
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn analyze_request(field: &str, content: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(field, content)))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Start a fake chat-completion endpoint, returning its base URL
async fn spawn_upstream(upstream: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, upstream).await.unwrap();
    });
    format!("http://{}/api/v1", addr)
}

/// Fake endpoint that replies with fixed model text
async fn upstream_replying(content: &'static str) -> String {
    let upstream = Router::new().route(
        "/api/v1/chat/completions",
        post(move || async move {
            Json(json!({
                "id": "gen-test",
                "choices": [{"message": {"role": "assistant", "content": content}}]
            }))
        }),
    );
    spawn_upstream(upstream).await
}

fn live_settings(base_url: String) -> Settings {
    let mut settings = Settings::default();
    settings.openrouter.api_key = "test-key".to_string();
    settings.openrouter.base_url = base_url;
    settings.openrouter.timeout = Duration::from_secs(5);
    settings.logging.file = None;
    settings
}

fn app(settings: Settings) -> Router {
    build_router(AppState::new(settings).unwrap())
}

// =============================================================================
// Health endpoints
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let response = app(Settings::default())
        .oneshot(get_request("/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "zyarat-ai");
    assert_eq!(body["sample_mode"], false);
    assert!(body["timestamp"].is_string());
    assert!(body["system"]["process_id"].is_number());
    assert!(body["server"]["version"].is_string());
    assert!(body["server"]["uptime_seconds"].is_number());
}

#[tokio::test]
async fn test_ping_endpoint() {
    let response = app(Settings::default())
        .oneshot(get_request("/ping"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ping"], "pong");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_root_endpoint() {
    let response = app(Settings::default())
        .oneshot(get_request("/"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "online");
    assert_eq!(body["health_check"], "/health");
}

#[tokio::test]
async fn test_cors_headers_present() {
    let request = Request::builder()
        .uri("/ping")
        .header("origin", "http://localhost:8081")
        .body(Body::empty())
        .unwrap();
    let response = app(Settings::default()).oneshot(request).await.unwrap();

    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}

// =============================================================================
// Sample-data mode
// =============================================================================

#[tokio::test]
async fn test_sample_mode_returns_recognized_artifact() {
    let settings = Settings {
        use_sample_data: true,
        ..Settings::default()
    };

    let response = app(settings)
        .oneshot(analyze_request("image", &png_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    for field in ["title", "period", "description", "significance", "location", "confidence"] {
        assert!(body.get(field).is_some(), "sample missing {}", field);
    }
    assert!(body.get("error").is_none());
}

// =============================================================================
// Upstream round trips
// =============================================================================

#[tokio::test]
async fn test_recognized_reply_is_normalized() {
    let base_url = upstream_replying(
        "Here you go:\n```json\n{\"title\": \"Roman Mosaic\", \"period\": \"Roman Period (146 BCE-439 CE)\", \"description\": \"A floor mosaic.\", \"significance\": \"Prosperity.\", \"confidence\": 0.91}\n```",
    )
    .await;

    let response = app(live_settings(base_url))
        .oneshot(analyze_request("image", &png_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "title": "Roman Mosaic",
            "period": "Roman Period (146 BCE-439 CE)",
            "description": "A floor mosaic.",
            "significance": "Prosperity.",
            "location": "Unknown",
            "confidence": 0.91
        })
    );
}

#[tokio::test]
async fn test_unrecognized_reply_is_clamped() {
    let base_url = upstream_replying(
        "Sure! ```json\n{\"error\":\"Not a Tunisian artifact\",\"confidence\":0.95}\n```",
    )
    .await;

    let response = app(live_settings(base_url))
        .oneshot(analyze_request("image", &png_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "error": "Not a Tunisian artifact",
            "possible_identification": "Unknown object",
            "explanation": "The image doesn't appear to show a recognized Tunisian artifact.",
            "confidence": 0.3
        })
    );
}

#[tokio::test]
async fn test_unparsable_reply_returns_parse_fallback() {
    let base_url = upstream_replying("I see a rock.").await;

    let response = app(live_settings(base_url))
        .oneshot(analyze_request("image", &png_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "error": "Failed to parse response",
            "possible_identification": "The image couldn't be properly analyzed",
            "explanation": "The AI detected something in the image but couldn't provide a structured analysis.",
            "confidence": 0.2
        })
    );
}

#[tokio::test]
async fn test_upstream_error_status_returns_technical_fallback() {
    let upstream = Router::new().route(
        "/api/v1/chat/completions",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "rate limited") }),
    );
    let base_url = spawn_upstream(upstream).await;

    let response = app(live_settings(base_url))
        .oneshot(analyze_request("image", &png_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "error": "Analysis failed",
            "possible_identification": "Unknown",
            "explanation": "The analysis service encountered a technical problem.",
            "confidence": 0.1
        })
    );
}

#[tokio::test]
async fn test_upstream_timeout_returns_technical_fallback() {
    let upstream = Router::new().route(
        "/api/v1/chat/completions",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({"choices": []}))
        }),
    );
    let base_url = spawn_upstream(upstream).await;
    let mut settings = live_settings(base_url);
    settings.openrouter.timeout = Duration::from_secs(1);

    let response = app(settings)
        .oneshot(analyze_request("image", &png_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Analysis failed");
    assert_eq!(body["confidence"], 0.1);
}

#[tokio::test]
async fn test_upstream_without_content_returns_technical_fallback() {
    let upstream = Router::new().route(
        "/api/v1/chat/completions",
        post(|| async { Json(json!({"choices": []})) }),
    );
    let base_url = spawn_upstream(upstream).await;

    let response = app(live_settings(base_url))
        .oneshot(analyze_request("image", &png_bytes()))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["error"], "Analysis failed");
}

#[tokio::test]
async fn test_upstream_receives_jpeg_data_uri_and_credentials() {
    let upstream = Router::new().route(
        "/api/v1/chat/completions",
        post(
            |headers: axum::http::HeaderMap, Json(payload): Json<Value>| async move {
                let authorized = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    == Some("Bearer test-key");
                let title = if authorized { "authorized" } else { "anonymous" };
                let url = payload["messages"][0]["content"][1]["image_url"]["url"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string();
                let reply = json!({
                    "title": title,
                    "period": payload["model"],
                    "description": url.starts_with("data:image/jpeg;base64,"),
                    "significance": payload["messages"][0]["content"][0]["type"],
                    "location": "Test",
                    "confidence": 0.9
                });
                Json(json!({"choices": [{"message": {"content": reply.to_string()}}]}))
            },
        ),
    );
    let base_url = spawn_upstream(upstream).await;

    let response = app(live_settings(base_url))
        .oneshot(analyze_request("image", &png_bytes()))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["title"], "authorized");
    assert_eq!(body["period"], "meta-llama/llama-4-maverick:free");
    // Non-string values are rendered as JSON text
    assert_eq!(body["description"], "true");
    assert_eq!(body["significance"], "text");
}

// =============================================================================
// Request failures
// =============================================================================

#[tokio::test]
async fn test_undecodable_image_is_server_error() {
    let base_url = upstream_replying("unused").await;

    let response = app(live_settings(base_url))
        .oneshot(analyze_request("image", b"this is not an image"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "IMAGE_ERROR");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Cannot decode uploaded image"));
}

#[tokio::test]
async fn test_missing_image_field_is_bad_request() {
    let response = app(Settings::default())
        .oneshot(analyze_request("photo", &png_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_non_multipart_request_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let response = app(Settings::default()).oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_oversized_upload_rejected() {
    let settings = Settings {
        max_upload_bytes: 1024,
        use_sample_data: true,
        ..Settings::default()
    };

    let response = app(settings)
        .oneshot(analyze_request("image", &vec![0u8; 8 * 1024]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
