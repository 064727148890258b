//! Artifact analysis endpoint
//!
//! `POST /analyze` takes a multipart form with an `image` file field and
//! always answers 200 with an artifact-shaped body, unless the upload itself
//! is malformed (4xx) or cannot be decoded as an image (500).

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};

use crate::error::{ApiError, ApiResult};
use crate::models::Artifact;
use crate::AppState;

/// Multipart field carrying the uploaded photo
pub const IMAGE_FIELD: &str = "image";

/// POST /analyze
pub async fn analyze_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<Artifact>> {
    let upload = read_image_field(&mut multipart).await?;
    let artifact = state.analysis.analyze(upload).await?;
    Ok(Json(artifact))
}

async fn read_image_field(multipart: &mut Multipart) -> ApiResult<Vec<u8>> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(IMAGE_FIELD) {
            let bytes = field.bytes().await.map_err(multipart_error)?;
            return Ok(bytes.to_vec());
        }
    }

    Err(ApiError::BadRequest(format!(
        "Missing multipart field '{}'",
        IMAGE_FIELD
    )))
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::BadRequest(err.body_text())
    }
}

/// Build analysis routes
pub fn analyze_routes() -> Router<AppState> {
    Router::new().route("/analyze", post(analyze_image))
}
