//! Artifact analysis orchestration
//!
//! One request: sample-data short circuit → image preparation → single
//! upstream call → response normalization. Upstream and parse failures are
//! recovered here with fixed fallback bodies; only image preparation and
//! internal faults propagate as errors.

use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::error::{ApiError, ApiResult};
use crate::models::{Artifact, UnrecognizedArtifact};
use crate::response::{normalize_response, CandidateSource, RepairKind};
use crate::services::image_prep::prepare_image;
use crate::services::openrouter_client::{OpenRouterClient, UpstreamError};
use crate::services::prompt::ARTIFACT_ANALYSIS_PROMPT;
use crate::services::samples::random_sample;

/// Analysis service shared by all requests
#[derive(Debug, Clone)]
pub struct AnalysisService {
    settings: Arc<Settings>,
    client: OpenRouterClient,
}

impl AnalysisService {
    pub fn new(settings: Arc<Settings>) -> Result<Self, UpstreamError> {
        let client = OpenRouterClient::new(&settings.openrouter)?;
        Ok(Self { settings, client })
    }

    /// Analyze one uploaded image
    pub async fn analyze(&self, upload: Vec<u8>) -> ApiResult<Artifact> {
        if self.settings.use_sample_data {
            info!("Using sample data (USE_SAMPLE_DATA=true)");
            return Ok(random_sample().into());
        }

        info!(bytes = upload.len(), "Reading uploaded image");
        let prepared = tokio::task::spawn_blocking(move || prepare_image(&upload))
            .await
            .map_err(|e| ApiError::Internal(format!("Image preparation task failed: {}", e)))??;
        info!(
            width = prepared.width,
            height = prepared.height,
            jpeg_bytes = prepared.jpeg.len(),
            "Image prepared for analysis"
        );

        match self
            .client
            .analyze_image(&prepared.jpeg, ARTIFACT_ANALYSIS_PROMPT)
            .await
        {
            Ok(reply) => {
                info!("Response length: {} characters", reply.chars().count());
                Ok(artifact_from_reply(&reply))
            }
            Err(err) => {
                error!(error = %err, "Error calling OpenRouter API");
                info!("Returning error response due to API error");
                Ok(UnrecognizedArtifact::analysis_failed().into())
            }
        }
    }
}

/// Normalize a raw model reply, falling back to the parse-failure body
///
/// Callable on its own with any reply text, independent of sample mode.
pub fn artifact_from_reply(reply: &str) -> Artifact {
    let started = Instant::now();

    match normalize_response(reply) {
        Ok(normalized) => {
            match normalized.source {
                CandidateSource::FencedBlock => info!("JSON found in code block"),
                CandidateSource::RawReply => info!("No JSON code block found, using raw response"),
            }

            for repair in &normalized.validated.repairs {
                match repair.kind {
                    RepairKind::Missing => {
                        warn!("Missing field in response: {}", repair.field)
                    }
                    RepairKind::Invalid => {
                        warn!("Invalid value for field in response: {}", repair.field)
                    }
                    RepairKind::Clamped { from } => warn!(
                        "Confidence {} too high for a non-artifact, lowered",
                        from
                    ),
                }
            }

            let artifact = normalized.validated.artifact;
            match &artifact {
                Artifact::Recognized(a) => info!("Successfully analyzed artifact: {}", a.title),
                Artifact::Unrecognized(a) => info!(
                    "Returning not-recognized response with possible identification: {}",
                    a.possible_identification
                ),
            }
            info!(
                elapsed_us = started.elapsed().as_micros() as u64,
                "Response normalization completed"
            );
            artifact
        }
        Err(err) => {
            error!(error = %err, "Failed to parse JSON from API response");
            info!("Returning error response due to JSON parsing failure");
            UnrecognizedArtifact::parse_failure().into()
        }
    }
}
