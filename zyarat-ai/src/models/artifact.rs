//! Artifact response shapes
//!
//! Every `/analyze` response body is one of two shapes, told apart by the
//! presence of an `error` key:
//! - [`RecognizedArtifact`]: the model identified a historical artifact
//! - [`UnrecognizedArtifact`]: the image is not an artifact, or analysis failed

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder for missing text fields on a recognized artifact
pub const UNKNOWN_TEXT: &str = "Unknown";

/// Confidence assumed when the model omits it on a recognized artifact
pub const DEFAULT_RECOGNIZED_CONFIDENCE: f64 = 0.7;

/// Default `possible_identification` for an unrecognized image
pub const DEFAULT_POSSIBLE_IDENTIFICATION: &str = "Unknown object";

/// Default `explanation` for an unrecognized image
pub const DEFAULT_EXPLANATION: &str =
    "The image doesn't appear to show a recognized Tunisian artifact.";

/// Confidence used for unrecognized images when missing or too high
pub const DEFAULT_UNRECOGNIZED_CONFIDENCE: f64 = 0.3;

/// Highest confidence allowed on an unrecognized image
pub const MAX_UNRECOGNIZED_CONFIDENCE: f64 = 0.5;

/// A historical artifact identified by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedArtifact {
    pub title: String,
    /// Historical period with date range, e.g. "Punic Period (814-146 BCE)"
    pub period: String,
    pub description: String,
    pub significance: String,
    pub location: String,
    /// Model's self-reported certainty; never clamped on this shape
    pub confidence: f64,
    /// Keys the model added beyond the schema, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An image that is not (or could not be analyzed as) an artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnrecognizedArtifact {
    pub error: String,
    pub possible_identification: String,
    pub explanation: String,
    pub confidence: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UnrecognizedArtifact {
    fn fixed(error: &str, possible_identification: &str, explanation: &str, confidence: f64) -> Self {
        Self {
            error: error.to_string(),
            possible_identification: possible_identification.to_string(),
            explanation: explanation.to_string(),
            confidence,
            extra: Map::new(),
        }
    }

    /// Returned when the model reply holds no decodable JSON object
    pub fn parse_failure() -> Self {
        Self::fixed(
            "Failed to parse response",
            "The image couldn't be properly analyzed",
            "The AI detected something in the image but couldn't provide a structured analysis.",
            0.2,
        )
    }

    /// Returned when the upstream model call itself fails
    pub fn analysis_failed() -> Self {
        Self::fixed(
            "Analysis failed",
            "Unknown",
            "The analysis service encountered a technical problem.",
            0.1,
        )
    }
}

/// Normalized `/analyze` response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Artifact {
    // Listed first: `error` is required here, so untagged decoding only
    // falls through to `Recognized` when the key is absent.
    Unrecognized(UnrecognizedArtifact),
    Recognized(RecognizedArtifact),
}

impl Artifact {
    pub fn confidence(&self) -> f64 {
        match self {
            Artifact::Recognized(a) => a.confidence,
            Artifact::Unrecognized(a) => a.confidence,
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, Artifact::Recognized(_))
    }
}

impl From<RecognizedArtifact> for Artifact {
    fn from(artifact: RecognizedArtifact) -> Self {
        Artifact::Recognized(artifact)
    }
}

impl From<UnrecognizedArtifact> for Artifact {
    fn from(artifact: UnrecognizedArtifact) -> Self {
        Artifact::Unrecognized(artifact)
    }
}
