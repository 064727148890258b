//! Schema validation and repair of decoded model output
//!
//! Takes whatever object the model produced and returns a complete
//! [`Artifact`]. Never fails: missing or unusable fields are replaced with
//! defaults and every substitution is reported back as a [`FieldRepair`].
//!
//! Confidence handling is intentionally asymmetric. Recognized artifacts keep
//! whatever confidence the model reported; unrecognized images are capped,
//! and anything above 0.5 is replaced with 0.3.

use crate::models::artifact::{
    Artifact, RecognizedArtifact, UnrecognizedArtifact, DEFAULT_EXPLANATION,
    DEFAULT_POSSIBLE_IDENTIFICATION, DEFAULT_RECOGNIZED_CONFIDENCE,
    DEFAULT_UNRECOGNIZED_CONFIDENCE, MAX_UNRECOGNIZED_CONFIDENCE, UNKNOWN_TEXT,
};
use serde_json::{Map, Value};

/// Why a field value was substituted
#[derive(Debug, Clone, PartialEq)]
pub enum RepairKind {
    /// Key absent or `null`
    Missing,
    /// Present but unusable (non-numeric confidence)
    Invalid,
    /// Confidence above the unrecognized cap
    Clamped { from: f64 },
}

/// One field substitution made during validation
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRepair {
    pub field: &'static str,
    pub kind: RepairKind,
}

/// Validation output
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    pub artifact: Artifact,
    pub repairs: Vec<FieldRepair>,
}

/// Normalize a decoded object into one of the two artifact shapes
///
/// An `error` key selects the unrecognized shape; otherwise the object is
/// treated as a recognized artifact.
pub fn validate_artifact(record: Map<String, Value>) -> Validated {
    let mut repairer = Repairer {
        record,
        repairs: Vec::new(),
    };

    let artifact = if repairer.record.contains_key("error") {
        repairer.unrecognized()
    } else {
        repairer.recognized()
    };

    Validated {
        artifact,
        repairs: repairer.repairs,
    }
}

struct Repairer {
    record: Map<String, Value>,
    repairs: Vec<FieldRepair>,
}

impl Repairer {
    fn recognized(&mut self) -> Artifact {
        let title = self.text("title", UNKNOWN_TEXT);
        let period = self.text("period", UNKNOWN_TEXT);
        let description = self.text("description", UNKNOWN_TEXT);
        let significance = self.text("significance", UNKNOWN_TEXT);
        let location = self.text("location", UNKNOWN_TEXT);
        let confidence = self.confidence(DEFAULT_RECOGNIZED_CONFIDENCE);

        Artifact::Recognized(RecognizedArtifact {
            title,
            period,
            description,
            significance,
            location,
            confidence,
            extra: std::mem::take(&mut self.record),
        })
    }

    fn unrecognized(&mut self) -> Artifact {
        // `error` is known to be present; a null marker still selects this path
        let error = match self.record.remove("error") {
            Some(value) => render_text(value).unwrap_or_default(),
            None => String::new(),
        };
        let possible_identification =
            self.text("possible_identification", DEFAULT_POSSIBLE_IDENTIFICATION);
        let explanation = self.text("explanation", DEFAULT_EXPLANATION);

        let mut confidence = self.confidence(DEFAULT_UNRECOGNIZED_CONFIDENCE);
        if confidence > MAX_UNRECOGNIZED_CONFIDENCE {
            self.repairs.push(FieldRepair {
                field: "confidence",
                kind: RepairKind::Clamped { from: confidence },
            });
            confidence = DEFAULT_UNRECOGNIZED_CONFIDENCE;
        }

        Artifact::Unrecognized(UnrecognizedArtifact {
            error,
            possible_identification,
            explanation,
            confidence,
            extra: std::mem::take(&mut self.record),
        })
    }

    fn text(&mut self, field: &'static str, default: &str) -> String {
        match self.record.remove(field).and_then(render_text) {
            Some(text) => text,
            None => {
                self.missing(field);
                default.to_string()
            }
        }
    }

    fn confidence(&mut self, default: f64) -> f64 {
        match self.record.remove("confidence") {
            None | Some(Value::Null) => {
                self.missing("confidence");
                default
            }
            Some(value) => match numeric(&value) {
                Some(number) => number,
                None => {
                    self.repairs.push(FieldRepair {
                        field: "confidence",
                        kind: RepairKind::Invalid,
                    });
                    default
                }
            },
        }
    }

    fn missing(&mut self, field: &'static str) {
        self.repairs.push(FieldRepair {
            field,
            kind: RepairKind::Missing,
        });
    }
}

/// Strings pass through; other non-null values keep their compact JSON form
fn render_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

/// JSON numbers, or strings holding a finite number
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}
