//! Model response normalization pipeline
//!
//! Raw reply text → [`extractor`] (candidate JSON substring) → [`decode_candidate`]
//! (generic object) → [`validator`] (complete artifact shape).
//!
//! Every stage is pure and synchronous. Logging is left to the caller, which
//! gets the candidate source and the list of field repairs back.

pub mod extractor;
pub mod validator;

pub use extractor::{extract_json_candidate, CandidateSource, Extraction};
pub use validator::{validate_artifact, FieldRepair, RepairKind, Validated};

use serde_json::{Map, Value};
use thiserror::Error;

/// Decoding failure for an extracted candidate
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to decode JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// Successful normalization of a model reply
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResponse {
    pub source: CandidateSource,
    pub validated: Validated,
}

/// Decode a candidate string into a JSON object
pub fn decode_candidate(candidate: &str) -> Result<Map<String, Value>, ParseError> {
    match serde_json::from_str::<Value>(candidate)? {
        Value::Object(map) => Ok(map),
        Value::Array(_) => Err(ParseError::NotAnObject("array")),
        Value::String(_) => Err(ParseError::NotAnObject("string")),
        Value::Number(_) => Err(ParseError::NotAnObject("number")),
        Value::Bool(_) => Err(ParseError::NotAnObject("boolean")),
        Value::Null => Err(ParseError::NotAnObject("null")),
    }
}

/// Run the full pipeline on a raw model reply
pub fn normalize_response(text: &str) -> Result<NormalizedResponse, ParseError> {
    let extraction = extract_json_candidate(text);
    let record = decode_candidate(extraction.candidate)?;

    Ok(NormalizedResponse {
        source: extraction.source,
        validated: validate_artifact(record),
    })
}
