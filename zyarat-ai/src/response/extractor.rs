//! JSON candidate extraction from free-form model output
//!
//! Models wrap their JSON in prose and markdown fences. The extractor picks
//! the body of the first ```` ```json ```` fence when present (the whole reply
//! otherwise) and then trims it to the span between the first `{` and the
//! last `}` that follows it.
//!
//! The trimming is deliberately naive: braces inside strings or several JSON
//! fragments in one reply are not understood. Whatever comes out is only a
//! candidate; decoding decides whether it is usable.

use once_cell::sync::Lazy;
use regex::Regex;

static JSON_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("JSON fence pattern is valid")
});

/// Where the candidate text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// Body of a ```` ```json ```` fenced block
    FencedBlock,
    /// The entire reply (no fenced block found)
    RawReply,
}

/// Result of candidate extraction, borrowing from the model reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extraction<'a> {
    pub candidate: &'a str,
    pub source: CandidateSource,
}

/// Pick the substring of `text` most likely to be a JSON object
///
/// Returns an empty candidate when no `{ ... }` span exists; that is not an
/// error here.
pub fn extract_json_candidate(text: &str) -> Extraction<'_> {
    let (body, source) = match JSON_FENCE.captures(text).and_then(|caps| caps.get(1)) {
        Some(inner) => (inner.as_str(), CandidateSource::FencedBlock),
        None => (text, CandidateSource::RawReply),
    };

    Extraction {
        candidate: trim_to_braces(body),
        source,
    }
}

/// Drop the leading run of non-`{` characters, then the trailing run of
/// non-`}` characters from what remains
fn trim_to_braces(text: &str) -> &str {
    let Some(start) = text.find('{') else {
        return "";
    };
    let rest = &text[start..];

    match rest.rfind('}') {
        Some(end) => &rest[..=end],
        None => "",
    }
}
