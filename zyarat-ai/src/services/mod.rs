//! Business logic services for zyarat-ai

pub mod analysis;
pub mod image_prep;
pub mod openrouter_client;
pub mod prompt;
pub mod samples;

pub use analysis::{artifact_from_reply, AnalysisService};
pub use openrouter_client::{OpenRouterClient, UpstreamError};
