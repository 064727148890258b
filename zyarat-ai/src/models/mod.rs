//! Response data models

pub mod artifact;

pub use artifact::{Artifact, RecognizedArtifact, UnrecognizedArtifact};
