use super::annotation::AnnotationSet;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Raw text to synthesize, consumed by a single synthesis run
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub text: String,
    /// Overrides the service's attempt budget for this run
    pub max_attempts: Option<u32>,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            max_attempts: None,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }
}

/// Path of a produced audio artifact. Owned by the caller once returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArtifactHandle(PathBuf);

impl ArtifactHandle {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn into_path(self) -> PathBuf {
        self.0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SynthesisOutcome {
    pub artifact: ArtifactHandle,
    pub annotations: AnnotationSet,
    /// Backend invocations used, including the successful one
    pub attempts: u32,
}
