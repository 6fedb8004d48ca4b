use async_trait::async_trait;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("audio encoding error: {0}")]
    Encoding(String),
    #[error("backend reported success but left no artifact")]
    MissingArtifact,
}

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (AWS Polly, OpenAI, etc.)
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Splitting text into batches if needed
/// - Writing the merged audio to the destination as a single artifact
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize text and write the audio artifact to `destination`.
    ///
    /// Calling it again with the same destination overwrites whatever a
    /// previous attempt left behind.
    ///
    /// # Arguments
    /// * `text` - The cleaned text to synthesize (no markdown, no annotation tags)
    /// * `destination` - Where the artifact must be written
    ///
    /// # Errors
    /// Returns error if synthesis fails or provider is unavailable
    async fn synthesize(&self, text: &str, destination: &Path) -> Result<(), BackendError>;

    /// Provider name, used in logs and readiness reports
    fn name(&self) -> &str;
}
