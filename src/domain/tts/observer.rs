use super::error::TtsServiceError;
use crate::infrastructure::repositories::BackendError;
use std::path::Path;

/// Component identifier attached to every synthesis log line
pub const COMPONENT: &str = "tts";

/// Receives the outcome of every step of a synthesis run.
///
/// Injected into [`super::TtsService`] so callers decide where the events go.
/// The default is [`TracingObserver`].
pub trait SynthesisObserver: Send + Sync {
    /// A single backend attempt failed. `attempt` starts at 1.
    fn attempt_failed(&self, attempt: u32, text: &str, error: &BackendError);

    /// The artifact exists. `retries` is the number of failed attempts before it.
    fn succeeded(&self, text: &str, artifact: &Path, retries: u32);

    /// Every attempt failed.
    fn exhausted(&self, text: &str, attempts: u32);

    /// The run stopped before any attempt was made.
    fn aborted(&self, error: &TtsServiceError);
}

/// Emits synthesis events through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SynthesisObserver for TracingObserver {
    fn attempt_failed(&self, attempt: u32, text: &str, error: &BackendError) {
        tracing::warn!(
            component = COMPONENT,
            attempt = attempt,
            text = text,
            error = %error,
            "Speech synthesis attempt failed"
        );
    }

    fn succeeded(&self, text: &str, artifact: &Path, retries: u32) {
        tracing::info!(
            component = COMPONENT,
            text = text,
            artifact = %artifact.display(),
            retries = retries,
            "Speech synthesis succeeded"
        );
    }

    fn exhausted(&self, text: &str, attempts: u32) {
        tracing::error!(
            component = COMPONENT,
            text = text,
            attempts = attempts,
            "Speech synthesis failed, check the network connection or the TTS service"
        );
    }

    fn aborted(&self, error: &TtsServiceError) {
        tracing::error!(
            component = COMPONENT,
            error = %error,
            "Failed to generate TTS file"
        );
    }
}
