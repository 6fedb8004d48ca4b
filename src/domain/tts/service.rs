use super::annotation::{AnnotationExtractor, Extraction};
use super::dto::{ArtifactHandle, SynthesisOutcome, SynthesisRequest};
use super::error::TtsServiceError;
use super::markdown::MarkdownCleaner;
use super::observer::SynthesisObserver;
use crate::infrastructure::repositories::{BackendError, TtsRepository};
use crate::infrastructure::storage::{artifact_exists, remove_artifact, ArtifactNamer};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
    namer: Arc<dyn ArtifactNamer>,
    observer: Arc<dyn SynthesisObserver>,
    max_attempts: u32,
}

impl TtsService {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        namer: Arc<dyn ArtifactNamer>,
        observer: Arc<dyn SynthesisObserver>,
        max_attempts: u32,
    ) -> Self {
        Self {
            tts_repo,
            namer,
            observer,
            max_attempts,
        }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Synthesize text into an audio artifact
    ///
    /// This operation:
    /// - Cleans markdown and strips emotion/face/action annotations
    /// - Calls the backend until the artifact exists or the attempt budget runs out
    /// - Removes partial artifacts left by failed attempts
    ///
    /// Never fails loudly: every failure is reported to the observer and
    /// surfaces as `None`.
    async fn synthesize(&self, request: SynthesisRequest) -> Option<SynthesisOutcome>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize(&self, request: SynthesisRequest) -> Option<SynthesisOutcome> {
        let destination = self.namer.next_destination();
        let max_attempts = self.attempt_budget(request.max_attempts);

        let Extraction {
            cleaned_text,
            annotations,
        } = match prepare_text(&request.text) {
            Ok(extraction) => extraction,
            Err(e) => {
                self.observer.aborted(&e);
                return None;
            }
        };

        tracing::debug!(
            destination = %destination.display(),
            max_attempts = max_attempts,
            original_length = request.text.len(),
            cleaned_length = cleaned_text.len(),
            annotation_count = annotations.len(),
            "Text prepared for synthesis"
        );

        match self
            .run_attempts(&cleaned_text, &destination, max_attempts)
            .await
        {
            Ok(attempts) => Some(SynthesisOutcome {
                artifact: ArtifactHandle::new(destination),
                annotations,
                attempts,
            }),
            Err(_) => None,
        }
    }
}

/// Markdown cleanup followed by annotation extraction.
///
/// Fails when nothing speakable is left once tags are removed.
pub fn prepare_text(text: &str) -> Result<Extraction, TtsServiceError> {
    let cleaned = MarkdownCleaner::new().clean(text);
    let extraction = AnnotationExtractor::new().extract(&cleaned);

    if extraction.cleaned_text.trim().is_empty() {
        return Err(TtsServiceError::Extraction(
            "no speakable text left after removing annotations".to_string(),
        ));
    }

    Ok(extraction)
}

impl TtsService {
    /// A per-request budget may lower the configured one, never raise it
    fn attempt_budget(&self, requested: Option<u32>) -> u32 {
        requested.map_or(self.max_attempts, |n| n.min(self.max_attempts))
    }

    /// Invokes the backend until the artifact exists or the budget is spent.
    /// Returns the number of backend invocations.
    async fn run_attempts(
        &self,
        text: &str,
        destination: &Path,
        max_attempts: u32,
    ) -> Result<u32, TtsServiceError> {
        let mut remaining = max_attempts;
        let mut invocations = 0;

        while !artifact_exists(destination).await && remaining > 0 {
            invocations += 1;

            let result = match self.tts_repo.synthesize(text, destination).await {
                Ok(()) if !artifact_exists(destination).await => Err(BackendError::MissingArtifact),
                other => other,
            };

            if let Err(e) = result {
                self.observer
                    .attempt_failed(max_attempts - remaining + 1, text, &e);
                self.discard_partial(destination).await;
                remaining -= 1;
            }
        }

        if artifact_exists(destination).await {
            self.observer
                .succeeded(text, destination, max_attempts - remaining);
            Ok(invocations)
        } else {
            self.observer.exhausted(text, max_attempts);
            Err(TtsServiceError::BudgetExhausted {
                attempts: max_attempts,
            })
        }
    }

    async fn discard_partial(&self, destination: &Path) {
        match remove_artifact(destination).await {
            Ok(true) => tracing::debug!(
                destination = %destination.display(),
                "Removed partial artifact"
            ),
            Ok(false) => {}
            Err(e) => tracing::warn!(
                destination = %destination.display(),
                error = %e,
                "Failed to remove partial artifact"
            ),
        }
    }
}
