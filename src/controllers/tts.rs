use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::tts::{
        prepare_text, AnnotationKind, SynthesisOutcome, SynthesisRequest, TtsServiceApi,
    },
    error::{AppError, AppResult},
    infrastructure::{
        codec::{AudioCodec, AudioEncoding, CodecError},
        storage::remove_artifact,
    },
};

const MAX_TEXT_LENGTH: usize = 10_000;

/// Request for POST /api/tts/synthesize
#[derive(Debug, Serialize, Deserialize)]
pub struct TtsRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
    /// When set, the artifact is returned as concatenated encoded frames
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<AudioEncoding>,
}

pub struct TtsController {
    tts_service: Arc<dyn TtsServiceApi>,
    codec: Arc<dyn AudioCodec>,
    delete_audio_file: bool,
}

impl TtsController {
    pub fn new(
        tts_service: Arc<dyn TtsServiceApi>,
        codec: Arc<dyn AudioCodec>,
        delete_audio_file: bool,
    ) -> Self {
        Self {
            tts_service,
            codec,
            delete_audio_file,
        }
    }

    /// POST /api/tts/synthesize - Convert annotated text to speech
    pub async fn synthesize(
        State(controller): State<Arc<TtsController>>,
        Json(request): Json<TtsRequest>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let char_count = request.text.chars().count();

        if request.text.trim().is_empty() {
            return Err(AppError::BadRequest("Text cannot be empty".to_string()));
        }

        if char_count > MAX_TEXT_LENGTH {
            return Err(AppError::PayloadTooLarge(
                "Text must be 10,000 characters or less".to_string(),
            ));
        }

        if let Some(encoding) = request.encoding {
            if !controller.codec.supports(encoding) {
                return Err(AppError::BadRequest(
                    CodecError::Unsupported(encoding).to_string(),
                ));
            }
        }

        if let Err(e) = prepare_text(&request.text) {
            return Err(AppError::BadRequest(e.to_string()));
        }

        let mut synthesis_request = SynthesisRequest::new(request.text);
        synthesis_request.max_attempts = request.max_attempts;

        let outcome = controller
            .tts_service
            .synthesize(synthesis_request)
            .await
            .ok_or_else(|| {
                AppError::ExternalService(
                    "Speech synthesis failed, check the network connection or the TTS service"
                        .to_string(),
                )
            })?;

        let served = controller.read_artifact(&outcome, request.encoding).await;

        if controller.delete_audio_file {
            if let Err(e) = remove_artifact(outcome.artifact.path()).await {
                tracing::warn!(
                    artifact = %outcome.artifact.path().display(),
                    error = %e,
                    "Failed to delete served artifact"
                );
            }
        }

        let (body, frame_count) = served?;

        let mut headers = annotation_headers(&outcome);
        let content_type = if request.encoding.is_some() {
            "application/octet-stream"
        } else {
            "audio/wav"
        };
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        if let Some(count) = frame_count {
            headers.insert("x-frame-count", HeaderValue::from(count));
        }

        Ok((StatusCode::OK, headers, Body::from(body)))
    }

    /// Raw artifact bytes, or concatenated frames plus their count when an encoding is requested
    async fn read_artifact(
        &self,
        outcome: &SynthesisOutcome,
        encoding: Option<AudioEncoding>,
    ) -> AppResult<(Vec<u8>, Option<usize>)> {
        let path = outcome.artifact.path().to_path_buf();

        let Some(encoding) = encoding else {
            return Ok((tokio::fs::read(&path).await?, None));
        };

        let codec = self.codec.clone();
        let frames = tokio::task::spawn_blocking(move || codec.encode(&path, encoding))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
            .map_err(|e| match e {
                unsupported @ CodecError::Unsupported(_) => AppError::BadRequest(unsupported.to_string()),
                other => AppError::Internal(other.to_string()),
            })?;

        Ok((frames.concat(), Some(frames.len())))
    }
}

fn annotation_headers(outcome: &SynthesisOutcome) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("x-attempts", HeaderValue::from(outcome.attempts));

    for (kind, value) in outcome.annotations.iter() {
        let name = match kind {
            AnnotationKind::Emotion => "x-emotion",
            AnnotationKind::Face => "x-face",
            AnnotationKind::Action => "x-action",
        };
        // Annotation values are ASCII letters
        if let Ok(value) = HeaderValue::from_str(value) {
            headers.insert(HeaderName::from_static(name), value);
        }
    }

    headers
}
