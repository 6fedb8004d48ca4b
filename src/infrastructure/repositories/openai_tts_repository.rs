use super::batching::split_into_batches;
use super::tts_repository::{BackendError, TtsRepository};
use crate::infrastructure::codec::{encode_wav, pcm_to_samples};
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, SpeechResponseFormat, Voice},
    Client,
};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// OpenAI has a limit of 4096 characters per request
const MAX_BATCH_SIZE: usize = 4096;

/// Raw PCM responses are 24 kHz, 16-bit, mono
const PCM_SAMPLE_RATE: u32 = 24_000;

/// OpenAI TTS implementation of TTS repository
pub struct OpenAiTtsRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    voice: String,
}

impl OpenAiTtsRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String, voice: String) -> Self {
        Self {
            client,
            model,
            voice,
        }
    }

    fn speech_model(&self) -> SpeechModel {
        match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }

    fn speech_voice(&self) -> Voice {
        match self.voice.to_lowercase().as_str() {
            "echo" => Voice::Echo,
            "fable" => Voice::Fable,
            "onyx" => Voice::Onyx,
            "nova" => Voice::Nova,
            "shimmer" => Voice::Shimmer,
            _ => Voice::Alloy,
        }
    }

    /// Call OpenAI TTS API to synthesize a single text batch as raw PCM
    async fn call_openai(&self, text: &str) -> Result<Vec<u8>, BackendError> {
        tracing::info!(
            model = %self.model,
            voice = %self.voice,
            text_length = text.len(),
            "Calling OpenAI TTS API"
        );

        let request = CreateSpeechRequest {
            model: self.speech_model(),
            input: text.to_string(),
            voice: self.speech_voice(),
            response_format: Some(SpeechResponseFormat::Pcm),
            speed: None,
        };

        let response = self
            .client
            .audio()
            .speech(request)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    model = %self.model,
                    text_length = text.len(),
                    "OpenAI TTS API call failed"
                );
                BackendError::Provider(format!("OpenAI TTS error: {}", e))
            })?;

        let audio_bytes = response.bytes.to_vec();
        tracing::debug!(audio_size = audio_bytes.len(), "OpenAI TTS audio received");

        Ok(audio_bytes)
    }
}

#[async_trait]
impl TtsRepository for OpenAiTtsRepository {
    async fn synthesize(&self, text: &str, destination: &Path) -> Result<(), BackendError> {
        let start_time = std::time::Instant::now();

        let batches = split_into_batches(text, MAX_BATCH_SIZE);
        tracing::info!(
            batch_count = batches.len(),
            text_length = text.len(),
            "Text split into batches"
        );

        let mut samples = Vec::new();
        for (index, batch) in batches.iter().enumerate() {
            let pcm = self.call_openai(batch).await?;
            samples.extend(pcm_to_samples(&pcm));
            tracing::debug!(batch_index = index, total_samples = samples.len(), "Batch merged");
        }

        let wav = encode_wav(&samples, PCM_SAMPLE_RATE)
            .map_err(|e| BackendError::Encoding(e.to_string()))?;
        tokio::fs::write(destination, &wav).await?;

        tracing::info!(
            provider = "openai",
            model = %self.model,
            latency_ms = start_time.elapsed().as_millis(),
            batch_count = batches.len(),
            audio_size_bytes = wav.len(),
            destination = %destination.display(),
            "TTS synthesis completed"
        );

        Ok(())
    }

    fn name(&self) -> &str {
        "openai"
    }
}
