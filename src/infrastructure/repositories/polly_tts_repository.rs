use super::batching::split_into_batches;
use super::tts_repository::{BackendError, TtsRepository};
use crate::infrastructure::codec::{encode_wav, pcm_to_samples};
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::path::Path;
use std::sync::Arc;

/// AWS Polly has a limit of 3000 characters per request
const MAX_BATCH_SIZE: usize = 3000;

const PCM_SAMPLE_RATE: u32 = 16_000;

/// AWS Polly implementation of TTS repository
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
    voice_id: String,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>, voice_id: String) -> Self {
        Self {
            polly_client,
            voice_id,
        }
    }

    /// Call AWS Polly to synthesize a single text batch as raw PCM
    async fn call_polly(&self, text: &str) -> Result<Vec<u8>, BackendError> {
        let voice_id = VoiceId::from(self.voice_id.as_str());
        let engine = Engine::Neural;

        tracing::info!(
            voice_id = ?voice_id,
            engine = ?engine,
            output_format = "Pcm",
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(voice_id)
            .output_format(OutputFormat::Pcm)
            .sample_rate(PCM_SAMPLE_RATE.to_string())
            .engine(engine)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    voice_id = %self.voice_id,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                BackendError::Provider(format!("AWS Polly error: {:?}", e))
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            BackendError::Provider(format!("Failed to read audio stream: {}", e))
        })?;

        Ok(audio_stream.into_bytes().to_vec())
    }
}

#[async_trait]
impl TtsRepository for PollyTtsRepository {
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
            let pcm = self.call_polly(batch).await?;
            samples.extend(pcm_to_samples(&pcm));
            tracing::debug!(batch_index = index, total_samples = samples.len(), "Batch merged");
        }

        let wav = encode_wav(&samples, PCM_SAMPLE_RATE)
            .map_err(|e| BackendError::Encoding(e.to_string()))?;
        tokio::fs::write(destination, &wav).await?;

        let duration = start_time.elapsed();
        tracing::info!(
            provider = "polly",
            latency_ms = duration.as_millis(),
            batch_count = batches.len(),
            audio_size_bytes = wav.len(),
            destination = %destination.display(),
            "TTS synthesis completed"
        );

        Ok(())
    }

    fn name(&self) -> &str {
        "polly"
    }
}
