use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use voxtag_backend::infrastructure::codec::encode_wav;
use voxtag_backend::infrastructure::repositories::{BackendError, TtsRepository};

/// 0.6 s of 16 kHz audio, ten 60 ms frames
pub const SAMPLE_COUNT: usize = 9_600;
pub const SAMPLE_RATE: u32 = 16_000;

/// In-process backend whose failures are scripted by the test
#[derive(Default)]
pub struct ScriptedBackend {
    failures_left: AtomicU32,
    calls: AtomicU32,
    texts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    /// Make the next `count` calls fail after writing a partial artifact
    pub fn fail_next(&self, count: u32) {
        self.failures_left.store(count, Ordering::SeqCst);
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().clone()
    }
}

#[async_trait]
impl TtsRepository for ScriptedBackend {
    async fn synthesize(&self, text: &str, destination: &Path) -> Result<(), BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.texts.lock().push(text.to_string());

        let should_fail = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();

        if should_fail {
            tokio::fs::write(destination, b"RIFF-partial").await?;
            return Err(BackendError::Provider("scripted failure".to_string()));
        }

        let samples: Vec<i16> = (0..SAMPLE_COUNT).map(|i| (i % 256) as i16).collect();
        let wav = encode_wav(&samples, SAMPLE_RATE)
            .map_err(|e| BackendError::Encoding(e.to_string()))?;
        tokio::fs::write(destination, wav).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
