use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::Path;

/// Frame length handed to downstream consumers
pub const FRAME_DURATION_MS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioEncoding {
    Pcm,
    Opus,
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("wav error: {0}")]
    Wav(#[from] hound::Error),
    #[error("unsupported encoding: {0:?}, only pcm frames are available")]
    Unsupported(AudioEncoding),
}

/// Converts a finished audio artifact into encoded frames
pub trait AudioCodec: Send + Sync {
    /// Whether `encode` can produce frames in this encoding
    fn supports(&self, encoding: AudioEncoding) -> bool;

    fn encode(&self, artifact: &Path, encoding: AudioEncoding) -> Result<Vec<Vec<u8>>, CodecError>;
}

/// Reads 16-bit WAV artifacts and slices them into fixed-length PCM frames.
///
/// Opus output is not available from this codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavCodec;

impl WavCodec {
    pub fn new() -> Self {
        Self
    }
}

impl AudioCodec for WavCodec {
    fn supports(&self, encoding: AudioEncoding) -> bool {
        encoding == AudioEncoding::Pcm
    }

    fn encode(&self, artifact: &Path, encoding: AudioEncoding) -> Result<Vec<Vec<u8>>, CodecError> {
        if !self.supports(encoding) {
            return Err(CodecError::Unsupported(encoding));
        }

        let mut reader = hound::WavReader::open(artifact)?;
        let spec = reader.spec();
        let samples = reader.samples::<i16>().collect::<Result<Vec<_>, _>>()?;

        let samples_per_frame =
            (spec.sample_rate * FRAME_DURATION_MS / 1000) as usize * spec.channels as usize;
        let frames = samples
            .chunks(samples_per_frame.max(1))
            .map(|frame| frame.iter().flat_map(|s| s.to_le_bytes()).collect())
            .collect();

        Ok(frames)
    }
}

/// Interprets raw little-endian 16-bit PCM bytes as samples. A trailing odd byte is dropped.
pub fn pcm_to_samples(pcm: &[u8]) -> Vec<i16> {
    pcm.chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

/// Wraps mono 16-bit samples into an in-memory WAV file
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>, hound::Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut buffer = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut buffer, spec)?;
        for sample in samples {
            writer.write_sample(*sample)?;
        }
        writer.finalize()?;
    }

    Ok(buffer.into_inner())
}
