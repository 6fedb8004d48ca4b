use chrono::Utc;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Hands out a fresh destination path for every synthesis run
pub trait ArtifactNamer: Send + Sync {
    fn next_destination(&self) -> PathBuf;
}

/// Names artifacts `tts-<date>@<uuid>.<extension>` inside an output directory
#[derive(Debug, Clone)]
pub struct TimestampedArtifactNamer {
    output_dir: PathBuf,
    extension: String,
}

impl TimestampedArtifactNamer {
    pub fn new(output_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            extension: extension.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl ArtifactNamer for TimestampedArtifactNamer {
    fn next_destination(&self) -> PathBuf {
        let file_name = format!(
            "tts-{}@{}.{}",
            Utc::now().format("%Y-%m-%d"),
            Uuid::new_v4().simple(),
            self.extension
        );
        self.output_dir.join(file_name)
    }
}

pub async fn artifact_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

/// Deletes the artifact if there is one. Returns whether a file was removed.
pub async fn remove_artifact(path: &Path) -> io::Result<bool> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
