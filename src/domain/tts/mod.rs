pub mod annotation;
pub mod dto;
pub mod error;
pub mod markdown;
pub mod observer;
pub mod service;

pub use annotation::{AnnotationExtractor, AnnotationKind, AnnotationSet, Extraction};
pub use dto::{ArtifactHandle, SynthesisOutcome, SynthesisRequest};
pub use error::TtsServiceError;
pub use markdown::MarkdownCleaner;
pub use observer::{SynthesisObserver, TracingObserver};
pub use service::{prepare_text, TtsService, TtsServiceApi, DEFAULT_MAX_ATTEMPTS};
