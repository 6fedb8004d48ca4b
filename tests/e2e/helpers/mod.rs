use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;
use voxtag_backend::{
    controllers::{health::Readiness, tts::TtsController},
    domain::tts::{TracingObserver, TtsService, DEFAULT_MAX_ATTEMPTS},
    infrastructure::{
        codec::WavCodec, http::build_router, storage::TimestampedArtifactNamer,
    },
};

pub mod api_client;
pub mod assertions;
pub mod backends;

use api_client::TestClient;
use backends::ScriptedBackend;

#[derive(Debug, Clone, Copy)]
pub struct TestOptions {
    pub max_attempts: u32,
    pub delete_audio_file: bool,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delete_audio_file: true,
        }
    }
}

pub struct TestContext {
    pub client: TestClient,
    pub backend: Arc<ScriptedBackend>,
    output_dir: TempDir,
}

impl TestContext {
    pub async fn start(options: TestOptions) -> Self {
        let output_dir = tempfile::tempdir().expect("Failed to create output dir");
        let backend = Arc::new(ScriptedBackend::default());

        let tts_service = Arc::new(TtsService::new(
            backend.clone(),
            Arc::new(TimestampedArtifactNamer::new(output_dir.path(), "wav")),
            Arc::new(TracingObserver),
            options.max_attempts,
        ));
        let tts_controller = Arc::new(TtsController::new(
            tts_service,
            Arc::new(WavCodec::new()),
            options.delete_audio_file,
        ));
        let readiness = Arc::new(Readiness {
            output_dir: output_dir.path().to_path_buf(),
            backend: "scripted".to_string(),
        });
        let app = build_router(tts_controller, readiness);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            client: TestClient::new(&format!("http://{}", addr)),
            backend,
            output_dir,
        }
    }

    pub fn output_dir(&self) -> &Path {
        self.output_dir.path()
    }
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        TestContext::start(TestOptions::default())
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // The output directory is removed when the TempDir drops
        }
    }
}
