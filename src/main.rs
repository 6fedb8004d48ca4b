use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voxtag_backend::controllers::{health::Readiness, tts::TtsController};
use voxtag_backend::domain::tts::{TracingObserver, TtsService};
use voxtag_backend::infrastructure::codec::WavCodec;
use voxtag_backend::infrastructure::config::{BackendKind, Config, LogFormat, TtsConfig};
use voxtag_backend::infrastructure::http::{build_router, start_http_server};
use voxtag_backend::infrastructure::repositories::{
    OpenAiTtsRepository, PollyTtsRepository, TtsRepository,
};
use voxtag_backend::infrastructure::storage::TimestampedArtifactNamer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        host = %config.host,
        port = config.port,
        development = config.is_development(),
        "Starting voxtag backend"
    );

    tokio::fs::create_dir_all(&config.tts.output_dir).await?;
    tracing::info!(
        output_dir = %config.tts.output_dir.display(),
        max_attempts = config.tts.max_attempts,
        delete_audio_file = config.tts.delete_audio_file,
        "Artifact output directory ready"
    );

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate the synthesis backend selected by configuration
    let tts_repo = create_backend(&config.tts).await;
    tracing::info!(backend = tts_repo.name(), "TTS backend initialized");

    // 2. Instantiate services
    let namer = Arc::new(TimestampedArtifactNamer::new(
        config.tts.output_dir.clone(),
        "wav",
    ));
    let tts_service = Arc::new(TtsService::new(
        tts_repo.clone(),
        namer,
        Arc::new(TracingObserver),
        config.tts.max_attempts,
    ));

    // 3. Instantiate controllers
    let tts_controller = Arc::new(TtsController::new(
        tts_service,
        Arc::new(WavCodec::new()),
        config.tts.delete_audio_file,
    ));
    let readiness = Arc::new(Readiness {
        output_dir: config.tts.output_dir.clone(),
        backend: tts_repo.name().to_string(),
    });

    let app = build_router(tts_controller, readiness);
    start_http_server(Arc::new(config), app).await?;

    Ok(())
}

async fn create_backend(config: &TtsConfig) -> Arc<dyn TtsRepository> {
    match config.backend {
        BackendKind::OpenAi => {
            if std::env::var("OPENAI_API_KEY").is_err() {
                tracing::warn!("OPENAI_API_KEY not set, OpenAI synthesis requests will fail");
            }
            let client = Arc::new(async_openai::Client::new());
            Arc::new(OpenAiTtsRepository::new(
                client,
                config.openai_model.clone(),
                config.openai_voice.clone(),
            ))
        }
        BackendKind::Polly => {
            tracing::info!("Initializing AWS Polly client with region: {}", config.aws_region);
            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));
            Arc::new(PollyTtsRepository::new(
                polly_client,
                config.polly_voice_id.clone(),
            ))
        }
    }
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "voxtag_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
