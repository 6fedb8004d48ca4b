use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    pub tts: TtsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    pub backend: BackendKind,
    /// Base directory for generated artifacts
    pub output_dir: PathBuf,
    pub max_attempts: u32,
    /// Whether callers delete artifacts once they have been served
    pub delete_audio_file: bool,
    // OpenAI
    pub openai_model: String,
    pub openai_voice: String,
    // AWS Polly
    pub aws_region: String,
    pub polly_voice_id: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    OpenAi,
    Polly,
}

impl BackendKind {
    fn parse(value: &str) -> Result<Self, Box<dyn std::error::Error>> {
        match value.to_lowercase().as_str() {
            "openai" => Ok(BackendKind::OpenAi),
            "polly" => Ok(BackendKind::Polly),
            other => Err(format!("Unknown TTS backend: {}. Available: openai, polly", other).into()),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .as_str()
            {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            tts: TtsConfig::from_env()?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

impl TtsConfig {
    fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(TtsConfig {
            backend: BackendKind::parse(
                &env::var("TTS_BACKEND").unwrap_or_else(|_| "openai".to_string()),
            )?,
            output_dir: env::var("TTS_OUTPUT_DIR")
                .unwrap_or_else(|_| "tmp".to_string())
                .into(),
            max_attempts: env::var("TTS_MAX_ATTEMPTS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()?,
            delete_audio_file: env::var("TTS_DELETE_AUDIO_FILE")
                .map(|s| s.to_lowercase() != "false")
                .unwrap_or(true),
            openai_model: env::var("OPENAI_TTS_MODEL").unwrap_or_else(|_| "tts-1".to_string()),
            openai_voice: env::var("OPENAI_TTS_VOICE").unwrap_or_else(|_| "alloy".to_string()),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-1".to_string()),
            polly_voice_id: env::var("POLLY_VOICE_ID").unwrap_or_else(|_| "Joanna".to_string()),
        })
    }
}
