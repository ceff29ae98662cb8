//! TTS (Text-to-Speech) Module
//!
//! Provides a unified synthesis interface over local TTS backends.

use crate::config::Config;
use crate::error::{GenError, GenResult};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

pub mod espeak;
pub mod piper;

/// Trait for TTS engines
#[async_trait]
pub trait TtsEngine: Send + Sync + std::fmt::Debug {
    /// Synthesize `text` with the given voice selector, returning WAV bytes
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>>;

    /// Get the engine name
    fn name(&self) -> &str;
}

/// Factory to create the configured TTS engine
pub fn create_engine(config: &Config) -> GenResult<Arc<dyn TtsEngine>> {
    info!("🛠️ Creating TTS engine: {}", config.engine);
    let engine: Arc<dyn TtsEngine> = match config.engine.as_str() {
        "piper" => {
            info!("  - Using Piper TTS (voices: {})", config.voices_dir.display());
            Arc::new(piper::PiperEngine::new(config).map_err(init_error)?)
        }
        "espeak" | "espeak-ng" | "system" => {
            info!("  - Using eSpeak NG");
            Arc::new(espeak::EspeakEngine::new().map_err(init_error)?)
        }
        _ => {
            warn!(
                "  - Unknown engine '{}', falling back to eSpeak NG",
                config.engine
            );
            Arc::new(espeak::EspeakEngine::new().map_err(init_error)?)
        }
    };
    info!("✅ TTS engine '{}' initialized", engine.name());
    Ok(engine)
}

fn init_error(e: anyhow::Error) -> GenError {
    GenError::Initialization(format!("{:#}", e))
}
