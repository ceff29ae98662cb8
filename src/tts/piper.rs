//! Piper TTS backend calling a local binary

use super::TtsEngine;
use crate::config::Config;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, info};

const PIPER_BINARY: &str = "piper-tts";

static SCRATCH_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug)]
pub struct PiperEngine {
    binary: PathBuf,
    /// Voice selector -> model path
    models: HashMap<String, PathBuf>,
}

impl PiperEngine {
    /// Resolve the model for every configured voice and locate the binary
    pub fn new(config: &Config) -> Result<Self> {
        let mut models = HashMap::new();
        let mut missing = Vec::new();

        for voice in config.voices_in_use() {
            let model_name = config
                .piper_models
                .get(voice)
                .map(String::as_str)
                .unwrap_or(voice);
            let model_path = config.voices_dir.join(format!("{}.onnx", model_name));

            if model_path.exists() {
                debug!("Voice '{}' -> {}", voice, model_path.display());
                models.insert(voice.to_string(), model_path);
            } else {
                missing.push(model_path.display().to_string());
            }
        }

        if !missing.is_empty() {
            return Err(anyhow::anyhow!(
                "Piper model file missing: {}",
                missing.join(", ")
            ));
        }

        let binary = find_in_path(PIPER_BINARY)
            .ok_or_else(|| anyhow::anyhow!("{} not found on PATH", PIPER_BINARY))?;
        info!("🔊 Piper binary: {}", binary.display());

        Ok(Self { binary, models })
    }

    fn model_for(&self, voice: &str) -> Result<&Path> {
        self.models
            .get(voice)
            .map(PathBuf::as_path)
            .ok_or_else(|| anyhow::anyhow!("No Piper model loaded for voice '{}'", voice))
    }
}

/// Locate an executable on PATH
fn find_in_path(name: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

#[async_trait]
impl TtsEngine for PiperEngine {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        debug!("📢 Piper synthesizing with '{}': '{}'", voice, text);

        // Clone values for move into blocking task
        let binary = self.binary.clone();
        let model_path = self.model_for(voice)?.to_path_buf();
        let text_owned = text.to_string();

        // Move blocking subprocess work to dedicated thread pool
        tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
            let wav_path = std::env::temp_dir().join(format!(
                "health_audio_{}_{}.wav",
                std::process::id(),
                SCRATCH_COUNTER.fetch_add(1, Ordering::Relaxed)
            ));

            let mut child = Command::new(&binary)
                .arg("-m")
                .arg(&model_path)
                .arg("-f")
                .arg(&wav_path)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::piped())
                .spawn()
                .map_err(|e| {
                    error!("❌ Failed to spawn piper-tts: {}", e);
                    anyhow::anyhow!("Failed to spawn piper-tts: {}", e)
                })?;

            // stdin is dropped once the match ends so piper sees EOF
            let written = match child.stdin.take() {
                Some(mut stdin) => stdin
                    .write_all(text_owned.as_bytes())
                    .and_then(|_| stdin.flush()),
                None => Ok(()),
            };
            if let Err(e) = written {
                let _ = child.kill();
                let _ = child.wait();
                let _ = std::fs::remove_file(&wav_path);
                return Err(anyhow::anyhow!("Failed to send text to piper-tts: {}", e));
            }

            let output = child.wait_with_output()?;
            if !output.status.success() {
                let _ = std::fs::remove_file(&wav_path);
                return Err(anyhow::anyhow!(
                    "Piper failed with status {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ));
            }

            if !wav_path.exists() {
                return Err(anyhow::anyhow!("Piper output file not created"));
            }

            let bytes = std::fs::read(&wav_path);
            let _ = std::fs::remove_file(&wav_path);
            Ok(bytes?)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    fn name(&self) -> &str {
        "piper"
    }
}
