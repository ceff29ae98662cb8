//! eSpeak NG backend writing WAV to stdout

use super::TtsEngine;
use crate::audio;
use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

const ESPEAK_BINARY: &str = "espeak-ng";

#[derive(Debug)]
pub struct EspeakEngine {
    binary: PathBuf,
}

impl EspeakEngine {
    /// Check the binary on PATH so a missing install fails at startup
    pub fn new() -> Result<Self> {
        Self::with_binary(PathBuf::from(ESPEAK_BINARY))
    }

    pub fn with_binary(binary: PathBuf) -> Result<Self> {
        let status = std::process::Command::new(&binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| anyhow::anyhow!("{} unavailable: {}", binary.display(), e))?;

        if !status.success() {
            return Err(anyhow::anyhow!(
                "{} --version exited with {}",
                binary.display(),
                status
            ));
        }

        Ok(Self { binary })
    }
}

#[async_trait]
impl TtsEngine for EspeakEngine {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        debug!("eSpeak synthesizing with '{}': {}", voice, text);

        // `--` keeps utterances such as "- Tome su medicamento" out of option parsing
        let output = Command::new(&self.binary)
            .arg("-v")
            .arg(voice)
            .arg("--stdout")
            .arg("--")
            .arg(text)
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            return Err(anyhow::anyhow!(
                "espeak-ng failed with status {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        // Writing to a pipe leaves placeholder sizes in the header
        Ok(audio::normalize_wav(&output.stdout)?)
    }

    fn name(&self) -> &str {
        "espeak-ng"
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    /// Shell script standing in for espeak-ng: records argv, prints `fixture`
    fn stub_binary(dir: &Path, fixture: &[u8]) -> PathBuf {
        let fixture_path = dir.join("fixture.wav");
        std::fs::write(&fixture_path, fixture).expect("write fixture");

        let script = dir.join("espeak-ng");
        std::fs::write(
            &script,
            format!(
                "#!/bin/sh\nprintf '%s\\n' \"$@\" > \"{}\"\ncat \"{}\"\n",
                dir.join("args.txt").display(),
                fixture_path.display()
            ),
        )
        .expect("write stub");
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
            .expect("chmod stub");
        script
    }

    #[tokio::test]
    async fn test_dash_prefixed_text_passed_after_separator() {
        let dir = tempfile::tempdir().expect("temp dir");
        let stub = stub_binary(dir.path(), &audio::streamed_wav(&[1i16; 2205], 22050));
        let engine = EspeakEngine::with_binary(stub).expect("stub engine");

        engine
            .synthesize("- Tome su medicamento", "es")
            .await
            .expect("synthesize");

        let args = std::fs::read_to_string(dir.path().join("args.txt")).expect("args");
        let args: Vec<&str> = args.lines().collect();
        assert_eq!(
            args,
            vec!["-v", "es", "--stdout", "--", "- Tome su medicamento"]
        );
    }

    #[tokio::test]
    async fn test_streamed_output_normalized() {
        let dir = tempfile::tempdir().expect("temp dir");
        let stub = stub_binary(dir.path(), &audio::streamed_wav(&[1i16; 22050], 22050));
        let engine = EspeakEngine::with_binary(stub).expect("stub engine");

        let bytes = engine.synthesize("hola", "es").await.expect("synthesize");

        let reader = hound::WavReader::new(std::io::Cursor::new(bytes.as_slice())).expect("wav");
        assert_eq!(reader.duration(), 22050);
    }

    #[tokio::test]
    async fn test_header_only_output_is_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let stub = stub_binary(dir.path(), &audio::streamed_wav(&[], 22050));
        let engine = EspeakEngine::with_binary(stub).expect("stub engine");

        assert!(engine.synthesize("hola", "es").await.is_err());
    }

    #[test]
    fn test_missing_binary_fails_version_check() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(EspeakEngine::with_binary(dir.path().join("absent")).is_err());
    }
}
