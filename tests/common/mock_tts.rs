//! Mock TTS Engine for Testing
//!
//! Records every synthesis request and returns a short silent WAV.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Mock TTS engine that records (text, voice) pairs
#[derive(Debug)]
pub struct MockTts {
    /// All synthesis requests, in call order
    pub calls: Arc<Mutex<Vec<(String, String)>>>,
    /// Texts that make `synthesize` return an error
    pub fail_on: Arc<Mutex<HashSet<String>>>,
    /// Texts that make `synthesize` return bytes that are not a WAV
    pub garbage_on: Arc<Mutex<HashSet<String>>>,
}

impl MockTts {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_on: Arc::new(Mutex::new(HashSet::new())),
            garbage_on: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn failing_on(texts: &[&str]) -> Self {
        let mock = Self::new();
        mock.fail_on
            .lock()
            .unwrap()
            .extend(texts.iter().map(|t| t.to_string()));
        mock
    }

    pub fn garbage_on(texts: &[&str]) -> Self {
        let mock = Self::new();
        mock.garbage_on
            .lock()
            .unwrap()
            .extend(texts.iter().map(|t| t.to_string()));
        mock
    }

    /// Get all synthesized texts
    pub fn get_texts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(text, _)| text.clone())
            .collect()
    }

    /// Get the voices used, in call order
    pub fn get_voices(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, voice)| voice.clone())
            .collect()
    }
}

impl Default for MockTts {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl health_audio::tts::TtsEngine for MockTts {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), voice.to_string()));

        if self.fail_on.lock().unwrap().contains(text) {
            return Err(anyhow::anyhow!("Mock TTS failure"));
        }
        if self.garbage_on.lock().unwrap().contains(text) {
            return Ok(b"not a wav file".to_vec());
        }

        // A tenth of a second of silence
        Ok(health_audio::audio::encode_wav(&[0i16; 1600], 16000)?)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_tts_records_calls() {
        use health_audio::tts::TtsEngine;

        let mock = MockTts::failing_on(&["bad"]);
        let bytes = mock.synthesize("hola", "es").await.unwrap();
        assert!(health_audio::audio::inspect_wav(&bytes).is_ok());
        assert!(mock.synthesize("bad", "en").await.is_err());

        assert_eq!(mock.get_texts(), vec!["hola", "bad"]);
        assert_eq!(mock.get_voices(), vec!["es", "en"]);
    }
}
