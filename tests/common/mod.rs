#![allow(dead_code)]

pub mod mock_tts;

use health_audio::config::{Config, LanguageProfile};
use health_audio::generator::AudioGenerator;
use health_audio::language::Language;
use mock_tts::MockTts;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub struct TestContext {
    pub temp_dir: TempDir,
    pub config: Config,
    pub engine: Arc<MockTts>,
    pub generator: AudioGenerator,
}

impl TestContext {
    /// Generator writing into a fresh temp dir with small default lists
    pub fn new() -> Self {
        Self::with_engine(MockTts::new())
    }

    pub fn with_engine(engine: MockTts) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = test_config(temp_dir.path().join("out"));
        let engine = Arc::new(engine);
        let generator = AudioGenerator::initialize(&config, engine.clone())
            .expect("Failed to initialize generator");

        Self {
            temp_dir,
            config,
            engine,
            generator,
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.config.output_dir.clone()
    }

    /// Sorted file names currently in the output directory
    pub fn output_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.output_dir())
            .expect("Failed to read output dir")
            .map(|entry| {
                entry
                    .expect("Failed to read dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }
}

pub fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Config with injected defaults instead of the built-in phrase lists
pub fn test_config(output_dir: PathBuf) -> Config {
    Config {
        output_dir,
        languages: BTreeMap::from([
            (
                Language::Spanish,
                LanguageProfile {
                    voice: "es".into(),
                    fallback: false,
                    default_texts: texts(&["uno", "dos", "tres"]),
                },
            ),
            (
                Language::Tagalog,
                LanguageProfile {
                    voice: "en".into(),
                    fallback: true,
                    default_texts: texts(&["isa", "dalawa"]),
                },
            ),
        ]),
        ..Config::default()
    }
}
