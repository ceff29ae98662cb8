//! Audio generation orchestrator
//!
//! Drives text -> speech conversion one item at a time. A failure on one
//! item is logged and recorded; it never aborts the batch.

use crate::audio;
use crate::config::{Config, LanguageProfile};
use crate::error::{GenError, GenResult};
use crate::language::Language;
use crate::report::{GenerationReport, ItemOutcome, ItemStatus, LanguageReport};
use crate::texts::{TextItem, TextSource};
use crate::tts::{self, TtsEngine};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

/// What a run will generate
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationPlan {
    /// Default texts for these languages
    Defaults(Vec<Language>),
    /// Caller-supplied texts; `None` entries are skipped
    Custom(BTreeMap<Language, Option<Vec<String>>>),
}

/// Decide between default and custom generation.
///
/// Custom mode applies as soon as any language has non-empty custom texts;
/// languages outside `selected` are then dropped, never backfilled.
pub fn plan_generation(
    selected: &[Language],
    mut custom: BTreeMap<Language, Option<Vec<String>>>,
) -> GenerationPlan {
    let any_custom = custom
        .values()
        .any(|texts| texts.as_ref().is_some_and(|t| !t.is_empty()));

    if any_custom {
        for (language, texts) in custom.iter_mut() {
            if !selected.contains(language) {
                *texts = None;
            }
        }
        GenerationPlan::Custom(custom)
    } else {
        let mut languages = selected.to_vec();
        languages.sort();
        languages.dedup();
        GenerationPlan::Defaults(languages)
    }
}

/// Resolve each language's text source, then plan
pub fn plan_from_sources(
    selected: &[Language],
    sources: &BTreeMap<Language, TextSource>,
) -> GenResult<GenerationPlan> {
    let mut custom = BTreeMap::new();
    for (&language, source) in sources {
        custom.insert(language, source.resolve()?);
    }
    Ok(plan_generation(selected, custom))
}

pub struct AudioGenerator {
    output_dir: PathBuf,
    languages: BTreeMap<Language, LanguageProfile>,
    engine: Arc<dyn TtsEngine>,
}

impl std::fmt::Debug for AudioGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioGenerator")
            .field("output_dir", &self.output_dir)
            .field("engine", &self.engine.name())
            .finish()
    }
}

impl AudioGenerator {
    /// Create the output directory and take ownership of an engine
    pub fn initialize(config: &Config, engine: Arc<dyn TtsEngine>) -> GenResult<Self> {
        std::fs::create_dir_all(&config.output_dir).map_err(|e| {
            GenError::Initialization(format!(
                "cannot create output directory {}: {}",
                config.output_dir.display(),
                e
            ))
        })?;

        info!(
            "🎧 Audio generator initialized. Output directory: {}",
            config.output_dir.display()
        );

        Ok(Self {
            output_dir: config.output_dir.clone(),
            languages: config.languages.clone(),
            engine,
        })
    }

    /// Acquire the configured engine, then initialize
    pub async fn from_config(config: &Config) -> GenResult<Self> {
        info!("Loading TTS engine...");
        let engine = tts::create_engine(config).map_err(|e| {
            error!("❌ Failed to load TTS engine: {}", e);
            e
        })?;
        Self::initialize(config, engine)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Generate one file per text for `language`.
    ///
    /// A language without a configured profile yields an empty report.
    pub async fn generate(&self, language: Language, texts: &[String]) -> LanguageReport {
        let (voice, fallback) = match self.languages.get(&language) {
            Some(profile) => (profile.voice.clone(), profile.fallback),
            None => {
                warn!("⚠️ No profile configured for {}, skipping", language);
                return LanguageReport::new(language, "", false);
            }
        };

        if fallback {
            warn!(
                "⚠️ No native voice for {}, falling back to '{}'",
                language, voice
            );
        }

        let mut report = LanguageReport::new(language, voice.as_str(), fallback);
        info!(
            "Generating {} {} audio files...",
            texts.len(),
            language.label()
        );

        for item in TextItem::enumerate(texts) {
            let file_name = item.file_name(language);
            let path = self.output_dir.join(&file_name);

            let status = match self.render(&item, &voice, &path).await {
                Ok(duration_secs) => {
                    info!("✅ Generated {} ({:.2}s)", file_name, duration_secs);
                    ItemStatus::Generated {
                        path,
                        duration_secs,
                    }
                }
                Err(e) => {
                    error!(
                        "❌ Failed to generate audio for {} item {}: {}",
                        language.label(),
                        item.index,
                        e
                    );
                    ItemStatus::Failed {
                        error: e.to_string(),
                    }
                }
            };

            report.outcomes.push(ItemOutcome {
                index: item.index,
                file_name,
                status,
            });
        }

        report
    }

    /// Synthesize, validate and write a single item, returning its duration
    async fn render(&self, item: &TextItem, voice: &str, path: &Path) -> GenResult<f64> {
        let bytes = self
            .engine
            .synthesize(&item.text, voice)
            .await
            .map_err(|e| GenError::Synthesis(format!("{:#}", e)))?;

        let info = audio::inspect_wav(&bytes)?;
        write_atomically(path, &bytes).await?;
        Ok(info.duration_secs())
    }

    /// Generate every configured language from its default texts
    pub async fn generate_all(&self) -> GenerationReport {
        let languages: Vec<Language> = self.languages.keys().copied().collect();
        info!("Starting audio generation for all languages...");
        let report = self.generate_languages(&languages).await;
        info!(
            "✅ Audio generation completed! Generated {} files total.",
            report.total_generated()
        );
        report
    }

    /// Generate default texts for the given languages only
    pub async fn generate_languages(&self, languages: &[Language]) -> GenerationReport {
        let mut report = GenerationReport::default();
        for &language in languages {
            let Some(profile) = self.languages.get(&language) else {
                warn!("⚠️ No profile configured for {}, skipping", language);
                continue;
            };
            let texts = profile.default_texts.clone();
            report.insert(self.generate(language, &texts).await);
        }
        report
    }

    /// Generate caller-supplied texts; languages without texts are skipped
    pub async fn generate_custom(
        &self,
        custom: BTreeMap<Language, Option<Vec<String>>>,
    ) -> GenerationReport {
        let mut report = GenerationReport::default();
        for (language, texts) in custom {
            if !self.languages.contains_key(&language) {
                warn!("⚠️ No profile configured for {}, skipping", language);
                continue;
            }
            match texts {
                Some(texts) if !texts.is_empty() => {
                    info!(
                        "Generating custom {} audio for {} texts...",
                        language.label(),
                        texts.len()
                    );
                    report.insert(self.generate(language, &texts).await);
                }
                _ => info!("No custom texts for {}, skipping", language),
            }
        }
        report
    }

    pub async fn execute(&self, plan: GenerationPlan) -> GenerationReport {
        match plan {
            GenerationPlan::Defaults(languages) => self.generate_languages(&languages).await,
            GenerationPlan::Custom(custom) => self.generate_custom(custom).await,
        }
    }
}

/// Write through a `.part` file so a failed write never leaves a partial file
async fn write_atomically(path: &Path, bytes: &[u8]) -> GenResult<()> {
    let mut part = path.as_os_str().to_owned();
    part.push(".part");
    let part = PathBuf::from(part);

    if let Err(e) = tokio::fs::write(&part, bytes).await {
        let _ = tokio::fs::remove_file(&part).await;
        return Err(e.into());
    }
    if let Err(e) = tokio::fs::rename(&part, path).await {
        let _ = tokio::fs::remove_file(&part).await;
        return Err(e.into());
    }
    Ok(())
}
