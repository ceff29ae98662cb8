use crate::error::{GenError, GenResult};
use crate::language::Language;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Per-language voice and default phrases
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageProfile {
    /// Voice selector handed to the engine
    pub voice: String,
    /// True when `voice` is a stand-in because no native voice exists
    #[serde(default)]
    pub fallback: bool,
    #[serde(default)]
    pub default_texts: Vec<String>,
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Output
    pub output_dir: PathBuf,

    // Speech
    pub engine: String,
    pub voices_dir: PathBuf,
    /// Voice selector -> Piper model name (without `.onnx`)
    pub piper_models: HashMap<String, String>,

    // Data
    pub languages: BTreeMap<Language, LanguageProfile>,
}

const SPANISH_DEFAULTS: &[&str] = &[
    "¿Cuáles son mis valores de presión arterial hoy?",
    "¿Cuáles fueron los valores de la última semana?",
    "¿Cuál es la tendencia de mis valores?",
    "¿Cuáles son los rangos normales para una persona como yo?",
    "Por favor tome su medicamento según lo recetado por su médico.",
    "Su cita está programada para mañana a las 2 PM.",
    "Por favor ayune durante 8 horas antes de su análisis de sangre.",
    "Su seguro cubre este procedimiento completamente.",
    "Por favor traiga su tarjeta de seguro y identificación con foto.",
    "El médico lo verá en la habitación 205.",
];

const TAGALOG_DEFAULTS: &[&str] = &[
    "Ano ang aking mga blood pressure values ngayon?",
    "Ano ang mga values noong nakaraang linggo?",
    "Ano ang trend ng aking mga values?",
    "Ano ang normal ranges para sa isang taong katulad ko?",
    "Mangyaring inumin ang inyong gamot ayon sa inireseta ng inyong doktor.",
    "Ang inyong appointment ay nakatakda bukas ng 2 PM.",
    "Mangyaring mag-ayuno ng 8 oras bago ang inyong blood test.",
    "Ang inyong insurance ay sumasaklaw sa procedure na ito nang lubusan.",
    "Mangyaring dalhin ang inyong insurance card at photo ID.",
    "Ang doktor ay makikita kayo sa room 205.",
];

fn owned(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| t.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("health_audio_output"),
            engine: "piper".to_string(),
            voices_dir: dirs::data_dir()
                .unwrap_or_default()
                .join("health-audio/voices"),
            piper_models: HashMap::from([
                ("es".to_string(), "es_ES-davefx-medium".to_string()),
                ("en".to_string(), "en_US-lessac-medium".to_string()),
            ]),
            // No Tagalog voice is available, so it borrows the English one.
            languages: BTreeMap::from([
                (
                    Language::Spanish,
                    LanguageProfile {
                        voice: "es".to_string(),
                        fallback: false,
                        default_texts: owned(SPANISH_DEFAULTS),
                    },
                ),
                (
                    Language::Tagalog,
                    LanguageProfile {
                        voice: "en".to_string(),
                        fallback: true,
                        default_texts: owned(TAGALOG_DEFAULTS),
                    },
                ),
            ]),
        }
    }
}

impl Config {
    /// Load config from the default location, or fall back to defaults
    pub fn load() -> Self {
        let config_path = config_path();

        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(e) => {
                // Graceful degradation: log warning and use defaults
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path; any failure is an error
    pub fn load_from(path: &Path) -> GenResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GenError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| GenError::Config(format!("invalid config {}: {}", path.display(), e)))
    }

    pub fn save_to(&self, path: &Path) -> GenResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Voice selectors referenced by any configured language
    pub fn voices_in_use(&self) -> Vec<&str> {
        let mut voices: Vec<&str> = self.languages.values().map(|p| p.voice.as_str()).collect();
        voices.sort_unstable();
        voices.dedup();
        voices
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("health-audio")
        .join("config.json")
}
