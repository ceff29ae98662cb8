//! Input text handling

use crate::error::{GenError, GenResult};
use crate::language::Language;
use std::path::{Path, PathBuf};
use tracing::info;

/// Extension of every generated audio file
pub const AUDIO_EXTENSION: &str = "wav";

/// One utterance with its 1-based position in the source list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItem {
    pub index: usize,
    pub text: String,
}

impl TextItem {
    /// Number a list of texts starting at 1
    pub fn enumerate(texts: &[String]) -> Vec<TextItem> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| TextItem {
                index: i + 1,
                text: text.clone(),
            })
            .collect()
    }

    /// `{language}_q{index:03}.wav`
    pub fn file_name(&self, language: Language) -> String {
        format!("{}_q{:03}.{}", language.tag(), self.index, AUDIO_EXTENSION)
    }
}

/// Split file content into trimmed, non-blank lines
pub fn parse_texts(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Where one language's custom texts come from
#[derive(Debug, Clone, Default)]
pub struct TextSource {
    pub file: Option<PathBuf>,
    pub inline: Option<Vec<String>>,
}

impl TextSource {
    /// File input wins over inline texts; `None` when neither was given
    pub fn resolve(&self) -> GenResult<Option<Vec<String>>> {
        match &self.file {
            Some(path) => load_texts_from_file(path).map(Some),
            None => Ok(self.inline.clone()),
        }
    }
}

/// Load texts from a UTF-8 file, one per line
pub fn load_texts_from_file(path: &Path) -> GenResult<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        GenError::Texts(format!("failed to read {}: {}", path.display(), e))
    })?;
    let texts = parse_texts(&content);
    info!("📄 Loaded {} texts from {}", texts.len(), path.display());
    Ok(texts)
}
