//! Generation results
//!
//! Every item gets an outcome, so partial failures stay visible to callers.

use crate::language::Language;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemStatus {
    Generated { path: PathBuf, duration_secs: f64 },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemOutcome {
    pub index: usize,
    pub file_name: String,
    #[serde(flatten)]
    pub status: ItemStatus,
}

impl ItemOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self.status, ItemStatus::Generated { .. })
    }
}

/// Outcomes for one language, in input order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageReport {
    pub language: Language,
    pub voice: String,
    pub fallback: bool,
    pub outcomes: Vec<ItemOutcome>,
}

impl LanguageReport {
    pub fn new(language: Language, voice: impl Into<String>, fallback: bool) -> Self {
        Self {
            language,
            voice: voice.into(),
            fallback,
            outcomes: Vec::new(),
        }
    }

    /// Paths of successfully generated files, in input order
    pub fn generated_files(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.status {
                ItemStatus::Generated { path, .. } => Some(path.as_path()),
                ItemStatus::Failed { .. } => None,
            })
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.outcomes.iter().filter(|o| !o.is_generated())
    }

    pub fn generated_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_generated()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.generated_count()
    }
}

/// Aggregate over all languages that were run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationReport {
    pub languages: BTreeMap<Language, LanguageReport>,
}

impl GenerationReport {
    pub fn insert(&mut self, report: LanguageReport) {
        self.languages.insert(report.language, report);
    }

    pub fn get(&self, language: Language) -> Option<&LanguageReport> {
        self.languages.get(&language)
    }

    pub fn total_generated(&self) -> usize {
        self.languages.values().map(LanguageReport::generated_count).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.languages.values().map(LanguageReport::failed_count).sum()
    }

    /// Human-readable results banner
    pub fn summary(&self, output_dir: &Path) -> String {
        let rule = "=".repeat(60);
        let mut out = String::new();

        let _ = writeln!(out, "\n{}", rule);
        let _ = writeln!(out, "HEALTHEQUITY AUDIO GENERATION RESULTS");
        let _ = writeln!(out, "{}", rule);

        for report in self.languages.values() {
            let files = report.generated_files();
            let _ = write!(
                out,
                "\n{} Audio Files ({} files, voice '{}'",
                report.language.label().to_uppercase(),
                files.len(),
                report.voice
            );
            if report.fallback {
                let _ = write!(out, ", fallback");
            }
            let _ = writeln!(out, "):");

            for file in files {
                let name = file
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let _ = writeln!(out, "  ✅ {}", name);
            }
            for failed in report.failures() {
                if let ItemStatus::Failed { error } = &failed.status {
                    let _ = writeln!(out, "  ❌ {} ({})", failed.file_name, error);
                }
            }
        }

        let _ = writeln!(out, "\n📁 All files saved in: {}", output_dir.display());
        let _ = writeln!(out, "📊 Total audio files generated: {}", self.total_generated());
        if self.total_failed() > 0 {
            let _ = writeln!(out, "⚠️ Failed items: {}", self.total_failed());
        }
        out
    }
}
