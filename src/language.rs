//! Supported output languages

use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages the generator knows how to produce audio for.
///
/// The declaration order is the generation order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Spanish,
    Tagalog,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Spanish, Language::Tagalog];

    /// Tag used as filename prefix and config key
    pub fn tag(self) -> &'static str {
        match self {
            Language::Spanish => "spanish",
            Language::Tagalog => "tagalog",
        }
    }

    /// Human readable label for summaries
    pub fn label(self) -> &'static str {
        match self {
            Language::Spanish => "Spanish",
            Language::Tagalog => "Tagalog",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
