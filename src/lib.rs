//! Health Audio Library
//!
//! Batch text-to-speech generation for multilingual healthcare phrases.

pub mod audio;
pub mod config;
pub mod error;
pub mod generator;
pub mod language;
pub mod report;
pub mod texts;
pub mod tts;
