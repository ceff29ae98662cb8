//! WAV validation for engine output
//!
//! Engines hand back raw bytes; nothing reaches disk unless it parses as a
//! WAV stream with at least one sample.

use crate::error::{GenError, GenResult};
use std::io::Cursor;

/// Basic facts about a validated WAV stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavInfo {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    /// Samples per channel
    pub frames: u32,
}

impl WavInfo {
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames as f64 / self.sample_rate as f64
    }
}

/// Samples decoded from a stream, stopping at the end of the real data
enum Samples {
    Int(Vec<i32>),
    Float(Vec<f32>),
}

impl Samples {
    fn len(&self) -> usize {
        match self {
            Samples::Int(s) => s.len(),
            Samples::Float(s) => s.len(),
        }
    }

    fn truncate(&mut self, len: usize) {
        match self {
            Samples::Int(s) => s.truncate(len),
            Samples::Float(s) => s.truncate(len),
        }
    }
}

/// Decode whatever samples are present.
///
/// Streamed WAVs (e.g. espeak-ng writing to a pipe) carry placeholder sizes in
/// the header, so the header's length cannot be trusted. Reading stops at the
/// first short read and any trailing partial frame is dropped.
fn decode(bytes: &[u8]) -> GenResult<(hound::WavSpec, Samples)> {
    let reader = hound::WavReader::new(Cursor::new(bytes))
        .map_err(|e| GenError::InvalidAudio(e.to_string()))?;

    let spec = reader.spec();
    if spec.channels == 0 || spec.sample_rate == 0 {
        return Err(GenError::InvalidAudio(format!(
            "unusable format: {} channels at {} Hz",
            spec.channels, spec.sample_rate
        )));
    }

    let mut samples = match spec.sample_format {
        hound::SampleFormat::Int => Samples::Int(
            reader
                .into_samples::<i32>()
                .map_while(Result::ok)
                .collect(),
        ),
        hound::SampleFormat::Float => Samples::Float(
            reader
                .into_samples::<f32>()
                .map_while(Result::ok)
                .collect(),
        ),
    };

    let channels = spec.channels as usize;
    let whole = samples.len() / channels * channels;
    samples.truncate(whole);

    if whole == 0 {
        return Err(GenError::InvalidAudio("no audio samples".to_string()));
    }

    Ok((spec, samples))
}

/// Parse the stream and reject empty or malformed audio
pub fn inspect_wav(bytes: &[u8]) -> GenResult<WavInfo> {
    let (spec, samples) = decode(bytes)?;
    Ok(WavInfo {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        bits_per_sample: spec.bits_per_sample,
        frames: (samples.len() / spec.channels as usize) as u32,
    })
}

/// Re-encode a stream so its header sizes match the samples actually present
pub fn normalize_wav(bytes: &[u8]) -> GenResult<Vec<u8>> {
    let (spec, samples) = decode(bytes)?;
    let invalid = |e: hound::Error| GenError::InvalidAudio(e.to_string());

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).map_err(invalid)?;
        match &samples {
            Samples::Int(s) => {
                for &sample in s {
                    writer.write_sample(sample).map_err(invalid)?;
                }
            }
            Samples::Float(s) => {
                for &sample in s {
                    writer.write_sample(sample).map_err(invalid)?;
                }
            }
        }
        writer.finalize().map_err(invalid)?;
    }
    Ok(cursor.into_inner())
}

/// Encode mono 16-bit PCM samples as an in-memory WAV file
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> GenResult<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| GenError::InvalidAudio(e.to_string()))?;
        for &sample in samples {
            writer
                .write_sample(sample)
                .map_err(|e| GenError::InvalidAudio(e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| GenError::InvalidAudio(e.to_string()))?;
    }
    Ok(cursor.into_inner())
}

/// WAV as written by a tool streaming to a pipe: RIFF and data sizes left at
/// their `0x7ffff000` placeholders.
#[cfg(test)]
pub(crate) fn streamed_wav(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    const PLACEHOLDER: u32 = 0x7fff_f000;

    let mut bytes = Vec::with_capacity(44 + samples.len() * 2);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&PLACEHOLDER.to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&PLACEHOLDER.to_le_bytes());
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}
