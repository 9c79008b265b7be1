//! WAV conversion: PCM-to-WAV encoding for provider uploads and a WAV
//! file source for feeding recorded audio through the streaming pipeline.

use crate::defaults;
use crate::error::{Result, VocoachError};
use std::io::{Cursor, Read};

/// Encode 16-bit mono PCM samples into an in-memory WAV container.
///
/// This is the byte format the transcription providers accept.
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer =
        hound::WavWriter::new(&mut cursor, spec).map_err(|e| VocoachError::AudioConversion {
            message: format!("Failed to create WAV writer: {}", e),
        })?;

    for &sample in samples {
        writer
            .write_sample(sample)
            .map_err(|e| VocoachError::AudioConversion {
                message: format!("Failed to write WAV sample: {}", e),
            })?;
    }

    writer.finalize().map_err(|e| VocoachError::AudioConversion {
        message: format!("Failed to finalize WAV data: {}", e),
    })?;

    Ok(cursor.into_inner())
}

/// Audio source that reads from WAV file data and replays it in chunks.
///
/// Chunks are full multiples of the capture boundary size except for the
/// trailing remainder, matching how a live capture host delivers audio.
/// Supports arbitrary sample rates and channels, resampling to the target
/// rate.
pub struct WavChunkSource {
    samples: Vec<i16>,
    position: usize,
    chunk_size: usize,
}

impl WavChunkSource {
    /// Create from any reader, resampling to `target_rate`.
    pub fn from_reader(reader: Box<dyn Read + Send>, target_rate: u32) -> Result<Self> {
        let mut wav_reader =
            hound::WavReader::new(reader).map_err(|e| VocoachError::AudioInput {
                message: format!("Failed to parse WAV file: {}", e),
            })?;

        let spec = wav_reader.spec();
        let source_rate = spec.sample_rate;
        let source_channels = spec.channels;

        let raw_samples: Vec<i16> = wav_reader
            .samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| VocoachError::AudioInput {
                message: format!("Failed to read WAV samples: {}", e),
            })?;

        // Convert to mono if stereo
        let mono_samples = if source_channels == 2 {
            raw_samples
                .chunks_exact(2)
                .map(|chunk| {
                    let left = chunk[0] as i32;
                    let right = chunk[1] as i32;
                    ((left + right) / 2) as i16
                })
                .collect()
        } else {
            raw_samples
        };

        let samples = if source_rate != target_rate {
            resample(&mono_samples, source_rate, target_rate)
        } else {
            mono_samples
        };

        Ok(Self {
            samples,
            position: 0,
            chunk_size: defaults::CHUNK_BOUNDARY_SAMPLES,
        })
    }

    /// Open a WAV file from disk.
    pub fn from_path(path: &std::path::Path, target_rate: u32) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(Box::new(std::io::BufReader::new(file)), target_rate)
    }

    /// Consume the source and return all samples as a single buffer.
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    /// Next chunk of samples, or None at end of stream.
    ///
    /// All chunks are `CHUNK_BOUNDARY_SAMPLES` long except the last, whose
    /// shorter length is what downstream reads as the stream-end signal.
    pub fn next_chunk(&mut self) -> Option<Vec<i16>> {
        if self.position >= self.samples.len() {
            return None;
        }

        let end = std::cmp::min(self.position + self.chunk_size, self.samples.len());
        let chunk = self.samples[self.position..end].to_vec();
        self.position = end;

        Some(chunk)
    }
}

/// Simple linear interpolation resampling.
fn resample(samples: &[i16], from_rate: u32, to_rate: u32) -> Vec<i16> {
    if from_rate == to_rate {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;

    (0..output_len)
        .map(|i| {
            let source_pos = i as f64 * ratio;
            let source_idx = source_pos.floor() as usize;
            let fraction = source_pos - source_idx as f64;

            if source_idx + 1 >= samples.len() {
                samples[source_idx]
            } else {
                let left = samples[source_idx] as f64;
                let right = samples[source_idx + 1] as f64;
                (left + (right - left) * fraction) as i16
            }
        })
        .collect()
}
