//! Audio segmenter for the streaming pipeline.
//!
//! Accumulates incoming microphone chunks into a growing buffer and
//! decides, chunk by chunk, when the buffered audio is ready to hand off
//! for transcription. Silence gates the buffer so pauses do not waste
//! provider calls.

use crate::audio::vad::{Vad, VadConfig};
use crate::defaults;

/// Configuration for the segmenter.
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Sample rate of incoming chunks.
    pub sample_rate: u32,
    /// Minimum buffered duration (seconds) before a segment may be emitted.
    pub min_segment_secs: f64,
    /// Chunk lengths that are not a multiple of this are read as the
    /// capture host's final, partial chunk.
    pub boundary_samples: usize,
    /// VAD configuration for the per-chunk voice gate.
    pub vad: VadConfig,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            sample_rate: defaults::SAMPLE_RATE,
            min_segment_secs: defaults::MIN_SEGMENT_SECS,
            boundary_samples: defaults::CHUNK_BOUNDARY_SAMPLES,
            vad: VadConfig::default(),
        }
    }
}

/// Chunk-driven audio segmenter.
///
/// Owns one accumulation buffer per active turn. Voiced chunks grow the
/// buffer; a silent chunk (or the stream-end heuristic) flushes it once
/// it is long enough.
pub struct Segmenter {
    config: SegmenterConfig,
    vad: Vad,
    buffer: Vec<i16>,
}

impl Segmenter {
    /// Creates a new segmenter with default configuration.
    pub fn new() -> Self {
        Self::with_config(SegmenterConfig::default())
    }

    /// Creates a new segmenter with custom configuration.
    pub fn with_config(config: SegmenterConfig) -> Self {
        let vad = Vad::new(config.vad);
        Self {
            config,
            vad,
            buffer: Vec::new(),
        }
    }

    /// Number of samples currently buffered.
    pub fn buffered_samples(&self) -> usize {
        self.buffer.len()
    }

    /// Duration of the buffered audio in seconds.
    pub fn buffered_secs(&self) -> f64 {
        self.buffer.len() as f64 / self.config.sample_rate as f64
    }

    /// Processes one incoming chunk.
    ///
    /// Returns the accumulated segment when it is ready for
    /// transcription, or `None` while the buffer is still filling.
    /// Emitting resets the buffer for the next segment.
    ///
    /// A chunk whose length is not an exact multiple of
    /// `boundary_samples` is read as the host's trailing partial chunk,
    /// meaning the recording just stopped. Hosts that can signal the end
    /// of a turn explicitly should call [`Segmenter::finish`] instead of
    /// relying on this.
    pub fn push_chunk(&mut self, chunk: &[i16]) -> Option<Vec<i16>> {
        let has_voice = self.vad.detect_voice(chunk, self.config.sample_rate);
        let ended = chunk.len() % self.config.boundary_samples != 0;

        // Silent chunks still participate in the flush decision below,
        // they just never enter the buffer.
        if has_voice {
            self.buffer.extend_from_slice(chunk);
        }

        if self.is_short() || (has_voice && !ended) {
            return None;
        }

        self.take_segment()
    }

    /// Flushes the buffer at an explicit, host-signalled end of stream.
    ///
    /// The minimum-duration rule still applies: a buffer shorter than
    /// `min_segment_secs` is discarded rather than transcribed.
    pub fn finish(&mut self) -> Option<Vec<i16>> {
        if self.is_short() {
            self.buffer.clear();
            return None;
        }
        self.take_segment()
    }

    /// Discards any buffered audio without emitting it.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    fn is_short(&self) -> bool {
        self.buffered_secs() < self.config.min_segment_secs
    }

    fn take_segment(&mut self) -> Option<Vec<i16>> {
        if self.buffer.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.buffer))
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}
