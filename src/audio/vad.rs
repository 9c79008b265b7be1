//! Voice Activity Detection (VAD) module.
//!
//! Classifies fixed-duration audio frames as speech or non-speech using
//! RMS-based thresholding, then decides whether a whole segment "has voice"
//! by counting voiced frames.

use crate::defaults;

/// How intolerant of noise the frame classifier is.
///
/// Higher settings use a higher energy threshold, so quiet or ambiguous
/// frames are classified as non-speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggressiveness {
    Permissive,
    Balanced,
    Strict,
    VeryStrict,
}

impl Aggressiveness {
    /// RMS threshold (0.0 to 1.0) a frame must exceed to count as speech.
    pub fn energy_threshold(self) -> f32 {
        match self {
            Aggressiveness::Permissive => 0.005,
            Aggressiveness::Balanced => 0.01,
            Aggressiveness::Strict => 0.02,
            Aggressiveness::VeryStrict => 0.04,
        }
    }
}

/// Configuration for Voice Activity Detection.
#[derive(Debug, Clone, Copy)]
pub struct VadConfig {
    /// Frame classifier aggressiveness.
    pub aggressiveness: Aggressiveness,
    /// Duration of one classification frame in milliseconds (10, 20, or 30).
    pub frame_ms: u32,
    /// A segment has voice when strictly more than this many frames are speech.
    pub voiced_frames: usize,
}

impl Default for VadConfig {
    fn default() -> Self {
        Self {
            aggressiveness: Aggressiveness::VeryStrict,
            frame_ms: defaults::VAD_FRAME_MS,
            voiced_frames: defaults::VAD_VOICED_FRAMES,
        }
    }
}

/// Frame-counting voice activity detector.
#[derive(Debug, Clone)]
pub struct Vad {
    config: VadConfig,
}

impl Vad {
    /// Creates a new VAD instance with the given configuration.
    pub fn new(config: VadConfig) -> Self {
        Self { config }
    }

    /// Number of samples in one classification frame at the given rate.
    pub fn frame_len(&self, sample_rate: u32) -> usize {
        (sample_rate * self.config.frame_ms / 1000) as usize
    }

    /// Classifies a single frame as speech or non-speech.
    pub fn is_speech_frame(&self, frame: &[i16]) -> bool {
        calculate_rms(frame) > self.config.aggressiveness.energy_threshold()
    }

    /// Returns true when the segment contains voice.
    ///
    /// The segment is split into consecutive non-overlapping frames; a
    /// trailing partial frame is skipped, never classified. Voice means
    /// strictly more than `voiced_frames` frames classified as speech.
    pub fn detect_voice(&self, samples: &[i16], sample_rate: u32) -> bool {
        let frame_len = self.frame_len(sample_rate);
        if frame_len == 0 {
            return false;
        }

        let voiced = samples
            .chunks_exact(frame_len)
            .filter(|frame| self.is_speech_frame(frame))
            .count();

        voiced > self.config.voiced_frames
    }
}

impl Default for Vad {
    fn default() -> Self {
        Self::new(VadConfig::default())
    }
}

/// Calculates the Root Mean Square (RMS) of audio samples.
///
/// # Arguments
/// * `samples` - Audio samples as 16-bit PCM
///
/// # Returns
/// Normalized RMS value (0.0 to 1.0), where:
/// - 0.0 represents silence
/// - ~0.707 represents a full-scale sine wave
/// - 1.0 represents maximum amplitude
pub fn calculate_rms(samples: &[i16]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_squares: f64 = samples
        .iter()
        .map(|&sample| {
            let normalized = sample as f64 / i16::MAX as f64;
            normalized * normalized
        })
        .sum();

    let mean_square = sum_squares / samples.len() as f64;
    mean_square.sqrt() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 48000;

    fn vad() -> Vad {
        Vad::default()
    }

    /// One 30ms frame of samples at the given amplitude.
    fn frame(amplitude: i16) -> Vec<i16> {
        vec![amplitude; (RATE * 30 / 1000) as usize]
    }

    /// A segment with `speech` loud frames followed by `silent` quiet frames.
    fn segment(speech: usize, silent: usize) -> Vec<i16> {
        let mut samples = Vec::new();
        for _ in 0..speech {
            samples.extend(frame(5000));
        }
        for _ in 0..silent {
            samples.extend(frame(0));
        }
        samples
    }

    #[test]
    fn test_rms_silence_is_zero() {
        assert_eq!(calculate_rms(&frame(0)), 0.0);
    }

    #[test]
    fn test_rms_max_amplitude() {
        let rms = calculate_rms(&frame(i16::MAX));
        assert!((rms - 1.0).abs() < 0.001, "RMS should be ~1.0, got {}", rms);
    }

    #[test]
    fn test_rms_empty_samples() {
        let empty: Vec<i16> = vec![];
        assert_eq!(calculate_rms(&empty), 0.0);
    }

    #[test]
    fn test_frame_len_30ms_at_48khz() {
        assert_eq!(vad().frame_len(48000), 1440);
    }

    #[test]
    fn test_frame_len_30ms_at_44100hz() {
        assert_eq!(vad().frame_len(44100), 1323);
    }

    #[test]
    fn test_speech_frame_classification() {
        let v = vad();
        assert!(v.is_speech_frame(&frame(5000)));
        assert!(!v.is_speech_frame(&frame(0)));
    }

    #[test]
    fn test_seven_speech_frames_is_voice() {
        // Boundary is "strictly more than 6"
        assert!(vad().detect_voice(&segment(7, 5), RATE));
    }

    #[test]
    fn test_six_speech_frames_is_not_voice() {
        assert!(!vad().detect_voice(&segment(6, 5), RATE));
    }

    #[test]
    fn test_all_silence_is_not_voice() {
        assert!(!vad().detect_voice(&segment(0, 20), RATE));
    }

    #[test]
    fn test_trailing_partial_frame_is_skipped() {
        // 6 full speech frames plus a loud partial frame: the partial
        // must not be classified, so this stays below the threshold.
        let mut samples = segment(6, 0);
        samples.extend(vec![5000i16; 100]);
        assert!(!vad().detect_voice(&samples, RATE));
    }

    #[test]
    fn test_segment_shorter_than_one_frame() {
        let samples = vec![5000i16; 100];
        assert!(!vad().detect_voice(&samples, RATE));
    }

    #[test]
    fn test_aggressiveness_ordering() {
        assert!(
            Aggressiveness::Permissive.energy_threshold()
                < Aggressiveness::VeryStrict.energy_threshold()
        );
    }

    #[test]
    fn test_permissive_hears_quiet_speech() {
        let quiet = frame(400); // RMS ~0.012
        let strict = Vad::new(VadConfig {
            aggressiveness: Aggressiveness::VeryStrict,
            ..Default::default()
        });
        let permissive = Vad::new(VadConfig {
            aggressiveness: Aggressiveness::Permissive,
            ..Default::default()
        });

        assert!(!strict.is_speech_frame(&quiet));
        assert!(permissive.is_speech_frame(&quiet));
    }
}
