//! Default configuration constants for vocoach.
//!
//! This module provides shared constants used across different configuration
//! types to ensure consistency and eliminate duplication.

/// Default audio sample rate in Hz.
///
/// 48kHz matches what browser microphone capture typically delivers.
/// 44.1kHz input is also accepted; the rate is carried through the
/// config rather than assumed.
pub const SAMPLE_RATE: u32 = 48000;

/// Duration of a single VAD classification frame in milliseconds.
///
/// Frames are classified independently; a trailing partial frame is
/// skipped, never classified.
pub const VAD_FRAME_MS: u32 = 30;

/// Number of speech frames a segment must exceed to count as voiced.
///
/// "Has voice" means strictly more than this many frames classified as
/// speech, which filters out brief noise spikes that light up only a
/// frame or two.
pub const VAD_VOICED_FRAMES: usize = 6;

/// Minimum buffered duration in seconds before a segment may be flushed.
///
/// Buffers shorter than this are never sent for transcription, even on
/// silence. Tiny segments cost a provider round-trip and transcribe
/// poorly.
pub const MIN_SEGMENT_SECS: f64 = 1.0;

/// Sample-count boundary used to infer that a recording just stopped.
///
/// The capture host delivers full chunks as exact multiples of this
/// size; a partial chunk marks the end of the stream. A heuristic, not
/// a true end-of-stream signal: hosts that can signal end-of-turn
/// explicitly should call `finish()` on the turn instead.
pub const CHUNK_BOUNDARY_SAMPLES: usize = 24000;

/// Length in seconds of the audio window sent for each transcription.
pub const CHUNK_LENGTH_SECS: f64 = 5.0;

/// Seconds the window advances between consecutive transcriptions.
///
/// Consecutive windows overlap by `CHUNK_LENGTH_SECS - STEP_LENGTH_SECS`
/// seconds, so the tail of one segment reappears at the head of the next.
pub const STEP_LENGTH_SECS: f64 = 3.0;

/// Start-time threshold beyond which a transcribed word is provisional.
///
/// Words starting after this offset sit near the window's right edge
/// where the model has little trailing context; they are kept but may
/// be replaced by the next merge pass.
pub const MAX_RELIABILITY_CUTOFF_SECS: f64 = CHUNK_LENGTH_SECS - 1.0;
