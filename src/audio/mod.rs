//! Audio primitives: voice activity detection and WAV conversion.

pub mod vad;
pub mod wav;

pub use vad::{Aggressiveness, Vad, VadConfig, calculate_rms};
pub use wav::{WavChunkSource, encode_wav};
