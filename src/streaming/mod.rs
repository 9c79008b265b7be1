//! Streaming transcription core.
//!
//! Turns an irregular stream of microphone chunks into stable, growing
//! transcript text while the speaker is still talking:
//!
//! ```text
//! ┌──────────┐    ┌───────────┐    ┌─────────────┐    ┌────────┐
//! │ Mic host │───▶│ Segmenter │───▶│ Transcriber │───▶│ Merger │───▶ text
//! │ (chunks) │    │ (VAD gate)│    │  (provider) │    │        │
//! └──────────┘    └───────────┘    └─────────────┘    └────────┘
//! ```
//!
//! Consecutive transcription windows overlap, so the merger's job is to
//! stitch each new word list onto the running transcript without
//! duplicating the overlap region, while keeping words near the window's
//! right edge provisional until the next pass confirms them.

pub mod merger;
pub mod pipeline;
pub mod segmenter;

pub use merger::{MergerConfig, TranscriptMerger, TranscriptState, Word};
pub use pipeline::TurnPipeline;
pub use segmenter::{Segmenter, SegmenterConfig};
