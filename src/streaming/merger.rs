//! Incremental transcript merger.
//!
//! Consecutive transcription windows overlap: each covers
//! `CHUNK_LENGTH_SECS` of audio but advances only `STEP_LENGTH_SECS`, so
//! the tail of one window reappears at the head of the next. The merger
//! folds each freshly transcribed word list into the running transcript,
//! skipping words already represented and re-processing the provisional
//! tail from the previous pass.

use crate::defaults;

/// A transcribed word with timestamps local to its audio segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    /// Seconds from the start of the segment.
    pub start: f64,
    /// Seconds from the start of the segment.
    pub end: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// Configuration for the merger's overlap arithmetic.
#[derive(Debug, Clone, Copy)]
pub struct MergerConfig {
    /// Seconds of audio each transcription window covers.
    pub chunk_length_secs: f64,
    /// Seconds the window advances between transcriptions.
    pub step_length_secs: f64,
}

impl Default for MergerConfig {
    fn default() -> Self {
        Self {
            chunk_length_secs: defaults::CHUNK_LENGTH_SECS,
            step_length_secs: defaults::STEP_LENGTH_SECS,
        }
    }
}

impl MergerConfig {
    /// Start offset past which a word counts as provisional.
    ///
    /// The last second of the window has too little trailing context for
    /// the transcription model to be trusted.
    pub fn max_reliability_cutoff(&self) -> f64 {
        self.chunk_length_secs - 1.0
    }

    /// Cutoff the merge falls back to when no confirmed word advances it.
    pub fn default_cutoff(&self) -> f64 {
        self.max_reliability_cutoff() - self.step_length_secs
    }
}

/// Running transcript of one speaking turn.
///
/// `text` always equals `words` joined with single spaces, and
/// `not_confirmed` counts the trailing words that the next merge pass may
/// replace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptState {
    pub words: Vec<String>,
    pub not_confirmed: usize,
    /// Time offset (next segment's clock) below which incoming words are
    /// already represented and must be skipped.
    pub last_cutoff: f64,
    pub text: String,
}

impl TranscriptState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Merges overlapping partial transcriptions into stable growing text.
pub struct TranscriptMerger {
    config: MergerConfig,
    state: TranscriptState,
}

impl TranscriptMerger {
    /// Creates a merger with default window arithmetic and empty state.
    pub fn new() -> Self {
        Self::with_config(MergerConfig::default())
    }

    /// Creates a merger with custom configuration.
    pub fn with_config(config: MergerConfig) -> Self {
        Self {
            config,
            state: TranscriptState::new(),
        }
    }

    /// Folds a new word list into the transcript.
    ///
    /// `new_words` must be sorted by ascending `start` and must come from
    /// the segment immediately following the previous one; out-of-order
    /// input gets best-effort treatment. The previous pass's provisional
    /// tail is dropped and re-derived from the new words, so merging the
    /// same list twice is re-processing, not a no-op.
    pub fn merge(&mut self, new_words: &[Word]) {
        let cut_off = self.state.last_cutoff;
        let max_cutoff = self.config.max_reliability_cutoff();

        // Fallback cutoff for this pass; confirmed words advance it below.
        self.state.last_cutoff = self.config.default_cutoff();

        // The provisional tail is superseded by the reprocessed overlap.
        let confirmed = self.state.words.len() - self.state.not_confirmed;
        self.state.words.truncate(confirmed);
        self.state.not_confirmed = 0;

        let mut first_kept = true;
        for word in new_words {
            if word.start < cut_off {
                continue;
            }

            // A boundary word can be re-emitted identically by the next
            // window; skip it once, at the seam only.
            if first_kept {
                first_kept = false;
                if self.state.words.last().is_some_and(|last| *last == word.text) {
                    continue;
                }
            }

            self.state.words.push(word.text.clone());

            if word.start > max_cutoff {
                self.state.not_confirmed += 1;
            } else {
                self.state.last_cutoff = (word.end - self.config.step_length_secs)
                    .max(self.config.default_cutoff());
            }
        }

        self.state.text = self.state.words.join(" ");
    }

    /// The current stabilized transcript text.
    pub fn text(&self) -> &str {
        &self.state.text
    }

    /// The full transcript state, including the provisional tail count.
    pub fn state(&self) -> &TranscriptState {
        &self.state
    }

    /// Discards the transcript, ready for the next turn.
    pub fn reset(&mut self) {
        self.state = TranscriptState::new();
    }

    /// Consumes the merger and returns the final text.
    pub fn into_text(self) -> String {
        self.state.text
    }
}

impl Default for TranscriptMerger {
    fn default() -> Self {
        Self::new()
    }
}
