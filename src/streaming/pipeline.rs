//! Turn pipeline: segmenter → transcriber → merger for one speaking turn.
//!
//! Chunk-driven and strictly sequential: segments are transcribed and
//! merged in chronological order, because the merger's cutoff is carried
//! from one segment to the next. At most one transcription request is in
//! flight at a time.

use crate::error::Result;
use crate::providers::transcriber::Transcriber;
use crate::streaming::merger::{MergerConfig, TranscriptMerger};
use crate::streaming::segmenter::{Segmenter, SegmenterConfig};
use tokio::sync::mpsc;

/// Streaming transcription pipeline for a single speaking turn.
///
/// Owns the turn's audio buffer and transcript state; both are discarded
/// on [`TurnPipeline::finish`] or [`TurnPipeline::abandon`], so one value
/// can serve consecutive turns.
pub struct TurnPipeline<T: Transcriber> {
    segmenter: Segmenter,
    merger: TranscriptMerger,
    transcriber: T,
}

impl<T: Transcriber> TurnPipeline<T> {
    /// Creates a pipeline with default segmenter and merger configuration.
    pub fn new(transcriber: T) -> Self {
        Self::with_configs(transcriber, SegmenterConfig::default(), MergerConfig::default())
    }

    /// Creates a pipeline with custom configuration.
    pub fn with_configs(
        transcriber: T,
        segmenter: SegmenterConfig,
        merger: MergerConfig,
    ) -> Self {
        Self {
            segmenter: Segmenter::with_config(segmenter),
            merger: TranscriptMerger::with_config(merger),
            transcriber,
        }
    }

    /// Feeds one microphone chunk through the pipeline.
    ///
    /// Returns the updated stabilized transcript when the chunk completed
    /// a segment, `None` while audio is still buffering. A transcription
    /// failure is propagated and leaves the transcript untouched, so the
    /// next successful segment still merges against the last good cutoff.
    pub async fn push_chunk(&mut self, chunk: &[i16]) -> Result<Option<&str>> {
        let Some(segment) = self.segmenter.push_chunk(chunk) else {
            return Ok(None);
        };

        let words = self.transcriber.transcribe_timed(&segment).await?;
        self.merger.merge(&words);

        Ok(Some(self.merger.text()))
    }

    /// Ends the turn: flushes buffered audio and returns the final text.
    ///
    /// The pipeline is reset afterwards, ready for the next turn.
    pub async fn finish(&mut self) -> Result<String> {
        if let Some(segment) = self.segmenter.finish() {
            let words = self.transcriber.transcribe_timed(&segment).await?;
            self.merger.merge(&words);
        }

        let text = self.merger.text().to_string();
        self.merger.reset();
        Ok(text)
    }

    /// Abandons the turn, discarding buffered audio and transcript.
    pub fn abandon(&mut self) {
        self.segmenter.reset();
        self.merger.reset();
    }

    /// The stabilized transcript so far.
    pub fn transcript(&self) -> &str {
        self.merger.text()
    }

    /// Runs the pipeline as a channel-driven station.
    ///
    /// Emits the updated transcript after every merge and the final text
    /// when the input closes. Failed segments are skipped; the transcript
    /// state is untouched, so later segments still merge correctly.
    pub async fn run(mut self, mut input: mpsc::Receiver<Vec<i16>>, output: mpsc::Sender<String>) {
        while let Some(chunk) = input.recv().await {
            match self.push_chunk(&chunk).await {
                Ok(Some(text)) => {
                    let text = text.to_string();
                    if output.send(text).await.is_err() {
                        return;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    eprintln!("Transcription error, segment dropped: {}", e);
                }
            }
        }

        match self.finish().await {
            Ok(text) => {
                let _ = output.send(text).await;
            }
            Err(e) => {
                eprintln!("Transcription error at end of turn: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;
    use crate::providers::transcriber::MockTranscriber;
    use crate::streaming::merger::Word;

    const BOUNDARY: usize = defaults::CHUNK_BOUNDARY_SAMPLES;

    fn voiced_chunk() -> Vec<i16> {
        vec![5000i16; BOUNDARY]
    }

    fn silent_chunk() -> Vec<i16> {
        vec![0i16; BOUNDARY]
    }

    fn w(text: &str, start: f64, end: f64) -> Word {
        Word::new(text, start, end)
    }

    /// Feed enough voiced audio to pass the minimum, then silence to flush.
    async fn speak_one_segment<T: Transcriber>(pipeline: &mut TurnPipeline<T>) -> Option<String> {
        pipeline.push_chunk(&voiced_chunk()).await.unwrap();
        pipeline.push_chunk(&voiced_chunk()).await.unwrap();
        pipeline
            .push_chunk(&silent_chunk())
            .await
            .unwrap()
            .map(str::to_string)
    }

    #[tokio::test]
    async fn test_buffering_returns_none() {
        let mut pipeline = TurnPipeline::new(MockTranscriber::new());

        let result = pipeline.push_chunk(&voiced_chunk()).await.unwrap();
        assert!(result.is_none());
        assert_eq!(pipeline.transcript(), "");
    }

    #[tokio::test]
    async fn test_two_overlapping_segments_merge() {
        let transcriber = MockTranscriber::new()
            .with_words(vec![w("hello", 0.0, 0.5), w("world", 0.5, 1.0)])
            .with_words(vec![w("world", 0.0, 0.4), w("there", 1.4, 1.9)]);
        let mut pipeline = TurnPipeline::new(transcriber);

        let text = speak_one_segment(&mut pipeline).await.unwrap();
        assert_eq!(text, "hello world");

        let text = speak_one_segment(&mut pipeline).await.unwrap();
        assert_eq!(text, "hello world there");
    }

    #[tokio::test]
    async fn test_failed_segment_leaves_transcript_unchanged() {
        let transcriber = MockTranscriber::new()
            .with_words(vec![w("hello", 0.0, 0.5)])
            .with_timed_failure()
            .with_words(vec![w("again", 1.2, 1.8)]);
        let mut pipeline = TurnPipeline::new(transcriber);

        let text = speak_one_segment(&mut pipeline).await.unwrap();
        assert_eq!(text, "hello");

        // Second segment fails: error propagates, transcript untouched
        pipeline.push_chunk(&voiced_chunk()).await.unwrap();
        pipeline.push_chunk(&voiced_chunk()).await.unwrap();
        let result = pipeline.push_chunk(&silent_chunk()).await;
        assert!(result.is_err());
        assert_eq!(pipeline.transcript(), "hello");

        // Third segment merges against the last good cutoff
        let text = speak_one_segment(&mut pipeline).await.unwrap();
        assert_eq!(text, "hello again");
    }

    #[tokio::test]
    async fn test_finish_flushes_and_resets() {
        let transcriber =
            MockTranscriber::new().with_words(vec![w("closing", 1.0, 1.5), w("words", 1.5, 2.0)]);
        let mut pipeline = TurnPipeline::new(transcriber);

        pipeline.push_chunk(&voiced_chunk()).await.unwrap();
        pipeline.push_chunk(&voiced_chunk()).await.unwrap();

        let text = pipeline.finish().await.unwrap();
        assert_eq!(text, "closing words");

        // Fresh turn after finish
        assert_eq!(pipeline.transcript(), "");
    }

    #[tokio::test]
    async fn test_finish_discards_short_buffer() {
        let transcriber = MockTranscriber::new().with_words(vec![w("ignored", 0.0, 0.5)]);
        let mut pipeline = TurnPipeline::new(transcriber);

        // Under a second of audio: nothing to transcribe
        pipeline.push_chunk(&voiced_chunk()).await.unwrap();

        let text = pipeline.finish().await.unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_abandon_discards_everything() {
        let transcriber = MockTranscriber::new().with_words(vec![w("hello", 0.0, 0.5)]);
        let mut pipeline = TurnPipeline::new(transcriber);

        speak_one_segment(&mut pipeline).await.unwrap();
        pipeline.push_chunk(&voiced_chunk()).await.unwrap();

        pipeline.abandon();

        assert_eq!(pipeline.transcript(), "");
        let text = pipeline.finish().await.unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_run_station_emits_growing_transcript() {
        let transcriber = MockTranscriber::new()
            .with_words(vec![w("one", 0.0, 0.5)])
            .with_words(vec![w("two", 1.2, 1.7)]);
        let pipeline = TurnPipeline::new(transcriber);

        let (input_tx, input_rx) = mpsc::channel(16);
        let (output_tx, mut output_rx) = mpsc::channel(16);

        tokio::spawn(async move {
            pipeline.run(input_rx, output_tx).await;
        });

        for _ in 0..2 {
            input_tx.send(voiced_chunk()).await.unwrap();
            input_tx.send(voiced_chunk()).await.unwrap();
            input_tx.send(silent_chunk()).await.unwrap();
        }
        drop(input_tx);

        assert_eq!(output_rx.recv().await.unwrap(), "one");
        assert_eq!(output_rx.recv().await.unwrap(), "one two");
        // Final flush after input closes (empty buffer → unchanged text)
        assert_eq!(output_rx.recv().await.unwrap(), "one two");
        assert!(output_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_run_station_skips_failed_segments() {
        let transcriber = MockTranscriber::new()
            .with_timed_failure()
            .with_words(vec![w("recovered", 1.1, 1.6)]);
        let pipeline = TurnPipeline::new(transcriber);

        let (input_tx, input_rx) = mpsc::channel(16);
        let (output_tx, mut output_rx) = mpsc::channel(16);

        tokio::spawn(async move {
            pipeline.run(input_rx, output_tx).await;
        });

        for _ in 0..2 {
            input_tx.send(voiced_chunk()).await.unwrap();
            input_tx.send(voiced_chunk()).await.unwrap();
            input_tx.send(silent_chunk()).await.unwrap();
        }
        drop(input_tx);

        // First segment failed silently; second merged, then final flush
        assert_eq!(output_rx.recv().await.unwrap(), "recovered");
        assert_eq!(output_rx.recv().await.unwrap(), "recovered");
        assert!(output_rx.recv().await.is_none());
    }
}
