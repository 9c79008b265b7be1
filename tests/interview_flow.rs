//! End-to-end interview flow against mock providers.
//!
//! Covers the full path: generate a problem, speak a turn through the
//! streaming pipeline, hand the stabilized transcript to the session,
//! and close the interview with a feedback report.

use vocoach::defaults;
use vocoach::interview::Session;
use vocoach::providers::dialogue::MockDialogue;
use vocoach::providers::transcriber::MockTranscriber;
use vocoach::streaming::{TurnPipeline, Word};

fn voiced_chunk() -> Vec<i16> {
    vec![5000i16; defaults::CHUNK_BOUNDARY_SAMPLES]
}

fn silent_chunk() -> Vec<i16> {
    vec![0i16; defaults::CHUNK_BOUNDARY_SAMPLES]
}

#[tokio::test]
async fn full_interview_round_trip() {
    // Scripted interviewer: problem, one reply, feedback
    let model = MockDialogue::new()
        .with_reply("Find the longest palindromic substring.")
        .with_reply("Sounds reasonable. What is the time complexity?")
        .with_reply("Feedback: clear approach, correct complexity analysis.");
    let mut session = Session::new(model);

    let problem = session
        .generate_problem("none", "Medium", "Strings")
        .await
        .unwrap();
    assert!(problem.contains("palindromic"));

    // Candidate speaks one turn; consecutive overlapping segments
    // stabilize into a single message.
    let transcriber = MockTranscriber::new()
        .with_words(vec![
            Word::new("I", 0.2, 0.3),
            Word::new("would", 0.3, 0.5),
            Word::new("expand", 0.5, 0.9),
        ])
        .with_words(vec![
            Word::new("around", 1.1, 1.5),
            Word::new("centers", 1.5, 2.0),
        ]);
    let mut pipeline = TurnPipeline::new(transcriber);

    for _ in 0..2 {
        pipeline.push_chunk(&voiced_chunk()).await.unwrap();
        pipeline.push_chunk(&voiced_chunk()).await.unwrap();
        pipeline.push_chunk(&silent_chunk()).await.unwrap();
    }
    let message = pipeline.finish().await.unwrap();
    assert_eq!(message, "I would expand around centers");

    // The finalized message becomes a dialogue turn
    let reply = session.send_request("", &message).await.unwrap();
    assert!(reply.contains("complexity"));

    // Closing the interview produces the graded report
    let feedback = session.end_interview().await.unwrap();
    assert!(feedback.contains("Feedback"));
}

#[tokio::test]
async fn abandoned_turn_leaves_session_clean() {
    let model = MockDialogue::new().with_reply("A problem.");
    let mut session = Session::new(model);
    session.generate_problem("", "Easy", "Arrays").await.unwrap();

    let transcriber = MockTranscriber::new().with_words(vec![Word::new("partial", 0.1, 0.5)]);
    let mut pipeline = TurnPipeline::new(transcriber);

    pipeline.push_chunk(&voiced_chunk()).await.unwrap();
    pipeline.push_chunk(&voiced_chunk()).await.unwrap();
    pipeline.push_chunk(&silent_chunk()).await.unwrap();
    assert_eq!(pipeline.transcript(), "partial");

    // Candidate cancels the recording: nothing reaches the session
    pipeline.abandon();
    assert_eq!(pipeline.transcript(), "");
    assert_eq!(session.history().len(), 2);
}
