//! Interview session state and dialogue orchestration.
//!
//! A session covers one interview: problem generation seeds the chat
//! history, candidate turns grow it, and ending the interview turns the
//! history into a graded feedback report.

use crate::error::Result;
use crate::interview::prompts;
use crate::providers::dialogue::{DialogueModel, Message, Role};

/// Reply when the interview ended before any real exchange happened.
const NO_CONTENT_NOTICE: &str = "No interview content available to review.";

/// One interview with its chat history and code tracking.
///
/// The history holds the model-facing conversation (system prompts
/// included); the host keeps its own display copy.
pub struct Session<D: DialogueModel> {
    model: D,
    history: Vec<Message>,
    problem: Option<String>,
    previous_code: String,
}

impl<D: DialogueModel> Session<D> {
    /// Creates a session with no problem generated yet.
    pub fn new(model: D) -> Self {
        Self {
            model,
            history: Vec::new(),
            problem: None,
            previous_code: String::new(),
        }
    }

    /// The generated problem statement, if any.
    pub fn problem(&self) -> Option<&str> {
        self.problem.as_deref()
    }

    /// The model-facing conversation so far.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Generates a problem statement and seeds the interview history.
    ///
    /// Any previous interview state in this session is replaced.
    pub async fn generate_problem(
        &mut self,
        requirements: &str,
        difficulty: &str,
        topic: &str,
    ) -> Result<String> {
        let request = format!(
            "Create a {difficulty} {topic} coding problem. \
             Additional requirements: {requirements}. \
             The problem should be clearly stated, well-formatted, and \
             solvable within 30 minutes. Vary the problems between \
             interviews to cover a wide range of challenges."
        );

        let problem = self
            .model
            .complete(&[
                Message::system(prompts::PROBLEM_GENERATION),
                Message::user(request),
            ])
            .await?;

        self.history = vec![
            Message::system(prompts::INTERVIEWER),
            Message::system(format!(
                "The candidate is solving the following problem: {problem}"
            )),
        ];
        self.previous_code.clear();
        self.problem = Some(problem.clone());

        Ok(problem)
    }

    /// Sends one candidate turn and returns the interviewer's reply.
    ///
    /// When the candidate's code changed since the last turn, the new
    /// code is attached as its own message before the spoken one.
    pub async fn send_request(&mut self, code: &str, message: &str) -> Result<String> {
        if code != self.previous_code {
            self.history
                .push(Message::user(format!("My latest code:\n{code}")));
            self.previous_code = code.to_string();
        }
        self.history.push(Message::user(message));

        let reply = self.model.complete(&self.history).await?;
        self.history.push(Message::assistant(reply.clone()));

        Ok(reply)
    }

    /// Ends the interview and returns the graded feedback report.
    pub async fn end_interview(&self) -> Result<String> {
        // Two seeded system messages and nothing else means the
        // candidate never said anything worth grading.
        if self.history.len() <= 2 {
            return Ok(NO_CONTENT_NOTICE.to_string());
        }

        let transcript: Vec<String> = self
            .history
            .iter()
            .skip(1)
            .map(|message| format!("{}: {}", role_label(message.role), message.content))
            .collect();

        let problem = self.problem.as_deref().unwrap_or("(not recorded)");

        self.model
            .complete(&[
                Message::system(prompts::GRADING_FEEDBACK),
                Message::user(format!("The original problem to solve: {problem}")),
                Message::user(transcript.join("\n\n")),
                Message::user(
                    "Grade the interview based on the transcript provided and give feedback.",
                ),
            ])
            .await
    }
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::System => "System",
        Role::User => "User",
        Role::Assistant => "Assistant",
    }
}

/// Tiny ping exchange used by hosts to display provider status.
pub async fn test_connection(model: &dyn DialogueModel) -> Result<String> {
    model
        .complete(&[
            Message::system("You just help me test the connection."),
            Message::user("Ping!"),
        ])
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::dialogue::MockDialogue;

    #[tokio::test]
    async fn test_generate_problem_seeds_history() {
        let model = MockDialogue::new().with_reply("Reverse a linked list.");
        let mut session = Session::new(model);

        let problem = session
            .generate_problem("none", "Easy", "Linked Lists")
            .await
            .unwrap();

        assert_eq!(problem, "Reverse a linked list.");
        assert_eq!(session.problem(), Some("Reverse a linked list."));

        let history = session.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::System);
        assert!(history[1].content.contains("Reverse a linked list."));
    }

    #[tokio::test]
    async fn test_send_request_appends_turns() {
        let model = MockDialogue::new()
            .with_reply("A problem.")
            .with_reply("Good question: what does the input look like?");
        let mut session = Session::new(model);
        session.generate_problem("", "Medium", "Arrays").await.unwrap();

        let reply = session
            .send_request("", "Can I assume the array is sorted?")
            .await
            .unwrap();

        assert!(reply.contains("Good question"));
        // system ×2 + user + assistant
        assert_eq!(session.history().len(), 4);
    }

    #[tokio::test]
    async fn test_code_change_is_attached_once() {
        let model = MockDialogue::new()
            .with_reply("A problem.")
            .with_reply("ok")
            .with_reply("ok")
            .with_reply("ok");
        let mut session = Session::new(model);
        session.generate_problem("", "Medium", "Arrays").await.unwrap();

        session.send_request("fn a() {}", "first").await.unwrap();
        // Same code again: no extra code message
        session.send_request("fn a() {}", "second").await.unwrap();
        // Changed code: attached again
        session.send_request("fn b() {}", "third").await.unwrap();

        let code_messages = session
            .history()
            .iter()
            .filter(|m| m.content.starts_with("My latest code:"))
            .count();
        assert_eq!(code_messages, 2);
    }

    #[tokio::test]
    async fn test_end_interview_without_exchange() {
        let model = MockDialogue::new().with_reply("A problem.");
        let mut session = Session::new(model);
        session.generate_problem("", "Hard", "Graphs").await.unwrap();

        let feedback = session.end_interview().await.unwrap();
        assert_eq!(feedback, NO_CONTENT_NOTICE);
    }

    #[tokio::test]
    async fn test_end_interview_without_problem() {
        let session = Session::new(MockDialogue::new());

        let feedback = session.end_interview().await.unwrap();
        assert_eq!(feedback, NO_CONTENT_NOTICE);
    }

    #[tokio::test]
    async fn test_end_interview_requests_grading() {
        let model = MockDialogue::new()
            .with_reply("A problem.")
            .with_reply("interviewer reply")
            .with_reply("Feedback: solid reasoning, slow on edge cases.");
        let mut session = Session::new(model);
        session.generate_problem("", "Medium", "Strings").await.unwrap();
        session.send_request("", "I'd use two pointers.").await.unwrap();

        let feedback = session.end_interview().await.unwrap();
        assert!(feedback.contains("solid reasoning"));
    }

    #[tokio::test]
    async fn test_connection_ping() {
        let model = MockDialogue::new().with_reply("Pong!");

        let reply = test_connection(&model).await.unwrap();
        assert_eq!(reply, "Pong!");
    }

    #[tokio::test]
    async fn test_dialogue_failure_propagates() {
        let model = MockDialogue::new().with_failure();
        let mut session = Session::new(model);

        let result = session.generate_problem("", "Easy", "Stacks").await;
        assert!(result.is_err());
    }
}
