//! Interview orchestration: problem generation, the multi-turn dialogue,
//! and the graded feedback report.

pub mod catalog;
pub mod prompts;
pub mod session;

pub use catalog::{FIXED_MESSAGES, FixedMessages, TOPICS};
pub use session::{Session, test_connection};
