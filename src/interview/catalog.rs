//! Static interview data: topic catalogue and fixed interviewer messages.

/// Problem topics offered to the candidate.
pub const TOPICS: &[&str] = &[
    "Arrays",
    "Strings",
    "Linked Lists",
    "Hash Tables",
    "Dynamic Programming",
    "Trees",
    "Graphs",
    "Sorting Algorithms",
    "Binary Search",
    "Recursion",
    "Greedy Algorithms",
    "Stack",
    "Queue",
    "Heaps",
    "Depth-First Search (DFS)",
    "Breadth-First Search (BFS)",
    "Backtracking",
    "Bit Manipulation",
    "Binary Search Trees",
    "Tries",
];

/// Canned interviewer messages shown outside the model-driven dialogue.
#[derive(Debug, Clone, Copy)]
pub struct FixedMessages {
    pub intro: &'static str,
    pub start: &'static str,
    pub end: &'static str,
    pub error: &'static str,
}

pub const FIXED_MESSAGES: FixedMessages = FixedMessages {
    intro: "Welcome! I'm your interview trainer. Pick a difficulty and a \
            topic, then generate a problem to begin.",
    start: "Take a moment to read the problem, then talk me through your \
            initial thoughts. Use the record button and think out loud, \
            just like in a real interview.",
    end: "That concludes the interview, thank you! I'll prepare detailed \
          feedback on your performance now.",
    error: "Something went wrong. Please try again.",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topics_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for topic in TOPICS {
            assert!(seen.insert(topic), "duplicate topic: {}", topic);
        }
    }

    #[test]
    fn test_fixed_messages_nonempty() {
        assert!(!FIXED_MESSAGES.intro.is_empty());
        assert!(!FIXED_MESSAGES.start.is_empty());
        assert!(!FIXED_MESSAGES.end.is_empty());
        assert!(!FIXED_MESSAGES.error.is_empty());
    }
}
