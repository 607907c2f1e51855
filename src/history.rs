//! Bounded conversation history.

use std::collections::VecDeque;

use crate::types::Turn;

/// Number of exchanges (user + assistant pairs) kept by default.
pub const MAX_HISTORY_LENGTH: usize = 10;

/// Ordered log of exchanged turns, capped at `2 * max_exchanges` entries.
///
/// Appending past the cap evicts the oldest turns first.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    turns: VecDeque<Turn>,
    capacity: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::with_max_exchanges(MAX_HISTORY_LENGTH)
    }
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding at most `max_exchanges` user/assistant pairs.
    ///
    /// Storage grows on demand; the cap only bounds retention.
    pub fn with_max_exchanges(max_exchanges: usize) -> Self {
        Self {
            turns: VecDeque::new(),
            capacity: max_exchanges.saturating_mul(2),
        }
    }

    /// Add a turn to the end, dropping the oldest turns beyond the cap.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push_back(turn);
        while self.turns.len() > self.capacity {
            self.turns.pop_front();
        }
    }

    /// Turns in chronological order.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Turn> + '_ {
        self.turns.iter()
    }

    /// Maximum number of turns retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn default_cap_is_twenty_turns() {
        assert_eq!(HistoryBuffer::new().capacity(), 20);
    }

    #[test]
    fn appending_25_keeps_the_most_recent_20_in_order() {
        let mut history = HistoryBuffer::new();
        for i in 0..25 {
            history.append(Turn::user(format!("turn {i}")));
        }

        assert_eq!(history.len(), 20);
        let contents: Vec<String> = history
            .snapshot()
            .iter()
            .map(|t| t.content().to_string())
            .collect();
        let expected: Vec<String> = (5..25).map(|i| format!("turn {i}")).collect();
        assert_eq!(contents, expected);
    }

    #[test]
    fn below_cap_nothing_is_evicted() {
        let mut history = HistoryBuffer::with_max_exchanges(2);
        history.append(Turn::user("q"));
        history.append(Turn::assistant("a"));
        history.append(Turn::user("q2"));

        let roles: Vec<Role> = history.iter().map(|t| t.role()).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
    }

    #[test]
    fn huge_cap_does_not_preallocate() {
        let mut history = HistoryBuffer::with_max_exchanges(usize::MAX);
        assert_eq!(history.capacity(), usize::MAX);
        history.append(Turn::user("still fine"));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn zero_exchanges_keeps_nothing() {
        let mut history = HistoryBuffer::with_max_exchanges(0);
        history.append(Turn::user("gone"));
        assert!(history.is_empty());
    }
}
