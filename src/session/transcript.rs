//! Display log of a conversation and the events that update it.

use std::sync::Arc;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::types::{Role, Turn};

/// One rendered line of the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    turn: Turn,
}

impl TranscriptEntry {
    pub fn new(turn: Turn) -> Self {
        Self { turn }
    }

    pub fn turn(&self) -> &Turn {
        &self.turn
    }

    /// Icon name for the speaker (`user` or `robot`).
    pub fn icon(&self) -> &'static str {
        self.turn.role().icon()
    }

    /// Local wall-clock time as `HH:MM`.
    pub fn time_label(&self) -> String {
        self.turn
            .timestamp()
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string()
    }

    /// `[HH:MM] <glyph> text`
    pub fn render(&self) -> String {
        let glyph = match self.turn.role() {
            Role::User => "👤",
            Role::Assistant => "🤖",
        };
        format!("[{}] {glyph} {}", self.time_label(), self.turn.content())
    }
}

/// Everything shown to the visitor: entries in arrival order plus the
/// pending indicator.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    pending: bool,
}

impl Transcript {
    pub fn push(&mut self, turn: Turn) -> TranscriptEntry {
        let entry = TranscriptEntry::new(turn);
        self.entries.push(entry.clone());
        entry
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub(crate) fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Notifications emitted by a conversation as it changes.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    TurnAdded(TranscriptEntry),
    PendingStarted,
    PendingCleared,
}

/// Observer for [`ChatEvent`]s.
pub type ChatEventSink = Arc<dyn Fn(ChatEvent) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_has_time_icon_and_text() {
        let entry = TranscriptEntry::new(Turn::assistant("Hi!"));
        let line = entry.render();
        assert!(line.starts_with('['));
        assert!(line.ends_with("🤖 Hi!"));
        assert_eq!(entry.time_label().len(), 5);
        assert_eq!(entry.icon(), "robot");
    }

    #[test]
    fn push_keeps_arrival_order() {
        let mut transcript = Transcript::default();
        transcript.push(Turn::user("a"));
        transcript.push(Turn::assistant("b"));
        let contents: Vec<&str> = transcript
            .entries()
            .iter()
            .map(|e| e.turn().content())
            .collect();
        assert_eq!(contents, ["a", "b"]);
        assert!(!transcript.is_pending());
    }
}
