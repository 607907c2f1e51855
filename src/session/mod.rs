//! Conversation sessions: controller, transcript and session registry.

pub mod controller;
pub mod manager;
pub mod transcript;

pub use controller::{ControllerState, ConversationController, SubmitOutcome, FALLBACK_REPLY};
pub use manager::SessionManager;
pub use transcript::{ChatEvent, ChatEventSink, Transcript, TranscriptEntry};
