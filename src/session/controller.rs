//! Conversation controller: one visitor session.
//!
//! A submit moves the session from [`ControllerState::Idle`] to
//! [`ControllerState::AwaitingResponse`], shows the pending indicator, waits
//! the configured delay, asks the resolver for a reply, records the exchange
//! and returns to idle. Only one submit is in flight at a time; overlapping
//! submits are rejected with [`SubmitOutcome::Busy`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::config::ChatConfig;
use crate::error::ChatError;
use crate::history::HistoryBuffer;
use crate::profile::ConversationStarter;
use crate::resolver::ResponseResolver;
use crate::types::Turn;

use super::transcript::{ChatEvent, ChatEventSink, Transcript, TranscriptEntry};

/// Reply shown when the resolver fails.
pub const FALLBACK_REPLY: &str =
    "I'm having trouble connecting right now. Please try again later.";

const DEFAULT_RESPONSE_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    AwaitingResponse,
}

/// Result of a submit.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Input was empty after trimming; nothing changed.
    Ignored,
    /// Another submit is still pending; nothing changed.
    Busy,
    /// The assistant turn appended to the transcript.
    Replied(Turn),
}

#[derive(Debug, Default)]
struct SessionState {
    history: HistoryBuffer,
    transcript: Transcript,
}

pub struct ConversationController {
    resolver: Arc<dyn ResponseResolver>,
    state: Mutex<SessionState>,
    busy: AtomicBool,
    response_delay: Duration,
    starters: Vec<ConversationStarter>,
    event_sink: Option<ChatEventSink>,
}

impl ConversationController {
    pub fn new(resolver: Arc<dyn ResponseResolver>) -> Self {
        Self {
            resolver,
            state: Mutex::new(SessionState::default()),
            busy: AtomicBool::new(false),
            response_delay: DEFAULT_RESPONSE_DELAY,
            starters: Vec::new(),
            event_sink: None,
        }
    }

    /// Controller using the delay, history cap and starters from `config`.
    pub fn from_config(config: &ChatConfig, resolver: Arc<dyn ResponseResolver>) -> Self {
        Self::new(resolver)
            .with_response_delay(config.response_delay())
            .with_max_exchanges(config.max_history_length)
            .with_starters(config.profile.starters.clone())
    }

    pub fn with_response_delay(mut self, delay: Duration) -> Self {
        self.response_delay = delay;
        self
    }

    /// Resets the history to an empty buffer holding `max_exchanges` pairs.
    pub fn with_max_exchanges(mut self, max_exchanges: usize) -> Self {
        self.state = Mutex::new(SessionState {
            history: HistoryBuffer::with_max_exchanges(max_exchanges),
            transcript: Transcript::default(),
        });
        self
    }

    pub fn with_starters(mut self, starters: Vec<ConversationStarter>) -> Self {
        self.starters = starters;
        self
    }

    pub fn with_event_sink(mut self, sink: ChatEventSink) -> Self {
        self.event_sink = Some(sink);
        self
    }

    pub fn state(&self) -> ControllerState {
        if self.busy.load(Ordering::Acquire) {
            ControllerState::AwaitingResponse
        } else {
            ControllerState::Idle
        }
    }

    /// Whether the pending indicator is visible.
    pub fn is_pending(&self) -> bool {
        self.lock().transcript.is_pending()
    }

    pub fn history(&self) -> Vec<Turn> {
        self.lock().history.snapshot()
    }

    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.lock().transcript.entries().to_vec()
    }

    pub fn starters(&self) -> &[ConversationStarter] {
        &self.starters
    }

    pub fn resolver_name(&self) -> &str {
        self.resolver.name()
    }

    /// Submit the question bound to starter `index`.
    pub async fn submit_starter(&self, index: usize) -> Result<SubmitOutcome, ChatError> {
        let starter = self.starters.get(index).ok_or_else(|| {
            ChatError::InvalidArgument(format!(
                "no conversation starter {index} (have {})",
                self.starters.len()
            ))
        })?;
        Ok(self.submit(&starter.question).await)
    }

    /// Submit a visitor message and wait for the reply.
    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        let message = input.trim();
        if message.is_empty() {
            return SubmitOutcome::Ignored;
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("submit rejected, reply still pending");
            return SubmitOutcome::Busy;
        }
        let mut pending = PendingGuard::new(self);

        let user_turn = Turn::user(message);
        let (entry, history) = {
            let mut state = self.lock();
            let entry = state.transcript.push(user_turn.clone());
            state.transcript.set_pending(true);
            (entry, state.history.snapshot())
        };
        self.emit(ChatEvent::TurnAdded(entry));
        self.emit(ChatEvent::PendingStarted);
        tracing::debug!(resolver = self.resolver.name(), "awaiting response");

        tokio::time::sleep(self.response_delay).await;

        let reply_turn = match self.resolver.resolve(message, &history).await {
            Ok(text) => {
                let reply_turn = Turn::assistant(text);
                let mut state = self.lock();
                state.history.append(user_turn);
                state.history.append(reply_turn.clone());
                reply_turn
            }
            Err(err) => {
                tracing::error!(
                    resolver = self.resolver.name(),
                    error = %err,
                    hint = err.category().hint(),
                    "failed to resolve reply"
                );
                self.lock().history.append(user_turn);
                Turn::assistant(FALLBACK_REPLY)
            }
        };

        pending.clear();
        let entry = self.lock().transcript.push(reply_turn.clone());
        self.emit(ChatEvent::TurnAdded(entry));
        SubmitOutcome::Replied(reply_turn)
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn emit(&self, event: ChatEvent) {
        if let Some(sink) = &self.event_sink {
            sink(event);
        }
    }
}

impl std::fmt::Debug for ConversationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationController")
            .field("resolver", &self.resolver.name())
            .field("state", &self.state())
            .field("response_delay", &self.response_delay)
            .field("starters", &self.starters.len())
            .finish()
    }
}

/// Clears the pending indicator and busy flag even if the submit future is
/// dropped mid-flight.
struct PendingGuard<'a> {
    controller: &'a ConversationController,
    cleared: bool,
}

impl<'a> PendingGuard<'a> {
    fn new(controller: &'a ConversationController) -> Self {
        Self {
            controller,
            cleared: false,
        }
    }

    fn clear(&mut self) {
        if self.cleared {
            return;
        }
        self.cleared = true;
        let was_pending = {
            let mut state = self.controller.lock();
            let was_pending = state.transcript.is_pending();
            state.transcript.set_pending(false);
            was_pending
        };
        if was_pending {
            self.controller.emit(ChatEvent::PendingCleared);
        }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.clear();
        self.controller.busy.store(false, Ordering::Release);
    }
}
