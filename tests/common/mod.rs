//! Shared test helpers: scripted resolvers and an event recorder.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use chatfolio::error::ChatError;
use chatfolio::resolver::ResponseResolver;
use chatfolio::session::{ChatEvent, ChatEventSink};
use chatfolio::types::Turn;
use chatfolio::util::retry::RetryPolicy;

/// A resolver that always fails with a network-style error.
#[derive(Default)]
pub struct FailingResolver {
    pub calls: AtomicUsize,
}

#[async_trait]
impl ResponseResolver for FailingResolver {
    fn name(&self) -> &str {
        "failing"
    }

    async fn resolve(&self, _message: &str, _history: &[Turn]) -> Result<String, ChatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ChatError::Timeout(30_000))
    }
}

/// A resolver that records the history it was handed and echoes the message.
#[derive(Default)]
pub struct EchoResolver {
    pub seen_history: Mutex<Vec<Vec<Turn>>>,
}

#[async_trait]
impl ResponseResolver for EchoResolver {
    fn name(&self) -> &str {
        "echo"
    }

    async fn resolve(&self, message: &str, history: &[Turn]) -> Result<String, ChatError> {
        self.seen_history.lock().unwrap().push(history.to_vec());
        Ok(format!("echo: {message}"))
    }
}

/// Collects emitted events for later inspection.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<ChatEvent>>>,
}

impl EventLog {
    pub fn sink(&self) -> ChatEventSink {
        let events = self.events.clone();
        Arc::new(move |event: ChatEvent| events.lock().unwrap().push(event))
    }

    pub fn events(&self) -> Vec<ChatEvent> {
        self.events.lock().unwrap().clone()
    }
}

pub fn test_retry_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(1),
        multiplier: 1.0,
    }
}
