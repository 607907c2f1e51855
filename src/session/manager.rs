//! Session-scoped conversations keyed by id.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::config::ChatConfig;
use crate::resolver::ResponseResolver;

use super::controller::ConversationController;

/// Owns one [`ConversationController`] per visitor session. All sessions
/// share the resolver and configuration; history and transcript are not
/// shared.
pub struct SessionManager {
    config: ChatConfig,
    resolver: Arc<dyn ResponseResolver>,
    sessions: HashMap<String, Arc<ConversationController>>,
}

impl SessionManager {
    pub fn new(config: ChatConfig, resolver: Arc<dyn ResponseResolver>) -> Self {
        Self {
            config,
            resolver,
            sessions: HashMap::new(),
        }
    }

    /// Get or create a session by ID.
    pub fn get_or_create(&mut self, session_id: &str) -> Arc<ConversationController> {
        let config = &self.config;
        let resolver = &self.resolver;
        self.sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                tracing::debug!(session_id, "creating session");
                Arc::new(ConversationController::from_config(config, resolver.clone()))
            })
            .clone()
    }

    /// Start a session under a fresh random ID.
    pub fn create(&mut self) -> (String, Arc<ConversationController>) {
        let id = Uuid::new_v4().to_string();
        let controller = self.get_or_create(&id);
        (id, controller)
    }

    /// Get an existing session.
    pub fn get(&self, session_id: &str) -> Option<Arc<ConversationController>> {
        self.sessions.get(session_id).cloned()
    }

    /// Remove a session.
    pub fn remove(&mut self, session_id: &str) -> Option<Arc<ConversationController>> {
        self.sessions.remove(session_id)
    }

    /// List session IDs.
    pub fn session_ids(&self) -> Vec<&str> {
        self.sessions.keys().map(|k| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
