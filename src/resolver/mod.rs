//! Response resolvers: the component deciding what reply a message gets.

pub mod canned;
pub mod remote;

pub use canned::{CannedResolver, KeywordRule};
pub use remote::{InferenceParameters, RemoteResolver};

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{ChatConfig, ResolverKind};
use crate::error::ChatError;
use crate::types::Turn;

/// Produces reply text for an incoming message.
#[async_trait]
pub trait ResponseResolver: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Resolve a reply. `history` holds prior turns, oldest first, and does
    /// not include `message`.
    async fn resolve(&self, message: &str, history: &[Turn]) -> Result<String, ChatError>;
}

/// Build the resolver selected by configuration.
pub fn create_resolver(config: &ChatConfig) -> Result<Arc<dyn ResponseResolver>, ChatError> {
    tracing::debug!(resolver = %config.resolver, "creating resolver");
    match config.resolver {
        ResolverKind::Canned => Ok(Arc::new(CannedResolver::from_profile(&config.profile))),
        ResolverKind::Remote => Ok(Arc::new(RemoteResolver::from_settings(
            &config.remote,
            config.profile.system_preamble.clone(),
        )?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_selects_canned() {
        let resolver = create_resolver(&ChatConfig::default()).unwrap();
        assert_eq!(resolver.name(), "canned");
    }

    #[test]
    fn remote_without_token_is_a_configuration_error() {
        let config = ChatConfig {
            resolver: ResolverKind::Remote,
            ..ChatConfig::default()
        };
        match create_resolver(&config) {
            Err(ChatError::Configuration(msg)) => assert!(msg.contains("token")),
            Err(other) => panic!("expected configuration error, got {other:?}"),
            Ok(_) => panic!("expected configuration error"),
        }
    }

    #[test]
    fn remote_with_token_is_built() {
        let mut config = ChatConfig {
            resolver: ResolverKind::Remote,
            ..ChatConfig::default()
        };
        config.remote.token = Some("hf_test".into());
        assert_eq!(create_resolver(&config).unwrap().name(), "remote");
    }
}
