//! Convenience re-exports for common use.

pub use crate::config::{ChatConfig, ResolverKind};
pub use crate::error::{ChatError, Result};
pub use crate::history::HistoryBuffer;
pub use crate::profile::{ConversationStarter, Profile};
pub use crate::resolver::{CannedResolver, RemoteResolver, ResponseResolver};
pub use crate::session::{ChatEvent, ConversationController, SessionManager, SubmitOutcome};
pub use crate::types::{Role, Turn};
