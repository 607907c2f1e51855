//! chatfolio: portfolio chat assistant.
//!
//! Answers visitor questions about a portfolio owner. Replies come from a
//! keyword dispatcher over pre-authored texts, or from a hosted
//! text-generation model when configured. Each visitor session keeps a
//! bounded history and a timestamped transcript.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use chatfolio::prelude::*;
//!
//! # async fn example() -> chatfolio::error::Result<()> {
//! let config = ChatConfig::load(None)?;
//! let resolver = chatfolio::resolver::create_resolver(&config)?;
//! let session = ConversationController::from_config(&config, resolver);
//! if let SubmitOutcome::Replied(turn) = session.submit("What projects have you done?").await {
//!     println!("{}", turn.content());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod http;
pub mod preferences;
pub mod prelude;
pub mod profile;
pub mod prompt;
pub mod resolver;
pub mod session;
pub mod types;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
