//! Core types for chatfolio.

pub mod message;

pub use message::*;
