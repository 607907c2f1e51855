//! CLI entry point for chatfolio.

pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{ChatConfig, ResolverKind};

/// chatfolio CLI
#[derive(Parser, Debug)]
#[command(name = "chatfolio", version, about = "Portfolio chat assistant")]
pub struct Cli {
    /// Configuration file (default: ~/.chatfolio/config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive chat session
    Chat(SessionArgs),
    /// Ask a single question and print the reply
    Ask(AskArgs),
    /// Print the prompt a remote model would receive for a message
    Prompt(PromptArgs),
    /// Show or change the theme preference
    Theme(ThemeArgs),
}

/// Options shared by commands that run a conversation.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Resolver to use (canned, remote)
    #[arg(short, long)]
    pub resolver: Option<ResolverKind>,

    /// Artificial reply delay in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

impl SessionArgs {
    /// Apply command-line overrides on top of loaded configuration.
    pub fn apply(&self, mut config: ChatConfig) -> ChatConfig {
        if let Some(kind) = self.resolver {
            config.resolver = kind;
        }
        if let Some(delay) = self.delay_ms {
            config.response_delay_ms = delay;
        }
        config
    }
}

/// Arguments for `chatfolio ask`.
#[derive(Args, Debug)]
pub struct AskArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Message to send
    pub message: String,
}

/// Arguments for `chatfolio prompt`.
#[derive(Args, Debug)]
pub struct PromptArgs {
    /// Message to format
    pub message: String,
}

/// Arguments for `chatfolio theme`.
#[derive(Args, Debug)]
pub struct ThemeArgs {
    #[command(subcommand)]
    pub action: Option<ThemeAction>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    /// Print the saved theme
    Show,
    /// Switch to the light theme
    Light,
    /// Switch to the dark theme
    Dark,
    /// Flip between light and dark
    Toggle,
}
