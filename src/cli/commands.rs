//! CLI command handlers.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::ChatConfig;
use crate::error::Result;
use crate::preferences::{FilePreferenceStore, PreferenceStore, Theme};
use crate::prompt::format_conversation;
use crate::resolver::create_resolver;
use crate::session::{ChatEvent, ConversationController, SubmitOutcome};

use super::{AskArgs, PromptArgs, SessionArgs, ThemeAction, ThemeArgs};

/// Handle `chatfolio chat`.
pub async fn handle_chat(config_path: Option<&Path>, args: &SessionArgs) -> Result<()> {
    let config = args.apply(ChatConfig::load(config_path)?);
    let resolver = create_resolver(&config)?;
    let sink = Arc::new(|event: ChatEvent| match event {
        ChatEvent::TurnAdded(entry) => println!("{}", entry.render()),
        ChatEvent::PendingStarted => {
            eprint!("🤖 ...");
            let _ = std::io::stderr().flush();
        }
        // Erase the pending line.
        ChatEvent::PendingCleared => eprint!("\r\x1b[2K"),
    });
    let session = ConversationController::from_config(&config, resolver).with_event_sink(sink);

    println!("💬 Ask me about projects, skills, experience, education or contact details.");
    print_starters(&session);
    println!("   /starters, /history, /quit\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        match input {
            "/quit" | "/exit" => break,
            "/starters" => print_starters(&session),
            "/history" => {
                for turn in session.history() {
                    println!("  {}: {}", turn.role(), turn.content());
                }
            }
            _ => {
                if let Some(index) = starter_index(input) {
                    if let Err(e) = session.submit_starter(index).await {
                        eprintln!("⚠️  {e}");
                    }
                } else {
                    session.submit(input).await;
                }
            }
        }
    }
    Ok(())
}

/// Handle `chatfolio ask`.
pub async fn handle_ask(config_path: Option<&Path>, args: &AskArgs) -> Result<()> {
    let config = args.session.apply(ChatConfig::load(config_path)?);
    let resolver = create_resolver(&config)?;
    let session = ConversationController::from_config(&config, resolver);

    match session.submit(&args.message).await {
        SubmitOutcome::Replied(turn) => println!("{}", turn.content()),
        SubmitOutcome::Ignored => eprintln!("Nothing to ask: message is empty"),
        SubmitOutcome::Busy => eprintln!("A reply is still pending"),
    }
    Ok(())
}

/// Handle `chatfolio prompt`.
pub fn handle_prompt(config_path: Option<&Path>, args: &PromptArgs) -> Result<()> {
    let config = ChatConfig::load(config_path)?;
    print!(
        "{}",
        format_conversation(&config.profile.system_preamble, &[], args.message.trim())
    );
    Ok(())
}

/// Handle `chatfolio theme`.
pub fn handle_theme(args: &ThemeArgs) -> Result<()> {
    let store = FilePreferenceStore::new_default();
    let current = store.load_theme()?;
    let next = match args.action.unwrap_or(ThemeAction::Show) {
        ThemeAction::Show => {
            println!("{current}");
            return Ok(());
        }
        ThemeAction::Light => Theme::Light,
        ThemeAction::Dark => Theme::Dark,
        ThemeAction::Toggle => current.toggle(),
    };
    store.save_theme(next)?;
    println!("{next}");
    Ok(())
}

fn print_starters(session: &ConversationController) {
    for (i, starter) in session.starters().iter().enumerate() {
        println!("   /{} {}: {}", i + 1, starter.label, starter.question);
    }
}

/// `/N` (1-based) to a starter index.
fn starter_index(input: &str) -> Option<usize> {
    input
        .strip_prefix('/')?
        .parse::<usize>()
        .ok()?
        .checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_commands_are_one_based() {
        assert_eq!(starter_index("/1"), Some(0));
        assert_eq!(starter_index("/4"), Some(3));
        assert_eq!(starter_index("/0"), None);
        assert_eq!(starter_index("1"), None);
        assert_eq!(starter_index("/history"), None);
    }
}
