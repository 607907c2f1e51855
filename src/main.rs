//! chatfolio CLI binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use chatfolio::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG overrides; --verbose => debug; else warn
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "chatfolio=debug"
        } else {
            "chatfolio=warn"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config_path = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Chat(args) => commands::handle_chat(config_path, args).await,
        Commands::Ask(args) => commands::handle_ask(config_path, args).await,
        Commands::Prompt(args) => commands::handle_prompt(config_path, args),
        Commands::Theme(args) => commands::handle_theme(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e} ({})", e.category().hint());
        std::process::exit(1);
    }
}
