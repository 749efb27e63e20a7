//! Glow Up CLI - terminal front end for the shop cart.
//!
//! Commands:
//! - `glowup cart` - Show, add to, or remove from the cart
//! - `glowup checkout` - Review and confirm the cart
//! - `glowup book` - Book an appointment
//! - `glowup prices` - Show the service price list
//! - `glowup theme` - Show or change the dark-mode preference
//! - `glowup config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AlreadyReported, BookArgs, CartArgs, CheckoutArgs, ConfigArgs, ThemeArgs};

/// Glow Up - manage the beauty parlour shop cart
#[derive(Parser)]
#[command(name = "glowup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or change the cart
    Cart(CartArgs),

    /// Review and confirm the cart
    Checkout(CheckoutArgs),

    /// Book an appointment
    Book(BookArgs),

    /// Show the service price list
    Prices,

    /// Show or change the theme preference
    Theme(ThemeArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Book(args) => commands::book::run(args, &ctx).await,
        Commands::Prices => commands::prices::run(&ctx).await,
        Commands::Theme(args) => commands::theme::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        tracing::debug!("command failed: {e:?}");
        if needs_report(&e) {
            ctx.output.error(&format!("{:#}", e));
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Whether a failed command still has to print its error.
fn needs_report(e: &anyhow::Error) -> bool {
    e.downcast_ref::<AlreadyReported>().is_none()
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`, or `debug` with `-v`).
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowup_commerce::prelude::*;

    #[test]
    fn test_toasted_failures_are_not_reprinted() {
        let toasts = ToastQueue::new();
        let storage = glowup_cache::MemoryStore::new();
        let mut store = CartStore::initialize_in(&storage, &toasts, Currency::USD);

        let err = store
            .add_displayed("Facial", "thirty dollars", "")
            .map_err(|_| anyhow::Error::new(AlreadyReported))
            .unwrap_err();

        assert_eq!(toasts.drain().len(), 1);
        assert!(!needs_report(&err));
    }

    #[test]
    fn test_plain_failures_are_printed() {
        let err = anyhow::anyhow!("Config file already exists");
        assert!(needs_report(&err));
    }
}
