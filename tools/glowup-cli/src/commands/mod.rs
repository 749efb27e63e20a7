//! CLI command implementations.

pub mod book;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod prices;
pub mod theme;

use std::fmt;

use clap::{Args, Subcommand};

/// A failure the user has already been shown, e.g. as a toast.
///
/// `main` exits non-zero without printing it again.
#[derive(Debug)]
pub struct AlreadyReported;

impl fmt::Display for AlreadyReported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("already reported")
    }
}

impl std::error::Error for AlreadyReported {}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart (default).
    List,
    /// Add an item with the price as displayed, e.g. "$30.00".
    Add {
        /// Item title.
        title: String,
        /// Displayed price text.
        price: String,
        /// Image URL or path.
        #[arg(short, long, default_value = "")]
        image: String,
    },
    /// Add a service from the price list by name.
    AddService {
        /// Service name, e.g. "Facial Treatment".
        name: String,
    },
    /// Remove an item by id.
    Remove {
        /// Item id as shown by `glowup cart list`.
        id: String,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Confirm the order without prompting.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the book command. Fields left out are reported as missing.
#[derive(Args)]
pub struct BookArgs {
    /// Your name.
    #[arg(long, default_value = "")]
    pub name: String,

    /// Email address.
    #[arg(long, default_value = "")]
    pub email: String,

    /// Phone number (optional).
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Service name from `glowup prices`.
    #[arg(long, default_value = "")]
    pub service: String,

    /// Appointment date, YYYY-MM-DD.
    #[arg(long, default_value = "")]
    pub date: String,

    /// Appointment time, HH:MM between 09:00 and 19:00.
    #[arg(long, default_value = "")]
    pub time: String,

    /// Anything we should know (optional).
    #[arg(long, default_value = "")]
    pub notes: String,

    /// Skip the simulated processing delay.
    #[arg(long)]
    pub no_delay: bool,
}

/// Arguments for the theme command.
#[derive(Args)]
pub struct ThemeArgs {
    #[command(subcommand)]
    pub command: Option<ThemeCommand>,
}

#[derive(Subcommand)]
pub enum ThemeCommand {
    /// Show the current theme (default).
    Show,
    /// Switch between light and dark.
    Toggle,
    /// Use the dark theme.
    Dark,
    /// Use the light theme.
    Light,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Create a glowup.toml in the current directory.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate configuration.
    Validate,
}
