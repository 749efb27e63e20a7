//! Terminal rendering for the CLI.

use console::{style, StyledObject};
use glowup_commerce::notify::Toast;
use glowup_commerce::{Money, NotificationKind};
use indicatif::{ProgressBar, ProgressStyle};

/// Writes human-readable or JSON output.
///
/// In JSON mode only [`Output::json`] and errors reach the terminal.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    pub fn info(&self, msg: &str) {
        self.status(NotificationKind::Info, msg);
    }

    pub fn success(&self, msg: &str) {
        self.status(NotificationKind::Success, msg);
    }

    /// Warnings go to stderr.
    pub fn warn(&self, msg: &str) {
        if !self.json {
            eprintln!("{} {}", style("!").yellow().bold(), msg);
        }
    }

    /// Errors go to stderr, as `{"error": ...}` in JSON mode.
    pub fn error(&self, msg: &str) {
        self.status(NotificationKind::Error, msg);
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose && !self.json {
            eprintln!("{} {}", style("·").dim(), style(msg).dim());
        }
    }

    /// Render a toast in the colour of its kind.
    pub fn toast(&self, toast: &Toast) {
        self.status(toast.notification.kind, &toast.notification.message);
    }

    fn status(&self, kind: NotificationKind, msg: &str) {
        match kind {
            NotificationKind::Error if self.json => {
                eprintln!("{}", serde_json::json!({ "error": msg }));
            }
            NotificationKind::Error => {
                eprintln!("{} {}", badge(kind), style(msg).red());
            }
            _ if self.json => {}
            _ => println!("{} {}", badge(kind), msg),
        }
    }

    pub fn header(&self, msg: &str) {
        if !self.json {
            println!("\n{}", style(msg).bold().magenta());
        }
    }

    pub fn json<T: serde::Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::warn!("Failed to render JSON output: {e}"),
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    /// Print left-aligned columns padded to `widths`.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let line: Vec<String> = cols
            .iter()
            .zip(widths)
            .map(|(col, width)| format!("{col:width$}"))
            .collect();
        println!("  {}", line.join("  ").trim_end());
    }

    /// Print the closing total line under an item table.
    pub fn total(&self, total: Money) {
        if !self.json {
            println!("  {} {}", style("Total:").bold(), style(total.display()).bold());
        }
    }

    /// Spinner shown while a booking is processed. Hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.magenta} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

fn badge(kind: NotificationKind) -> StyledObject<&'static str> {
    match kind {
        NotificationKind::Success => style("✓").green(),
        NotificationKind::Info => style("i").cyan(),
        NotificationKind::Error => style("✗").red(),
    }
}
