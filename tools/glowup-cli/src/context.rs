//! CLI execution context.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context as _, Result};
use glowup_cache::FileStore;
use glowup_commerce::notify::ToastQueue;
use glowup_commerce::Currency;

use crate::config::GlowupConfig;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: GlowupConfig,
    /// Where the configuration was loaded from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Pending toasts raised by the cart.
    pub toasts: ToastQueue,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(resolve(&cwd, Path::new(path))),
            None => GlowupConfig::find(&cwd),
        };
        let config = match &config_path {
            Some(path) => GlowupConfig::load(path)?,
            None => GlowupConfig::default(),
        };

        let toasts = ToastQueue::with_dismiss_after(config.notifications.dismiss_after());

        Ok(Self {
            config,
            config_path,
            output,
            toasts,
            cwd,
        })
    }

    /// The configured shop currency.
    pub fn currency(&self) -> Result<Currency> {
        self.config.currency()
    }

    /// Path of the storage file.
    ///
    /// Relative paths are taken from the directory holding the config file,
    /// or the working directory when running without one.
    pub fn storage_path(&self) -> PathBuf {
        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(&self.cwd);
        resolve(base, &self.config.storage.path)
    }

    /// Open client-local storage.
    pub fn open_storage(&self) -> Result<FileStore> {
        let path = self.storage_path();
        self.output
            .debug(&format!("Using storage: {}", path.display()));
        FileStore::open(&path)
            .with_context(|| format!("Failed to open storage: {}", path.display()))
    }

    /// Print every toast still on screen and clear the queue.
    pub fn flush_toasts(&self) {
        let dismissed = self.toasts.prune(Instant::now());
        if dismissed > 0 {
            self.output
                .debug(&format!("{dismissed} notification(s) dismissed before display"));
        }
        for toast in self.toasts.drain() {
            self.output.toast(&toast);
        }
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
