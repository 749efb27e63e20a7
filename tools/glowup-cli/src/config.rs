//! CLI configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use glowup_commerce::Currency;
use serde::{Deserialize, Serialize};

/// File names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["glowup.toml", ".glowup.toml", "glowup.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlowupConfig {
    /// Client-local storage.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Shop settings.
    #[serde(default)]
    pub shop: ShopConfig,

    /// Toast settings.
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Booking settings.
    #[serde(default)]
    pub booking: BookingConfig,
}

impl GlowupConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Find the nearest config file, starting at `start` and walking up.
    pub fn find(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// The configured shop currency.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.shop.currency)
            .ok_or_else(|| anyhow!("Unsupported currency: {}", self.shop.currency))
    }

    /// Check every setting, returning one message per problem.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.storage.path.as_os_str().is_empty() {
            errors.push("storage.path must not be empty".to_string());
        }
        if let Err(e) = self.currency() {
            errors.push(format!("shop.currency: {e}"));
        }
        if self.notifications.dismiss_after_ms == 0 {
            errors.push("notifications.dismiss_after_ms must be positive".to_string());
        }

        errors
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Where the cart and preferences are stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON storage file, relative to the working directory.
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(".glowup").join("local-storage.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Shop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopConfig {
    /// ISO currency code prices are shown in.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    Currency::default().code().to_string()
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

/// Toast settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// How long a toast stays visible.
    #[serde(default = "default_dismiss_after_ms")]
    pub dismiss_after_ms: u64,
}

fn default_dismiss_after_ms() -> u64 {
    3000
}

impl NotificationConfig {
    pub fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.dismiss_after_ms)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: default_dismiss_after_ms(),
        }
    }
}

/// Booking settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Simulated processing time before a booking is confirmed.
    #[serde(default = "default_processing_delay_ms")]
    pub processing_delay_ms: u64,
}

fn default_processing_delay_ms() -> u64 {
    1500
}

impl BookingConfig {
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: default_processing_delay_ms(),
        }
    }
}

/// Generate a default glowup.toml config file.
pub fn generate_default_config() -> String {
    r#"# Glow Up shop configuration

[storage]
# JSON file standing in for the browser's local storage
path = ".glowup/local-storage.json"

[shop]
currency = "USD"

[notifications]
dismiss_after_ms = 3000

[booking]
processing_delay_ms = 1500
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_matches_defaults() {
        let parsed: GlowupConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(parsed, GlowupConfig::default());
        assert!(parsed.validate().is_empty());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: GlowupConfig = toml::from_str("[shop]\ncurrency = \"gbp\"\n").unwrap();
        assert_eq!(parsed.currency().unwrap(), Currency::GBP);
        assert_eq!(parsed.booking.processing_delay(), Duration::from_millis(1500));
        assert_eq!(parsed.notifications.dismiss_after(), Duration::from_secs(3));
    }

    #[test]
    fn test_validate_reports_problems() {
        let mut config = GlowupConfig::default();
        config.shop.currency = "XYZ".to_string();
        config.notifications.dismiss_after_ms = 0;
        assert_eq!(config.validate().len(), 2);
    }

    #[test]
    fn test_find_walks_up_and_round_trips_json() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let path = dir.path().join("glowup.json");
        let mut config = GlowupConfig::default();
        config.booking.processing_delay_ms = 0;
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        assert_eq!(GlowupConfig::find(&nested), Some(path.clone()));
        assert_eq!(GlowupConfig::load(&path).unwrap(), config);
    }
}
