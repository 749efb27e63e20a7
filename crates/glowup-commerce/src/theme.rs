//! Dark-mode preference.
//!
//! A single boolean persisted with the same write-through rule as the cart.

use glowup_cache::{Cache, KeyValueStore};
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;

/// Storage key holding the dark-mode flag.
pub const THEME_KEY: &str = "darkMode";

/// Colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Persisted theme preference.
#[derive(Debug)]
pub struct ThemeStore<S> {
    cache: Cache<S>,
    theme: Theme,
}

impl<S: KeyValueStore> ThemeStore<S> {
    /// Load the preference. Anything but a stored `true` means light.
    pub fn load(store: S) -> Self {
        let cache = Cache::new(store);
        let dark = match cache.get::<bool>(THEME_KEY) {
            Ok(dark) => dark.unwrap_or(false),
            Err(e) => {
                tracing::warn!("Ignoring stored theme preference: {e}");
                false
            }
        };
        Self {
            cache,
            theme: Theme::from_dark(dark),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    /// Flip the preference and persist it, returning the new theme.
    pub fn toggle(&mut self) -> Result<Theme, CommerceError> {
        self.set(Theme::from_dark(!self.is_dark()))
    }

    /// Set the preference and persist it.
    ///
    /// The in-memory theme changes even if the write fails; the error is
    /// returned so the host can tell the user.
    pub fn set(&mut self, theme: Theme) -> Result<Theme, CommerceError> {
        self.theme = theme;
        tracing::debug!(theme = theme.as_str(), "theme changed");
        self.cache.set(THEME_KEY, &theme.is_dark()).map_err(|e| {
            tracing::warn!(key = THEME_KEY, "Failed to persist theme: {e}");
            CommerceError::from(e)
        })?;
        Ok(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowup_cache::MemoryStore;

    #[test]
    fn test_defaults_to_light() {
        let store = MemoryStore::new();
        assert_eq!(ThemeStore::load(&store).theme(), Theme::Light);

        let store = MemoryStore::with_entries([(THEME_KEY, "maybe")]);
        assert!(!ThemeStore::load(&store).is_dark());
    }

    #[test]
    fn test_toggle_writes_through() {
        let store = MemoryStore::new();
        let mut theme = ThemeStore::load(&store);

        assert_eq!(theme.toggle().unwrap(), Theme::Dark);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("true"));

        assert_eq!(theme.toggle().unwrap(), Theme::Light);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn test_reads_site_value() {
        let store = MemoryStore::with_entries([(THEME_KEY, "true")]);
        assert!(ThemeStore::load(&store).is_dark());
    }

    #[test]
    fn test_write_failure_surfaces() {
        let store = MemoryStore::new();
        let mut theme = ThemeStore::load(&store);
        store.fail_writes(true);

        assert!(matches!(theme.toggle(), Err(CommerceError::StorageError(_))));
        assert!(theme.is_dark());
    }
}
