//! Type-safe client-local key-value storage for the Glow Up shop.
//!
//! Models the browser's local storage: a string-keyed store of serialized
//! text values where a read returns `None` for an unset key and a write
//! replaces the value wholesale. [`Cache`] layers automatic JSON
//! serialization on top of any [`KeyValueStore`].
//!
//! # Example
//!
//! ```rust
//! use glowup_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//!
//! cache.set("darkMode", &true).unwrap();
//! let dark: Option<bool> = cache.get("darkMode").unwrap();
//! assert_eq!(dark, Some(true));
//!
//! cache.delete("darkMode").unwrap();
//! assert_eq!(cache.get::<bool>("darkMode").unwrap(), None);
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
