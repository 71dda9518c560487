//! # localStorage-backed store — browser-side persistence
//!
//! [`LocalStore`] is the [`KeyValueStore`] implementation used on the web
//! platform. It persists the session keys into the browser's localStorage,
//! which survives page reloads — the durability the session layer needs.
//!
//! The struct is zero-size and looks the window up on every operation; the
//! browser hands back the same storage object each time, so there is nothing
//! worth caching.
//!
//! All methods silently swallow errors (returning `None` for reads, doing
//! nothing for writes). A browser with storage disabled degrades to "no
//! stored session" — the user simply has to sign in again — rather than
//! crashing the client.

use crate::store::KeyValueStore;

/// localStorage-backed KeyValueStore for the web platform.
#[derive(Clone, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
