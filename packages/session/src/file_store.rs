//! # Filesystem-backed store
//!
//! [`FileStore`] persists session keys to the local filesystem, one file per
//! key under a base directory. It is the durable surface on native builds
//! (useful when driving the client from a desktop shell or from tests that
//! want reload-survival semantics).
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── leavedesk-token        # the bearer token
//! └── leavedesk-role         # the cached role claim
//! ```
//!
//! Errors are swallowed the same way the browser store swallows them: an
//! unreadable directory means "no stored session".

use std::path::PathBuf;

use crate::store::KeyValueStore;

/// Filesystem-backed KeyValueStore for native builds.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let content = std::fs::read_to_string(self.key_path(key)).ok()?;
        let trimmed = content.trim_end_matches('\n');
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    fn set(&self, key: &str, value: &str) {
        let _ = std::fs::create_dir_all(&self.base);
        let _ = std::fs::write(self.key_path(key), value);
    }

    fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.key_path(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> FileStore {
        let base = std::env::temp_dir().join(format!("leavedesk-test-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&base);
        FileStore::new(base)
    }

    #[test]
    fn round_trips_through_the_filesystem() {
        let store = temp_store("roundtrip");
        assert_eq!(store.get("leavedesk-token"), None);

        store.set("leavedesk-token", "abc.def.ghi");
        assert_eq!(store.get("leavedesk-token"), Some("abc.def.ghi".to_string()));

        store.remove("leavedesk-token");
        assert_eq!(store.get("leavedesk-token"), None);
    }

    #[test]
    fn removing_a_missing_key_is_fine() {
        let store = temp_store("remove-missing");
        store.remove("leavedesk-role");
    }
}
