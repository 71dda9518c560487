//! Platform-appropriate credential store constructor.
//!
//! Returns a [`session::CredentialStore`] backed by the right
//! [`session::KeyValueStore`]:
//! - **Web** (WASM + `web` feature): browser localStorage via
//!   [`session::LocalStore`]
//! - **Native** (tests, desktop shells): filesystem via
//!   [`session::FileStore`] under the platform data directory

use std::sync::Arc;

use session::{CredentialStore, RolePolicy};

/// Create the one credential store this client runs on.
pub fn make_credential_store(policy: RolePolicy) -> CredentialStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        CredentialStore::new(Arc::new(session::LocalStore::new()), policy)
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("leavedesk");
        CredentialStore::new(Arc::new(session::FileStore::new(base)), policy)
    }
}
