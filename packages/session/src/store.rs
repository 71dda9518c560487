//! # Credential store — the one piece of shared mutable session state
//!
//! [`CredentialStore`] holds the current bearer token and the role claim
//! derived from it, persisted through the [`KeyValueStore`] port so a page
//! reload finds the session again. Exactly one store exists per running
//! client; everything that needs it (the request pipeline, the session
//! guard, the views) receives a cloned handle rather than reaching into a
//! global.
//!
//! Two storage keys are used — one for the token, one for the cached role —
//! and they are always cleared together. The cached role is only ever read
//! while the token it was derived from is still held: [`CredentialStore::role`]
//! returns `None` the moment the token is gone, whatever the role key says.
//!
//! The store performs no network calls and no side effects beyond storage.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::token::{self, Role};

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "leavedesk-token";
/// Storage key for the cached role claim.
pub const ROLE_KEY: &str = "leavedesk-role";

/// Durable key-value surface backing the credential store.
///
/// Synchronous by design: the browser's localStorage is a synchronous API,
/// and the native file backend is small enough not to warrant async I/O.
/// Implementations swallow their own errors, degrading to "no stored
/// session" rather than failing the client.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// How the client derives a role from a freshly issued token.
///
/// The role claim is authoritative for UI gating only — the server enforces
/// authorization on every call regardless of this setting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RolePolicy {
    /// Decode the token's role claim and cache it alongside the token.
    #[default]
    FromClaims,
    /// Never decode a role; [`CredentialStore::role`] is always absent and
    /// no role-specific UI is shown.
    Ignore,
}

/// Clonable handle on the process-wide credential state.
#[derive(Clone)]
pub struct CredentialStore {
    backend: Arc<dyn KeyValueStore>,
    policy: RolePolicy,
}

impl CredentialStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, policy: RolePolicy) -> Self {
        Self { backend, policy }
    }

    /// A store backed by [`crate::MemoryStore`], for tests and fallback.
    pub fn in_memory(policy: RolePolicy) -> Self {
        Self::new(Arc::new(crate::MemoryStore::new()), policy)
    }

    /// Persist a freshly issued token and re-derive the cached role from it.
    ///
    /// If the claims cannot be decoded the token is still held (the server
    /// accepted it, the guard should admit), but the cached role is removed
    /// so callers see "role unknown" and show no role-specific UI.
    pub fn set(&self, bearer: &str) {
        self.backend.set(TOKEN_KEY, bearer);
        let role = match self.policy {
            RolePolicy::FromClaims => token::decode(bearer).ok().and_then(|c| c.role),
            RolePolicy::Ignore => None,
        };
        match role {
            Some(role) => self.backend.set(ROLE_KEY, role.as_str()),
            None => self.backend.remove(ROLE_KEY),
        }
    }

    /// The currently held bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.backend.get(TOKEN_KEY)
    }

    /// The role derived from the currently held token.
    ///
    /// Absent when no token is held, when the policy is [`RolePolicy::Ignore`],
    /// or when the token's claims were undecodable.
    pub fn role(&self) -> Option<Role> {
        self.token()?;
        self.backend.get(ROLE_KEY).as_deref().and_then(Role::parse)
    }

    /// Drop the token and the cached role together. Idempotent.
    pub fn clear(&self) {
        self.backend.remove(TOKEN_KEY);
        self.backend.remove(ROLE_KEY);
    }

    /// Route-level admission: a presence check only. Liveness is deliberately
    /// not re-validated here — the request pipeline does that on the next
    /// actual call.
    pub fn is_admitted(&self) -> bool {
        self.token().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    fn make_token(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.as_bytes());
        format!("{header}.{body}.sig")
    }

    fn admin_token() -> String {
        make_token(r#"{"sub":"amara","role":"ADMIN","exp":4102444800}"#)
    }

    #[test]
    fn set_then_get_round_trips() {
        let store = CredentialStore::in_memory(RolePolicy::FromClaims);
        assert_eq!(store.token(), None);

        let token = admin_token();
        store.set(&token);
        assert_eq!(store.token(), Some(token));
        assert_eq!(store.role(), Some(Role::Admin));
        assert!(store.is_admitted());
    }

    #[test]
    fn clear_removes_both_and_is_idempotent() {
        let store = CredentialStore::in_memory(RolePolicy::FromClaims);
        store.set(&admin_token());

        store.clear();
        assert_eq!(store.token(), None);
        assert_eq!(store.role(), None);
        assert!(!store.is_admitted());

        // clearing an already-empty store is fine
        store.clear();
        assert_eq!(store.token(), None);
    }

    #[test]
    fn undecodable_claims_keep_token_but_drop_role() {
        let store = CredentialStore::in_memory(RolePolicy::FromClaims);
        store.set(&admin_token());
        assert_eq!(store.role(), Some(Role::Admin));

        // the new token replaces the old one; its role must not linger
        store.set("opaque-blob");
        assert!(store.token().is_some());
        assert_eq!(store.role(), None);
        assert!(store.is_admitted());
    }

    #[test]
    fn ignore_policy_never_exposes_a_role() {
        let store = CredentialStore::in_memory(RolePolicy::Ignore);
        store.set(&admin_token());
        assert!(store.token().is_some());
        assert_eq!(store.role(), None);
    }

    #[test]
    fn role_is_never_read_without_a_token() {
        let backend = Arc::new(crate::MemoryStore::new());
        let store = CredentialStore::new(backend.clone(), RolePolicy::FromClaims);
        store.set(&admin_token());

        // simulate a stale role key surviving a token removal
        backend.remove(TOKEN_KEY);
        assert_eq!(backend.get(ROLE_KEY).as_deref(), Some("ADMIN"));
        assert_eq!(store.role(), None);
    }

    #[test]
    fn token_without_role_claim_reads_as_role_unknown() {
        let store = CredentialStore::in_memory(RolePolicy::FromClaims);
        store.set(&make_token(r#"{"sub":"amara","exp":4102444800}"#));
        assert!(store.token().is_some());
        assert_eq!(store.role(), None);
    }
}
