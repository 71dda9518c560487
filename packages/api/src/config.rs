//! # Client configuration
//!
//! [`ClientConfig`] collects the knobs the frontend wires in at startup:
//!
//! | Field | Default | Purpose |
//! |-------|---------|---------|
//! | `base_url` | `http://localhost:8080` | Origin of the leave-request API. |
//! | `signup_auto_login` | `true` | Whether a successful registration stores the issued token and admits the user directly, or discards it and requires a separate login. |
//! | `role_policy` | `FromClaims` | Whether the role claim embedded in the token is decoded for UI gating, or ignored entirely. |
//!
//! Both `signup_auto_login` and `role_policy` exist because either behavior
//! is defensible; the choice is explicit configuration, not a guess buried
//! in a code path. All fields have serde defaults so a partial config
//! deserializes to something usable.

use serde::{Deserialize, Serialize};
use session::RolePolicy;

/// Top-level client configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_signup_auto_login")]
    pub signup_auto_login: bool,
    #[serde(default)]
    pub role_policy: RolePolicy,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_signup_auto_login() -> bool {
    true
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            signup_auto_login: default_signup_auto_login(),
            role_policy: RolePolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at the given API origin.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Builder method to set the signup admission behavior.
    pub fn with_signup_auto_login(mut self, auto: bool) -> Self {
        self.signup_auto_login = auto;
        self
    }

    /// Builder method to set the role derivation policy.
    pub fn with_role_policy(mut self, policy: RolePolicy) -> Self {
        self.role_policy = policy;
        self
    }
}
