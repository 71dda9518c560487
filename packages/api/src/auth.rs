//! Login, signup, and logout against the authentication endpoints.

use serde::{Deserialize, Serialize};
use session::Role;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::pipeline::Pipeline;

#[derive(Debug, Serialize)]
struct CredentialsBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// What happened after a successful registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignupOutcome {
    /// The issued token was stored; the user can go straight to the
    /// protected views.
    Admitted,
    /// The token was discarded; the user signs in through the login form.
    LoginRequired,
}

/// Client for the authentication endpoints. All calls go through the
/// request pipeline like everything else.
#[derive(Clone)]
pub struct AuthClient {
    pipeline: Pipeline,
    signup_auto_login: bool,
}

impl AuthClient {
    pub fn new(pipeline: Pipeline, config: &ClientConfig) -> Self {
        Self {
            pipeline,
            signup_auto_login: config.signup_auto_login,
        }
    }

    /// Exchange credentials for a bearer token and store it. Returns the
    /// role decoded from the fresh token, when the policy exposes one.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<Role>, ApiError> {
        let issued: TokenResponse = self
            .pipeline
            .post_json("/api/auth/login", &CredentialsBody { username, password })
            .await?;
        let credentials = self.pipeline.credentials();
        credentials.set(&issued.token);
        Ok(credentials.role())
    }

    /// Register a new account. Whether the issued token is kept is decided
    /// by the `signup_auto_login` configuration flag.
    pub async fn signup(&self, username: &str, password: &str) -> Result<SignupOutcome, ApiError> {
        let issued: TokenResponse = self
            .pipeline
            .post_json("/api/auth/register", &CredentialsBody { username, password })
            .await?;
        if self.signup_auto_login {
            self.pipeline.credentials().set(&issued.token);
            Ok(SignupOutcome::Admitted)
        } else {
            Ok(SignupOutcome::LoginRequired)
        }
    }

    /// Drop the stored session. Local only; bearer tokens are not revocable
    /// server-side.
    pub fn logout(&self) {
        self.pipeline.credentials().clear();
    }
}
