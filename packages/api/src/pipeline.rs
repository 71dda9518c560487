//! # Request pipeline — credential attachment and failure classification
//!
//! [`Pipeline`] is the single path every HTTP call takes. It wraps a
//! [`reqwest::Client`] with two hooks that run around each exchange:
//!
//! ## Before send — `authorize`
//!
//! | Stored token | Outcome |
//! |--------------|---------|
//! | absent | request goes out unauthenticated |
//! | present, live | `Authorization: Bearer <token>` is attached |
//! | present, expired or malformed | store cleared, session sink notified, call aborted with [`ApiError::SessionExpired`] — the request is **never** sent carrying a stale credential |
//!
//! ## After receive — `reject`
//!
//! Success passes through untouched. A transport failure (no response at
//! all) is reported through the sink and rejected as
//! [`ApiError::ServerUnreachable`]. A 401 is treated exactly like a locally
//! detected expiry: clear, notify, reject. A 5xx whose error body mentions a
//! role problem is reported as [`ApiError::RoleResolution`] *without*
//! touching the credential (server-state problem, not a credential
//! problem). Every other error status is handed back verbatim as
//! [`ApiError::Operation`] for caller-local messaging.
//!
//! ## Hook installation
//!
//! The hooks are plain methods invoked exactly once from `execute`.
//! There is no registration API, so the
//! duplicate-interceptor failure mode (every call processed N times, N
//! redirects, N toasts) cannot be expressed. Side effects go through the
//! injected [`SessionEvents`] sink; the hooks call only the credential
//! store and the sink, never the pipeline itself, so no recursive
//! interceptor pass can occur.
//!
//! The trust state of the credential as observed here is
//! `ABSENT -> LIVE -> ABSENT`: a fresh login is the only way back to `LIVE`.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use session::CredentialStore;

use crate::error::ApiError;

/// Sink for the session-level conditions the pipeline detects.
///
/// The UI supplies the implementation (user-facing notice plus a redirect to
/// the login entry point for expiry); the pipeline itself stays free of
/// navigation and rendering concerns.
pub trait SessionEvents {
    /// The credential expired locally, or the server answered 401.
    fn session_expired(&self);
    /// A call produced no response at all.
    fn server_unreachable(&self);
    /// The server could not resolve the account's role.
    fn role_unresolved(&self);
}

/// The one path every outbound call takes.
#[derive(Clone)]
pub struct Pipeline {
    http: reqwest::Client,
    base_url: String,
    credentials: CredentialStore,
    events: Arc<dyn SessionEvents>,
}

impl Pipeline {
    /// Construct the pipeline. Hooks are fixed here, once, for the lifetime
    /// of the instance.
    pub fn new(
        base_url: impl Into<String>,
        credentials: CredentialStore,
        events: Arc<dyn SessionEvents>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            credentials,
            events,
        }
    }

    /// The credential store this pipeline guards.
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute::<()>(Method::GET, path, None).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.execute(Method::POST, path, Some(body)).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.execute(Method::PUT, path, Some(body)).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute::<()>(Method::DELETE, path, None).await?;
        Ok(())
    }

    /// Run one exchange through both hooks.
    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut request = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.authorize()? {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!("no response from {path}: {err}");
                self.events.server_unreachable();
                return Err(ApiError::ServerUnreachable(err));
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = error_message(response).await;
        Err(self.reject(status, message))
    }

    /// Before-send hook: decide what credential, if any, the call carries.
    /// Exactly one liveness check happens per outbound call.
    fn authorize(&self) -> Result<Option<String>, ApiError> {
        let Some(token) = self.credentials.token() else {
            return Ok(None);
        };
        if session::is_live(&token) {
            return Ok(Some(token));
        }
        tracing::warn!("stored token is no longer live, dropping the session");
        self.credentials.clear();
        self.events.session_expired();
        Err(ApiError::SessionExpired)
    }

    /// After-receive hook: classify a non-success status.
    fn reject(&self, status: StatusCode, message: String) -> ApiError {
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("server answered 401, dropping the session");
            self.credentials.clear();
            self.events.session_expired();
            return ApiError::SessionExpired;
        }
        if status.is_server_error() && mentions_role(&message) {
            tracing::error!("server reported a role problem: {message}");
            self.events.role_unresolved();
            return ApiError::RoleResolution(message);
        }
        ApiError::Operation {
            status: status.as_u16(),
            message,
        }
    }
}

/// Extract a human-readable message from an error response body. The server
/// answers with `{"error": "..."}` on most failures; fall back to the raw
/// text when it does not.
async fn error_message(response: reqwest::Response) -> String {
    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.error.or(body.message).unwrap_or(text),
        Err(_) => text,
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn mentions_role(message: &str) -> bool {
    message.to_lowercase().contains("role")
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use session::{CredentialStore, RolePolicy};
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingEvents {
        expired: Cell<usize>,
        unreachable: Cell<usize>,
        role: Cell<usize>,
    }

    impl SessionEvents for CountingEvents {
        fn session_expired(&self) {
            self.expired.set(self.expired.get() + 1);
        }
        fn server_unreachable(&self) {
            self.unreachable.set(self.unreachable.get() + 1);
        }
        fn role_unresolved(&self) {
            self.role.set(self.role.get() + 1);
        }
    }

    fn make_token(exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(format!(r#"{{"role":"USER","exp":{exp}}}"#).as_bytes());
        format!("{header}.{body}.sig")
    }

    fn pipeline() -> (Pipeline, Arc<CountingEvents>) {
        let events = Arc::new(CountingEvents::default());
        let store = CredentialStore::in_memory(RolePolicy::FromClaims);
        let pipeline = Pipeline::new("http://localhost:8080/", store, events.clone());
        (pipeline, events)
    }

    #[test]
    fn live_token_is_attached() {
        let (pipeline, events) = pipeline();
        let token = make_token(session::unix_now() + 3600);
        pipeline.credentials().set(&token);

        assert_eq!(pipeline.authorize().unwrap(), Some(token));
        assert_eq!(events.expired.get(), 0);
    }

    #[test]
    fn absent_token_sends_unauthenticated() {
        let (pipeline, events) = pipeline();
        assert_eq!(pipeline.authorize().unwrap(), None);
        assert_eq!(events.expired.get(), 0);
    }

    #[test]
    fn expired_token_aborts_and_clears_the_store() {
        let (pipeline, events) = pipeline();
        pipeline.credentials().set(&make_token(session::unix_now() - 1));

        assert!(matches!(
            pipeline.authorize(),
            Err(ApiError::SessionExpired)
        ));
        assert_eq!(pipeline.credentials().token(), None);
        assert_eq!(events.expired.get(), 1);
    }

    #[test]
    fn malformed_token_is_treated_like_an_expired_one() {
        let (pipeline, events) = pipeline();
        pipeline.credentials().set("three.random.words");

        assert!(matches!(
            pipeline.authorize(),
            Err(ApiError::SessionExpired)
        ));
        assert_eq!(pipeline.credentials().token(), None);
        assert_eq!(events.expired.get(), 1);
    }

    #[test]
    fn unauthorized_response_clears_the_store() {
        let (pipeline, events) = pipeline();
        pipeline.credentials().set(&make_token(session::unix_now() + 3600));

        let err = pipeline.reject(StatusCode::UNAUTHORIZED, "token rejected".to_string());
        assert!(matches!(err, ApiError::SessionExpired));
        assert_eq!(pipeline.credentials().token(), None);
        assert_eq!(events.expired.get(), 1);

        // a second in-flight call receiving 401 finds the store already
        // empty; clearing is idempotent
        let err = pipeline.reject(StatusCode::UNAUTHORIZED, "token rejected".to_string());
        assert!(matches!(err, ApiError::SessionExpired));
        assert_eq!(pipeline.credentials().token(), None);
        assert_eq!(events.expired.get(), 2);
    }

    #[test]
    fn role_failure_keeps_the_credential() {
        let (pipeline, events) = pipeline();
        let token = make_token(session::unix_now() + 3600);
        pipeline.credentials().set(&token);

        let err = pipeline.reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Role not found for user".to_string(),
        );
        assert!(matches!(err, ApiError::RoleResolution(_)));
        assert_eq!(pipeline.credentials().token(), Some(token));
        assert_eq!(events.role.get(), 1);
        assert_eq!(events.expired.get(), 0);
    }

    #[test]
    fn plain_server_error_passes_through() {
        let (pipeline, events) = pipeline();
        let err = pipeline.reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            "database timeout".to_string(),
        );
        assert!(matches!(
            err,
            ApiError::Operation { status: 500, .. }
        ));
        assert_eq!(events.role.get(), 0);
    }

    #[test]
    fn client_errors_are_left_to_the_caller() {
        let (pipeline, events) = pipeline();
        let err = pipeline.reject(StatusCode::BAD_REQUEST, "end date before start".to_string());
        match err {
            ApiError::Operation { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "end date before start");
            }
            other => panic!("unexpected classification: {other:?}"),
        }
        assert_eq!(events.expired.get(), 0);
        assert_eq!(events.role.get(), 0);
        assert_eq!(events.unreachable.get(), 0);
    }

    #[test]
    fn role_detection_is_case_insensitive() {
        assert!(mentions_role("ROLE not found"));
        assert!(mentions_role("missing role claim"));
        assert!(!mentions_role("database timeout"));
    }
}
