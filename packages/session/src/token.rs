//! # Bearer token claims — decoding and liveness
//!
//! The authentication service issues JWT-shaped bearer tokens. The client
//! never verifies signatures (authorization is enforced server-side on every
//! call); it only decodes the payload segment to read the claims it needs
//! for UI gating:
//!
//! | Claim | Type | Meaning |
//! |-------|------|---------|
//! | `exp` | unix seconds | expiry instant; **required** — a token without it is malformed |
//! | `role` | string | `"USER"` or `"ADMIN"`; optional, unknown values read as absent |
//! | `sub` | string | subject/username; optional, informational only |
//!
//! Liveness is strict: a token whose `exp` equals the current clock reading
//! is already expired. The clock is read at call time, never cached.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Role claim embedded in the token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Parse the wire form of the role claim (`"USER"` / `"ADMIN"`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    /// The wire form, as the server spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

/// Claims decoded from a token payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default, deserialize_with = "role_claim")]
    pub role: Option<Role>,
    /// Expiry, unix seconds.
    pub exp: i64,
}

/// Unknown role strings read as absent rather than failing the whole token.
fn role_claim<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Role::parse))
}

impl Claims {
    /// Strict liveness: live iff `now < exp`. The boundary `now == exp`
    /// counts as expired.
    pub fn is_live_at(&self, now: i64) -> bool {
        now < self.exp
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Wrong segment count, bad encoding, or missing required claims.
    /// Callers treat this identically to an expired token.
    #[error("malformed bearer token")]
    Malformed,
}

/// Decode the claims of a JWT-shaped token without verifying its signature.
pub fn decode(token: &str) -> Result<Claims, TokenError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::Malformed);
    };

    let raw = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&raw).map_err(|_| TokenError::Malformed)
}

/// Whether a token is well-formed and unexpired, judged against a clock
/// reading taken now.
pub fn is_live(token: &str) -> bool {
    match decode(token) {
        Ok(claims) => claims.is_live_at(unix_now()),
        Err(_) => false,
    }
}

/// Current unix time in seconds.
#[cfg(target_arch = "wasm32")]
pub fn unix_now() -> i64 {
    (js_sys::Date::now() / 1000.0) as i64
}

/// Current unix time in seconds.
#[cfg(not(target_arch = "wasm32"))]
pub fn unix_now() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build an unsigned JWT-shaped token from a raw JSON payload.
    fn make_token(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.as_bytes());
        format!("{header}.{body}.sig")
    }

    #[test]
    fn decodes_role_and_expiry() {
        let token = make_token(r#"{"sub":"amara","role":"ADMIN","exp":4102444800}"#);
        let claims = decode(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("amara"));
        assert_eq!(claims.role, Some(Role::Admin));
        assert_eq!(claims.exp, 4102444800);
    }

    #[test]
    fn liveness_is_strict_at_the_boundary() {
        let claims = decode(&make_token(r#"{"exp":1000}"#)).unwrap();
        assert!(claims.is_live_at(999));
        assert!(!claims.is_live_at(1000), "exp == now must read as expired");
        assert!(!claims.is_live_at(1001));
    }

    #[test]
    fn expired_token_is_not_live() {
        let past = unix_now() - 1;
        let token = make_token(&format!(r#"{{"role":"USER","exp":{past}}}"#));
        assert!(!is_live(&token));
    }

    #[test]
    fn future_token_is_live() {
        let future = unix_now() + 3600;
        let token = make_token(&format!(r#"{{"role":"USER","exp":{future}}}"#));
        assert!(is_live(&token));
    }

    #[test]
    fn malformed_tokens_fail_decode_and_are_not_live() {
        let cases = [
            "",
            "not-a-token",
            "one.two",
            "a.b.c.d",
            "!!!.###.$$$",
            // valid base64url but not JSON
            &make_token("plain text"),
        ];
        for token in cases {
            assert!(matches!(decode(token), Err(TokenError::Malformed)), "{token:?}");
            assert!(!is_live(token), "{token:?}");
        }
    }

    #[test]
    fn missing_expiry_claim_is_malformed() {
        let token = make_token(r#"{"role":"USER"}"#);
        assert!(matches!(decode(&token), Err(TokenError::Malformed)));
        assert!(!is_live(&token));
    }

    #[test]
    fn unknown_role_reads_as_absent() {
        let token = make_token(r#"{"role":"AUDITOR","exp":4102444800}"#);
        let claims = decode(&token).unwrap();
        assert_eq!(claims.role, None);
    }

    #[test]
    fn role_parse_round_trips_wire_form() {
        assert_eq!(Role::parse("USER"), Some(Role::User));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::Admin.as_str(), "ADMIN");
    }
}
