use std::time::Duration;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};

use crate::auth::repo_types::User;
use crate::config::JwtConfig;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,   // user ID
    pub iat: usize, // issued at (unix timestamp)
    pub exp: usize, // expires at (unix timestamp)
}

#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            ttl_minutes,
        } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::from_secs((ttl_minutes as u64) * 60),
        }
    }
}

impl JwtKeys {
    pub fn sign(&self, user_id: i64) -> anyhow::Result<String> {
        self.sign_at(user_id, OffsetDateTime::now_utc())
    }

    pub fn sign_at(&self, user_id: i64, issued_at: OffsetDateTime) -> anyhow::Result<String> {
        let exp = issued_at + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: user_id,
            iat: issued_at.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        debug!(user_id, "jwt signed");
        Ok(token)
    }

    /// Accepts HS256 only; tokens declaring any other algorithm are invalid.
    /// Expiry is exact, with no clock-skew leeway.
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = data.claims.sub, "jwt verified");
        Ok(data.claims)
    }
}

/// Resolves the request's bearer token to the authenticated user record.
/// Every rejection path collapses into the same `Unauthenticated` outcome.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthenticated)?;

        let token = strip_bearer(auth_header).ok_or(ApiError::Unauthenticated)?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "token verification failed");
            ApiError::Unauthenticated
        })?;

        let user = User::find_by_id(&state.db, claims.sub)
            .await?
            .ok_or_else(|| {
                warn!(user_id = claims.sub, "token subject no longer exists");
                ApiError::Unauthenticated
            })?;

        Ok(CurrentUser(user))
    }
}

fn strip_bearer(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn make_keys() -> JwtKeys {
        let state = AppState::fake();
        JwtKeys::from_ref(&state)
    }

    #[tokio::test]
    async fn sign_and_verify_roundtrip() {
        let keys = make_keys();
        let token = keys.sign(42).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.exp, claims.iat + 5 * 60);
    }

    #[tokio::test]
    async fn verify_rejects_expired_token() {
        let keys = make_keys();
        let issued = OffsetDateTime::now_utc() - TimeDuration::minutes(6);
        let token = keys.sign_at(7, issued).expect("sign");
        assert!(keys.verify(&token).is_err());
    }

    #[tokio::test]
    async fn verify_rejects_wrong_key() {
        let keys = make_keys();
        let other = JwtKeys {
            encoding: EncodingKey::from_secret(b"other-secret"),
            decoding: DecodingKey::from_secret(b"other-secret"),
            ttl: Duration::from_secs(300),
        };
        let token = other.sign(1).expect("sign");
        assert!(keys.verify(&token).is_err());
    }

    #[tokio::test]
    async fn verify_rejects_tampered_payload() {
        let keys = make_keys();
        let token = keys.sign(1).expect("sign");
        let mut parts: Vec<String> = token.split('.').map(|s| s.to_string()).collect();
        assert_eq!(parts.len(), 3);
        let mut payload: Vec<u8> = parts[1].clone().into_bytes();
        payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
        parts[1] = String::from_utf8(payload).unwrap();
        let tampered = parts.join(".");
        assert!(keys.verify(&tampered).is_err());
    }

    #[tokio::test]
    async fn verify_rejects_foreign_algorithm() {
        let keys = make_keys();
        let claims = Claims {
            sub: 1,
            iat: OffsetDateTime::now_utc().unix_timestamp() as usize,
            exp: (OffsetDateTime::now_utc() + TimeDuration::minutes(5)).unix_timestamp() as usize,
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("encode hs384");
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn strip_bearer_accepts_both_cases() {
        assert_eq!(strip_bearer("Bearer abc"), Some("abc"));
        assert_eq!(strip_bearer("bearer abc"), Some("abc"));
        assert_eq!(strip_bearer("Basic abc"), None);
        assert_eq!(strip_bearer("abc"), None);
    }

    async fn resolve(state: &AppState, header: Option<&str>) -> Result<CurrentUser, ApiError> {
        let mut builder = Request::builder().uri("/");
        if let Some(h) = header {
            builder = builder.header(axum::http::header::AUTHORIZATION, h);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        CurrentUser::from_request_parts(&mut parts, state).await
    }

    #[tokio::test]
    async fn resolver_rejects_missing_header() {
        let state = AppState::fake();
        let err = resolve(&state, None).await.err().expect("rejected");
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn resolver_rejects_wrong_scheme() {
        let state = AppState::fake();
        let err = resolve(&state, Some("Basic abc")).await.err().expect("rejected");
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn resolver_rejects_garbage_token() {
        let state = AppState::fake();
        let err = resolve(&state, Some("Bearer not.a.jwt"))
            .await
            .err()
            .expect("rejected");
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn resolver_rejects_expired_token() {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let issued = OffsetDateTime::now_utc() - TimeDuration::minutes(6);
        let token = keys.sign_at(3, issued).expect("sign");
        let header = format!("Bearer {}", token);
        let err = resolve(&state, Some(&header)).await.err().expect("rejected");
        // Indistinguishable from the missing-header and garbage-token cases
        assert!(matches!(err, ApiError::Unauthenticated));
    }
}
