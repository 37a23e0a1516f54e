//! JWT access tokens (HS256).

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds
    pub expiration_secs: u64,
    pub issuer: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_secs,
            issuer: "postcraft".to_string(),
        }
    }
}

/// Access token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    pub iss: String,
    pub iat: u64,
    pub exp: u64,
    pub jti: String,
}

/// Shared signing/verification keys
#[derive(Clone)]
pub struct JwtKeys {
    inner: Arc<JwtKeysInner>,
}

struct JwtKeysInner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    config: JwtConfig,
}

impl JwtKeys {
    pub fn new(config: JwtConfig) -> Self {
        Self {
            inner: Arc::new(JwtKeysInner {
                encoding: EncodingKey::from_secret(config.secret.as_bytes()),
                decoding: DecodingKey::from_secret(config.secret.as_bytes()),
                config,
            }),
        }
    }

    pub fn expiration_secs(&self) -> u64 {
        self.inner.config.expiration_secs
    }

    /// Issue an access token for a user.
    pub fn issue(&self, user_id: &str, email: &str) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| Error::Internal(format!("system clock error: {e}")))?
            .as_secs();

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iss: self.inner.config.issuer.clone(),
            iat: now,
            exp: now + self.inner.config.expiration_secs,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.inner.encoding)
            .map_err(|e| Error::Internal(format!("token signing failed: {e}")))
    }

    /// Verify a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.inner.config.issuer]);

        decode::<Claims>(token, &self.inner.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| Error::Unauthorized(format!("invalid token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> JwtKeys {
        JwtKeys::new(JwtConfig::new("test-secret", 3600))
    }

    #[test]
    fn test_issue_and_verify() {
        let keys = keys();
        let token = keys.issue("user-1", "a@example.com").unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "a@example.com");
        assert_eq!(claims.iss, "postcraft");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = keys().issue("user-1", "a@example.com").unwrap();
        let other = JwtKeys::new(JwtConfig::new("different-secret", 3600));
        assert!(matches!(
            other.verify(&token),
            Err(Error::Unauthorized(_))
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(keys().verify("not.a.token").is_err());
    }
}
