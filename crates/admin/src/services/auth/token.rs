//! HS256 bearer tokens.
//!
//! Compact JWS (`header.payload.signature`, base64url without padding)
//! signed with HMAC-SHA256. Only `HS256` is accepted on verification.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use iolo_core::{AdminRole, AdminUserId, Email};

use crate::models::CurrentAdmin;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

/// Reasons a token is rejected or cannot be built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("unsupported algorithm")]
    UnsupportedAlgorithm,
    #[error("signature mismatch")]
    BadSignature,
    #[error("token expired")]
    Expired,
    #[error("invalid signing key")]
    InvalidKey,
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// Token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: AdminUserId,
    pub email: Email,
    pub role: AdminRole,
    /// Issued at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl From<Claims> for CurrentAdmin {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// A freshly signed token and when it stops being accepted.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies admin bearer tokens.
#[derive(Clone)]
pub struct TokenSigner {
    key: SecretString,
    ttl: Duration,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("key", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenSigner {
    #[must_use]
    pub const fn new(key: SecretString, ttl: Duration) -> Self {
        Self { key, ttl }
    }

    /// Sign a token for `admin`, valid from `now` for the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::InvalidKey` if the HMAC cannot be keyed.
    pub fn issue(&self, admin: &CurrentAdmin, now: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        let expires_at = now + self.ttl;
        let claims = Claims {
            sub: admin.id,
            email: admin.email.clone(),
            role: admin.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let header = Header {
            alg: ALGORITHM.to_string(),
            typ: "JWT".to_string(),
        };
        let header = encode_json(&header)?;
        let payload = encode_json(&claims)?;
        let signing_input = format!("{header}.{payload}");

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(IssuedToken {
            token: format!("{signing_input}.{signature}"),
            expires_at,
        })
    }

    /// Check the signature and expiry of `token` and return its claims.
    ///
    /// # Errors
    ///
    /// Returns the first failed check as a `TokenError`.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut parts = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::Malformed);
        };

        let parsed: Header = decode_json(header)?;
        if parsed.alg != ALGORITHM {
            return Err(TokenError::UnsupportedAlgorithm);
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| TokenError::Malformed)?;
        let mut mac = self.mac()?;
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(payload.as_bytes());
        // verify_slice compares in constant time
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let claims: Claims = decode_json(payload)?;
        if claims.exp <= now.timestamp() {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(self.key.expose_secret().as_bytes())
            .map_err(|_| TokenError::InvalidKey)
    }
}

fn encode_json<T: Serialize>(value: &T) -> Result<String, TokenError> {
    let json = serde_json::to_vec(value).map_err(|_| TokenError::Malformed)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

fn decode_json<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(
            SecretString::from("Qm9!rT7#vL2@xZ5$kP8&wN3*hJ6^cF1%"),
            Duration::days(7),
        )
    }

    fn admin(role: AdminRole) -> CurrentAdmin {
        CurrentAdmin {
            id: AdminUserId::generate(),
            email: Email::parse("admin@iolopizza.com").unwrap(),
            role,
        }
    }

    #[test]
    fn test_issue_then_verify() {
        let now = Utc::now();
        let admin = admin(AdminRole::Viewer);
        let issued = signer().issue(&admin, now).unwrap();

        assert_eq!(issued.expires_at, now + Duration::days(7));
        assert_eq!(issued.token.split('.').count(), 3);

        let claims = signer().verify(&issued.token, now).unwrap();
        assert_eq!(CurrentAdmin::from(claims), admin);
    }

    #[test]
    fn test_expired_token_rejected() {
        let now = Utc::now();
        let issued = signer().issue(&admin(AdminRole::Admin), now).unwrap();
        let later = now + Duration::days(7) + Duration::seconds(1);
        assert_eq!(
            signer().verify(&issued.token, later),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_other_key_rejected() {
        let now = Utc::now();
        let issued = signer().issue(&admin(AdminRole::Admin), now).unwrap();
        let other = TokenSigner::new(
            SecretString::from("Zx4!pQ8#mW1@tY6$bN3&kR9*gH2^dS7%"),
            Duration::days(7),
        );
        assert_eq!(
            other.verify(&issued.token, now),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let now = Utc::now();
        let issued = signer().issue(&admin(AdminRole::Viewer), now).unwrap();
        let mut parts: Vec<&str> = issued.token.split('.').collect();

        let forged = admin(AdminRole::Admin);
        let forged_claims = Claims {
            sub: forged.id,
            email: forged.email,
            role: AdminRole::Admin,
            iat: now.timestamp(),
            exp: (now + Duration::days(30)).timestamp(),
        };
        let forged_payload = encode_json(&forged_claims).unwrap();
        parts[1] = &forged_payload;

        assert_eq!(
            signer().verify(&parts.join("."), now),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_alg_none_rejected() {
        let now = Utc::now();
        let issued = signer().issue(&admin(AdminRole::Admin), now).unwrap();
        let payload = issued.token.split('.').nth(1).unwrap();
        let header = encode_json(&Header {
            alg: "none".to_string(),
            typ: "JWT".to_string(),
        })
        .unwrap();

        assert_eq!(
            signer().verify(&format!("{header}.{payload}."), now),
            Err(TokenError::UnsupportedAlgorithm)
        );
    }

    #[test]
    fn test_garbage_rejected() {
        let now = Utc::now();
        assert_eq!(signer().verify("", now), Err(TokenError::Malformed));
        assert_eq!(signer().verify("a.b", now), Err(TokenError::Malformed));
        assert_eq!(signer().verify("a.b.c.d", now), Err(TokenError::Malformed));
        assert_eq!(
            signer().verify("!!.??.##", now),
            Err(TokenError::Malformed)
        );
    }
}
