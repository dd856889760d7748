//! Signed-credential issuing and verification.
//!
//! A credential is a compact HS256 token carrying the principal's identity
//! claims and an expiry. Verification is a pure function of the token and
//! the configured key material: any failure (malformed token, bad signature,
//! expired) collapses to `None` and never reaches the caller as an error.

use std::fmt;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::error::Error;
use crate::principal::Principal;
use crate::role::Role;

/// Identity claims carried by a signed credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the opaque user identifier
    pub sub: String,
    /// Contact email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Granted role
    pub role: Role,
    /// Expiry as a unix timestamp (seconds)
    pub exp: i64,
}

impl Claims {
    /// Converts verified claims into the principal they describe.
    pub fn into_principal(self) -> Principal {
        Principal {
            user_id: self.sub,
            email: self.email,
            name: self.name,
            role: self.role,
        }
    }
}

/// Signing-key configuration for issuing and verifying credentials.
///
/// Constructed explicitly and handed to the [`AccessGate`](crate::AccessGate)
/// rather than read from ambient global state, so tests can substitute their
/// own key material.
///
/// # Examples
///
/// ```
/// use pdi_core::{CredentialKeys, Principal, Role};
/// use time::Duration;
///
/// let keys = CredentialKeys::new(b"test-signing-secret", Duration::hours(8));
/// let principal = Principal {
///     user_id: "u-1".to_string(),
///     email: "alice@example.com".to_string(),
///     name: "Alice".to_string(),
///     role: Role::Client,
/// };
///
/// let token = keys.issue(&principal).expect("issue succeeds");
/// let claims = keys.verify(&token).expect("token is valid");
/// assert_eq!(claims.into_principal(), principal);
/// ```
pub struct CredentialKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl fmt::Debug for CredentialKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Key material must never appear in logs
        f.debug_struct("CredentialKeys")
            .field("algorithm", &Algorithm::HS256)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl CredentialKeys {
    /// Creates a key configuration from an HMAC secret and a token lifetime.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Issues a signed credential for the given principal.
    ///
    /// The credential expires `ttl` after the moment of issue.
    ///
    /// # Errors
    ///
    /// Returns an `Internal` error if signing fails.
    pub fn issue(&self, principal: &Principal) -> Result<String, Error> {
        let claims = Claims {
            sub: principal.user_id.clone(),
            email: principal.email.clone(),
            name: principal.name.clone(),
            role: principal.role,
            exp: (OffsetDateTime::now_utc() + self.ttl).unix_timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| Error::internal(format!("credential signing failed: {e}")))
    }

    /// Verifies a credential's signature and expiry.
    ///
    /// Returns the decoded claims on success. Any verification failure
    /// (malformed token, wrong signature, expired) returns `None`; this
    /// method never panics and never surfaces an error to the caller.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        match decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!("credential rejected: {e}");
                None
            }
        }
    }
}
