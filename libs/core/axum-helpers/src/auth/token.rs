use axum::http::{header, HeaderMap};
use sha2::{Digest, Sha256};
use std::fmt;

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// A configured shared secret.
///
/// Only the SHA-256 digest is kept. Presented tokens are hashed before
/// comparison so the check does not depend on the secret's length or prefix.
#[derive(Clone)]
pub struct TriggerToken {
    digest: [u8; 32],
}

impl TriggerToken {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            digest: Sha256::digest(secret.as_ref()).into(),
        }
    }

    pub fn verify(&self, presented: &str) -> bool {
        let presented: [u8; 32] = Sha256::digest(presented.as_bytes()).into();
        presented
            .iter()
            .zip(self.digest.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

// Never print the secret, not even its digest
impl fmt::Debug for TriggerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TriggerToken(***)")
    }
}
