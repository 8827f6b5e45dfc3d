//! Request signing for the authenticated REST API
//!
//! Every private request carries four headers. The signature is
//! `base64(HMAC-SHA256(base64decode(secret), timestamp + METHOD + path + body))`
//! where `path` includes the query string.

use crate::error::{SdkError, SdkResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use ring::hmac;
use std::fmt;

pub const HEADER_KEY: &str = "CB-ACCESS-KEY";
pub const HEADER_SIGN: &str = "CB-ACCESS-SIGN";
pub const HEADER_TIMESTAMP: &str = "CB-ACCESS-TIMESTAMP";
pub const HEADER_PASSPHRASE: &str = "CB-ACCESS-PASSPHRASE";

/// API key, base64 secret and passphrase issued by the exchange
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key: String,
    secret: String,
    passphrase: String,
}

impl Credentials {
    pub fn new(
        key: impl Into<String>,
        secret: impl Into<String>,
        passphrase: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            passphrase: passphrase.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    fn signing_key(&self) -> SdkResult<hmac::Key> {
        let secret = STANDARD.decode(self.secret.trim()).map_err(|e| {
            SdkError::InvalidCredentials(format!("secret is not valid base64: {}", e))
        })?;
        Ok(hmac::Key::new(hmac::HMAC_SHA256, &secret))
    }

    /// Sign a request, returning the base64 encoded signature
    pub fn sign(
        &self,
        timestamp: &str,
        method: &str,
        request_path: &str,
        body: &str,
    ) -> SdkResult<String> {
        let key = self.signing_key()?;
        let tag = hmac::sign(&key, prehash(timestamp, method, request_path, body).as_bytes());
        Ok(STANDARD.encode(tag.as_ref()))
    }

    /// Check a signature produced by [`Credentials::sign`]
    pub fn verify(
        &self,
        timestamp: &str,
        method: &str,
        request_path: &str,
        body: &str,
        signature: &str,
    ) -> bool {
        let Ok(key) = self.signing_key() else {
            return false;
        };
        let Ok(tag) = STANDARD.decode(signature) else {
            return false;
        };
        hmac::verify(
            &key,
            prehash(timestamp, method, request_path, body).as_bytes(),
            &tag,
        )
        .is_ok()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .field("passphrase", &"<redacted>")
            .finish()
    }
}

fn prehash(timestamp: &str, method: &str, request_path: &str, body: &str) -> String {
    format!(
        "{}{}{}{}",
        timestamp,
        method.to_ascii_uppercase(),
        request_path,
        body
    )
}

/// Seconds since the unix epoch, as sent in `CB-ACCESS-TIMESTAMP`
pub fn timestamp() -> String {
    chrono::Utc::now().timestamp().to_string()
}
