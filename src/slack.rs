use crate::config::ConfigError;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

pub const TIMESTAMP_HEADER: &str = "X-Slack-Request-Timestamp";
pub const SIGNATURE_HEADER: &str = "X-Slack-Signature";

const SIGNATURE_VERSION: &str = "v0";

/// Slack signing secret, keyed into an HMAC instance once at startup.
///
/// Every request clones the keyed state instead of re-deriving it, so signing
/// has no failure path at request time.
#[derive(Clone)]
pub struct SigningSecret {
    mac: HmacSha256,
}

impl SigningSecret {
    pub fn new(secret: &str) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::Missing("SLACK_SECRET"));
        }
        let mac =
            HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| ConfigError::Invalid {
                name: "SLACK_SECRET",
                reason: e.to_string(),
            })?;
        Ok(Self { mac })
    }

    /// Computes `v0=<hex hmac>` over `v0:{timestamp}:{raw_body}`.
    pub fn sign(&self, timestamp: &str, raw_body: &[u8]) -> String {
        let mut mac = self.mac.clone();
        mac.update(SIGNATURE_VERSION.as_bytes());
        mac.update(b":");
        mac.update(timestamp.as_bytes());
        mac.update(b":");
        mac.update(raw_body);
        format!(
            "{}={}",
            SIGNATURE_VERSION,
            hex::encode(mac.finalize().into_bytes())
        )
    }

    pub fn verify(&self, timestamp: &str, raw_body: &[u8], signature: &str) -> bool {
        let computed = self.sign(timestamp, raw_body);
        computed.as_bytes().ct_eq(signature.as_bytes()).into()
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}
