use bpg_common::Secret;
use log::*;
use subtle::ConstantTimeEq;

/// Checks that a settlement callback really comes from the payment gateway.
///
/// The gateway was given the shared secret when the transaction was created, and must present it as
/// `Authorization: Bearer <secret>` when calling back.
#[derive(Clone)]
pub struct WebhookAuthenticator {
    expected: Secret<String>,
}

impl WebhookAuthenticator {
    pub fn new(secret: Secret<String>) -> Self {
        let expected = if secret.is_empty() {
            warn!("🔐️ The webhook secret is empty. Every settlement callback will be rejected.");
            Secret::default()
        } else {
            Secret::new(format!("Bearer {}", secret.reveal()))
        };
        Self { expected }
    }

    /// Returns true if the `Authorization` header value matches the expected bearer token.
    ///
    /// The comparison runs in constant time. A missing header, or an empty configured secret, always fails.
    pub fn authenticate(&self, authorization: Option<&str>) -> bool {
        let Some(header) = authorization else {
            return false;
        };
        if self.expected.is_empty() {
            return false;
        }
        header.as_bytes().ct_eq(self.expected.reveal().as_bytes()).into()
    }
}
