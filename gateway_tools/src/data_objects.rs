use bpg_common::{Money, Secret};
use serde::{Deserialize, Serialize, Serializer};

/// The body of a transaction request sent to the payment gateway.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRequest {
    pub amount: Money,
    /// The gateway POSTs the outcome of the transaction here.
    pub webhook_url: String,
    /// The gateway sends this back as `Authorization: Bearer <webhook_key>` when it calls the webhook.
    #[serde(serialize_with = "reveal_secret")]
    pub webhook_key: Secret<String>,
    /// Where the gateway sends the customer once the payment page is done.
    pub redirect_url: String,
}

fn reveal_secret<S: Serializer>(secret: &Secret<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.reveal())
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TransactionResponse {
    #[serde(default)]
    pub url: Option<String>,
}

impl TransactionResponse {
    /// The redirect url, if the gateway supplied a non-empty one.
    pub fn redirect_url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}
