use bpg_common::{Money, Secret};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum PaymentProcessorError {
    #[error("The payment gateway could not be reached. {0}")]
    Unavailable(String),
    #[error("The payment gateway sent a response we could not use. {0}")]
    InvalidResponse(String),
    #[error("The payment gateway did not respond in time")]
    Timeout,
}

/// Everything a gateway needs to start a transaction.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub amount: Money,
    /// The gateway calls this URL when the payment is settled.
    pub webhook_url: String,
    /// The gateway must present this as `Authorization: Bearer <webhook_secret>` when calling `webhook_url`.
    pub webhook_secret: Secret<String>,
    /// Where the gateway sends the customer once they are done.
    pub redirect_url: String,
}

/// A payment gateway that the customer can be handed off to.
///
/// Implementations make a single attempt and fail fast. They must not retry.
#[allow(async_fn_in_trait)]
pub trait PaymentProcessor {
    /// Registers a transaction with the gateway and returns the URL the customer should be redirected to.
    async fn initiate_transaction(&self, request: PaymentRequest) -> Result<String, PaymentProcessorError>;
}
