use bpg_common::MoneyError;
use thiserror::Error;

use crate::traits::{PaymentProcessorError, StoreError};

/// The errors a caller of the engine API can see. Each one maps onto a distinct outcome for the client.
#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("The payment gateway failed. {0}")]
    UpstreamError(String),
    #[error("Internal error. {0}")]
    InternalError(String),
}

impl From<StoreError> for OrderFlowError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::CardNotFound(id) => OrderFlowError::NotFound(format!("Card {id} not found")),
            StoreError::OrderNotFound(id) => OrderFlowError::NotFound(format!("Order {id} not found")),
            StoreError::DatabaseError(s) | StoreError::Conflict(s) => OrderFlowError::InternalError(s),
        }
    }
}

impl From<PaymentProcessorError> for OrderFlowError {
    fn from(e: PaymentProcessorError) -> Self {
        OrderFlowError::UpstreamError(e.to_string())
    }
}

impl From<MoneyError> for OrderFlowError {
    fn from(e: MoneyError) -> Self {
        OrderFlowError::InvalidArgument(e.to_string())
    }
}
