//! Beer Payment Engine
//!
//! The beer payment engine sells beer against prepaid cards. A customer asks for a number of beers on their card, is
//! sent off to a payment gateway to pay, and once the gateway confirms the payment the beers are credited to the card.
//! This library contains the core logic. It knows nothing about HTTP.
//!
//! The library is divided into three main sections:
//! 1. The data types stored in the database ([`mod@db_types`]).
//! 2. The contracts that storage backends and payment gateways must fulfil ([`mod@traits`]). An SQLite backend is
//!    provided behind the `sqlite` feature.
//! 3. The payment engine public API ([`mod@bpe_api`]): order creation, settlement, card management and webhook
//!    authentication.
//!
//! The central guarantee of the engine is that a card is credited at most once per order, regardless of how many times
//! the gateway delivers its settlement callback.
#[cfg(feature = "sqlite")]
mod sqlite;

pub mod bpe_api;
pub mod db_types;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use bpe_api::{
    card_api::{CardApi, ADMIN_CARD_ID},
    errors::OrderFlowError,
    order_flow_api::OrderFlowApi,
    order_objects,
    settlement_api::SettlementApi,
    webhook_auth::WebhookAuthenticator,
};
#[cfg(feature = "sqlite")]
pub use sqlite::{db, SqliteDatabase};
pub use traits::{
    CardCredit,
    CardManagement,
    OrderManagement,
    PaymentProcessor,
    PaymentProcessorError,
    PaymentRequest,
    SettlementDatabase,
    SettlementResult,
    StoreError,
};
