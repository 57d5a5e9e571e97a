//! The public API of the beer payment engine.
//!
//! * [`order_flow_api::OrderFlowApi`] creates orders and hands customers off to the payment gateway.
//! * [`settlement_api::SettlementApi`] applies the gateway's confirmation to the order and its card.
//! * [`card_api::CardApi`] issues cards and reports balances.
//! * [`webhook_auth::WebhookAuthenticator`] gates the settlement callback.
pub mod card_api;
pub mod errors;
pub mod order_flow_api;
pub mod order_objects;
pub mod settlement_api;
pub mod webhook_auth;
