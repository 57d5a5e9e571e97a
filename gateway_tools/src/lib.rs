//! Client library for the external payment gateway.
//!
//! The gateway accepts a transaction request over HTTP and answers with a URL that the customer must be redirected
//! to. When the customer has paid (or given up), the gateway calls the webhook URL that was supplied in the request.
//!
//! * [`GatewayApi`] performs the outbound call.
//! * [`TransactionRequest`] and [`TransactionResponse`] describe the JSON contract.
//! * [`helpers`] holds URL fix-ups needed when talking to the local stand-in gateway.
mod api;
mod config;
mod error;

mod data_objects;
pub mod helpers;

pub use api::GatewayApi;
pub use config::GatewayConfig;
pub use data_objects::{TransactionRequest, TransactionResponse};
pub use error::GatewayApiError;
