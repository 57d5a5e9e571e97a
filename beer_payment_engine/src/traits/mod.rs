//! # Store and processor contracts.
//!
//! This module defines the interfaces that a backend must expose in order to drive the beer payment engine.
//!
//! * [`CardManagement`] reads and issues prepaid cards.
//! * [`OrderManagement`] reads and inserts orders.
//! * [`SettlementDatabase`] is the highest level of behaviour. It applies a gateway confirmation to an order and its
//!   card in a single atomic step.
//! * [`PaymentProcessor`] hands an order off to an external payment gateway and returns the URL the customer must be
//!   redirected to.
mod card_management;
mod errors;
mod order_management;
mod payment_processor;
mod settlement_database;

pub use card_management::CardManagement;
pub use errors::StoreError;
pub use order_management::OrderManagement;
pub use payment_processor::{PaymentProcessor, PaymentProcessorError, PaymentRequest};
pub use settlement_database::{CardCredit, SettlementDatabase, SettlementResult};
