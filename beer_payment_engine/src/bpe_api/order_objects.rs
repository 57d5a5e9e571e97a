use bpg_common::helpers::join_url;
use serde::Serialize;

use crate::db_types::{Card, Order, OrderId};

/// The public base URL that the gateway and the customer use to reach this server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackUrls {
    base_url: String,
}

impl CallbackUrls {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self { base_url: base_url.into() }
    }

    /// The URL the gateway calls once the order is settled.
    pub fn webhook_url(&self, order_id: &OrderId) -> String {
        join_url(&self.base_url, &format!("order/{order_id}"))
    }

    /// The page the customer lands on after paying.
    pub fn redirect_url(&self, card_server_id: i64) -> String {
        join_url(&self.base_url, &format!("client/{card_server_id}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderCreated {
    pub order: Order,
    /// Where the customer must go to pay for the order.
    pub redirect_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum SettlementOutcome {
    Settled { order: Order, card: Option<Card> },
    AlreadySettled { order: Order },
}

impl SettlementOutcome {
    pub fn order(&self) -> &Order {
        match self {
            SettlementOutcome::Settled { order, .. } => order,
            SettlementOutcome::AlreadySettled { order } => order,
        }
    }

    pub fn is_replay(&self) -> bool {
        matches!(self, SettlementOutcome::AlreadySettled { .. })
    }
}
