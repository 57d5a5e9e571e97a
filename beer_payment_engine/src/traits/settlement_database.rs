use chrono::{DateTime, Utc};

use crate::{
    db_types::{Card, Order, OrderId, OrderStatusType},
    traits::{CardManagement, OrderManagement, StoreError},
};

/// The credit to apply to an order's card when the order is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardCredit {
    pub quantity: i64,
    pub at: DateTime<Utc>,
}

impl CardCredit {
    pub fn new(quantity: i64) -> Self {
        Self { quantity, at: Utc::now() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementResult {
    /// This call moved the order out of `Pending`. `card` holds the updated card if a credit was applied.
    Settled { order: Order, card: Option<Card> },
    /// Another call got there first. The order is returned as it currently stands.
    AlreadySettled(Order),
}

/// The highest level of behaviour for backends supporting the beer payment engine.
#[allow(async_fn_in_trait)]
pub trait SettlementDatabase: OrderManagement + CardManagement {
    /// Moves the order to `new_status` and, if `credit` is given, adds `credit.quantity` to the order's card.
    ///
    /// Both changes happen in a single atomic transaction. The status change is conditional on the order still being
    /// `Pending`; if that condition fails nothing is written and [`SettlementResult::AlreadySettled`] is returned. This
    /// is what guarantees that a card is credited at most once per order, however many times, or however
    /// concurrently, the gateway delivers its callback.
    async fn settle_order(
        &self,
        order_id: &OrderId,
        new_status: OrderStatusType,
        credit: Option<CardCredit>,
    ) -> Result<SettlementResult, StoreError>;
}
