use std::fmt::Debug;

use log::*;

use crate::{
    bpe_api::{errors::OrderFlowError, order_objects::SettlementOutcome},
    db_types::{OrderId, OrderStatusType},
    traits::{CardCredit, SettlementDatabase, SettlementResult},
};

/// `SettlementApi` applies the payment gateway's verdict on an order.
///
/// The gateway may deliver the same callback several times, or several copies at once. Each order moves out of
/// `Pending` exactly once, and its card is credited at most once, no matter how many callbacks arrive.
///
/// Callers must authenticate the callback (see [`crate::WebhookAuthenticator`]) before calling into this API.
pub struct SettlementApi<B> {
    db: B,
}

impl<B> Debug for SettlementApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SettlementApi")
    }
}

impl<B> SettlementApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> SettlementApi<B>
where B: SettlementDatabase
{
    /// Settles the order with the status reported by the gateway.
    ///
    /// * `Completed` closes the order and adds its quantity to the card balance.
    /// * `Failed` closes the order without touching the card.
    /// * `Pending` is not a settlement and is rejected with [`OrderFlowError::InvalidArgument`].
    ///
    /// If the order has already been settled, this is a successful no-op and
    /// [`SettlementOutcome::AlreadySettled`] is returned.
    pub async fn settle(
        &self,
        order_id: &OrderId,
        new_status: OrderStatusType,
    ) -> Result<SettlementOutcome, OrderFlowError> {
        if !new_status.is_terminal() {
            return Err(OrderFlowError::InvalidArgument(format!("{new_status} is not a valid settlement status")));
        }
        let order = self
            .db
            .fetch_order_by_id(order_id)
            .await?
            .ok_or_else(|| OrderFlowError::NotFound(format!("Order {order_id} not found")))?;
        if order.status.is_terminal() {
            debug!("🔄️✅️ Order {order_id} is already {}. Ignoring the {new_status} callback.", order.status);
            return Ok(SettlementOutcome::AlreadySettled { order });
        }
        // The store re-checks the status inside its own transaction, so a concurrent callback that slips past the check
        // above still cannot settle the order twice.
        let credit = new_status.credits_card().then(|| CardCredit::new(order.quantity));
        let outcome = match self.db.settle_order(order_id, new_status, credit).await? {
            SettlementResult::Settled { order, card } => {
                match &card {
                    Some(card) => info!(
                        "🔄️✅️ Order {order_id} is {new_status}. Card #{} now holds {} units",
                        card.server_id, card.balance
                    ),
                    None => info!("🔄️✅️ Order {order_id} is {new_status}. No credit applied."),
                }
                SettlementOutcome::Settled { order, card }
            },
            SettlementResult::AlreadySettled(order) => {
                debug!("🔄️✅️ Order {order_id} was settled by a concurrent callback");
                SettlementOutcome::AlreadySettled { order }
            },
        };
        Ok(outcome)
    }
}
