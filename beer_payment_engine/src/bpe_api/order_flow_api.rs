use std::{fmt::Debug, time::Duration};

use bpg_common::{Secret, UnitPrice};
use log::*;

use crate::{
    bpe_api::{
        errors::OrderFlowError,
        order_objects::{CallbackUrls, OrderCreated},
    },
    db_types::NewOrder,
    traits::{CardManagement, OrderManagement, PaymentProcessor, PaymentProcessorError, PaymentRequest},
};

pub const DEFAULT_PROCESSOR_TIMEOUT: Duration = Duration::from_secs(10);

/// `OrderFlowApi` turns a customer's request for beer into a `Pending` order and hands the customer off to the payment
/// gateway.
///
/// It never touches a card's balance. That happens in [`crate::SettlementApi`] once the gateway confirms payment.
pub struct OrderFlowApi<B, P> {
    db: B,
    processor: P,
    webhook_secret: Secret<String>,
    timeout: Duration,
}

impl<B, P> Debug for OrderFlowApi<B, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi (timeout: {:?})", self.timeout)
    }
}

impl<B, P> OrderFlowApi<B, P> {
    pub fn new(db: B, processor: P, webhook_secret: Secret<String>) -> Self {
        Self { db, processor, webhook_secret, timeout: DEFAULT_PROCESSOR_TIMEOUT }
    }

    /// Sets how long to wait for the payment gateway before giving up on it.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl<B, P> OrderFlowApi<B, P>
where
    B: CardManagement + OrderManagement,
    P: PaymentProcessor,
{
    /// Creates an order for `quantity` units against the card numbered `card_server_id`, and asks the payment gateway
    /// where the customer should go to pay for it.
    ///
    /// * The quantity must be positive, and the card must exist. Otherwise, nothing is stored.
    /// * The order total is `quantity × unit_price`, rounded to the cent.
    /// * The order is stored as `Pending` *before* the gateway is called. If the gateway fails, the order is left as it
    ///   is and [`OrderFlowError::UpstreamError`] is returned. A pending order that is never paid does no harm.
    pub async fn create_order(
        &self,
        card_server_id: i64,
        quantity: i64,
        unit_price: UnitPrice,
        callbacks: &CallbackUrls,
    ) -> Result<OrderCreated, OrderFlowError> {
        if quantity <= 0 {
            debug!("🔄️📦️ Rejecting order for card #{card_server_id}. Quantity {quantity} is not positive.");
            return Err(OrderFlowError::InvalidArgument(format!("Quantity must be positive. Got {quantity}")));
        }
        let card = self
            .db
            .fetch_card_by_server_id(card_server_id)
            .await?
            .ok_or_else(|| OrderFlowError::NotFound(format!("Card {card_server_id} not found")))?;
        let total = unit_price.total_for(quantity)?;
        let order = self.db.insert_order(NewOrder::new(card.id, quantity, total)).await?;
        info!("🔄️📦️ Order {} for for {quantity} units on card #{card_server_id}. Total: {total}", order.id);
        let request = PaymentRequest {
            amount: total,
            webhook_url: callbacks.webhook_url(&order.id),
            webhook_secret: self.webhook_secret.clone(),
            redirect_url: callbacks.redirect_url(card_server_id),
        };
        let redirect_url = tokio::time::timeout(self.timeout, self.processor.initiate_transaction(request))
            .await
            .unwrap_or(Err(PaymentProcessorError::Timeout))
            .map_err(|e| {
                warn!("🔄️📦️ Payment gateway failed for order {}. The order remains pending. {e}", order.id);
                OrderFlowError::from(e)
            })?;
        debug!("🔄️📦️ Order {} handed off to the payment gateway at {redirect_url}", order.id);
        Ok(OrderCreated { order, redirect_url })
    }
}
