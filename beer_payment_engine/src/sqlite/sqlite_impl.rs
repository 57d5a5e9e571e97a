//! `SqliteDatabase` is a concrete implementation of a beer payment engine backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the [`crate::traits`]
//! module.
use std::fmt::Debug;

use log::*;
use sqlx::{migrate, SqlitePool};

use super::db::{cards, new_pool, orders};
use crate::{
    db_types::{Card, CardUpdate, NewCard, NewOrder, Order, OrderId, OrderStatusType},
    traits::{CardCredit, CardManagement, OrderManagement, SettlementDatabase, SettlementResult, StoreError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl CardManagement for SqliteDatabase {
    async fn fetch_card_by_server_id(&self, server_id: i64) -> Result<Option<Card>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let card = cards::fetch_card_by_server_id(server_id, &mut conn).await?;
        Ok(card)
    }

    async fn fetch_card_by_id(&self, id: i64) -> Result<Option<Card>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let card = cards::fetch_card_by_id(id, &mut conn).await?;
        Ok(card)
    }

    async fn insert_card(&self, card: NewCard) -> Result<Card, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let card = cards::insert_card(card, &mut conn).await?;
        Ok(card)
    }

    async fn highest_server_id(&self) -> Result<Option<i64>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let id = cards::highest_server_id(&mut conn).await?;
        Ok(id)
    }
}

impl OrderManagement for SqliteDatabase {
    async fn fetch_order_by_id(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_id(id, &mut conn).await?;
        Ok(order)
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::insert_order(order, &mut conn).await?;
        Ok(order)
    }
}

impl SettlementDatabase for SqliteDatabase {
    /// In a single atomic transaction,
    /// * moves the order out of `Pending`. If the order is no longer `Pending`, the transaction is abandoned and
    ///   `AlreadySettled` is returned.
    /// * credits the card that owns the order, if a credit was requested.
    async fn settle_order(
        &self,
        order_id: &OrderId,
        new_status: OrderStatusType,
        credit: Option<CardCredit>,
    ) -> Result<SettlementResult, StoreError> {
        let mut tx = self.pool.begin().await?;
        let Some(order) = orders::transition_status_if_pending(order_id, new_status, &mut tx).await? else {
            let current = orders::fetch_order_by_id(order_id, &mut tx).await?;
            tx.rollback().await?;
            return match current {
                Some(order) => {
                    debug!("🗃️ Order {order_id} was already {}. Nothing to do.", order.status);
                    Ok(SettlementResult::AlreadySettled(order))
                },
                None => Err(StoreError::OrderNotFound(*order_id)),
            };
        };
        let card = match credit {
            Some(credit) => {
                let update = CardUpdate::credit(credit.quantity, credit.at);
                let card = cards::update_card(order.card_id, update, &mut tx)
                    .await?
                    .ok_or(StoreError::CardNotFound(order.card_id))?;
                debug!(
                    "🗃️ Card #{} credited with {} units. Balance is now {}",
                    card.server_id, credit.quantity, card.balance
                );
                Some(card)
            },
            None => None,
        };
        tx.commit().await?;
        info!("🗃️ Order {order_id} settled as {new_status}");
        Ok(SettlementResult::Settled { order, card })
    }
}

impl SqliteDatabase {
    /// Opens a connection pool on the database at `url`. The url comes from the server configuration.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// The URL of the database
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Brings the schema up to date.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
