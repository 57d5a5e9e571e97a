use std::fmt::Debug;

use log::*;

use crate::{
    bpe_api::errors::OrderFlowError,
    db_types::{Card, NewCard},
    traits::CardManagement,
};

/// The card that is always present, numbered zero.
pub const ADMIN_CARD_ID: i64 = 0;

/// Issues cards and looks up their balances.
pub struct CardApi<B> {
    db: B,
}

impl<B> Debug for CardApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CardApi")
    }
}

impl<B> CardApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> CardApi<B>
where B: CardManagement
{
    pub async fn fetch_card(&self, server_id: i64) -> Result<Card, OrderFlowError> {
        self.db
            .fetch_card_by_server_id(server_id)
            .await?
            .ok_or_else(|| OrderFlowError::NotFound(format!("Card {server_id} not found")))
    }

    /// Issues a new card with a zero balance, numbered one above the highest card issued so far.
    pub async fn issue_card(&self) -> Result<Card, OrderFlowError> {
        let next = match self.db.highest_server_id().await? {
            Some(id) => {
                id.checked_add(1).ok_or_else(|| OrderFlowError::InternalError("Card numbers exhausted".into()))?
            },
            None => ADMIN_CARD_ID + 1,
        };
        let card = self.db.insert_card(NewCard::new(next)).await?;
        info!("💳️ Issued card #{}", card.server_id);
        Ok(card)
    }

    /// Makes sure that the admin card exists, creating it if necessary.
    pub async fn ensure_admin_card(&self) -> Result<Card, OrderFlowError> {
        if let Some(card) = self.db.fetch_card_by_server_id(ADMIN_CARD_ID).await? {
            trace!("💳️ Admin card already exists");
            return Ok(card);
        }
        let card = self.db.insert_card(NewCard::new(ADMIN_CARD_ID)).await?;
        info!("💳️ Created the admin card #{ADMIN_CARD_ID}");
        Ok(card)
    }
}
