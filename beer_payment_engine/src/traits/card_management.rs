use crate::{
    db_types::{Card, NewCard},
    traits::StoreError,
};

/// Read access to prepaid cards, plus issuance of new ones.
///
/// Note that there is no way to change a card's balance through this trait. Balances only move through
/// [`crate::traits::SettlementDatabase::settle_order`].
#[allow(async_fn_in_trait)]
pub trait CardManagement {
    /// Fetches the card with the number printed on it, `server_id`.
    async fn fetch_card_by_server_id(&self, server_id: i64) -> Result<Option<Card>, StoreError>;

    /// Fetches the card using the store's internal id.
    async fn fetch_card_by_id(&self, id: i64) -> Result<Option<Card>, StoreError>;

    /// Stores a new card with a zero balance. Fails with [`StoreError::Conflict`] if the `server_id` is already taken.
    async fn insert_card(&self, card: NewCard) -> Result<Card, StoreError>;

    /// The largest `server_id` issued so far, or `None` if there are no cards at all.
    async fn highest_server_id(&self) -> Result<Option<i64>, StoreError>;
}
