use crate::{
    db_types::{NewOrder, Order, OrderId},
    traits::StoreError,
};

#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    async fn fetch_order_by_id(&self, id: &OrderId) -> Result<Option<Order>, StoreError>;

    /// Stores a new order in the `Pending` state and returns it with the id the store assigned to it.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError>;
}
