use beer_payment_engine::{
    db_types::{Card, NewCard, NewOrder, Order, OrderId, OrderStatusType},
    traits::{
        CardCredit,
        CardManagement,
        OrderManagement,
        PaymentProcessor,
        PaymentProcessorError,
        PaymentRequest,
        SettlementDatabase,
        SettlementResult,
        StoreError,
    },
};
use mockall::mock;

mock! {
    pub Store {}
    impl CardManagement for Store {
        async fn fetch_card_by_server_id(&self, server_id: i64) -> Result<Option<Card>, StoreError>;
        async fn fetch_card_by_id(&self, id: i64) -> Result<Option<Card>, StoreError>;
        async fn insert_card(&self, card: NewCard) -> Result<Card, StoreError>;
        async fn highest_server_id(&self) -> Result<Option<i64>, StoreError>;
    }
    impl OrderManagement for Store {
        async fn fetch_order_by_id(&self, id: &OrderId) -> Result<Option<Order>, StoreError>;
        async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError>;
    }
    impl SettlementDatabase for Store {
        async fn settle_order(
            &self,
            order_id: &OrderId,
            new_status: OrderStatusType,
            credit: Option<CardCredit>,
        ) -> Result<SettlementResult, StoreError>;
    }
}

mock! {
    pub Processor {}
    impl PaymentProcessor for Processor {
        async fn initiate_transaction(&self, request: PaymentRequest) -> Result<String, PaymentProcessorError>;
    }
}
