#![allow(dead_code)]
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use beer_payment_engine::{
    db_types::{Card, OrderId, OrderStatusType},
    order_objects::CallbackUrls,
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    CardApi,
    CardManagement,
    OrderFlowApi,
    PaymentProcessor,
    PaymentProcessorError,
    PaymentRequest,
    SettlementApi,
    SqliteDatabase,
};
use bpg_common::{Secret, UnitPrice};
use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};

pub const WEBHOOK_SECRET: &str = "s3cr3t";
pub const BASE_URL: &str = "http://beer.test";

#[derive(Clone, Copy, Debug)]
pub enum StubBehaviour {
    Succeed,
    Fail,
    Hang,
}

/// A payment processor that records what it is asked to do and answers according to its `StubBehaviour`.
#[derive(Clone)]
pub struct StubProcessor {
    behaviour: StubBehaviour,
    requests: Arc<Mutex<Vec<PaymentRequest>>>,
}

impl StubProcessor {
    pub fn new(behaviour: StubBehaviour) -> Self {
        Self { behaviour, requests: Arc::new(Mutex::new(Vec::new())) }
    }

    pub fn requests(&self) -> Vec<PaymentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl PaymentProcessor for StubProcessor {
    async fn initiate_transaction(&self, request: PaymentRequest) -> Result<String, PaymentProcessorError> {
        self.requests.lock().unwrap().push(request);
        match self.behaviour {
            StubBehaviour::Succeed => Ok("https://pay.test/checkout/abc".to_string()),
            StubBehaviour::Fail => Err(PaymentProcessorError::Unavailable("connection refused".to_string())),
            StubBehaviour::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok("https://pay.test/too-late".to_string())
            },
        }
    }
}

pub struct TestEnv {
    pub db: SqliteDatabase,
    pub processor: StubProcessor,
    pub orders: OrderFlowApi<SqliteDatabase, StubProcessor>,
    pub settlement: SettlementApi<SqliteDatabase>,
    pub cards: CardApi<SqliteDatabase>,
}

pub async fn setup(behaviour: StubBehaviour) -> TestEnv {
    let url = random_db_path();
    let db = prepare_test_env(&url).await;
    let processor = StubProcessor::new(behaviour);
    let orders = OrderFlowApi::new(db.clone(), processor.clone(), Secret::new(WEBHOOK_SECRET.to_string()))
        .with_timeout(Duration::from_millis(200));
    let settlement = SettlementApi::new(db.clone());
    let cards = CardApi::new(db.clone());
    TestEnv { db, processor, orders, settlement, cards }
}

pub async fn tear_down(env: TestEnv) {
    let url = env.db.url().to_string();
    env.db.close().await;
    if let Err(e) = Sqlite::drop_database(&url).await {
        warn!("🚀️ Failed to drop test database {url}: {e}");
    }
}

pub fn callbacks() -> CallbackUrls {
    CallbackUrls::new(BASE_URL)
}

pub fn price(s: &str) -> UnitPrice {
    s.parse().unwrap()
}

pub async fn count_orders(db: &SqliteDatabase) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM orders").fetch_one(db.pool()).await.unwrap()
}

pub async fn card(db: &SqliteDatabase, server_id: i64) -> Card {
    db.fetch_card_by_server_id(server_id).await.unwrap().expect("card should exist")
}

/// Creates an order for `quantity` units on the card and settles it as `Completed`.
pub async fn buy(env: &TestEnv, server_id: i64, quantity: i64) -> OrderId {
    let created = env.orders.create_order(server_id, quantity, price("2.50"), &callbacks()).await.unwrap();
    env.settlement.settle(&created.order.id, OrderStatusType::Completed).await.unwrap();
    created.order.id
}
